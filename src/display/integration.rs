// Integration helpers for connecting PPU with display system
//
// This module provides utilities to convert PPU frame buffer data
// into the display system's frame buffer format.

/// Copy a PPU frame buffer into an RGBA pixel surface.
///
/// The PPU frame buffer holds already-resolved 24-bit colors
/// (0x00RRGGBB), one per pixel; this just splits each entry into the
/// four RGBA bytes a `pixels`/`wgpu` surface expects.
///
/// # Arguments
///
/// * `ppu_frame` - Slice of resolved PPU colors (256×240 entries)
/// * `rgba_output` - Output buffer, at least `ppu_frame.len() * 4` bytes
///
/// # Example
///
/// ```rust,no_run
/// use nes_rs::Ppu;
/// use nes_rs::display::integration::copy_ppu_to_display;
///
/// let mut ppu = Ppu::new();
///
/// // Step the PPU until a frame completes
/// while !ppu.step() {}
///
/// let mut rgba = vec![0u8; 256 * 240 * 4];
/// copy_ppu_to_display(ppu.frame(), &mut rgba);
/// ```
pub fn copy_ppu_to_display(ppu_frame: &[u32], rgba_output: &mut [u8]) {
    const EXPECTED_SIZE: usize = 256 * 240;
    assert_eq!(
        ppu_frame.len(),
        EXPECTED_SIZE,
        "PPU frame buffer must be exactly 256×240 pixels"
    );
    assert!(
        rgba_output.len() >= ppu_frame.len() * 4,
        "RGBA output buffer too small for 256×240 pixels"
    );

    for (i, &color) in ppu_frame.iter().enumerate() {
        let offset = i * 4;
        rgba_output[offset] = ((color >> 16) & 0xFF) as u8; // R
        rgba_output[offset + 1] = ((color >> 8) & 0xFF) as u8; // G
        rgba_output[offset + 2] = (color & 0xFF) as u8; // B
        rgba_output[offset + 3] = 0xFF; // A
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_ppu_to_display() {
        let ppu_frame = vec![0x112233u32; 256 * 240];
        let mut rgba = vec![0u8; 256 * 240 * 4];

        copy_ppu_to_display(&ppu_frame, &mut rgba);

        assert_eq!(&rgba[0..4], &[0x11, 0x22, 0x33, 0xFF]);
        let last = (256 * 240 - 1) * 4;
        assert_eq!(&rgba[last..last + 4], &[0x11, 0x22, 0x33, 0xFF]);
    }

    #[test]
    #[should_panic(expected = "PPU frame buffer must be exactly 256×240 pixels")]
    fn test_copy_invalid_size() {
        let ppu_frame = vec![0u32; 100];
        let mut rgba = vec![0u8; 100 * 4];

        copy_ppu_to_display(&ppu_frame, &mut rgba);
    }
}
