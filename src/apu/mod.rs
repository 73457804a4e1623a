// APU module - Audio Processing Unit register stub
//
// Audio synthesis is out of scope; the core only needs to let the CPU read
// and write the APU/IO register window without crashing or corrupting other
// state. Real channel synthesis, mixing, and the frame sequencer belong to
// a presentation-layer collaborator, not this crate.
//
// ## Register Map
//
// | Address | Name       | Notes                                   |
// |---------|------------|------------------------------------------|
// | $4000   | SQ1_VOL    | Pulse 1 duty/envelope                    |
// | $4001   | SQ1_SWEEP  | Pulse 1 sweep unit                       |
// | $4002   | SQ1_LO     | Pulse 1 timer low byte                   |
// | $4003   | SQ1_HI     | Pulse 1 length counter/timer high        |
// | $4004   | SQ2_VOL    | Pulse 2 duty/envelope                    |
// | $4005   | SQ2_SWEEP  | Pulse 2 sweep unit                       |
// | $4006   | SQ2_LO     | Pulse 2 timer low byte                   |
// | $4007   | SQ2_HI     | Pulse 2 length counter/timer high        |
// | $4008   | TRI_LINEAR | Triangle linear counter                  |
// | $400A   | TRI_LO     | Triangle timer low byte                  |
// | $400B   | TRI_HI     | Triangle length counter/timer high       |
// | $400C   | NOISE_VOL  | Noise envelope                           |
// | $400E   | NOISE_LO   | Noise mode/period                        |
// | $400F   | NOISE_HI   | Noise length counter                     |
// | $4010   | DMC_FREQ   | DMC flags/rate                           |
// | $4011   | DMC_RAW    | DMC direct load                          |
// | $4012   | DMC_START  | DMC sample address                       |
// | $4013   | DMC_LEN    | DMC sample length                        |
// | $4015   | SND_CHN    | Channel enable/status                    |
// | $4017   | FRAME_CNT  | Frame sequencer mode (routed via Bus)    |

use crate::bus::MemoryMappedDevice;

/// Size of the stub register bank; `$4000-$401F` masked to 5 bits.
const REGISTER_COUNT: usize = 32;

/// APU register stub.
///
/// Backs the CPU-visible `$4000-$4013`/`$4015`/`$4017` window with a flat
/// byte bank: writes are stored, reads return whatever was last written.
/// `$4015` additionally always reads back as `0` since no channel ever
/// reports itself active (real hardware reports length-counter status here).
pub struct Apu {
    registers: [u8; REGISTER_COUNT],
}

impl Apu {
    /// Create a new APU instance with all registers cleared.
    ///
    /// # Example
    ///
    /// ```
    /// use nes_rs::apu::Apu;
    ///
    /// let apu = Apu::new();
    /// ```
    pub fn new() -> Self {
        Apu {
            registers: [0; REGISTER_COUNT],
        }
    }

    /// Reset the APU to power-on state.
    pub fn reset(&mut self) {
        self.registers = [0; REGISTER_COUNT];
    }

    fn read_register(&self, addr: u16) -> u8 {
        let index = (addr & 0x1F) as usize;
        if index == 0x15 {
            // $4015 (SND_CHN): no channel ever reports active in the stub.
            0
        } else {
            self.registers[index]
        }
    }

    fn write_register(&mut self, addr: u16, data: u8) {
        let index = (addr & 0x1F) as usize;
        self.registers[index] = data;
    }
}

impl MemoryMappedDevice for Apu {
    fn read(&mut self, addr: u16) -> u8 {
        self.read_register(addr)
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.write_register(addr, data);
    }
}

impl Default for Apu {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apu_initialization() {
        let mut apu = Apu::new();
        for addr in 0x4000..=0x4013 {
            assert_eq!(apu.read(addr), 0x00);
        }
    }

    #[test]
    fn test_apu_default() {
        let mut apu = Apu::default();
        assert_eq!(apu.read(0x4000), 0x00);
    }

    #[test]
    fn test_write_then_read_roundtrips() {
        let mut apu = Apu::new();
        apu.write(0x4000, 0xBF);
        apu.write(0x4002, 0xA9);
        apu.write(0x4013, 0xFF);

        assert_eq!(apu.read(0x4000), 0xBF);
        assert_eq!(apu.read(0x4002), 0xA9);
        assert_eq!(apu.read(0x4013), 0xFF);
    }

    #[test]
    fn test_status_register_always_reads_zero() {
        let mut apu = Apu::new();
        apu.write(0x4015, 0xFF);
        assert_eq!(apu.read(0x4015), 0x00, "SND_CHN never reports active");
    }

    #[test]
    fn test_reset_clears_all_registers() {
        let mut apu = Apu::new();
        for addr in 0x4000..=0x4013 {
            apu.write(addr, 0xFF);
        }

        apu.reset();

        for addr in 0x4000..=0x4013 {
            assert_eq!(apu.read(addr), 0x00);
        }
    }

    #[test]
    fn test_write_does_not_crash() {
        let mut apu = Apu::new();
        for addr in 0x4000..=0x4017 {
            apu.write(addr, 0xFF);
        }
    }

    #[test]
    fn test_read_does_not_crash() {
        let mut apu = Apu::new();
        for addr in 0x4000..=0x4017 {
            let _ = apu.read(addr);
        }
    }
}
