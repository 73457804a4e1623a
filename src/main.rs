// NES Emulator - Main Entry Point
//
// Takes an optional path to a .nes ROM and runs it in a window. With no
// ROM given, shows a static test pattern instead.

use nes_rs::display::{run_display, WindowConfig};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("NES Emulator (nes-rs) v0.1.0");
    println!("==============================");
    println!();

    let rom_path = std::env::args().nth(1).map(PathBuf::from);

    // Create window configuration
    // Default: 3x scale, 60 FPS, VSync enabled
    let config = WindowConfig::new()
        .with_scale(3) // 768x720 window (256x240 * 3)
        .with_fps(60) // 60 FPS (NTSC)
        .with_vsync(true); // Enable VSync for smooth display

    println!("Press the close button or Ctrl+C to exit.");
    println!();

    run_display(config, rom_path)?;

    println!("Display window closed.");
    Ok(())
}
