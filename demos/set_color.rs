//! Probe the Super I/O chip and set a static color.
//!
//! Usage (as root):
//!   cargo run --example set_color -- <red> <green> <blue>
//! with each value in 0-15.

use nct6795d_led::{ColorMask, DevPort, Intensity, RgbController, DEFAULT_BASE_PORTS};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let values: Vec<u8> = std::env::args()
        .skip(1)
        .map(|arg| arg.parse())
        .collect::<Result<_, _>>()
        .map_err(|_| "usage: set_color <red> <green> <blue> (each 0-15)")?;
    let &[red, green, blue] = &values[..] else {
        return Err("usage: set_color <red> <green> <blue> (each 0-15)".into());
    };
    let initial = [
        Intensity::new(red)?,
        Intensity::new(green)?,
        Intensity::new(blue)?,
    ];

    let port = DevPort::open()?;
    let leds = RgbController::probe(port, &DEFAULT_BASE_PORTS, initial)?;
    println!(
        "found {} at base port {:#04x}",
        leds.identity().name(),
        leds.base_port()
    );

    leds.setup()?;
    leds.commit(ColorMask::all())?;
    println!("color set to R={red} G={green} B={blue}");

    Ok(())
}
