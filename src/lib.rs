//! Userspace driver for the static RGB LED interface of the Nuvoton
//! NCT6795D/NCT6797D Super I/O chips found on many MSI motherboards.
//!
//! The chip is programmed through its indexed configuration space, reached
//! via a 2-byte I/O port window shared with other on-board consumers. Every
//! register access happens inside a [`SuperIoSession`]: an exclusive,
//! non-blocking reservation of the window bracketed by the chip's unlock and
//! lock handshakes. On top of that, [`RgbController`] detects the chip model
//! and writes per-channel 4-bit intensities into the pattern buffer of the
//! RGB logical device.
//!
//! Only static colors are exposed; the hardware's pulse/fade engine is
//! deliberately pinned off during [`RgbController::setup`].
//!
//! ```no_run
//! use nct6795d_led::{ColorChannel, DevPort, Intensity, RgbController, DEFAULT_BASE_PORTS};
//!
//! # fn main() -> nct6795d_led::Result<()> {
//! let port = DevPort::open()?;
//! let mut leds = RgbController::probe(port, &DEFAULT_BASE_PORTS, [Intensity::default(); 3])?;
//! leds.setup()?;
//! leds.set_intensity(ColorChannel::Red, Intensity::new(15)?)?;
//! # Ok(())
//! # }
//! ```

pub mod chip;
pub mod config;
pub mod controller;
pub mod error;
pub mod port;
pub mod session;

pub use chip::ChipIdentity;
pub use config::LedConfig;
pub use controller::{ColorChannel, ColorMask, Intensity, RgbController, DEFAULT_BASE_PORTS};
pub use error::{Error, Result};
pub use port::{DevPort, PortIo};
pub use session::SuperIoSession;
