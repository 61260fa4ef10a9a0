//! Byte-wide I/O port access primitives.
//!
//! The Super I/O protocol only ever touches single bytes on two consecutive
//! ports. Everything above this module goes through [`PortIo`], so the
//! production `/dev/port` backend and the in-memory chip model used by the
//! tests are interchangeable.

use std::fs::{File, OpenOptions};
use std::os::unix::fs::FileExt;
use std::path::Path;

use crate::error::Result;

/// Byte-level access to the x86 I/O port space.
pub trait PortIo: Send + Sync {
    /// Read one byte from `port`.
    fn read_byte(&self, port: u16) -> Result<u8>;

    /// Write one byte to `port`.
    fn write_byte(&self, port: u16, value: u8) -> Result<()>;
}

/// Default port device path.
const DEV_PORT: &str = "/dev/port";

/// Port access through the Linux `/dev/port` character device, where the
/// file offset is the port number. Requires root.
pub struct DevPort {
    device: File,
}

impl DevPort {
    /// Open `/dev/port` for read/write access.
    pub fn open() -> Result<Self> {
        Self::open_path(DEV_PORT)
    }

    fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let device = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Self { device })
    }
}

impl PortIo for DevPort {
    fn read_byte(&self, port: u16) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.device.read_exact_at(&mut buf, u64::from(port))?;
        Ok(buf[0])
    }

    fn write_byte(&self, port: u16, value: u8) -> Result<()> {
        self.device.write_all_at(&[value], u64::from(port))?;
        Ok(())
    }
}
