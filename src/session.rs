//! Scoped, mutually exclusive transactions over the Super I/O configuration
//! window.
//!
//! The chip exposes its configuration space through two consecutive byte
//! ports: an index port at the base address and a data port right after it.
//! The window is multiplexed with other on-board consumers (hardware
//! monitoring most notably), so a session reserves it for exactly one
//! transaction: unlock handshake on open, lock handshake and release on drop,
//! on every exit path.

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::port::PortIo;

/// Logical device select register.
const LDSEL_REG: u8 = 0x07;

/// Magic byte, written twice to the index port to unlock the config space.
const UNLOCK_KEY: u8 = 0x87;

/// First byte of the lock handshake.
const LOCK_KEY: u8 = 0xAA;

/// Base addresses currently held by an open session. Userspace stand-in for
/// the kernel's muxed-region reservation on the 2-port window.
static RESERVED: Mutex<Vec<u16>> = Mutex::new(Vec::new());

/// Reserve the 2-port window at `base`, failing immediately on contention.
fn reserve(base: u16) -> Result<()> {
    let mut held = RESERVED.lock();
    if held.contains(&base) {
        return Err(Error::Busy);
    }
    held.push(base);
    Ok(())
}

fn release(base: u16) {
    RESERVED.lock().retain(|&b| b != base);
}

/// A live, exclusive transaction over the config window at one base address.
///
/// Holding a session is the only way to touch indexed registers; the chip is
/// relocked when the session drops.
pub struct SuperIoSession<'a, P: PortIo> {
    port: &'a P,
    base: u16,
}

impl<'a, P: PortIo> SuperIoSession<'a, P> {
    /// Reserve the window at `base` and perform the unlock handshake.
    ///
    /// Returns [`Error::Busy`] without blocking if another session holds the
    /// window.
    pub fn open(port: &'a P, base: u16) -> Result<Self> {
        reserve(base)?;
        // From here on Drop relocks and releases, also if a write faults.
        let session = Self { port, base };
        session.port.write_byte(base, UNLOCK_KEY)?;
        session.port.write_byte(base, UNLOCK_KEY)?;
        Ok(session)
    }

    /// Base address of the index port.
    pub const fn base(&self) -> u16 {
        self.base
    }

    const fn data_port(&self) -> u16 {
        self.base + 1
    }

    /// Select the logical device whose bank-scoped registers subsequent
    /// accesses hit.
    ///
    /// The selection does not persist across sessions; every session that
    /// touches bank-scoped registers must re-select.
    pub fn select_bank(&self, bank: u8) -> Result<()> {
        self.write_register(LDSEL_REG, bank)
    }

    /// Read the indexed register at `offset`.
    pub fn read_register(&self, offset: u8) -> Result<u8> {
        self.port.write_byte(self.base, offset)?;
        self.port.read_byte(self.data_port())
    }

    /// Write `value` to the indexed register at `offset`.
    pub fn write_register(&self, offset: u8, value: u8) -> Result<()> {
        self.port.write_byte(self.base, offset)?;
        self.port.write_byte(self.data_port(), value)
    }

    /// Assemble a 16-bit value from the registers at `offset` (high byte)
    /// and `offset + 1` (low byte).
    pub fn read_register_u16(&self, offset: u8) -> Result<u16> {
        let high = u16::from(self.read_register(offset)?);
        let low = u16::from(self.read_register(offset + 1)?);
        Ok((high << 8) | low)
    }

    /// Set the bits of `mask` in the register at `offset` if they are not
    /// already set, leaving unrelated bits untouched.
    pub fn set_register_bits(&self, offset: u8, mask: u8) -> Result<()> {
        let val = self.read_register(offset)?;
        if val & mask != mask {
            self.write_register(offset, val | mask)?;
        }
        Ok(())
    }
}

impl<P: PortIo> Drop for SuperIoSession<'_, P> {
    fn drop(&mut self) {
        // Lock handshake: 0xAA on the index port, then CR02 = 0x02. A
        // transport fault here is unrecoverable; log it and release anyway.
        let lock_sequence = [
            (self.base, LOCK_KEY),
            (self.base, 0x02),
            (self.data_port(), 0x02),
        ];
        for (port, byte) in lock_sequence {
            if let Err(e) = self.port.write_byte(port, byte) {
                tracing::warn!(base = self.base, "failed to relock config space: {e}");
                break;
            }
        }
        release(self.base);
    }
}
