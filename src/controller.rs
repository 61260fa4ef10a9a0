//! RGB controller: chip detection and static-color register programming.
//!
//! Register layout per the NCT6795D/NCT6797D RGB logical device (0x12): each
//! color channel owns four consecutive pattern registers holding eight 4-bit
//! time-frame slots. Static color means every slot carries the same nibble,
//! so an intensity is packed as `(v << 4) | v` and written to all four
//! registers.

use bitflags::bitflags;

use crate::chip::{ChipIdentity, DEVICE_ID_REG};
use crate::error::{Error, Result};
use crate::port::PortIo;
use crate::session::SuperIoSession;

/// Candidate config-window base addresses, probed in order.
pub const DEFAULT_BASE_PORTS: [u16; 2] = [0x4E, 0x2E];

/// RGB logical device number.
const RGB_DEVICE: u8 = 0x12;

/// RGB status register inside the RGB device and the enable bits within it.
const RGB_STATUS_REG: u8 = 0xE0;
const RGB_ENABLE_BITS: u8 = 0xE0;

/// Auxiliary logical device carrying the pattern timing engine, and the
/// enable bit the engine needs even for static output.
const AUX_DEVICE: u8 = 0x09;
const AUX_TIMING_REG: u8 = 0x2C;
const AUX_TIMING_BIT: u8 = 0x10;

/// Mode registers pinning the chip into static color: pulse/blink control,
/// step duration, fade/inversion flags.
const MODE_PULSE_REG: u8 = 0xE4;
const MODE_STEP_REG: u8 = 0xFE;
const MODE_FLAGS_REG: u8 = 0xFF;
const DEFAULT_STEP_DURATION: u8 = 0x25;

/// Pattern registers per channel (two nibble slots each).
const PATTERN_REG_COUNT: u8 = 4;

/// One of the three color channels of the RGB header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

impl ColorChannel {
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// First pattern register of this channel inside the RGB device.
    const fn base_register(self) -> u8 {
        match self {
            Self::Red => 0xF0,
            Self::Green => 0xF4,
            Self::Blue => 0xF8,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }

    /// The single-channel mask selecting this channel.
    pub const fn mask(self) -> ColorMask {
        match self {
            Self::Red => ColorMask::RED,
            Self::Green => ColorMask::GREEN,
            Self::Blue => ColorMask::BLUE,
        }
    }
}

bitflags! {
    /// Selection of channels a [`RgbController::commit`] call touches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ColorMask: u8 {
        const RED = 1 << 0;
        const GREEN = 1 << 1;
        const BLUE = 1 << 2;
    }
}

/// A per-channel brightness level, valid in `[0, 15]`.
///
/// The hardware field is 4 bits wide and silently truncates; values are
/// validated here instead so a rejected write never changes the visible
/// color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intensity(u8);

impl Intensity {
    pub const MAX: u8 = 0x0F;

    /// Validate a raw value against the 4-bit range.
    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX {
            return Err(Error::InvalidIntensity(value));
        }
        Ok(Self(value))
    }

    /// Map a legacy full-scale byte (0-255) down to the 4-bit range.
    pub const fn from_byte(value: u8) -> Self {
        Self(value >> 4)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// The value as written to a pattern register: the same nibble in both
    /// time-frame slots.
    pub const fn packed(self) -> u8 {
        (self.0 << 4) | self.0
    }
}

/// Controller for one detected chip instance.
///
/// Owns the port backend and the last-requested intensity per channel; every
/// register access happens inside a scoped [`SuperIoSession`].
#[derive(Debug)]
pub struct RgbController<P: PortIo> {
    port: P,
    base: u16,
    identity: ChipIdentity,
    levels: [Intensity; 3],
}

impl<P: PortIo> RgbController<P> {
    /// Probe `candidates` in order and build a controller for the first base
    /// address with a recognized chip.
    ///
    /// A mismatch moves on to the next candidate; [`Error::Busy`] and
    /// transport faults abort the probe. [`Error::NotFound`] when no
    /// candidate matches.
    pub fn probe(port: P, candidates: &[u16], initial: [Intensity; 3]) -> Result<Self> {
        for &base in candidates {
            match Self::detect(&port, base) {
                Ok(identity) => {
                    tracing::info!(base, chip = identity.name(), "chip detected");
                    return Ok(Self {
                        port,
                        base,
                        identity,
                        levels: initial,
                    });
                }
                Err(Error::NotFound) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(Error::NotFound)
    }

    /// Read and match the device ID at `base` within one session.
    ///
    /// Never mutates chip state; the session is closed whether or not the ID
    /// matched.
    pub fn detect(port: &P, base: u16) -> Result<ChipIdentity> {
        let session = SuperIoSession::open(port, base)?;
        let id = session.read_register_u16(DEVICE_ID_REG)?;
        ChipIdentity::from_device_id(id).ok_or(Error::NotFound)
    }

    /// One-time register configuration forcing deterministic static-color
    /// mode, regardless of whatever state firmware left behind.
    ///
    /// Must be re-run after every power-state transition that can reset the
    /// Super I/O configuration; see [`Self::resume`].
    pub fn setup(&self) -> Result<()> {
        let session = SuperIoSession::open(&self.port, self.base)?;

        // The pattern timing engine misbehaves without this bit, even though
        // only static output is programmed here.
        session.select_bank(AUX_DEVICE)?;
        session.set_register_bits(AUX_TIMING_REG, AUX_TIMING_BIT)?;

        session.select_bank(RGB_DEVICE)?;
        session.set_register_bits(RGB_STATUS_REG, RGB_ENABLE_BITS)?;

        session.write_register(MODE_PULSE_REG, 0x00)?;
        session.write_register(MODE_STEP_REG, DEFAULT_STEP_DURATION)?;
        session.write_register(MODE_FLAGS_REG, 0x00)?;

        Ok(())
    }

    /// Write the stored intensity of every channel in `mask` to its pattern
    /// registers, inside one session.
    ///
    /// Channels outside the mask keep their last-committed registers
    /// untouched. Session-open failure aborts before any write.
    pub fn commit(&self, mask: ColorMask) -> Result<()> {
        let session = SuperIoSession::open(&self.port, self.base)?;
        session.select_bank(RGB_DEVICE)?;

        tracing::debug!(
            red = self.levels[0].get(),
            green = self.levels[1].get(),
            blue = self.levels[2].get(),
            ?mask,
            "committing channel values"
        );

        for channel in ColorChannel::ALL {
            if !mask.contains(channel.mask()) {
                continue;
            }
            let packed = self.levels[channel.index()].packed();
            for i in 0..PATTERN_REG_COUNT {
                session.write_register(channel.base_register() + i, packed)?;
            }
        }

        Ok(())
    }

    /// Record a new intensity for `channel` and commit just that channel.
    pub fn set_intensity(&mut self, channel: ColorChannel, value: Intensity) -> Result<()> {
        self.levels[channel.index()] = value;
        self.commit(channel.mask())
    }

    /// Legacy full-scale interface: a 0-255 byte mapped down to 4 bits.
    pub fn set_intensity_raw(&mut self, channel: ColorChannel, value: u8) -> Result<()> {
        self.set_intensity(channel, Intensity::from_byte(value))
    }

    /// Restore chip state after a power-state resume.
    ///
    /// Re-runs [`Self::setup`] and commits all channels twice: on some
    /// boards the chip silently ignores the first commit after resume, so
    /// the double write is a fixed quirk, not an optimization target.
    pub fn resume(&self) -> Result<()> {
        self.setup()?;
        self.commit(ColorMask::all())?;
        self.commit(ColorMask::all())
    }

    /// Borrow the underlying port backend.
    pub const fn port(&self) -> &P {
        &self.port
    }

    /// Consume the controller, giving the port backend back.
    pub fn into_port(self) -> P {
        self.port
    }

    pub const fn identity(&self) -> ChipIdentity {
        self.identity
    }

    /// Base address the chip was detected at.
    pub const fn base_port(&self) -> u16 {
        self.base
    }

    /// Last-requested intensity for `channel`.
    pub const fn intensity(&self, channel: ColorChannel) -> Intensity {
        self.levels[channel.index()]
    }
}
