//! Chip identification.

use serde::Serialize;

/// Device ID register; the ID spans this register (high byte) and the next
/// one (low byte).
pub const DEVICE_ID_REG: u8 = 0x20;

/// Family mask applied to the 16-bit device ID; the low nibble carries the
/// silicon revision and is ignored.
pub const DEVICE_ID_MASK: u16 = 0xFFF0;

/// A recognized Super I/O chip model.
///
/// Anything outside this set fails detection closed; the register layout
/// below is only known to hold for these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChipIdentity {
    Nct6795d,
    Nct6797d,
}

impl ChipIdentity {
    /// Known signatures in match priority order.
    const SIGNATURES: [(u16, Self); 2] = [(0xD350, Self::Nct6795d), (0xD450, Self::Nct6797d)];

    /// Match a raw device ID against the known signatures; first match wins.
    pub fn from_device_id(id: u16) -> Option<Self> {
        Self::SIGNATURES
            .iter()
            .find(|&&(signature, _)| id & DEVICE_ID_MASK == signature)
            .map(|&(_, identity)| identity)
    }

    /// Marketing name of the chip model.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nct6795d => "NCT6795D",
            Self::Nct6797d => "NCT6797D",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revision_nibble_is_ignored() {
        assert_eq!(ChipIdentity::from_device_id(0xD351), Some(ChipIdentity::Nct6795d));
        assert_eq!(ChipIdentity::from_device_id(0xD35F), Some(ChipIdentity::Nct6795d));
        assert_eq!(ChipIdentity::from_device_id(0xD457), Some(ChipIdentity::Nct6797d));
    }

    #[test]
    fn unknown_ids_fail_closed() {
        assert_eq!(ChipIdentity::from_device_id(0xC563), None);
        assert_eq!(ChipIdentity::from_device_id(0xFFFF), None);
        assert_eq!(ChipIdentity::from_device_id(0x0000), None);
        // Neighboring Nuvoton families are deliberately not recognized.
        assert_eq!(ChipIdentity::from_device_id(0xD420), None);
    }

    #[test]
    fn names_match_models() {
        assert_eq!(ChipIdentity::Nct6795d.name(), "NCT6795D");
        assert_eq!(ChipIdentity::Nct6797d.name(), "NCT6797D");
    }
}
