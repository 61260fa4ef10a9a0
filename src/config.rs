use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::controller::{Intensity, DEFAULT_BASE_PORTS};
use crate::error::{Error, Result};

/// Startup configuration, persisted as JSON.
///
/// Carries what the kernel rendition of this driver took as module
/// parameters: the candidate base ports and the initial per-channel
/// intensities applied on the first commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedConfig {
    /// Config-window base addresses to probe, in order.
    pub base_ports: Vec<u16>,

    /// Initial red intensity (0-15, default 0)
    pub red: u8,

    /// Initial green intensity (0-15, default 0)
    pub green: u8,

    /// Initial blue intensity (0-15, default 0)
    pub blue: u8,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            base_ports: DEFAULT_BASE_PORTS.to_vec(),
            red: 0,
            green: 0,
            blue: 0,
        }
    }
}

impl LedConfig {
    /// Load the config from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&data)
    }

    fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|e| Error::Config(format!("config parse error: {e}")))
    }

    /// Validate the three initial values into intensities, red first.
    pub fn initial_intensities(&self) -> Result<[Intensity; 3]> {
        Ok([
            Intensity::new(self.red)?,
            Intensity::new(self.green)?,
            Intensity::new(self.blue)?,
        ])
    }
}
