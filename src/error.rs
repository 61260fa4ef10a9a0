use thiserror::Error;

/// Unified error type for LED control operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The 2-port I/O window is reserved by another session. Transient;
    /// the caller may retry, the crate never does.
    #[error("Super I/O port window is busy")]
    Busy,

    /// No candidate base address yielded a recognized chip signature.
    #[error("no supported NCT6795D/NCT6797D chip found")]
    NotFound,

    /// Requested brightness outside the 4-bit range the hardware accepts.
    #[error("intensity {0} out of range (0-15)")]
    InvalidIntensity(u8),

    /// Port transport fault (e.g. /dev/port not accessible).
    #[error("port I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),
}

/// Convenience Result type alias with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
