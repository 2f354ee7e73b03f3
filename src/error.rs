//! Error types for the panel driver

use thiserror::Error;

/// Result type alias for chain operations
pub type Result<T> = std::result::Result<T, ChainError>;

/// Main error type for chain operations
#[derive(Error, Debug)]
pub enum ChainError {
    /// Bit buffer cannot be packed into whole bytes
    #[error("bit buffer of {len} bits does not divide into whole bytes")]
    InvalidLength { len: usize },

    /// Firmware image too short to hold the glyph table
    #[error("firmware image is {len} bytes, glyph table needs {needed}")]
    TruncatedFirmware { len: usize, needed: usize },

    /// Glyph code beyond the font's 256 records
    #[error("glyph code {code} outside the font's 256 records")]
    OutOfRange { code: usize },

    /// Transport accepted fewer bytes than the frame holds; the frame is lost
    #[error("short write: transport accepted {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    /// IO error wrapper
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
}
