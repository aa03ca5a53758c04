//! Error types for IWI parsing.

use thiserror::Error;

/// Errors that can occur when reading IWI files.
#[derive(Debug, Error)]
pub enum Error {
    /// Version byte is neither 6 nor 8.
    #[error("unsupported IWI version {0} (expected 6 or 8)")]
    UnsupportedVersion(u8),

    /// Image format code outside the supported set.
    #[error("unsupported IWI image format {0:#04x}")]
    UnsupportedFormat(u8),

    /// A header field or payload range lies past the end of the file.
    #[error("truncated IWI input: {0}")]
    Truncated(#[from] iwi2dds_common::Error),
}

/// Result type for IWI operations.
pub type Result<T> = std::result::Result<T, Error>;
