//! Error types for DDS handling.

use thiserror::Error;

/// Errors that can occur when building DDS headers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Payload length does not fit the 32-bit linear size field.
    #[error("payload of {0} bytes is too large for a DDS linear size")]
    PayloadTooLarge(usize),
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
