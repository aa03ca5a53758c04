//! Error types for iwi2dds-common.

use thiserror::Error;

/// Common error type for reads past the end of a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// A byte range does not lie within the buffer.
    #[error("range {start}..{end} is outside of the {len}-byte buffer")]
    RangeOutOfBounds { start: i64, end: i64, len: usize },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
