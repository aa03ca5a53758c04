//! Error types for IWI to DDS conversion.

use std::path::PathBuf;

use thiserror::Error;

use iwi2dds_iwi::Error as IwiError;

/// Errors that can occur while converting a texture.
#[derive(Debug, Error)]
pub enum Error {
    /// The IWI input could not be read.
    #[error(transparent)]
    Iwi(#[from] IwiError),

    /// The DDS header could not be built.
    #[error(transparent)]
    Dds(#[from] iwi2dds_dds::Error),

    /// The output file exists and overwriting was not requested.
    #[error("{} already exists", path.display())]
    OutputExists { path: PathBuf },

    /// I/O error, tagged with the operation that failed.
    #[error("failed to {op}: {source}")]
    Io {
        op: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Iwi(IwiError::UnsupportedVersion(_)) => ErrorKind::UnsupportedVersion,
            Self::Iwi(IwiError::UnsupportedFormat(_)) => ErrorKind::UnsupportedFormat,
            Self::Iwi(IwiError::Truncated(_)) => ErrorKind::TruncatedInput,
            Self::Dds(_) => ErrorKind::InvalidOutput,
            Self::OutputExists { .. } => ErrorKind::OutputExists,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn io(op: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| Self::Io { op, source }
    }
}

/// Broad categories of conversion failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Version byte other than 6 or 8.
    UnsupportedVersion,
    /// Image format code outside the supported set.
    UnsupportedFormat,
    /// Header or payload ranges past the end of the input.
    TruncatedInput,
    /// The converted texture cannot be described by a DDS header.
    InvalidOutput,
    /// Refused to replace an existing output file.
    OutputExists,
    /// Read, write, or filesystem failure.
    Io,
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
