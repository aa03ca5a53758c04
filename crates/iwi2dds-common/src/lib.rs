//! Common utilities for iwi2dds.
//!
//! This crate provides the foundational pieces shared by the format crates:
//!
//! - [`BinaryReader`] - Bounds-checked binary reading from byte slices
//! - [`Error`] - Out-of-bounds errors raised by the reader

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};
