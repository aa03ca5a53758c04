//! IWI to DDS texture conversion.
//!
//! This crate ties the format crates together:
//!
//! - [`iwi2dds_common`] - Bounds-checked binary reading
//! - [`iwi2dds_iwi`] - IWI header parsing and mip reassembly
//! - [`iwi2dds_dds`] - DDS header construction and writing
//!
//! A conversion parses the IWI header, reassembles the pixel data largest mip
//! first, derives the DDS header from the image format and writes both out.
//! Pixel data is copied verbatim.
//!
//! # Example
//!
//! ```no_run
//! use iwi2dds::prelude::*;
//!
//! let conversion = convert_file("texture.iwi", "texture.dds", false)?;
//! println!("{} {}x{}", conversion.info.format, conversion.info.width, conversion.info.height);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod convert;
mod error;
mod file;
mod format;

pub use convert::{convert, convert_bytes, iwi_to_dds, Conversion, DdsImage};
pub use error::{Error, ErrorKind, Result};
pub use file::convert_file;
pub use format::pixel_format;

// Re-export all sub-crates
pub use iwi2dds_common as common;
pub use iwi2dds_dds as dds;
pub use iwi2dds_iwi as iwi;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{convert, convert_bytes, convert_file, Conversion, Error, ErrorKind};
    pub use iwi2dds_dds::{DdsHeader, DdsPixelFormat, FourCC};
    pub use iwi2dds_iwi::{ImageFlags, ImageFormat, IwiFile, IwiInfo, IwiVersion, PayloadLayout};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
