//! IWI texture container handling.
//!
//! IWI files start with a small version-dependent header:
//! - a 4-byte file header (3-byte magic + version byte)
//! - a 6-byte image descriptor (format, flags, width, height)
//! - a table of four mip offsets into the pixel data
//!
//! Versions 6 and 8 share that structure; version 8 places the descriptor
//! and the offset table 4 bytes further into the file.
//!
//! When the texture has a mip chain, the levels are not stored
//! contiguously. [`IwiFile::payload`] reassembles them into one buffer with
//! the largest level first.
//!
//! # Example
//!
//! ```no_run
//! use iwi2dds_iwi::IwiFile;
//!
//! let data = std::fs::read("texture.iwi")?;
//! let iwi = IwiFile::parse(&data)?;
//! println!("{}x{} {}", iwi.info().width, iwi.info().height, iwi.info().format);
//! let pixels = iwi.payload()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod file;
mod header;
mod layout;

pub use error::{Error, Result};
pub use file::IwiFile;
pub use header::{ImageFlags, ImageFormat, IwiInfo, IwiVersion, MipTable};
pub use layout::{PayloadLayout, Segment};
