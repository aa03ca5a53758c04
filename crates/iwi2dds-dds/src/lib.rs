//! DDS texture file output.
//!
//! Builds the legacy (non-DX10) DirectDraw Surface header for 2D textures
//! and writes it in front of a raw pixel payload. Pixel data is never
//! inspected; the caller supplies the payload bytes and the pixel format
//! that describes them.
//!
//! # Example
//!
//! ```
//! use iwi2dds_dds::{write_dds, DdsHeader, DdsPixelFormat, FourCC};
//!
//! let payload = vec![0u8; 8];
//! let header = DdsHeader::texture_2d(4, 4, DdsPixelFormat::four_cc(FourCC::DXT1), payload.len(), 0)?;
//!
//! let mut out = Vec::new();
//! write_dds(&mut out, &header, &payload)?;
//! assert_eq!(out.len(), 128 + 8);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod header;
mod writer;

pub mod flags;

pub use error::{Error, Result};
pub use header::{DdsHeader, DdsPixelFormat, FourCC};
pub use writer::write_dds;

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";

/// Size of the magic plus the fixed header.
pub const DDS_HEADER_LEN: usize = 4 + DdsHeader::SIZE as usize;
