//! IWI header structures.

use std::fmt;

use zerocopy::byteorder::{LittleEndian, I32, U16};
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use crate::{Error, Result};

/// IWI file header as stored on disk.
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub(crate) struct RawFileHeader {
    /// File magic. Not validated.
    pub magic: [u8; 3],
    /// Format version.
    pub version: u8,
}

/// Image descriptor as stored on disk.
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub(crate) struct RawImageInfo {
    pub format: u8,
    pub flags: u8,
    pub width: U16<LittleEndian>,
    pub height: U16<LittleEndian>,
}

/// Mip offset table as stored on disk.
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub(crate) struct RawMipTable {
    pub offsets: [I32<LittleEndian>; 4],
}

/// Supported IWI container versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IwiVersion {
    /// Version 6.
    V6,
    /// Version 8, with a wider pre-header.
    V8,
}

impl IwiVersion {
    /// Parse the version byte of the file header.
    pub fn from_byte(version: u8) -> Result<Self> {
        match version {
            6 => Ok(Self::V6),
            8 => Ok(Self::V8),
            other => Err(Error::UnsupportedVersion(other)),
        }
    }

    /// The version byte as stored in the file.
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::V6 => 6,
            Self::V8 => 8,
        }
    }

    /// Absolute offset of the image descriptor.
    pub const fn info_offset(self) -> usize {
        match self {
            Self::V6 => 0x4,
            Self::V8 => 0x8,
        }
    }

    /// Absolute offset of the mip offset table.
    pub const fn mip_table_offset(self) -> usize {
        match self {
            Self::V6 => 0xC,
            Self::V8 => 0x10,
        }
    }

    /// Absolute offset of the first byte after the mip offset table.
    pub const fn data_offset(self) -> usize {
        self.mip_table_offset() + MipTable::SIZE
    }
}

impl fmt::Display for IwiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_byte())
    }
}

/// Pixel formats an IWI file can be converted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ImageFormat {
    /// 32-bit ARGB.
    Argb8 = 0x01,
    /// 24-bit RGB.
    Rgb8 = 0x02,
    /// 16-bit ARGB, 4 bits per channel.
    Argb4 = 0x03,
    /// 8-bit alpha only.
    A8 = 0x04,
    /// BC1 compressed.
    Dxt1 = 0x0B,
    /// BC2 compressed.
    Dxt3 = 0x0C,
    /// BC3 compressed.
    Dxt5 = 0x0D,
}

impl ImageFormat {
    /// Every supported format, in format code order.
    pub const ALL: [Self; 7] = [
        Self::Argb8,
        Self::Rgb8,
        Self::Argb4,
        Self::A8,
        Self::Dxt1,
        Self::Dxt3,
        Self::Dxt5,
    ];

    /// The format code as stored in the file.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Argb8 => "ARGB8",
            Self::Rgb8 => "RGB8",
            Self::Argb4 => "ARGB4",
            Self::A8 => "A8",
            Self::Dxt1 => "DXT1",
            Self::Dxt3 => "DXT3",
            Self::Dxt5 => "DXT5",
        }
    }
}

impl TryFrom<u8> for ImageFormat {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0x01 => Ok(Self::Argb8),
            0x02 => Ok(Self::Rgb8),
            0x03 => Ok(Self::Argb4),
            0x04 => Ok(Self::A8),
            0x0B => Ok(Self::Dxt1),
            0x0C => Ok(Self::Dxt3),
            0x0D => Ok(Self::Dxt5),
            other => Err(Error::UnsupportedFormat(other)),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Image flags byte of the descriptor.
///
/// The flags are informational only; they never change how a file is
/// converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImageFlags(pub u8);

impl ImageFlags {
    pub const NOPICMIP: u8 = 0x01;
    pub const NOMIPMAPS: u8 = 0x02;
    pub const CUBEMAP: u8 = 0x04;
    pub const VOLMAP: u8 = 0x08;
    pub const STREAMING: u8 = 0x10;
    pub const LEGACY_NORMALS: u8 = 0x20;
    pub const CLAMP_U: u8 = 0x40;
    pub const CLAMP_V: u8 = 0x80;

    const NAMES: [(u8, &'static str); 8] = [
        (Self::NOPICMIP, "NOPICMIP"),
        (Self::NOMIPMAPS, "NOMIPMAPS"),
        (Self::CUBEMAP, "CUBEMAP"),
        (Self::VOLMAP, "VOLMAP"),
        (Self::STREAMING, "STREAMING"),
        (Self::LEGACY_NORMALS, "LEGACY_NORMALS"),
        (Self::CLAMP_U, "CLAMP_U"),
        (Self::CLAMP_V, "CLAMP_V"),
    ];

    /// Check whether all bits of `flag` are set.
    pub const fn contains(self, flag: u8) -> bool {
        self.0 & flag == flag
    }

    /// Names of the set flags.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .into_iter()
            .filter(move |&(bit, _)| self.contains(bit))
            .map(|(_, name)| name)
    }
}

impl fmt::Display for ImageFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("none");
        }
        let names: Vec<_> = self.names().collect();
        write!(f, "{:#04x} ({})", self.0, names.join(" | "))
    }
}

/// Parsed image descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IwiInfo {
    pub format: ImageFormat,
    pub flags: ImageFlags,
    pub width: u16,
    pub height: u16,
}

impl TryFrom<RawImageInfo> for IwiInfo {
    type Error = Error;

    fn try_from(raw: RawImageInfo) -> Result<Self> {
        Ok(Self {
            format: ImageFormat::try_from(raw.format)?,
            flags: ImageFlags(raw.flags),
            width: raw.width.get(),
            height: raw.height.get(),
        })
    }
}

/// The four mip offsets that follow the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipTable {
    pub offsets: [i32; 4],
}

impl MipTable {
    /// Size of the table on disk.
    pub const SIZE: usize = 16;

    /// Whether the offsets describe a mip chain.
    ///
    /// Single-level textures repeat the first offset in the second or last
    /// slot. There is no explicit flag for this.
    pub const fn has_chain(&self) -> bool {
        let [m0, m1, _, m3] = self.offsets;
        m0 != m1 && m0 != m3
    }
}

impl From<RawMipTable> for MipTable {
    fn from(raw: RawMipTable) -> Self {
        Self {
            offsets: raw.offsets.map(|offset| offset.get()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_offsets() {
        assert_eq!(IwiVersion::V6.info_offset(), 0x4);
        assert_eq!(IwiVersion::V8.info_offset(), 0x8);
        assert_eq!(IwiVersion::V6.mip_table_offset(), 0xC);
        assert_eq!(IwiVersion::V8.mip_table_offset(), 0x10);
        assert_eq!(IwiVersion::V6.data_offset(), 0x1C);
        assert_eq!(IwiVersion::V8.data_offset(), 0x20);
    }

    #[test]
    fn test_unsupported_version() {
        assert!(matches!(
            IwiVersion::from_byte(7),
            Err(Error::UnsupportedVersion(7))
        ));
        assert_eq!(IwiVersion::from_byte(8).unwrap(), IwiVersion::V8);
    }

    #[test]
    fn test_format_codes() {
        for format in ImageFormat::ALL {
            assert_eq!(ImageFormat::try_from(format.code()).unwrap(), format);
        }
        assert!(matches!(
            ImageFormat::try_from(0x05),
            Err(Error::UnsupportedFormat(0x05))
        ));
    }

    #[test]
    fn test_mip_chain_detection() {
        assert!(!MipTable { offsets: [100, 100, 50, 20] }.has_chain());
        assert!(!MipTable { offsets: [100, 90, 50, 100] }.has_chain());
        assert!(!MipTable { offsets: [0, 0, 0, 0] }.has_chain());
        assert!(MipTable { offsets: [500, 400, 300, 200] }.has_chain());
    }

    #[test]
    fn test_flags_display() {
        assert_eq!(ImageFlags(0).to_string(), "none");
        assert_eq!(
            ImageFlags(ImageFlags::NOPICMIP | ImageFlags::CLAMP_V).to_string(),
            "0x81 (NOPICMIP | CLAMP_V)"
        );
    }
}
