//! DDS header structures.

use zerocopy::byteorder::{LittleEndian, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::flags::*;
use crate::{Error, Result};

type Le32 = U32<LittleEndian>;

const fn le(value: u32) -> Le32 {
    U32::from_bytes(value.to_le_bytes())
}

/// DDS file header, without the leading magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct DdsHeader {
    /// Header size (should be 124).
    pub size: Le32,
    /// Header flags.
    pub flags: Le32,
    /// Image height.
    pub height: Le32,
    /// Image width.
    pub width: Le32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: Le32,
    /// Depth (for volume textures).
    pub depth: Le32,
    /// Number of mipmap levels.
    pub mipmap_count: Le32,
    /// Reserved.
    pub reserved1: [Le32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: Le32,
    /// Surface capabilities 2.
    pub caps2: Le32,
    /// Surface capabilities 3.
    pub caps3: Le32,
    /// Surface capabilities 4.
    pub caps4: Le32,
    /// Reserved.
    pub reserved2: Le32,
}

const _: () = assert!(std::mem::size_of::<DdsHeader>() == DdsHeader::SIZE as usize);

impl DdsHeader {
    /// Expected header size.
    pub const SIZE: u32 = 124;

    /// Build the header of a 2D texture whose payload is `linear_size` bytes.
    ///
    /// The payload size is always recorded as a linear size, compressed or
    /// not. A `mip_count` above one marks the surface as a mipmapped complex
    /// surface.
    pub fn texture_2d(
        width: u32,
        height: u32,
        pixel_format: DdsPixelFormat,
        linear_size: usize,
        mip_count: u32,
    ) -> Result<Self> {
        let pitch_or_linear_size =
            u32::try_from(linear_size).map_err(|_| Error::PayloadTooLarge(linear_size))?;

        let caps = if mip_count > 1 {
            DDSCAPS_TEXTURE | DDSCAPS_MIPMAP | DDSCAPS_COMPLEX
        } else {
            DDSCAPS_TEXTURE
        };

        Ok(Self {
            size: le(Self::SIZE),
            flags: le(DDSD_CONVERTED),
            height: le(height),
            width: le(width),
            pitch_or_linear_size: le(pitch_or_linear_size),
            depth: le(0),
            mipmap_count: le(mip_count),
            reserved1: [le(0); 11],
            pixel_format,
            caps: le(caps),
            caps2: le(0),
            caps3: le(0),
            caps4: le(0),
            reserved2: le(0),
        })
    }
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: Le32,
    /// Pixel format flags.
    pub flags: Le32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: Le32,
    /// Red bit mask.
    pub r_bit_mask: Le32,
    /// Green bit mask.
    pub g_bit_mask: Le32,
    /// Blue bit mask.
    pub b_bit_mask: Le32,
    /// Alpha bit mask.
    pub a_bit_mask: Le32,
}

const _: () = assert!(std::mem::size_of::<DdsPixelFormat>() == DdsPixelFormat::SIZE as usize);

impl DdsPixelFormat {
    /// Expected structure size.
    pub const SIZE: u32 = 32;

    /// 32-bit ARGB.
    pub const ARGB8: Self = Self::masked(
        DDPF_RGB | DDPF_ALPHAPIXELS,
        32,
        [0x00ff0000, 0x0000ff00, 0x000000ff, 0xff000000],
    );

    /// 24-bit RGB.
    pub const RGB8: Self = Self::masked(DDPF_RGB, 24, [0xff0000, 0x00ff00, 0x0000ff, 0]);

    /// 16-bit ARGB with 4 bits per channel.
    ///
    /// Carries an alpha mask but is flagged as plain RGB, without
    /// `DDPF_ALPHAPIXELS`.
    pub const ARGB4: Self = Self::masked(DDPF_RGB, 16, [0x0f00, 0x00f0, 0x000f, 0xf000]);

    /// 8-bit alpha only.
    pub const A8: Self = Self::masked(DDPF_ALPHA, 8, [0, 0, 0, 0xff]);

    /// An uncompressed format described by channel masks (R, G, B, A).
    pub const fn masked(flags: u32, rgb_bit_count: u32, masks: [u32; 4]) -> Self {
        Self {
            size: le(Self::SIZE),
            flags: le(flags),
            four_cc: FourCC::NONE,
            rgb_bit_count: le(rgb_bit_count),
            r_bit_mask: le(masks[0]),
            g_bit_mask: le(masks[1]),
            b_bit_mask: le(masks[2]),
            a_bit_mask: le(masks[3]),
        }
    }

    /// A compressed format identified by its FourCC.
    pub const fn four_cc(four_cc: FourCC) -> Self {
        Self {
            size: le(Self::SIZE),
            flags: le(DDPF_FOURCC),
            four_cc,
            rgb_bit_count: le(0),
            r_bit_mask: le(0),
            g_bit_mask: le(0),
            b_bit_mask: le(0),
            a_bit_mask: le(0),
        }
    }
}

/// Four-character code for compression type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// No code; used by uncompressed formats.
    pub const NONE: Self = Self([0; 4]);
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT3 compression.
    pub const DXT3: Self = Self(*b"DXT3");
    /// DXT5 compression.
    pub const DXT5: Self = Self(*b"DXT5");
}
