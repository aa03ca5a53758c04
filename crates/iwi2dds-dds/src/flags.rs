//! DDS flag constants.

// DDS_HEADER.dwFlags
pub const DDSD_CAPS: u32 = 0x1;
pub const DDSD_HEIGHT: u32 = 0x2;
pub const DDSD_WIDTH: u32 = 0x4;
pub const DDSD_PITCH: u32 = 0x8;
pub const DDSD_PIXELFORMAT: u32 = 0x1000;
pub const DDSD_MIPMAPCOUNT: u32 = 0x20000;
pub const DDSD_LINEARSIZE: u32 = 0x80000;
pub const DDSD_DEPTH: u32 = 0x800000;

// DDS_PIXELFORMAT.dwFlags
pub const DDPF_ALPHAPIXELS: u32 = 0x1;
pub const DDPF_ALPHA: u32 = 0x2;
pub const DDPF_FOURCC: u32 = 0x4;
pub const DDPF_RGB: u32 = 0x40;
pub const DDPF_YUV: u32 = 0x200;
pub const DDPF_LUMINANCE: u32 = 0x20000;

// DDS_HEADER.dwCaps
pub const DDSCAPS_COMPLEX: u32 = 0x8;
pub const DDSCAPS_TEXTURE: u32 = 0x1000;
pub const DDSCAPS_MIPMAP: u32 = 0x400000;

/// Header flags written for every converted texture.
pub const DDSD_CONVERTED: u32 = DDSD_CAPS
    | DDSD_HEIGHT
    | DDSD_WIDTH
    | DDSD_PIXELFORMAT
    | DDSD_LINEARSIZE
    | DDSD_MIPMAPCOUNT;
