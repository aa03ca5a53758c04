//! IWI image format to DDS pixel format mapping.

use iwi2dds_dds::{DdsPixelFormat, FourCC};
use iwi2dds_iwi::ImageFormat;

/// The DDS pixel format block describing an IWI image format.
pub const fn pixel_format(format: ImageFormat) -> DdsPixelFormat {
    match format {
        ImageFormat::Argb8 => DdsPixelFormat::ARGB8,
        ImageFormat::Rgb8 => DdsPixelFormat::RGB8,
        ImageFormat::Argb4 => DdsPixelFormat::ARGB4,
        ImageFormat::A8 => DdsPixelFormat::A8,
        ImageFormat::Dxt1 => DdsPixelFormat::four_cc(FourCC::DXT1),
        ImageFormat::Dxt3 => DdsPixelFormat::four_cc(FourCC::DXT3),
        ImageFormat::Dxt5 => DdsPixelFormat::four_cc(FourCC::DXT5),
    }
}

#[cfg(test)]
mod tests {
    use iwi2dds_common::IntoBytes;

    use super::*;

    fn block(format: ImageFormat) -> Vec<u8> {
        pixel_format(format).as_bytes().to_vec()
    }

    fn words(values: [u32; 8]) -> Vec<u8> {
        values.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn test_uncompressed_blocks() {
        assert_eq!(
            block(ImageFormat::Argb8),
            words([32, 0x41, 0, 32, 0x00ff0000, 0x0000ff00, 0x000000ff, 0xff000000])
        );
        assert_eq!(
            block(ImageFormat::Rgb8),
            words([32, 0x40, 0, 24, 0xff0000, 0x00ff00, 0x0000ff, 0])
        );
        assert_eq!(
            block(ImageFormat::Argb4),
            words([32, 0x40, 0, 16, 0x0f00, 0x00f0, 0x000f, 0xf000])
        );
        assert_eq!(
            block(ImageFormat::A8),
            words([32, 0x02, 0, 8, 0, 0, 0, 0xff])
        );
    }

    #[test]
    fn test_compressed_blocks() {
        for (format, tag) in [
            (ImageFormat::Dxt1, b"DXT1"),
            (ImageFormat::Dxt3, b"DXT3"),
            (ImageFormat::Dxt5, b"DXT5"),
        ] {
            let bytes = block(format);
            assert_eq!(bytes.len(), 32);
            assert_eq!(&bytes[0..4], &32u32.to_le_bytes());
            assert_eq!(&bytes[4..8], &0x4u32.to_le_bytes());
            assert_eq!(&bytes[8..12], tag);
            assert!(bytes[12..].iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_each_format_has_distinct_block() {
        for (i, a) in ImageFormat::ALL.iter().enumerate() {
            for b in &ImageFormat::ALL[i + 1..] {
                assert_ne!(pixel_format(*a), pixel_format(*b));
            }
        }
    }
}
