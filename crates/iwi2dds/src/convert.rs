//! IWI to DDS conversion.

use std::io::{Read, Seek, SeekFrom, Write};

use iwi2dds_dds::{write_dds, DdsHeader, DDS_HEADER_LEN};
use iwi2dds_iwi::{IwiFile, IwiInfo, IwiVersion, PayloadLayout};
use tracing::debug;

use crate::format::pixel_format;
use crate::{Error, Result};

/// Summary of a finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Source container version.
    pub version: IwiVersion,
    /// Source image descriptor.
    pub info: IwiInfo,
    /// Where the payload was gathered from.
    pub layout: PayloadLayout,
    /// Length of the reassembled payload.
    pub payload_len: usize,
}

impl Conversion {
    /// Size of the produced DDS file.
    pub fn output_len(&self) -> usize {
        DDS_HEADER_LEN + self.payload_len
    }
}

/// A DDS texture ready to be written.
#[derive(Debug, Clone)]
pub struct DdsImage {
    header: DdsHeader,
    payload: Vec<u8>,
}

impl DdsImage {
    /// The DDS header.
    pub fn header(&self) -> &DdsHeader {
        &self.header
    }

    /// The reassembled pixel data.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Write magic, header and payload.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_dds(writer, &self.header, &self.payload).map_err(Error::io("write DDS output"))
    }
}

/// Translate an in-memory IWI file into a DDS image.
///
/// Nothing is written; any parse or range error is reported before output
/// could begin.
pub fn iwi_to_dds(data: &[u8]) -> Result<(Conversion, DdsImage)> {
    let iwi = IwiFile::parse(data)?;
    let info = *iwi.info();
    let layout = iwi.layout().clone();
    let payload = iwi.payload()?;

    // Chained files record exactly the levels that were reassembled.
    let mip_count = if layout.has_mips() {
        layout.level_count() as u32
    } else {
        0
    };

    let header = DdsHeader::texture_2d(
        u32::from(info.width),
        u32::from(info.height),
        pixel_format(info.format),
        payload.len(),
        mip_count,
    )?;

    debug!(
        format = %info.format,
        mip_count,
        payload_len = payload.len(),
        "built DDS header"
    );

    let conversion = Conversion {
        version: iwi.version(),
        info,
        layout,
        payload_len: payload.len(),
    };

    Ok((conversion, DdsImage { header, payload }))
}

/// Convert an in-memory IWI file into DDS bytes.
pub fn convert_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let (conversion, image) = iwi_to_dds(data)?;

    let mut out = Vec::with_capacity(conversion.output_len());
    image.write_to(&mut out)?;
    Ok(out)
}

/// Convert an IWI stream into a DDS stream.
///
/// The input is read from its start regardless of its current position.
/// `output` is only touched once the whole texture has been translated.
pub fn convert<R, W>(input: &mut R, output: &mut W) -> Result<Conversion>
where
    R: Read + Seek,
    W: Write,
{
    input
        .seek(SeekFrom::Start(0))
        .map_err(Error::io("seek IWI input"))?;

    let mut data = Vec::new();
    input
        .read_to_end(&mut data)
        .map_err(Error::io("read IWI input"))?;

    let (conversion, image) = iwi_to_dds(&data)?;
    image.write_to(output)?;

    Ok(conversion)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use iwi2dds_common::FromBytes;
    use iwi2dds_dds::flags::{DDSCAPS_COMPLEX, DDSCAPS_MIPMAP, DDSD_CONVERTED};
    use iwi2dds_iwi::ImageFormat;

    use super::*;
    use crate::ErrorKind;

    fn iwi_v6(format: u8, mips: [i32; 4], len: usize) -> Vec<u8> {
        let mut data: Vec<u8> = (0..len).map(|i| (i % 253) as u8).collect();
        data[..4].copy_from_slice(&[b'I', b'W', b'i', 6]);
        data[4] = format;
        data[5] = 0;
        data[6..8].copy_from_slice(&16u16.to_le_bytes());
        data[8..10].copy_from_slice(&8u16.to_le_bytes());
        for (i, offset) in mips.iter().enumerate() {
            let at = 0xC + i * 4;
            data[at..at + 4].copy_from_slice(&offset.to_le_bytes());
        }
        data
    }

    fn parse_header(dds: &[u8]) -> DdsHeader {
        assert_eq!(&dds[..4], b"DDS ");
        DdsHeader::read_from_bytes(&dds[4..DDS_HEADER_LEN]).unwrap()
    }

    #[test]
    fn test_single_level() {
        let input = iwi_v6(0x0B, [100, 100, 50, 20], 0x1C + 64);
        let dds = convert_bytes(&input).unwrap();
        let header = parse_header(&dds);

        assert_eq!(dds.len(), DDS_HEADER_LEN + 64);
        assert_eq!(&dds[DDS_HEADER_LEN..], &input[0x1C..]);
        assert_eq!(header.width.get(), 16);
        assert_eq!(header.height.get(), 8);
        assert_eq!(header.pitch_or_linear_size.get(), 64);
        assert_eq!(header.mipmap_count.get(), 0);
        assert_eq!(header.caps.get() & (DDSCAPS_MIPMAP | DDSCAPS_COMPLEX), 0);
    }

    #[test]
    fn test_mip_chain() {
        let input = iwi_v6(0x0D, [500, 400, 300, 200], 1000);
        let dds = convert_bytes(&input).unwrap();
        let header = parse_header(&dds);

        let mut expected = input[400..1000].to_vec();
        expected.extend_from_slice(&input[300..400]);
        expected.extend_from_slice(&input[200..300]);

        assert_eq!(&dds[DDS_HEADER_LEN..], expected.as_slice());
        assert_eq!(header.mipmap_count.get(), 3);
        assert_eq!(header.pitch_or_linear_size.get(), 800);
        assert_ne!(header.caps.get() & DDSCAPS_MIPMAP, 0);
        assert_ne!(header.caps.get() & DDSCAPS_COMPLEX, 0);
    }

    #[test]
    fn test_header_invariants() {
        for (format, mips) in [
            (0x01, [0, 0, 0, 0]),
            (0x04, [40, 40, 40, 40]),
            (0x0C, [90, 80, 60, 40]),
        ] {
            let dds = convert_bytes(&iwi_v6(format, mips, 128)).unwrap();
            let header = parse_header(&dds);

            assert_eq!(dds.len(), DDS_HEADER_LEN + header.pitch_or_linear_size.get() as usize);
            assert_eq!(header.size.get(), 124);
            assert_eq!(header.depth.get(), 0);
            assert_eq!(header.flags.get(), DDSD_CONVERTED);
        }
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let input = iwi_v6(0x03, [500, 400, 300, 200], 1000);
        assert_eq!(convert_bytes(&input).unwrap(), convert_bytes(&input).unwrap());
    }

    #[test]
    fn test_rejections() {
        let mut input = iwi_v6(0x0B, [0; 4], 64);
        input[3] = 7;
        assert_eq!(
            convert_bytes(&input).unwrap_err().kind(),
            ErrorKind::UnsupportedVersion
        );

        let input = iwi_v6(0x05, [0; 4], 64);
        let err = convert_bytes(&input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
        assert!(err.to_string().contains("0x05"));

        let input = iwi_v6(0x0B, [500, 480, 300, 200], 450);
        assert_eq!(
            convert_bytes(&input).unwrap_err().kind(),
            ErrorKind::TruncatedInput
        );
    }

    #[test]
    fn test_stream_conversion_leaves_output_untouched_on_error() {
        let mut input = Cursor::new(iwi_v6(0x0B, [500, 480, 300, 200], 450));
        let mut output = Vec::new();

        assert!(convert(&mut input, &mut output).is_err());
        assert!(output.is_empty());
    }

    #[test]
    fn test_stream_conversion_rewinds_input() {
        let data = iwi_v6(0x02, [0; 4], 0x1C + 12);
        let mut input = Cursor::new(data.clone());
        input.set_position(10);
        let mut output = Vec::new();

        let conversion = convert(&mut input, &mut output).unwrap();
        assert_eq!(conversion.info.format, ImageFormat::Rgb8);
        assert_eq!(conversion.output_len(), output.len());
        assert_eq!(output, convert_bytes(&data).unwrap());
    }
}
