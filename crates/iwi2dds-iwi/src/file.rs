//! IWI file parsing.

use iwi2dds_common::BinaryReader;
use tracing::debug;

use crate::header::{IwiInfo, IwiVersion, MipTable, RawFileHeader, RawImageInfo, RawMipTable};
use crate::layout::PayloadLayout;
use crate::Result;

/// A parsed IWI file borrowing its underlying bytes.
#[derive(Debug, Clone)]
pub struct IwiFile<'a> {
    data: &'a [u8],
    magic: [u8; 3],
    version: IwiVersion,
    info: IwiInfo,
    mips: MipTable,
    layout: PayloadLayout,
}

impl<'a> IwiFile<'a> {
    /// Parse the header, descriptor and mip table of an IWI file.
    ///
    /// Only the header region is read here. Payload ranges are checked by
    /// [`IwiFile::payload`].
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        let header: RawFileHeader = reader.read_struct()?;
        let version = IwiVersion::from_byte(header.version)?;

        reader.seek(version.info_offset());
        let info = IwiInfo::try_from(reader.read_struct::<RawImageInfo>()?)?;

        reader.seek(version.mip_table_offset());
        let mips = MipTable::from(reader.read_struct::<RawMipTable>()?);

        let layout = PayloadLayout::from_mip_table(&mips, reader.position(), reader.len());

        debug!(
            version = %version,
            format = %info.format,
            width = info.width,
            height = info.height,
            mips = ?mips.offsets,
            "parsed IWI header"
        );
        debug!(layout = %layout, "derived payload layout");

        Ok(Self {
            data,
            magic: header.magic,
            version,
            info,
            mips,
            layout,
        })
    }

    /// The three magic bytes at the start of the file.
    pub fn magic(&self) -> [u8; 3] {
        self.magic
    }

    /// Container version.
    pub fn version(&self) -> IwiVersion {
        self.version
    }

    /// Image descriptor.
    pub fn info(&self) -> &IwiInfo {
        &self.info
    }

    /// Raw mip offset table.
    pub fn mips(&self) -> &MipTable {
        &self.mips
    }

    /// Payload layout derived from the mip table.
    pub fn layout(&self) -> &PayloadLayout {
        &self.layout
    }

    /// Total file length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the file is empty. Always false for a parsed file.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reassemble the pixel data, largest mip level first.
    pub fn payload(&self) -> Result<Vec<u8>> {
        self.layout.assemble(self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, ImageFormat};

    fn build(version: u8, format: u8, mips: [i32; 4], payload: &[u8]) -> Vec<u8> {
        let mut data = vec![b'I', b'W', b'i', version];
        if version == 8 {
            data.extend_from_slice(&[0xAA; 4]);
        }
        data.extend_from_slice(&[format, 0x01]);
        data.extend_from_slice(&64u16.to_le_bytes());
        data.extend_from_slice(&32u16.to_le_bytes());
        data.extend_from_slice(&[0xBB; 2]);
        for offset in mips {
            data.extend_from_slice(&offset.to_le_bytes());
        }
        data.extend_from_slice(payload);
        data
    }

    #[test]
    fn test_parse_v6() {
        let data = build(6, 0x0B, [0, 0, 0, 0], &[1, 2, 3, 4]);
        let iwi = IwiFile::parse(&data).unwrap();

        assert_eq!(iwi.magic(), *b"IWi");
        assert_eq!(iwi.version(), IwiVersion::V6);
        assert_eq!(iwi.info().format, ImageFormat::Dxt1);
        assert_eq!(iwi.info().width, 64);
        assert_eq!(iwi.info().height, 32);
        assert_eq!(
            iwi.layout(),
            &PayloadLayout::Single { offset: 0x1C, size: 4 }
        );
        assert_eq!(iwi.payload().unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_parse_v8() {
        let data = build(8, 0x01, [7, 7, 7, 7], &[9; 8]);
        let iwi = IwiFile::parse(&data).unwrap();

        assert_eq!(iwi.version(), IwiVersion::V8);
        assert_eq!(iwi.info().format, ImageFormat::Argb8);
        assert_eq!(iwi.mips().offsets, [7, 7, 7, 7]);
        assert_eq!(
            iwi.layout(),
            &PayloadLayout::Single { offset: 0x20, size: 8 }
        );
    }

    #[test]
    fn test_v8_descriptor_is_read_at_offset_8() {
        let mut data = build(8, 0x02, [0; 4], &[]);
        // Bytes 4..8 are skipped; a bogus format code there must not matter.
        data[4] = 0x05;
        assert_eq!(IwiFile::parse(&data).unwrap().info().format, ImageFormat::Rgb8);
    }

    #[test]
    fn test_rejects_version_and_format() {
        let data = build(7, 0x0B, [0; 4], &[]);
        assert!(matches!(
            IwiFile::parse(&data),
            Err(Error::UnsupportedVersion(7))
        ));

        let data = build(6, 0x05, [0; 4], &[]);
        assert!(matches!(
            IwiFile::parse(&data),
            Err(Error::UnsupportedFormat(0x05))
        ));
    }

    #[test]
    fn test_truncated_header() {
        let data = build(6, 0x0B, [0; 4], &[]);
        assert!(matches!(
            IwiFile::parse(&data[..0x10]),
            Err(Error::Truncated(_))
        ));
        assert!(matches!(IwiFile::parse(&[]), Err(Error::Truncated(_))));
    }
}
