//! Pixel data layout and mip reassembly.

use std::fmt;

use iwi2dds_common::BinaryReader;
use tracing::trace;

use crate::header::MipTable;
use crate::Result;

/// An absolute byte range in the IWI file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: i64,
    pub end: i64,
}

impl Segment {
    /// Create a segment covering `start..end`.
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}..{:#x}", self.start, self.end)
    }
}

/// Where the pixel data of an IWI file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadLayout {
    /// A single mip level stored after the offset table.
    Single { offset: usize, size: usize },
    /// A mip chain stored out of order, listed largest level first.
    Chained { segments: [Segment; 3] },
}

impl PayloadLayout {
    /// Derive the layout from the mip table.
    ///
    /// `data_offset` is the position right after the table and `file_len`
    /// the total length of the file. Offsets are not validated here; see
    /// [`PayloadLayout::assemble`].
    pub fn from_mip_table(mips: &MipTable, data_offset: usize, file_len: usize) -> Self {
        if !mips.has_chain() {
            return Self::Single {
                offset: data_offset,
                size: file_len.saturating_sub(data_offset),
            };
        }

        let [_, m1, m2, m3] = mips.offsets.map(i64::from);
        let end = file_len as i64;

        Self::Chained {
            segments: [
                Segment::new(m1, end),
                Segment::new(m2, m1),
                Segment::new(m3, m2),
            ],
        }
    }

    /// Whether the layout describes a mip chain.
    pub fn has_mips(&self) -> bool {
        matches!(self, Self::Chained { .. })
    }

    /// Number of mip levels recovered from the file.
    pub fn level_count(&self) -> usize {
        match self {
            Self::Single { .. } => 1,
            Self::Chained { segments } => segments.len(),
        }
    }

    /// Byte ranges to concatenate, in output order.
    pub fn segments(&self) -> Vec<Segment> {
        match self {
            Self::Single { offset, size } => {
                let start = *offset as i64;
                vec![Segment::new(start, start + *size as i64)]
            }
            Self::Chained { segments } => segments.to_vec(),
        }
    }

    /// Copy the segments out of `data` into one contiguous buffer.
    ///
    /// Fails if any segment is negative, inverted, or extends past the end of
    /// `data`. Nothing is copied in that case.
    pub fn assemble(&self, data: &[u8]) -> Result<Vec<u8>> {
        let reader = BinaryReader::new(data);
        let segments = self.segments();

        let parts = segments
            .iter()
            .map(|segment| reader.slice(segment.start, segment.end))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut payload = Vec::with_capacity(parts.iter().map(|part| part.len()).sum());
        for (segment, part) in segments.iter().zip(&parts) {
            trace!(segment = %segment, len = part.len(), "copying payload segment");
            payload.extend_from_slice(part);
        }

        Ok(payload)
    }
}

impl fmt::Display for PayloadLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single { offset, size } => {
                write!(f, "single level, {size} bytes at {offset:#x}")
            }
            Self::Chained { segments } => {
                write!(f, "mip chain")?;
                for segment in segments {
                    write!(f, " [{segment}]")?;
                }
                Ok(())
            }
        }
    }
}
