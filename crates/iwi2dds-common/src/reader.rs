//! Binary reader for bounds-checked parsing of byte slices.
//!
//! This module provides [`BinaryReader`], a cursor-like type that reads
//! little-endian binary data from a byte slice without copying. Every read is
//! checked against the end of the buffer, so truncated input surfaces as an
//! [`Error`] rather than a panic or short data.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// A binary reader over a byte slice.
///
/// # Example
///
/// ```
/// use iwi2dds_common::BinaryReader;
///
/// let data = [0x49, 0x57, 0x69, 0x08, 0x0B, 0x00];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_struct::<[u8; 4]>().unwrap(), *b"IWi\x08");
/// assert_eq!(reader.read_bytes(2).unwrap(), &[0x0B, 0x00]);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Seek to an absolute position.
    ///
    /// Seeking past the end is allowed; the next read reports the shortfall.
    #[inline]
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }

    /// Borrow the absolute byte range `start..end` without moving the cursor.
    ///
    /// Offsets are signed because on-disk offset tables are. Negative offsets,
    /// inverted ranges and ranges past the end of the buffer are rejected.
    pub fn slice(&self, start: i64, end: i64) -> Result<&'a [u8]> {
        let out_of_bounds = Error::RangeOutOfBounds {
            start,
            end,
            len: self.data.len(),
        };

        let (Ok(from), Ok(to)) = (usize::try_from(start), usize::try_from(end)) else {
            return Err(out_of_bounds);
        };
        if from > to || to > self.data.len() {
            return Err(out_of_bounds);
        }

        Ok(&self.data[from..to])
    }
}
