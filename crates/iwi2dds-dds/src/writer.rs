//! DDS output.

use std::io::Write;

use zerocopy::IntoBytes;

use crate::header::DdsHeader;
use crate::DDS_MAGIC;

/// Write a complete DDS file: magic, header, then the payload verbatim.
pub fn write_dds<W: Write>(writer: &mut W, header: &DdsHeader, payload: &[u8]) -> std::io::Result<()> {
    writer.write_all(DDS_MAGIC)?;
    writer.write_all(header.as_bytes())?;
    writer.write_all(payload)?;
    writer.flush()
}
