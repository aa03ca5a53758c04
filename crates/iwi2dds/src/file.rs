//! File-to-file conversion.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::convert::{iwi_to_dds, Conversion};
use crate::{Error, Result};

/// Convert the IWI file at `input` into a DDS file at `output`.
///
/// The DDS is staged in a temporary file next to `output` and renamed into
/// place once fully written. On any failure `output` is left as it was, so a
/// truncated or empty DDS never appears on disk.
///
/// An existing `output` is replaced only when `overwrite` is set; otherwise
/// the rename refuses to clobber it and [`Error::OutputExists`] is returned.
/// The check and the rename are one filesystem operation, so two conversions
/// racing for the same `output` cannot both succeed.
pub fn convert_file<P, Q>(input: P, output: Q, overwrite: bool) -> Result<Conversion>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let output = output.as_ref();

    let data = fs::read(input).map_err(Error::io("read IWI input"))?;
    let (conversion, image) = iwi_to_dds(&data)?;

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(Error::io("create temporary output"))?;
    debug!(path = %staged.path().display(), "staging DDS output");

    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        image.write_to(&mut writer)?;
        writer.flush().map_err(Error::io("write DDS output"))?;
    }

    let persisted = if overwrite {
        staged.persist(output)
    } else {
        staged.persist_noclobber(output)
    };

    persisted.map_err(|err| match err.error.kind() {
        io::ErrorKind::AlreadyExists if !overwrite => Error::OutputExists {
            path: output.to_path_buf(),
        },
        _ => Error::Io {
            op: "move DDS output into place",
            source: err.error,
        },
    })?;

    info!(
        input = %input.display(),
        output = %output.display(),
        format = %conversion.info.format,
        mips = conversion.layout.has_mips(),
        "converted"
    );

    Ok(conversion)
}
