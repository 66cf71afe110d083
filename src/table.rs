// src/table.rs

//! CSV serialization of result tables.
//!
//! This is a collaborator of the scheduler, not part of it: it consumes
//! results as plain rows and knows nothing about graphs or ordering.

use std::borrow::Cow;
use std::fmt::Display;
use std::io::{Seek, SeekFrom, Write};

use crate::errors::Result;

/// Write `rows` (preceded by `header`, if given) to `sink` as
/// comma-separated lines, then rewind the sink to its start and return it,
/// so the caller can immediately read back what was written.
///
/// Fields containing the delimiter, quotes or line breaks are double-quoted
/// with embedded quotes doubled.
pub fn build_table<W, V>(rows: &[Vec<V>], header: Option<&[V]>, mut sink: W) -> Result<W>
where
    W: Write + Seek,
    V: Display,
{
    if let Some(header) = header {
        write_record(&mut sink, header)?;
    }
    for row in rows {
        write_record(&mut sink, row)?;
    }
    sink.flush()?;
    sink.seek(SeekFrom::Start(0))?;
    Ok(sink)
}

fn write_record<W: Write, V: Display>(sink: &mut W, fields: &[V]) -> Result<()> {
    let mut first = true;
    for field in fields {
        if !first {
            sink.write_all(b",")?;
        }
        first = false;
        sink.write_all(escape_field(&field.to_string()).as_bytes())?;
    }
    sink.write_all(b"\n")?;
    Ok(())
}

fn escape_field(raw: &str) -> Cow<'_, str> {
    if raw.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", raw.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(raw)
    }
}
