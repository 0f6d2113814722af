//! Conversion of serializable values from/to JSON.
//!
//! Any type implementing [`serde::Serialize`] can be written and any type
//! implementing [`serde::de::DeserializeOwned`] can be read. Failures are the
//! errors reported by `serde_json`, passed through unchanged.

use std::io::{self, Read, Write};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};

use crate::{config::JsonFormat, error::Result};

/// Serializes `value` to JSON and writes it to `writer`.
///
/// The output is pretty-printed with the default indent. The writer is not
/// flushed; call `flush`, or [`GzipWriter::finish`] on a compressing writer,
/// once everything has been written.
///
/// [`GzipWriter::finish`]: crate::compression::GzipWriter::finish
pub fn to_json_writer<T, W>(value: &T, writer: W) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    to_json_writer_with(value, writer, JsonFormat::default())
}

/// Like [`to_json_writer`], with an explicit output layout.
pub fn to_json_writer_with<T, W>(value: &T, mut writer: W, format: JsonFormat) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    match format {
        JsonFormat::Compact => write_formatted(value, &mut writer, CompactFormatter)?,
        JsonFormat::Pretty { indent } => {
            let indent = " ".repeat(usize::from(indent));
            write_formatted(
                value,
                &mut writer,
                PrettyFormatter::with_indent(indent.as_bytes()),
            )?
        }
    }
    Ok(())
}

fn write_formatted<T, W, F>(value: &T, writer: W, formatter: F) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
    F: Formatter,
{
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut ser)?;
    Ok(())
}

/// Creates a value from a JSON stream.
///
/// The stream must contain exactly one JSON value, optionally surrounded by
/// whitespace. `serde_json` reads unbuffered, so wrap files and sockets in a
/// [`std::io::BufReader`] first.
pub fn from_json_reader<T, R>(reader: R) -> Result<T>
where
    T: DeserializeOwned,
    R: Read,
{
    Ok(serde_json::from_reader(reader)?)
}

/// Converts `value` to a pretty-printed JSON string.
pub fn to_json<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    to_json_with(value, JsonFormat::default())
}

/// Like [`to_json`], with an explicit output layout.
pub fn to_json_with<T>(value: &T, format: JsonFormat) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::with_capacity(128);
    to_json_writer_with(value, &mut buf, format)?;
    let json =
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(json)
}

/// Creates a value from a JSON string.
pub fn from_json<T>(json: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_str(json)?)
}
