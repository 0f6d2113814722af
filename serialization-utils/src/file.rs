//! Reading and writing values as (optionally compressed) JSON files.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    compression::{gzip_reader_rewind, gzip_writer_with},
    config::SerializationConfig,
    error::{Error, Result},
    json::{from_json_reader, to_json_writer_with},
};

/// Writes `value` as JSON to `path`, compressed according to `config.gzip`.
///
/// An existing file is truncated.
pub fn save_json<T>(path: impl AsRef<Path>, value: &T, config: &SerializationConfig) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::file(path, e))?;

    let mut writer = gzip_writer_with(BufWriter::new(file), &config.gzip);
    to_json_writer_with(value, &mut writer, config.json)?;
    writer.finish()?;

    debug!(
        "saved {} ({})",
        path.display(),
        if config.gzip.compress { "gzip" } else { "plain" }
    );
    Ok(())
}

/// Reads a value from the JSON file at `path`.
///
/// Gzip-compressed and plain files are both accepted.
pub fn load_json<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::file(path, e))?;

    let reader = gzip_reader_rewind(BufReader::new(file))?;
    debug!(
        "loading {} ({})",
        path.display(),
        if reader.is_compressed() { "gzip" } else { "plain" }
    );
    from_json_reader(reader)
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, fs};

    use super::*;
    use crate::{
        compression::is_gzip,
        config::{GzipOptions, JsonFormat},
    };

    fn scores() -> HashMap<String, u32> {
        HashMap::from([("alice".to_string(), 3), ("bob".to_string(), 5)])
    }

    #[test]
    fn test_save_compressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json.gz");

        save_json(&path, &scores(), &SerializationConfig::default()).unwrap();

        let raw = fs::read(&path).unwrap();
        assert!(is_gzip(&raw));

        let loaded: HashMap<String, u32> = load_json(&path).unwrap();
        assert_eq!(loaded, scores());
    }

    #[test]
    fn test_save_plain_compact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");
        let config = SerializationConfig {
            json: JsonFormat::Compact,
            gzip: GzipOptions::disabled(),
        };

        save_json(&path, &[1, 2, 3][..], &config).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1,2,3]");

        let loaded: Vec<i32> = load_json(&path).unwrap();
        assert_eq!(loaded, vec![1, 2, 3]);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("value.json");
        let plain = SerializationConfig {
            gzip: GzipOptions::disabled(),
            ..Default::default()
        };

        save_json(&path, &"a much longer string value", &plain).unwrap();
        save_json(&path, &"short", &plain).unwrap();

        let loaded: String = load_json(&path).unwrap();
        assert_eq!(loaded, "short");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_json::<u32>(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::File { .. }));
    }

    #[test]
    fn test_load_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, b"").unwrap();

        let err = load_json::<u32>(&path).unwrap_err();
        assert!(matches!(err, Error::Json(ref e) if e.is_eof()));
    }
}
