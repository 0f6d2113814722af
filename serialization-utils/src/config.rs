//! Output configuration for the JSON and gzip helpers.
//!
//! Configuration is usually kept in a small TOML file next to the data it
//! describes. Every section is optional and missing keys take their defaults.
//!
//! # Configuration File Format
//!
//! ```toml
//! [json]
//! format = "pretty"
//! indent = 2
//!
//! [gzip]
//! compress = true
//! level = 9
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Indent width used by the pretty printer unless configured otherwise.
pub const DEFAULT_INDENT: u8 = 4;

/// Compression level used unless configured otherwise.
pub const DEFAULT_GZIP_LEVEL: u32 = 6;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SerializationConfig {
    /// How JSON text is laid out.
    pub json: JsonFormat,
    /// Whether and how written data is gzip-compressed.
    pub gzip: GzipOptions,
}

/// Layout of produced JSON text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum JsonFormat {
    /// Everything on a single line.
    Compact,
    /// One member per line, nested values indented by `indent` spaces
    /// (at most 255).
    Pretty {
        #[serde(default = "default_indent")]
        indent: u8,
    },
}

fn default_indent() -> u8 {
    DEFAULT_INDENT
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self::Pretty {
            indent: DEFAULT_INDENT,
        }
    }
}

/// Options for wrapping an output stream with gzip compression.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GzipOptions {
    /// If false, data is written unchanged.
    pub compress: bool,
    /// Compression level from 0 to 9. Larger values are clamped to 9.
    pub level: u32,
}

impl Default for GzipOptions {
    fn default() -> Self {
        Self {
            compress: true,
            level: DEFAULT_GZIP_LEVEL,
        }
    }
}

impl GzipOptions {
    /// Options that leave the stream uncompressed.
    pub fn disabled() -> Self {
        Self {
            compress: false,
            ..Default::default()
        }
    }

    /// Compress with the given level.
    pub fn with_level(level: u32) -> Self {
        Self {
            compress: true,
            level: level.min(9),
        }
    }
}

impl SerializationConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::File`] if the file cannot be read and
    /// [`Error::Config`] if its content is not a valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
        let config = Self::from_toml_str(&content)?;
        debug!("loaded configuration from {}: {config:?}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SerializationConfig::default();
        assert_eq!(config.json, JsonFormat::Pretty { indent: 4 });
        assert!(config.gzip.compress);
        assert_eq!(config.gzip.level, 6);
    }

    #[test]
    fn test_empty_document() {
        let config = SerializationConfig::from_toml_str("").unwrap();
        assert_eq!(config, SerializationConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = SerializationConfig::from_toml_str(
            r#"
            [json]
            format = "compact"

            [gzip]
            level = 9
            "#,
        )
        .unwrap();

        assert_eq!(config.json, JsonFormat::Compact);
        // 未指定 compress 时使用默认值
        assert!(config.gzip.compress);
        assert_eq!(config.gzip.level, 9);
    }

    #[test]
    fn test_pretty_indent() {
        let config = SerializationConfig::from_toml_str(
            r#"
            [json]
            format = "pretty"
            indent = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.json, JsonFormat::Pretty { indent: 2 });

        let config = SerializationConfig::from_toml_str("[json]\nformat = \"pretty\"\n").unwrap();
        assert_eq!(config.json, JsonFormat::Pretty { indent: 4 });
    }

    #[test]
    fn test_invalid_document() {
        let err = SerializationConfig::from_toml_str("[gzip]\ncompress = \"yes\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = SerializationConfig::from_toml_str("[json]\nformat = \"yaml\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        // 缩进过大时必须返回错误，而不是在序列化时分配巨大内存
        for indent in ["256", "-1", "9000000000000000000"] {
            let doc = format!("[json]\nformat = \"pretty\"\nindent = {indent}\n");
            let err = SerializationConfig::from_toml_str(&doc).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "indent = {indent}");
        }

        let doc = "[json]\nformat = \"pretty\"\nindent = 255\n";
        let config = SerializationConfig::from_toml_str(doc).unwrap();
        assert_eq!(config.json, JsonFormat::Pretty { indent: 255 });
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SerializationConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, Error::File { .. }));
    }

    #[test]
    fn test_gzip_options_helpers() {
        assert!(!GzipOptions::disabled().compress);
        assert_eq!(GzipOptions::with_level(42).level, 9);
        assert_eq!(GzipOptions::with_level(1).level, 1);
    }
}
