//! # serialization-utils
//!
//! Small helpers for storing serializable values.
//!
//! ## Features
//!
//! - Convert any serde-serializable value from/to JSON strings and streams
//! - Wrap readers with gzip decompression that is only applied when the input
//!   actually is compressed
//! - Wrap writers with gzip compression that can be switched off by a flag
//! - Save/load values as (optionally compressed) JSON files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! use serialization_utils::{from_json_reader, gzip_reader, gzip_writer, to_json_writer};
//!
//! #[derive(serde::Serialize, serde::Deserialize)]
//! struct Data {
//!     a: i32,
//!     b: String,
//! }
//!
//! let data = Data { a: 1, b: "x".into() };
//!
//! let mut out = gzip_writer(File::create("data.json.gz").unwrap(), true);
//! to_json_writer(&data, &mut out).unwrap();
//! out.finish().unwrap();
//!
//! // Works whether or not the file is compressed.
//! let input = gzip_reader(BufReader::new(File::open("data.json.gz").unwrap())).unwrap();
//! let data: Data = from_json_reader(input).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`json`] - JSON conversion helpers
//! - [`compression`] - Gzip stream wrappers
//! - [`config`] - Output configuration
//! - [`file`] - JSON file helpers
//! - [`error`] - Error types and result definitions

#[macro_use]
extern crate log;

/// Gzip stream wrappers and compression interface.
pub mod compression;

/// Output configuration loaded from TOML.
pub mod config;

/// Error types and result definitions.
pub mod error;

/// Reading and writing JSON files.
pub mod file;

/// JSON conversion helpers.
pub mod json;

pub use compression::{
    gzip_reader, gzip_reader_rewind, gzip_writer, gzip_writer_with, is_gzip,
    CompressionInterface, GzipCompressor, GzipReader, GzipWriter, GZIP_MAGIC,
};
pub use config::{GzipOptions, JsonFormat, SerializationConfig};
pub use error::{Error, Result};
pub use file::{load_json, save_json};
pub use json::{
    from_json, from_json_reader, to_json, to_json_with, to_json_writer, to_json_writer_with,
};
