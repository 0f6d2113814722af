//! Compression module.
//!
//! Stream wrappers that add or remove gzip compression around an existing
//! reader or writer, plus a buffer-level [`CompressionInterface`].

pub mod gzip;
pub mod traits;

pub use gzip::{
    gzip_reader, gzip_reader_rewind, gzip_writer, gzip_writer_with, is_gzip, GzipCompressor,
    GzipReader, GzipWriter, GZIP_MAGIC,
};
pub use traits::CompressionInterface;
