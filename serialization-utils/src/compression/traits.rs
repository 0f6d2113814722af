//! Compression interface definitions.

use crate::error::Result;

/// Buffer-level compression interface.
///
/// Implementations work on whole payloads held in memory. For streaming use
/// the wrappers in [`crate::compression::gzip`] directly.
pub trait CompressionInterface {
    /// Compresses data.
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompresses data.
    ///
    /// Implementations may accept input that was never compressed and return
    /// it unchanged.
    fn decompress(&self, compressed_data: &[u8]) -> Result<Vec<u8>>;

    /// Returns the name of the compression algorithm.
    fn get_name(&self) -> &'static str;
}
