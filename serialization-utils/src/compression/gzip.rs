//! Gzip stream wrappers.
//!
//! [`gzip_reader`] sniffs the first two bytes of its input and only inserts a
//! decoder when they are the gzip magic number, so the same code path reads
//! both compressed and plain data. [`gzip_writer`] inserts an encoder when
//! asked to, which keeps callers clean when compression is a runtime option.
//!
//! Both wrappers take their stream by value. Pass `&mut stream` to keep
//! ownership; the borrow then lasts as long as the wrapper.

use std::io::{self, Chain, Cursor, Read, Seek, SeekFrom, Write};

use flate2::{read::MultiGzDecoder, write::GzEncoder, Compression};

use crate::{
    compression::traits::CompressionInterface,
    config::{GzipOptions, DEFAULT_GZIP_LEVEL},
    error::Result,
};

/// Leading bytes of every gzip member (RFC 1952, ID1 and ID2).
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Returns true if `bytes` starts with the gzip magic number.
pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// The wrapped stream with the probed bytes put back in front of it.
type Probed<R> = Chain<Cursor<Vec<u8>>, R>;

enum ReaderKind<R: Read> {
    Plain(Probed<R>),
    Gzip(MultiGzDecoder<Probed<R>>),
}

/// Reader returned by [`gzip_reader`] and [`gzip_reader_rewind`].
pub struct GzipReader<R: Read> {
    inner: ReaderKind<R>,
}

impl<R: Read> GzipReader<R> {
    fn new(source: Probed<R>, compressed: bool) -> Self {
        let inner = if compressed {
            debug!("gzip magic found, decompressing input");
            ReaderKind::Gzip(MultiGzDecoder::new(source))
        } else {
            debug!("no gzip magic, reading input unchanged");
            ReaderKind::Plain(source)
        };
        Self { inner }
    }

    /// Whether the input was detected as gzip-compressed.
    pub fn is_compressed(&self) -> bool {
        matches!(self.inner, ReaderKind::Gzip(_))
    }

    /// Unwraps this reader, returning the underlying stream.
    ///
    /// Data already pulled from the stream into the decoder's buffer is lost.
    pub fn into_inner(self) -> R {
        match self.inner {
            ReaderKind::Plain(source) => source.into_inner().1,
            ReaderKind::Gzip(decoder) => decoder.into_inner().into_inner().1,
        }
    }
}

impl<R: Read> Read for GzipReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            ReaderKind::Plain(r) => r.read(buf),
            ReaderKind::Gzip(r) => r.read(buf),
        }
    }
}

/// Reads up to `GZIP_MAGIC.len()` bytes. Fewer are returned only at end of
/// stream.
fn read_probe<R: Read>(stream: &mut R) -> io::Result<Vec<u8>> {
    let mut probe = [0u8; GZIP_MAGIC.len()];
    let mut len = 0;
    while len < probe.len() {
        match stream.read(&mut probe[len..]) {
            Ok(0) => break,
            Ok(n) => len += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    trace!("probe: {:02x?}", &probe[..len]);
    Ok(probe[..len].to_vec())
}

/// Wraps an input stream with gzip decompression if it is compressed.
///
/// The first two bytes are read to check for the gzip magic number. If they
/// do not match, including when the stream holds fewer than two bytes, the
/// data is passed through unchanged. The probed bytes are kept and served
/// first, so the stream does not need to be seekable and nothing is lost.
///
/// # Errors
///
/// Returns the error of the underlying stream if probing fails. Errors while
/// reading, e.g. a truncated gzip member, are returned by the reader.
pub fn gzip_reader<R: Read>(mut stream: R) -> io::Result<GzipReader<R>> {
    let probe = read_probe(&mut stream)?;
    let compressed = is_gzip(&probe);
    Ok(GzipReader::new(Cursor::new(probe).chain(stream), compressed))
}

/// Like [`gzip_reader`], but seeks the stream back to offset 0 after probing.
///
/// The stream is rewound to its absolute start, not to the position it had
/// when passed in, so it must not have been read from before.
pub fn gzip_reader_rewind<R: Read + Seek>(mut stream: R) -> io::Result<GzipReader<R>> {
    let probe = read_probe(&mut stream)?;
    stream.seek(SeekFrom::Start(0))?;
    let compressed = is_gzip(&probe);
    Ok(GzipReader::new(Cursor::new(Vec::new()).chain(stream), compressed))
}

enum WriterKind<W: Write> {
    Plain(W),
    Gzip(GzEncoder<W>),
}

/// Writer returned by [`gzip_writer`] and [`gzip_writer_with`].
///
/// Dropping a compressing writer writes the gzip trailer but ignores errors;
/// call [`GzipWriter::finish`] to observe them.
pub struct GzipWriter<W: Write> {
    inner: WriterKind<W>,
}

impl<W: Write> GzipWriter<W> {
    /// Whether written data is gzip-compressed.
    pub fn is_compressed(&self) -> bool {
        matches!(self.inner, WriterKind::Gzip(_))
    }

    /// Acquires a reference to the underlying stream.
    pub fn get_ref(&self) -> &W {
        match &self.inner {
            WriterKind::Plain(w) => w,
            WriterKind::Gzip(w) => w.get_ref(),
        }
    }

    /// Acquires a mutable reference to the underlying stream.
    ///
    /// Writing to it directly while compression is enabled corrupts the
    /// output.
    pub fn get_mut(&mut self) -> &mut W {
        match &mut self.inner {
            WriterKind::Plain(w) => w,
            WriterKind::Gzip(w) => w.get_mut(),
        }
    }

    /// Finishes the gzip stream, flushes and returns the underlying stream.
    pub fn finish(self) -> io::Result<W> {
        let mut stream = match self.inner {
            WriterKind::Plain(w) => w,
            WriterKind::Gzip(w) => w.finish()?,
        };
        stream.flush()?;
        Ok(stream)
    }
}

impl<W: Write> Write for GzipWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            WriterKind::Plain(w) => w.write(buf),
            WriterKind::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            WriterKind::Plain(w) => w.flush(),
            WriterKind::Gzip(w) => w.flush(),
        }
    }
}

/// Wraps an output stream with gzip compression.
///
/// If `compress` is false the data is written unchanged. Useful where
/// compression is enabled or disabled by a parameter.
pub fn gzip_writer<W: Write>(stream: W, compress: bool) -> GzipWriter<W> {
    gzip_writer_with(
        stream,
        &GzipOptions {
            compress,
            level: DEFAULT_GZIP_LEVEL,
        },
    )
}

/// Like [`gzip_writer`], with a configurable compression level.
pub fn gzip_writer_with<W: Write>(stream: W, options: &GzipOptions) -> GzipWriter<W> {
    let inner = if options.compress {
        let level = options.level.min(9);
        debug!("compressing output with gzip level {level}");
        WriterKind::Gzip(GzEncoder::new(stream, Compression::new(level)))
    } else {
        WriterKind::Plain(stream)
    };
    GzipWriter { inner }
}

/// Gzip compressor with configurable compression level.
pub struct GzipCompressor {
    options: GzipOptions,
}

impl Default for GzipCompressor {
    fn default() -> Self {
        Self::new(DEFAULT_GZIP_LEVEL)
    }
}

impl GzipCompressor {
    /// Creates a new gzip compressor with the specified compression level.
    ///
    /// Level 0 disables compression, levels above 9 are clamped.
    pub fn new(level: u32) -> Self {
        Self {
            options: GzipOptions {
                compress: level > 0,
                level: level.min(9),
            },
        }
    }

    /// Creates a disabled compressor instance that passes data through unchanged.
    pub fn new_disabled() -> Self {
        Self {
            options: GzipOptions::disabled(),
        }
    }

    /// Creates a compressor from configured options.
    pub fn from_options(options: GzipOptions) -> Self {
        Self { options }
    }
}

impl CompressionInterface for GzipCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut writer = gzip_writer_with(Vec::with_capacity(data.len()), &self.options);
        writer.write_all(data)?;
        Ok(writer.finish()?)
    }

    /// Decompresses gzip data, or returns a copy of `compressed_data` if it
    /// does not start with the gzip magic number.
    fn decompress(&self, compressed_data: &[u8]) -> Result<Vec<u8>> {
        let mut reader = gzip_reader(compressed_data)?;
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    fn get_name(&self) -> &'static str {
        if self.options.compress {
            "gzip"
        } else {
            "none"
        }
    }
}
