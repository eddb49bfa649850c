//! Input handling with [`Upload`] and [`TextStream`].
//!
//! These types abstract over reading plaintext, gzip-compressed, and
//! bzip2-compressed uploads through a common interface.

use bytes::{Buf, Bytes};
use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use super::parsers::detect::Compression;
use crate::error::SeqStatsError;

/// An uploaded file: its declared filename and the complete raw bytes.
#[derive(Clone, Debug)]
pub struct Upload {
    pub filename: String,
    pub content: Bytes,
}

impl Upload {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Read a file off disk as an upload. The filename is the final path
    /// component, since that is what format detection looks at.
    pub fn from_path(filepath: impl AsRef<Path>) -> Result<Self, SeqStatsError> {
        let path = filepath.as_ref();
        let content = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Ok(Self::new(filename, content))
    }

    /// Open the upload's bytes as a decoded [`TextStream`].
    pub fn text_stream(&self, compression: Compression) -> TextStream {
        TextStream::new(self.content.clone(), compression)
    }
}

/// A lazily decoded stream of UTF-8 text.
///
/// Compressed input is inflated as it is read, and text is validated one
/// line at a time, so the decompressed content never has to be held in
/// memory as a whole. [`TextStream`] implements [`Read`] and [`BufRead`], so
/// record-parsing libraries can consume it directly. Failures raised here
/// travel through those libraries as [`io::Error`]s and are turned back into
/// [`SeqStatsError::DecodeError`] or [`SeqStatsError::DecompressionError`] by
/// `From<io::Error> for SeqStatsError`.
pub struct TextStream {
    inner: Box<dyn BufRead>,
    compression: Compression,
    line: Vec<u8>,
    pos: usize,
    line_number: usize,
}

impl TextStream {
    /// Constructs a new `TextStream` over raw bytes.
    ///
    /// # Arguments
    ///
    /// * `content` - the raw upload bytes.
    /// * `compression` - how `content` is compressed. Empty content is always
    ///   read as empty text, whatever the compression.
    pub fn new(content: Bytes, compression: Compression) -> Self {
        let compression = if content.is_empty() {
            Compression::None
        } else {
            compression
        };
        let raw = content.reader();
        let inner: Box<dyn BufRead> = match compression {
            Compression::None => Box::new(raw),
            Compression::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(raw))),
            Compression::Bzip2 => Box::new(BufReader::new(MultiBzDecoder::new(raw))),
        };
        Self {
            inner,
            compression,
            line: Vec::new(),
            pos: 0,
            line_number: 0,
        }
    }

    /// The number of lines decoded so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the remaining text in full.
    pub fn read_to_string(mut self) -> Result<String, SeqStatsError> {
        let mut content = String::new();
        Read::read_to_string(&mut self, &mut content)?;
        Ok(content)
    }

    /// Pull the next line (including its newline) into the line buffer,
    /// inflating and validating it.
    fn fill_line(&mut self) -> io::Result<()> {
        self.line.clear();
        self.pos = 0;
        if let Err(err) = self.inner.read_until(b'\n', &mut self.line) {
            return Err(match self.compression {
                Compression::None => err,
                compression => SeqStatsError::DecompressionError(format!(
                    "{} stream is corrupt: {}",
                    compression, err
                ))
                .into_io_error(),
            });
        }
        if self.line.is_empty() {
            return Ok(());
        }
        self.line_number += 1;
        if let Err(err) = std::str::from_utf8(&self.line) {
            let message = format!(
                "invalid UTF-8 on line {} at byte {}: {}",
                self.line_number,
                err.valid_up_to(),
                err
            );
            self.line.clear();
            return Err(SeqStatsError::DecodeError(message).into_io_error());
        }
        Ok(())
    }
}

impl Read for TextStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for TextStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos >= self.line.len() {
            self.fill_line()?;
        }
        Ok(&self.line[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.line.len());
    }
}
