//! Line source for the first pass.

use crate::io::compression::{auto_detect_reader, READ_BUFFER_SIZE};
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Iterator of text lines from any byte stream.
///
/// A line ends at `\n`, at `\r`, or at `\r\n`; terminators are stripped.
/// Bytes that are not valid UTF-8 are replaced with U+FFFD instead of failing
/// the read.
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    // The previous line ended in `\r`; a leading `\n` belongs to it.
    skip_lf: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(256),
            skip_lf: false,
        }
    }

    /// Fill `self.buf` with the next line. Returns `false` at end of input.
    fn read_line(&mut self) -> io::Result<bool> {
        self.buf.clear();
        let mut read_any = false;
        loop {
            let available = match self.inner.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(read_any);
            }
            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.inner.consume(1);
                    continue;
                }
            }
            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    self.skip_lf = available[end] == b'\r';
                    self.buf.extend_from_slice(&available[..end]);
                    self.inner.consume(end + 1);
                    return Ok(true);
                }
                None => {
                    let n = available.len();
                    self.buf.extend_from_slice(available);
                    self.inner.consume(n);
                    read_any = true;
                }
            }
        }
    }
}

impl LineReader<BufReader<Box<dyn Read>>> {
    /// Buffer an arbitrary reader.
    pub fn from_read(reader: Box<dyn Read>) -> Self {
        Self::new(BufReader::with_capacity(READ_BUFFER_SIZE, reader))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_line() {
            Ok(true) => Some(Ok(String::from_utf8_lossy(&self.buf).into_owned())),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// `true` for `http://...`-style locations.
fn looks_like_url(path: &str) -> bool {
    path.split_once("://")
        .is_some_and(|(scheme, _)| {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        })
}

/// Open `path` for line reading, decompressing transparently.
///
/// # Errors
/// Fails if `path` is a URL or cannot be opened.
pub fn open_lines(path: impl AsRef<Path>) -> Result<LineReader<BufReader<Box<dyn Read>>>> {
    let path = path.as_ref();
    if looks_like_url(&path.to_string_lossy()) {
        bail!("remote sources are not supported: {}", path.display());
    }
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let reader = auto_detect_reader(f, path)
        .with_context(|| format!("setup decompression for {}", path.display()))?;
    Ok(LineReader::from_read(reader))
}
