//! Line-oriented record sources.
//!
//! A Jetstream capture is newline-delimited JSON: one commit event per line.
//! [`LineSource`] hands out those lines one at a time without decoding them,
//! so the language filter can run on raw bytes first.
//!
//! # Example
//!
//! ```rust,no_run
//! use bayesky::config::SourceConfig;
//! use bayesky::source::{LineSource, RecordSource};
//!
//! # fn main() -> bayesky::Result<()> {
//! let mut source = LineSource::open("jetstream.jsonl", SourceConfig::default())?;
//!
//! while let Some(line) = source.next_record()? {
//!     println!("{} bytes", line.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The underlying file is closed when the source is dropped, on every exit
//! path.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::config::SourceConfig;
use crate::error::{BayeskyError, Result};

/// A pull-based supplier of raw records.
///
/// `Ok(None)` signals end of input. I/O failures are reported as
/// [`BayeskyError::Io`], never as decode errors.
pub trait RecordSource: Send {
    /// Returns the next raw record, or `None` once the input is exhausted.
    fn next_record(&mut self) -> Result<Option<Vec<u8>>>;

    /// Returns the number of bytes consumed so far.
    fn bytes_processed(&self) -> u64;

    /// Returns the total input size in bytes, if known.
    fn total_bytes(&self) -> Option<u64> {
        None
    }

    /// Returns approximate progress as a percentage (0.0 to 100.0).
    fn progress(&self) -> Option<f64> {
        match self.total_bytes() {
            Some(0) | None => None,
            Some(total) => Some((self.bytes_processed() as f64 / total as f64) * 100.0),
        }
    }
}

/// Reads one record per line from any buffered reader.
pub struct LineSource<R: BufRead> {
    reader: R,
    config: SourceConfig,
    total_bytes: Option<u64>,
    bytes_read: u64,
    line_number: u64,
    buffer: Vec<u8>,
}

impl LineSource<BufReader<File>> {
    /// Opens a file for reading.
    ///
    /// # Errors
    ///
    /// Returns [`BayeskyError::Io`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>, config: SourceConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();
        debug!(path = %path.display(), bytes = file_size, "opened record source");

        let reader = BufReader::with_capacity(config.buffer_size, file);
        let mut source = Self::new(reader, config);
        source.total_bytes = Some(file_size);
        Ok(source)
    }
}

impl<R: BufRead> LineSource<R> {
    /// Wraps an already buffered reader. The total size is unknown.
    pub fn new(reader: R, config: SourceConfig) -> Self {
        Self {
            reader,
            config,
            total_bytes: None,
            bytes_read: 0,
            line_number: 0,
            buffer: Vec::with_capacity(4096),
        }
    }

    /// Returns the 1-based number of the last line read.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    fn read_line(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            self.buffer.clear();
            let n = self.reader.read_until(b'\n', &mut self.buffer)?;
            if n == 0 {
                return Ok(None);
            }
            self.bytes_read += n as u64;
            self.line_number += 1;

            let line = trim_line_ending(&self.buffer);
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            if line.len() > self.config.max_record_size {
                return Err(BayeskyError::record_too_large(
                    self.config.max_record_size,
                    line.len(),
                ));
            }
            return Ok(Some(line.to_vec()));
        }
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

impl<R: BufRead + Send> RecordSource for LineSource<R> {
    fn next_record(&mut self) -> Result<Option<Vec<u8>>> {
        self.read_line()
    }

    fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }
}

impl<R: BufRead + Send> Iterator for LineSource<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}
