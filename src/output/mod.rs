//! Output writers for decoded posts.
//!
//! Writers are incremental: posts are written as they come out of the
//! pipeline, so memory use does not grow with the input.
//!
//! - [`JsonlWriter`] / [`to_jsonl`] - one serialized [`Post`] per line
//! - [`CsvWriter`] / [`to_csv`] - semicolon-delimited summary columns
//!   (requires the `csv-output` feature)
//!
//! # Example
//!
//! ```rust
//! use bayesky::Post;
//! use bayesky::output::{OutputFormat, create_writer};
//!
//! # fn main() -> bayesky::Result<()> {
//! let mut buffer = Vec::new();
//! {
//!     let mut writer = create_writer(OutputFormat::Jsonl, &mut buffer);
//!     writer.write_post(&Post::new("did:plc:abc", 1, "r1", "hello"))?;
//!     writer.finish()?;
//! }
//! assert!(String::from_utf8(buffer).unwrap().ends_with("\n"));
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{CsvWriter, to_csv};
pub use jsonl_writer::{JsonlWriter, to_jsonl};

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::post::Post;

/// A destination for decoded posts.
pub trait PostWriter {
    /// Writes one post.
    fn write_post(&mut self, post: &Post) -> Result<()>;

    /// Flushes buffered output. Call once after the last post.
    fn finish(&mut self) -> Result<()>;
}

#[cfg(feature = "csv-output")]
const FORMAT_NAMES: &[&str] = &["jsonl", "csv"];
#[cfg(not(feature = "csv-output"))]
const FORMAT_NAMES: &[&str] = &["jsonl"];

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON Lines - one post object per line
    #[default]
    Jsonl,

    /// CSV with semicolon delimiter
    #[cfg(feature = "csv-output")]
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jsonl => "jsonl",
            #[cfg(feature = "csv-output")]
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        FORMAT_NAMES
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Jsonl => write!(f, "JSONL"),
            #[cfg(feature = "csv-output")]
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            #[cfg(feature = "csv-output")]
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Creates a writer for `format` on top of `out`.
pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    out: W,
) -> Box<dyn PostWriter + 'a> {
    match format {
        OutputFormat::Jsonl => Box::new(JsonlWriter::new(out)),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => Box::new(CsvWriter::new(out)),
    }
}
