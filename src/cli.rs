//! Command-line interface definition using clap.
//!
//! This module defines [`Args`], the argument structure of the `bayesky`
//! binary, and the conversions from flags to library configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{ExtractorConfig, SourceConfig};
use crate::error::Result;
use crate::filter::LanguageFilter;
use crate::pipeline::ErrorPolicy;

/// Extract typed Bluesky posts from a Jetstream capture
/// (newline-delimited JSON, one event per line).
#[derive(Parser, Debug, Clone)]
#[command(name = "bayesky")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    bayesky jetstream.jsonl
    bayesky jetstream.jsonl --lang en --lang ja -o posts.jsonl
    bayesky jetstream.jsonl --any-lang --format csv
    RUST_LOG=bayesky=debug bayesky jetstream.jsonl --fail-fast")]
pub struct Args {
    /// Path to input file
    pub input: PathBuf,

    /// Path to output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "jsonl")]
    pub format: OutputFormat,

    /// Keep posts in this language (repeatable)
    #[arg(short, long = "lang", value_name = "CODE", default_value = "en")]
    pub langs: Vec<String>,

    /// Keep posts in every language
    #[arg(long, conflicts_with = "langs")]
    pub any_lang: bool,

    /// Stop at the first malformed record
    #[arg(long)]
    pub fail_fast: bool,

    /// Only accept commits that create app.bsky.feed.post records
    #[arg(long)]
    pub require_post_create: bool,

    /// Stop after reading this many records
    #[arg(long, value_name = "N")]
    pub max_records: Option<u64>,

    /// Reject input lines longer than this many bytes
    #[arg(long, value_name = "BYTES", default_value_t = SourceConfig::default().max_record_size)]
    pub max_record_size: usize,
}

impl Args {
    /// Builds the language filter from `--lang` / `--any-lang`.
    pub fn language_filter(&self) -> Result<LanguageFilter> {
        if self.any_lang {
            Ok(LanguageFilter::any())
        } else {
            LanguageFilter::new(self.langs.iter().cloned())
        }
    }

    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig::new().with_require_post_create(self.require_post_create)
    }

    pub fn source_config(&self) -> SourceConfig {
        SourceConfig::new().with_max_record_size(self.max_record_size)
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        if self.fail_fast {
            ErrorPolicy::FailFast
        } else {
            ErrorPolicy::Skip
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON Lines - one post object per line
    #[default]
    #[value(alias = "ndjson")]
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::output::OutputFormat::from(*self).fmt(f)
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::output::OutputFormat {
    fn from(format: OutputFormat) -> crate::output::OutputFormat {
        match format {
            OutputFormat::Jsonl => crate::output::OutputFormat::Jsonl,
            OutputFormat::Csv => crate::output::OutputFormat::Csv,
        }
    }
}
