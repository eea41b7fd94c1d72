//! Pull loop from a record source to a post sink.
//!
//! [`Pipeline`] reads raw records, drops the ones the [`LanguageFilter`]
//! rejects, decodes the rest and hands each [`Post`] to a caller-supplied
//! sink. What happens to a malformed record is the caller's choice, expressed
//! as an [`ErrorPolicy`].
//!
//! # Example
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use bayesky::config::SourceConfig;
//! use bayesky::filter::LanguageFilter;
//! use bayesky::parsing::PostExtractor;
//! use bayesky::pipeline::Pipeline;
//! use bayesky::source::LineSource;
//!
//! # fn main() -> bayesky::Result<()> {
//! let data = concat!(
//!     r#"{"did":"did:plc:a","time_us":1,"kind":"commit","commit":{"rkey":"r1","record":{"langs":["en"],"text":"hi"}}}"#,
//!     "\n",
//!     r#"{"did":"did:plc:b","time_us":2,"kind":"identity"}"#,
//! );
//! let mut source = LineSource::new(Cursor::new(data), SourceConfig::default());
//!
//! let mut texts = Vec::new();
//! let stats = Pipeline::new(PostExtractor::new(), LanguageFilter::any())
//!     .run(&mut source, |post| {
//!         texts.push(post.text);
//!         Ok(())
//!     })?;
//!
//! assert_eq!(texts, ["hi"]);
//! assert_eq!(stats.skipped, 1);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{BayeskyError, Result};
use crate::filter::LanguageFilter;
use crate::parsing::PostExtractor;
use crate::post::Post;
use crate::source::RecordSource;

/// What to do with a record that fails to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log the record and keep going.
    #[default]
    Skip,

    /// Stop the run and return the error.
    FailFast,
}

/// Counters collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Records pulled from the source.
    pub records_read: u64,

    /// Records rejected by the language filter.
    pub filtered_out: u64,

    /// Posts handed to the sink.
    pub posts: u64,

    /// Well-formed records that are not post creations.
    pub skipped: u64,

    /// Records that failed to decode.
    pub malformed: u64,
}

impl RunStats {
    /// Returns records read per second over `elapsed`.
    pub fn throughput(&self, elapsed: Duration) -> f64 {
        let secs = elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.records_read as f64 / secs
    }
}

/// Ties a record source, a language filter and the extractor together.
#[derive(Debug, Clone)]
pub struct Pipeline {
    extractor: PostExtractor,
    filter: LanguageFilter,
    policy: ErrorPolicy,
    max_records: Option<u64>,
}

impl Pipeline {
    /// Creates a pipeline that skips malformed records and reads until the
    /// source is exhausted.
    pub fn new(extractor: PostExtractor, filter: LanguageFilter) -> Self {
        Self {
            extractor,
            filter,
            policy: ErrorPolicy::default(),
            max_records: None,
        }
    }

    /// Sets the malformed-record policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Stops after reading `limit` records.
    #[must_use]
    pub fn with_max_records(mut self, limit: u64) -> Self {
        self.max_records = Some(limit);
        self
    }

    /// Drains `source`, feeding every decoded post to `sink`.
    ///
    /// # Errors
    ///
    /// Source I/O errors, oversized records and sink errors end the run. A
    /// malformed record ends it only under [`ErrorPolicy::FailFast`].
    pub fn run<S, F>(&self, source: &mut S, mut sink: F) -> Result<RunStats>
    where
        S: RecordSource + ?Sized,
        F: FnMut(Post) -> Result<()>,
    {
        let mut stats = RunStats::default();

        while self.max_records.is_none_or(|limit| stats.records_read < limit) {
            let Some(raw) = source.next_record()? else {
                break;
            };
            stats.records_read += 1;

            if !self.filter.matches(&raw) {
                stats.filtered_out += 1;
                continue;
            }

            match self.extractor.parse(&raw) {
                Ok(post) => {
                    stats.posts += 1;
                    sink(post)?;
                }
                Err(e) if e.is_skippable() => {
                    stats.skipped += 1;
                    debug!(record = stats.records_read, reason = %e, "skipping record");
                }
                Err(e @ BayeskyError::MalformedInput(_)) => {
                    stats.malformed += 1;
                    warn!(record = stats.records_read, error = %e, "malformed record");
                    if self.policy == ErrorPolicy::FailFast {
                        return Err(e);
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Ok(stats)
    }
}
