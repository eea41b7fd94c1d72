//! # Bayesky
//!
//! A Rust library for extracting typed Bluesky posts from the Jetstream
//! event feed.
//!
//! ## Overview
//!
//! Jetstream delivers repository events as newline-delimited JSON. Most of
//! them are not interesting to a post consumer: identity and account events,
//! likes, follows, deletions. Bayesky turns one raw event into either a
//! [`Post`] or a classified error:
//!
//! - [`BayeskyError::NotACommit`] - a well-formed event of another kind,
//!   normally skipped
//! - [`BayeskyError::MalformedInput`] - invalid JSON or a commit missing
//!   required post fields
//!
//! On top of the decoder sit a line-oriented record source, a cheap language
//! prefilter, a pull pipeline with run statistics and JSONL/CSV writers.
//!
//! ## Quick Start
//!
//! ```rust
//! use bayesky::parsing::parse_post_str;
//!
//! let line = r#"{"did":"did:plc:abc","time_us":1731748069639244,"kind":"commit",
//!     "commit":{"rkey":"3lb2k4bihok2f","record":{"text":"hello world"}}}"#;
//!
//! let post = parse_post_str(line)?;
//! assert_eq!(post.actor_id, "did:plc:abc");
//! assert_eq!(post.text, "hello world");
//! assert!(!post.is_reply());
//! # Ok::<(), bayesky::BayeskyError>(())
//! ```
//!
//! ## Processing a Capture
//!
//! ```rust,no_run
//! use bayesky::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut source = LineSource::open("jetstream.jsonl", SourceConfig::default())?;
//!     let pipeline = Pipeline::new(PostExtractor::new(), LanguageFilter::new(["en"])?);
//!
//!     let stats = pipeline.run(&mut source, |post| {
//!         println!("{}: {}", post.web_url(), post.text);
//!         Ok(())
//!     })?;
//!
//!     println!("{} posts out of {} records", stats.posts, stats.records_read);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - event decoding ([`PostExtractor`](parsing::PostExtractor),
//!   [`parse_post`](parsing::parse_post))
//! - [`post`] - the [`Post`] model and its embeds
//! - [`uri`] - [`AtUri`](uri::AtUri) record addresses
//! - [`config`] - extractor and source configuration
//! - [`source`] - [`RecordSource`](source::RecordSource) and
//!   [`LineSource`](source::LineSource)
//! - [`filter`] - [`LanguageFilter`](filter::LanguageFilter)
//! - [`pipeline`] - [`Pipeline`](pipeline::Pipeline) and
//!   [`RunStats`](pipeline::RunStats)
//! - [`output`] - JSONL and CSV writers
//! - [`cli`] - CLI argument types (`cli` feature)
//! - [`error`] - [`BayeskyError`] and [`Result`]
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod output;
pub mod parsing;
pub mod pipeline;
pub mod post;
pub mod source;
pub mod uri;

// Re-export the main types at the crate root for convenience
pub use error::{BayeskyError, Result};
pub use post::Post;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use bayesky::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Post;
    pub use crate::error::{BayeskyError, Result};

    pub use crate::config::{ExtractorConfig, SourceConfig};
    pub use crate::filter::LanguageFilter;
    pub use crate::parsing::{PostExtractor, parse_post, parse_post_str};
    pub use crate::pipeline::{ErrorPolicy, Pipeline, RunStats};
    pub use crate::post::{Blob, ExternalEmbed, Image, ReplyRef, Video};
    pub use crate::source::{LineSource, RecordSource};
    pub use crate::uri::AtUri;

    pub use crate::output::{JsonlWriter, OutputFormat, PostWriter, create_writer, to_jsonl};

    #[cfg(feature = "csv-output")]
    pub use crate::output::{CsvWriter, to_csv};
}
