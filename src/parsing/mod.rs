//! Post extraction from Jetstream commit events.
//!
//! One raw record goes in, one [`Post`] or classified error comes out. The
//! extractor keeps no state between calls; it can be shared freely across
//! threads.
//!
//! # Example
//!
//! ```rust
//! use bayesky::parsing::parse_post;
//!
//! let line = br#"{"did":"did:plc:abc","time_us":123,"kind":"commit",
//!     "commit":{"rkey":"r1","record":{"text":"hello"}}}"#;
//!
//! let post = parse_post(line)?;
//! assert_eq!(post.actor_id, "did:plc:abc");
//! assert_eq!(post.sequence_time, 123);
//! assert_eq!(post.text, "hello");
//! # Ok::<(), bayesky::BayeskyError>(())
//! ```
//!
//! # Decoding Steps
//!
//! 1. The payload is decoded into a [`serde_json::Value`], which must be an
//!    object.
//! 2. `kind` must be `"commit"`; anything else is
//!    [`BayeskyError::NotACommit`].
//! 3. In strict mode, `commit.operation`/`commit.collection` must describe a
//!    post creation.
//! 4. The value is deserialized into the typed structs of [`jetstream`] and
//!    converted into a [`Post`].

pub mod jetstream;

pub use jetstream::{JetstreamEvent, RawEmbed, RawMedia};

use serde::Deserialize;
use serde::de::{self, Unexpected};
use serde_json::Value;

use crate::config::ExtractorConfig;
use crate::error::{BayeskyError, Result};
use crate::post::Post;
use crate::uri::POST_COLLECTION;

use jetstream::{CommitHeader, EventKind};

/// The only event kind carrying records.
pub const COMMIT_KIND: &str = "commit";

/// The only commit operation producing a new post.
pub const CREATE_OPERATION: &str = "create";

/// Decodes posts from raw Jetstream records.
///
/// # Example
///
/// ```rust
/// use bayesky::config::ExtractorConfig;
/// use bayesky::parsing::PostExtractor;
///
/// let extractor = PostExtractor::with_config(ExtractorConfig::strict());
///
/// let like = br#"{"did":"did:plc:abc","time_us":1,"kind":"commit",
///     "commit":{"operation":"create","collection":"app.bsky.feed.like","rkey":"r1",
///     "record":{"subject":{}}}}"#;
///
/// let err = extractor.parse(like).unwrap_err();
/// assert!(err.is_skippable());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PostExtractor {
    config: ExtractorConfig,
}

impl PostExtractor {
    /// Creates an extractor with the lenient default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor with a custom configuration.
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Decodes one raw record.
    ///
    /// # Errors
    ///
    /// - [`BayeskyError::NotACommit`] if `kind` is not `"commit"`
    /// - [`BayeskyError::UnexpectedCommit`] in strict mode, for anything but a
    ///   post creation
    /// - [`BayeskyError::MalformedInput`] for invalid JSON or any missing,
    ///   wrong-typed or out-of-range required field
    pub fn parse(&self, raw: &[u8]) -> Result<Post> {
        let value: Value = serde_json::from_slice(raw)?;
        self.parse_value(&value)
    }

    /// Decodes one raw record given as text.
    pub fn parse_str(&self, raw: &str) -> Result<Post> {
        self.parse(raw.as_bytes())
    }

    /// Decodes an already parsed JSON value.
    pub fn parse_value(&self, value: &Value) -> Result<Post> {
        if !value.is_object() {
            return Err(BayeskyError::MalformedInput(de::Error::invalid_type(
                unexpected(value),
                &"a JSON object",
            )));
        }

        let EventKind { kind } = EventKind::deserialize(value)?;
        if kind != COMMIT_KIND {
            return Err(BayeskyError::not_a_commit(kind));
        }

        if self.config.require_post_create {
            let CommitHeader { commit } = CommitHeader::deserialize(value)?;
            if commit.operation != CREATE_OPERATION || commit.collection != POST_COLLECTION {
                return Err(BayeskyError::unexpected_commit(
                    commit.operation,
                    commit.collection,
                ));
            }
        }

        let event = JetstreamEvent::deserialize(value)?;
        Ok(Post::from(event))
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

/// Decodes one raw record with the default configuration.
///
/// Shorthand for `PostExtractor::new().parse(raw)`.
pub fn parse_post(raw: &[u8]) -> Result<Post> {
    PostExtractor::new().parse(raw)
}

/// Decodes one raw record given as text with the default configuration.
pub fn parse_post_str(raw: &str) -> Result<Post> {
    PostExtractor::new().parse_str(raw)
}
