//! Typed representation of a Bluesky post.
//!
//! This module provides [`Post`], the value the extractor produces for every
//! successfully decoded firehose record, and its media parts: [`Blob`],
//! [`Image`], [`Video`] and [`ExternalEmbed`].
//!
//! # Overview
//!
//! A post consists of:
//! - **Required**: `actor_id`, `sequence_time`, `record_key`, `text`
//! - **Optional**: reply linkage, quoted record, one kind of media
//!
//! # Examples
//!
//! ```
//! use bayesky::Post;
//!
//! let post = Post::new("did:plc:abc", 123, "r1", "hello");
//! assert!(!post.is_reply());
//! assert_eq!(post.reply_parent_uri(), "");
//! assert_eq!(post.web_url(), "https://bsky.app/profile/did:plc:abc/post/r1");
//! ```
//!
//! ## Serialization
//!
//! ```
//! use bayesky::Post;
//!
//! let post = Post::new("did:plc:abc", 123, "r1", "hello");
//! let json = serde_json::to_string(&post)?;
//!
//! // absent parts are omitted
//! assert!(!json.contains("reply"));
//! assert_eq!(serde_json::from_str::<Post>(&json)?, post);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::uri::AtUri;

/// A reference to externally stored binary content.
///
/// Only the metadata is captured; the content itself is never fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    /// Content-addressed identifier (CID) of the blob.
    pub link: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// An image attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Alt text. Frequently empty.
    pub alt: String,

    /// Width in pixels, or 0 when the record carries no aspect ratio.
    pub width: u64,

    /// Height in pixels, or 0 when the record carries no aspect ratio.
    pub height: u64,

    pub blob: Blob,
}

/// A video attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub width: u64,
    pub height: u64,
    pub blob: Blob,
}

/// A link preview card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalEmbed {
    pub title: String,
    pub description: String,
    pub uri: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub thumbnail: Option<Blob>,
}

/// Reply linkage of a post. Both URIs are always present together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRef {
    /// URI of the post being replied to.
    pub parent_uri: String,

    /// URI of the first post of the thread.
    pub root_uri: String,
}

impl ReplyRef {
    /// Parses the parent URI into its components.
    pub fn parent(&self) -> Result<AtUri> {
        self.parent_uri.parse()
    }

    /// Parses the root URI into its components.
    pub fn root(&self) -> Result<AtUri> {
        self.root_uri.parse()
    }
}

/// A post decoded from one firehose commit event.
///
/// # Fields
///
/// | Field | Type | Source |
/// |-------|------|--------|
/// | `actor_id` | `String` | `did` |
/// | `sequence_time` | `u64` | `time_us` |
/// | `record_key` | `String` | `commit.rkey` |
/// | `text` | `String` | `commit.record.text` |
/// | `reply` | `Option<ReplyRef>` | `commit.record.reply.{parent,root}.uri` |
/// | `quoted_uri` | `Option<String>` | quoted record URI |
/// | `external_embed` | `Option<ExternalEmbed>` | link card of a quote-with-media |
/// | `images` | `Vec<Image>` | image embed, direct or quote-with-media |
/// | `video` | `Option<Video>` | video of a quote-with-media |
///
/// The user-supplied `createdAt` field is not modelled: anyone can write
/// anything there. `sequence_time` is assigned by the relay instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// DID of the authoring account.
    pub actor_id: String,

    /// Microsecond timestamp assigned by the stream infrastructure.
    pub sequence_time: u64,

    /// Key of this post within the author's collection.
    pub record_key: String,

    /// Post body. May be empty (e.g. image-only posts).
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub reply: Option<ReplyRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub quoted_uri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub external_embed: Option<ExternalEmbed>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub images: Vec<Image>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub video: Option<Video>,
}

impl Post {
    /// Creates a top-level post with no embeds.
    pub fn new(
        actor_id: impl Into<String>,
        sequence_time: u64,
        record_key: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            sequence_time,
            record_key: record_key.into(),
            text: text.into(),
            reply: None,
            quoted_uri: None,
            external_embed: None,
            images: Vec::new(),
            video: None,
        }
    }

    /// Returns the parent URI, or `""` for a top-level post.
    pub fn reply_parent_uri(&self) -> &str {
        self.reply.as_ref().map_or("", |r| r.parent_uri.as_str())
    }

    /// Returns the thread root URI, or `""` for a top-level post.
    pub fn reply_root_uri(&self) -> &str {
        self.reply.as_ref().map_or("", |r| r.root_uri.as_str())
    }

    pub fn is_reply(&self) -> bool {
        self.reply.is_some()
    }

    pub fn is_quote(&self) -> bool {
        self.quoted_uri.is_some()
    }

    /// Returns `true` if the post carries images or a video.
    pub fn has_media(&self) -> bool {
        !self.images.is_empty() || self.video.is_some()
    }

    /// Returns the `at://` URI of this post.
    pub fn at_uri(&self) -> AtUri {
        AtUri::post(&self.actor_id, &self.record_key)
    }

    /// Returns the bsky.app link for this post.
    pub fn web_url(&self) -> String {
        format!(
            "https://bsky.app/profile/{}/post/{}",
            self.actor_id, self.record_key
        )
    }

    /// Converts `sequence_time` to a UTC timestamp.
    ///
    /// Returns `None` if the value is outside chrono's representable range.
    pub fn sequence_datetime(&self) -> Option<DateTime<Utc>> {
        let micros = i64::try_from(self.sequence_time).ok()?;
        DateTime::from_timestamp_micros(micros)
    }
}
