//! Raw Jetstream commit event types.
//!
//! These structs mirror the subset of the wire format the extractor reads.
//! Unknown fields are ignored; every field that is not an `Option` is
//! required, so a missing or wrong-typed value surfaces as the first
//! structural mismatch reported by serde.
//!
//! Derived struct visitors also accept a JSON array, matched positionally.
//! Every struct-typed field is therefore read through `object`,
//! `optional_object` or `objects`, which accept only JSON objects.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::post::{Blob, ExternalEmbed, Image, Post, ReplyRef, Video};

/// Top-level `kind` of an event, read before anything else.
#[derive(Debug, Deserialize)]
pub struct EventKind {
    pub kind: String,
}

/// Operation and collection of a commit, read only in strict mode.
#[derive(Debug, Deserialize)]
pub struct CommitHeader {
    #[serde(deserialize_with = "object")]
    pub commit: CommitTarget,
}

#[derive(Debug, Deserialize)]
pub struct CommitTarget {
    pub operation: String,
    pub collection: String,
}

/// A commit event carrying a post record.
#[derive(Debug, Deserialize)]
pub struct JetstreamEvent {
    pub did: String,
    pub time_us: u64,
    #[serde(deserialize_with = "object")]
    pub commit: RawCommit,
}

#[derive(Debug, Deserialize)]
pub struct RawCommit {
    pub rkey: String,
    #[serde(deserialize_with = "object")]
    pub record: RawPostRecord,
}

/// The `app.bsky.feed.post` record itself.
#[derive(Debug, Deserialize)]
pub struct RawPostRecord {
    pub text: String,
    #[serde(default, deserialize_with = "optional_object")]
    pub reply: Option<RawReply>,
    #[serde(default, deserialize_with = "optional_object")]
    pub embed: Option<RawEmbed>,
}

#[derive(Debug, Deserialize)]
pub struct RawReply {
    #[serde(deserialize_with = "object")]
    pub parent: RawStrongRef,
    #[serde(deserialize_with = "object")]
    pub root: RawStrongRef,
}

#[derive(Debug, Deserialize)]
pub struct RawStrongRef {
    pub uri: String,
}

/// Embed attached to a post, discriminated by `$type`.
///
/// Tags this extractor does not handle decode to [`RawEmbed::Unknown`] so new
/// embed kinds upstream never break decoding.
#[derive(Debug, Deserialize)]
#[serde(tag = "$type")]
pub enum RawEmbed {
    #[serde(rename = "app.bsky.embed.images")]
    Images {
        #[serde(deserialize_with = "objects")]
        images: Vec<RawImage>,
    },

    #[serde(rename = "app.bsky.embed.record")]
    Record {
        #[serde(deserialize_with = "object")]
        record: RawQuotedRef,
    },

    #[serde(rename = "app.bsky.embed.recordWithMedia")]
    RecordWithMedia {
        #[serde(deserialize_with = "object")]
        record: RawQuotedRecord,
        #[serde(deserialize_with = "object")]
        media: RawMedia,
    },

    #[serde(other)]
    Unknown,
}

/// Media half of a `recordWithMedia` embed, discriminated by `$type`.
#[derive(Debug, Deserialize)]
#[serde(tag = "$type")]
pub enum RawMedia {
    #[serde(rename = "app.bsky.embed.images")]
    Images {
        #[serde(deserialize_with = "objects")]
        images: Vec<RawImage>,
    },

    #[serde(rename = "app.bsky.embed.external")]
    External {
        #[serde(deserialize_with = "object")]
        external: RawExternal,
    },

    #[serde(rename = "app.bsky.embed.video")]
    Video {
        #[serde(rename = "aspectRatio", deserialize_with = "object")]
        aspect_ratio: RawAspectRatio,
        #[serde(deserialize_with = "object")]
        video: RawBlob,
    },

    #[serde(other)]
    Unknown,
}

/// `embed.record` of a plain quote.
#[derive(Debug, Deserialize)]
pub struct RawQuotedRef {
    pub uri: Option<String>,
}

/// `embed.record` of a quote-with-media; the reference sits one level deeper.
#[derive(Debug, Deserialize)]
pub struct RawQuotedRecord {
    #[serde(deserialize_with = "object")]
    pub record: RawQuotedRef,
}

#[derive(Debug, Deserialize)]
pub struct RawImage {
    pub alt: String,
    #[serde(rename = "aspectRatio", default, deserialize_with = "optional_object")]
    pub aspect_ratio: Option<RawAspectRatio>,
    #[serde(deserialize_with = "object")]
    pub image: RawBlob,
}

#[derive(Debug, Deserialize)]
pub struct RawAspectRatio {
    pub width: u64,
    pub height: u64,
}

#[derive(Debug, Deserialize)]
pub struct RawExternal {
    pub title: String,
    pub description: String,
    pub uri: String,
    #[serde(default, deserialize_with = "optional_object")]
    pub thumb: Option<RawBlob>,
}

#[derive(Debug, Deserialize)]
pub struct RawBlob {
    #[serde(rename = "ref", deserialize_with = "object")]
    pub link: RawLink,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub size: u64,
}

#[derive(Debug, Deserialize)]
pub struct RawLink {
    #[serde(rename = "$link")]
    pub link: String,
}

// ============================================================================
// Object-only field decoding
// ============================================================================

fn from_map<T: DeserializeOwned, E: de::Error>(map: Map<String, Value>) -> Result<T, E> {
    T::deserialize(Value::Object(map)).map_err(E::custom)
}

/// Reads a required struct field that must be a JSON object.
fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    from_map(Map::deserialize(deserializer)?)
}

/// Reads an optional struct field; `null` and absence both give `None`.
fn optional_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Option::<Map<String, Value>>::deserialize(deserializer)?
        .map(from_map)
        .transpose()
}

/// Reads an array whose every element must be a JSON object.
fn objects<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Vec::<Map<String, Value>>::deserialize(deserializer)?
        .into_iter()
        .map(from_map)
        .collect()
}

// ============================================================================
// Conversion into the domain model
// ============================================================================

impl From<RawBlob> for Blob {
    fn from(raw: RawBlob) -> Self {
        Blob {
            link: raw.link.link,
            mime_type: raw.mime_type,
            size_bytes: raw.size,
        }
    }
}

impl From<RawImage> for Image {
    fn from(raw: RawImage) -> Self {
        let (width, height) = raw
            .aspect_ratio
            .map(|ratio| (ratio.width, ratio.height))
            .unwrap_or_default();

        Image {
            alt: raw.alt,
            width,
            height,
            blob: raw.image.into(),
        }
    }
}

impl From<RawExternal> for ExternalEmbed {
    fn from(raw: RawExternal) -> Self {
        ExternalEmbed {
            title: raw.title,
            description: raw.description,
            uri: raw.uri,
            thumbnail: raw.thumb.map(Blob::from),
        }
    }
}

impl From<RawReply> for ReplyRef {
    fn from(raw: RawReply) -> Self {
        ReplyRef {
            parent_uri: raw.parent.uri,
            root_uri: raw.root.uri,
        }
    }
}

fn convert_images(images: Vec<RawImage>) -> Vec<Image> {
    images.into_iter().map(Image::from).collect()
}

impl RawMedia {
    fn apply(self, post: &mut Post) {
        match self {
            RawMedia::Images { images } => post.images = convert_images(images),
            RawMedia::External { external } => post.external_embed = Some(external.into()),
            RawMedia::Video {
                aspect_ratio,
                video,
            } => {
                post.video = Some(Video {
                    width: aspect_ratio.width,
                    height: aspect_ratio.height,
                    blob: video.into(),
                });
            }
            RawMedia::Unknown => {}
        }
    }
}

impl RawEmbed {
    fn apply(self, post: &mut Post) {
        match self {
            RawEmbed::Images { images } => post.images = convert_images(images),
            RawEmbed::Record { record } => post.quoted_uri = record.uri,
            RawEmbed::RecordWithMedia { record, media } => {
                post.quoted_uri = record.record.uri;
                media.apply(post);
            }
            RawEmbed::Unknown => {}
        }
    }
}

impl From<JetstreamEvent> for Post {
    fn from(event: JetstreamEvent) -> Self {
        let RawCommit { rkey, record } = event.commit;

        let mut post = Post::new(event.did, event.time_us, rkey, record.text);
        post.reply = record.reply.map(ReplyRef::from);
        if let Some(embed) = record.embed {
            embed.apply(&mut post);
        }
        post
    }
}
