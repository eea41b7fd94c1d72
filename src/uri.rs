//! AT Protocol resource identifiers.
//!
//! Replies and quotes point at other records with URIs of the form
//! `at://did:plc:abc/app.bsky.feed.post/3lb2k4bihok2f`. [`AtUri`] splits such
//! a string into its four components.
//!
//! ```
//! use bayesky::uri::AtUri;
//!
//! let uri: AtUri = "at://did:plc:abc/app.bsky.feed.post/3lb2k".parse().unwrap();
//! assert_eq!(uri.authority, "did:plc:abc");
//! assert_eq!(uri.collection, "app.bsky.feed.post");
//! assert_eq!(uri.record_key, "3lb2k");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BayeskyError, Result};

/// Collection holding post records.
pub const POST_COLLECTION: &str = "app.bsky.feed.post";

/// A fully qualified `scheme://authority/collection/record_key` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtUri {
    pub scheme: String,
    pub authority: String,
    pub collection: String,
    pub record_key: String,
}

impl AtUri {
    /// Builds the URI of a post owned by `actor_id`.
    pub fn post(actor_id: impl Into<String>, record_key: impl Into<String>) -> Self {
        Self {
            scheme: "at".to_string(),
            authority: actor_id.into(),
            collection: POST_COLLECTION.to_string(),
            record_key: record_key.into(),
        }
    }

    /// Returns `true` if this URI points into the posts collection.
    pub fn is_post(&self) -> bool {
        self.collection == POST_COLLECTION
    }
}

impl fmt::Display for AtUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}/{}/{}",
            self.scheme, self.authority, self.collection, self.record_key
        )
    }
}

impl FromStr for AtUri {
    type Err = BayeskyError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || BayeskyError::invalid_uri(s);

        let (scheme, rest) = s.split_once("://").ok_or_else(invalid)?;
        let mut parts = rest.splitn(3, '/');
        let authority = parts.next().unwrap_or_default();
        let collection = parts.next().unwrap_or_default();
        let record_key = parts.next().unwrap_or_default();

        if [scheme, authority, collection, record_key]
            .iter()
            .any(|part| part.is_empty())
            || record_key.contains('/')
        {
            return Err(invalid());
        }

        Ok(Self {
            scheme: scheme.to_string(),
            authority: authority.to_string(),
            collection: collection.to_string(),
            record_key: record_key.to_string(),
        })
    }
}
