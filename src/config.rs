//! Configuration types for the extractor and the record source.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ExtractorConfig`] - how strictly commits are checked
//! - [`SourceConfig`] - buffering and size limits for line input
//!
//! # Example
//!
//! ```rust
//! use bayesky::config::{ExtractorConfig, SourceConfig};
//! use bayesky::parsing::PostExtractor;
//!
//! let extractor = PostExtractor::with_config(
//!     ExtractorConfig::new().with_require_post_create(true),
//! );
//!
//! let source_config = SourceConfig::new().with_max_record_size(1024 * 1024);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for the post extractor.
///
/// The default keeps the lenient contract: any `commit` with a post-shaped
/// record is decoded, whatever its operation or collection. Upstream
/// filtering is expected to drop likes, follows and deletes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Require `commit.operation == "create"` and
    /// `commit.collection == "app.bsky.feed.post"` (default: false)
    pub require_post_create: bool,
}

impl ExtractorConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that only accepts post creations.
    pub fn strict() -> Self {
        Self {
            require_post_create: true,
        }
    }

    /// Enables or disables the operation/collection check.
    #[must_use]
    pub fn with_require_post_create(mut self, enabled: bool) -> Self {
        self.require_post_create = enabled;
        self
    }
}

/// Configuration for line-oriented record sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Read buffer size (default: 64KB)
    pub buffer_size: usize,

    /// Maximum size of a single record line in bytes (default: 10MB)
    pub max_record_size: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024,            // 64KB
            max_record_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl SourceConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the read buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Sets the maximum record size.
    #[must_use]
    pub fn with_max_record_size(mut self, size: usize) -> Self {
        self.max_record_size = size;
        self
    }
}
