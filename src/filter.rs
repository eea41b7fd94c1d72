//! Cheap language pre-filter for raw records.
//!
//! Decoding every record of the firehose is wasteful when only a handful of
//! languages are wanted. [`LanguageFilter`] looks for the post's `langs`
//! array directly in the raw bytes, before any JSON decoding.
//!
//! # Example
//!
//! ```
//! use bayesky::filter::LanguageFilter;
//!
//! # fn main() -> bayesky::Result<()> {
//! let filter = LanguageFilter::new(["en"])?;
//!
//! assert!(filter.matches(br#"{"record":{"langs":["en"],"text":"hi"}}"#));
//! assert!(!filter.matches(br#"{"record":{"langs":["ja"],"text":"hi"}}"#));
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Records without a `langs` array never match (identity and account events
//!   included)
//! - Language codes match case-insensitively
//! - A record passes if any of its languages is wanted

use std::sync::LazyLock;

use regex::Regex;
use regex::bytes::{Regex as BytesRegex, RegexBuilder};

use crate::error::{BayeskyError, Result};

static LANGUAGE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]+)*$").expect("language code pattern is valid")
});

/// Byte-level filter on the `langs` array of a post record.
#[derive(Debug, Clone)]
pub struct LanguageFilter {
    languages: Vec<String>,
    pattern: Option<BytesRegex>,
}

impl LanguageFilter {
    /// Creates a filter that keeps records listing any of `languages`.
    ///
    /// # Errors
    ///
    /// Returns [`BayeskyError::InvalidLanguage`] for a code that is not a
    /// plausible BCP-47 tag.
    pub fn new<I, S>(languages: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let languages: Vec<String> = languages.into_iter().map(Into::into).collect();
        if languages.is_empty() {
            return Ok(Self::any());
        }

        for lang in &languages {
            if !LANGUAGE_CODE.is_match(lang) {
                return Err(BayeskyError::invalid_language(lang.as_str()));
            }
        }

        let alternatives = languages
            .iter()
            .map(|lang| regex::escape(lang))
            .collect::<Vec<_>>()
            .join("|");

        // `"langs":[ ..., "en", ... ]` with arbitrary whitespace
        let pattern = format!(r#""langs"\s*:\s*\[[^\]]*"(?:{alternatives})""#);
        let pattern = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|_| BayeskyError::invalid_language(languages.join(",")))?;

        Ok(Self {
            languages,
            pattern: Some(pattern),
        })
    }

    /// Creates a filter that keeps every record.
    pub fn any() -> Self {
        Self {
            languages: Vec::new(),
            pattern: None,
        }
    }

    /// Returns `true` if this filter keeps every record.
    pub fn is_any(&self) -> bool {
        self.pattern.is_none()
    }

    /// The wanted language codes, empty for [`any`](Self::any).
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Returns `true` if the raw record should be decoded.
    pub fn matches(&self, raw: &[u8]) -> bool {
        self.pattern.as_ref().is_none_or(|p| p.is_match(raw))
    }
}

impl Default for LanguageFilter {
    fn default() -> Self {
        Self::any()
    }
}
