//! Property-based tests for bayesky.
//!
//! These tests generate random events to find edge cases.

use proptest::prelude::*;
use serde_json::{Value, json};

use bayesky::filter::LanguageFilter;
use bayesky::parsing::{PostExtractor, parse_post};
use bayesky::{BayeskyError, Post};

/// Builds a minimal post commit event.
fn post_event(did: &str, time_us: u64, rkey: &str, record: Value) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "did": did,
        "time_us": time_us,
        "kind": "commit",
        "commit": {
            "operation": "create",
            "collection": "app.bsky.feed.post",
            "rkey": rkey,
            "record": record,
        }
    }))
    .unwrap()
}

fn parse(event: &[u8]) -> Post {
    parse_post(event).unwrap()
}

/// Generate an image entry using fast strategies (no regex!)
fn arb_image() -> impl Strategy<Value = (String, u64, u64, u64)> {
    (
        prop::sample::select(vec![
            String::new(),
            "a cat".to_string(),
            "Скриншот".to_string(),
            "写真".to_string(),
        ]),
        0u64..10_000,
        0u64..10_000,
        any::<u64>(),
    )
}

fn image_json(index: usize, (alt, width, height, size): &(String, u64, u64, u64)) -> Value {
    json!({
        "alt": alt,
        "aspectRatio": {"width": width, "height": height},
        "image": {
            "$type": "blob",
            "ref": {"$link": format!("bafkrei{index}")},
            "mimeType": "image/jpeg",
            "size": size,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // CLASSIFICATION PROPERTIES
    // ============================================

    /// Any kind other than "commit" is classified as not a commit
    #[test]
    fn non_commit_kinds_are_skipped(
        kind in prop::sample::select(vec!["identity", "account", "sync", "info", "", "Commit", "COMMIT"]),
        with_commit_body in any::<bool>(),
    ) {
        let mut event = json!({"did": "did:plc:abc", "time_us": 1, "kind": kind});
        if with_commit_body {
            event["commit"] = json!({"rkey": "r1", "record": {"text": "hi"}});
        }
        let err = parse_post(&serde_json::to_vec(&event).unwrap()).unwrap_err();
        prop_assert!(
            matches!(err, BayeskyError::NotACommit { kind: ref k } if k == kind),
            "unexpected error: {err:?}"
        );
    }

    /// Arbitrary bytes never panic and never produce I/O errors
    #[test]
    fn arbitrary_bytes_are_classified(raw in prop::collection::vec(any::<u8>(), 0..256)) {
        if let Err(err) = parse_post(&raw) {
            prop_assert!(err.is_malformed() || err.is_not_a_commit());
        }
    }

    // ============================================
    // FIELD PRESERVATION PROPERTIES
    // ============================================

    /// Every u64 timestamp survives decoding exactly
    #[test]
    fn sequence_time_is_exact(time_us in any::<u64>()) {
        let post = parse(&post_event("did:plc:abc", time_us, "r1", json!({"text": "x"})));
        prop_assert_eq!(post.sequence_time, time_us);
    }

    /// Text is carried through unchanged
    #[test]
    fn text_is_preserved(text in any::<String>()) {
        let post = parse(&post_event("did:plc:abc", 1, "r1", json!({"text": text.clone()})));
        prop_assert_eq!(post.text, text);
    }

    /// Images keep their count and order
    #[test]
    fn images_keep_count_and_order(images in prop::collection::vec(arb_image(), 0..8)) {
        let entries: Vec<Value> = images.iter().enumerate().map(|(i, img)| image_json(i, img)).collect();
        let record = json!({
            "text": "gallery",
            "embed": {"$type": "app.bsky.embed.images", "images": entries},
        });
        let post = parse(&post_event("did:plc:abc", 1, "r1", record));

        prop_assert_eq!(post.images.len(), images.len());
        for (i, (decoded, (alt, width, height, size))) in post.images.iter().zip(&images).enumerate() {
            prop_assert_eq!(&decoded.alt, alt);
            prop_assert_eq!(decoded.width, *width);
            prop_assert_eq!(decoded.height, *height);
            prop_assert_eq!(decoded.blob.size_bytes, *size);
            prop_assert_eq!(&decoded.blob.link, &format!("bafkrei{i}"));
        }
    }

    /// A reply always carries both parent and root
    #[test]
    fn reply_has_parent_and_root(parent in "[a-z0-9]{13}", root in "[a-z0-9]{13}") {
        let parent_uri = format!("at://did:plc:p/app.bsky.feed.post/{parent}");
        let root_uri = format!("at://did:plc:r/app.bsky.feed.post/{root}");
        let record = json!({
            "text": "re",
            "reply": {"parent": {"uri": parent_uri.clone()}, "root": {"uri": root_uri.clone()}},
        });
        let post = parse(&post_event("did:plc:abc", 1, "r1", record));

        prop_assert!(post.is_reply());
        prop_assert_eq!(post.reply_parent_uri(), parent_uri.as_str());
        prop_assert_eq!(post.reply_root_uri(), root_uri.as_str());
    }

    /// The same record decodes identically through the strict extractor
    #[test]
    fn strict_agrees_on_post_creates(time_us in any::<u64>(), rkey in "[a-z2-7]{13}") {
        let event = post_event("did:plc:abc", time_us, &rkey, json!({"text": "same"}));
        let strict = PostExtractor::with_config(bayesky::config::ExtractorConfig::strict());
        prop_assert_eq!(strict.parse(&event).unwrap(), parse(&event));
    }

    // ============================================
    // LANGUAGE FILTER PROPERTIES
    // ============================================

    /// A post tagged with a language passes a filter for that language only
    #[test]
    fn language_filter_matches_own_tag(
        lang in prop::sample::select(vec!["en", "ja", "de", "pt-BR", "zh-Hant"]),
        other in prop::sample::select(vec!["fr", "ko", "es"]),
    ) {
        let event = post_event("did:plc:abc", 1, "r1", json!({"text": "x", "langs": [lang]}));

        prop_assert!(LanguageFilter::new([lang]).unwrap().matches(&event));
        prop_assert!(LanguageFilter::new([lang, other]).unwrap().matches(&event));
        prop_assert!(!LanguageFilter::new([other]).unwrap().matches(&event));
        prop_assert!(LanguageFilter::any().matches(&event));
    }
}
