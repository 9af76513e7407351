// Integration tests (native) for the `tune-teaser` crate.
// These tests avoid wasm-specific functionality and exercise pure Rust logic
// so they can run under `cargo test` on the host.

use std::collections::HashSet;

use tune_teaser::{Category, Track};

#[test]
fn there_are_six_categories() {
    assert_eq!(Category::ALL.len(), 6);
}

#[test]
fn category_slugs_are_unique_and_round_trip() {
    let mut seen = HashSet::new();
    for category in Category::ALL {
        let slug = category.slug();
        assert!(seen.insert(slug), "duplicate slug '{}'", slug);
        assert_eq!(
            Category::from_slug(slug),
            Some(category),
            "slug '{}' does not round-trip",
            slug
        );
    }
}

#[test]
fn unknown_slugs_are_rejected() {
    for bad in ["60s", "", "Recent", "seventies", "1970s"] {
        assert_eq!(Category::from_slug(bad), None, "accepted bad slug '{}'", bad);
    }
}

#[test]
fn year_ranges_tile_the_timeline() {
    let current_year = 2026;
    let mut prev_end: Option<i32> = None;
    for category in Category::ALL {
        let (start, end) = category.year_range(current_year);
        assert!(start <= end, "empty range for '{}'", category.slug());
        if let Some(prev) = prev_end {
            assert_eq!(start, prev + 1, "gap or overlap before '{}'", category.slug());
        }
        prev_end = Some(end);
    }
}

#[test]
fn recent_bucket_tracks_the_current_year() {
    assert_eq!(Category::Recent.year_range(2026), (2020, 2026));
    assert_eq!(Category::Recent.year_range(2031), (2020, 2031));
}

#[test]
fn track_payload_defaults_missing_media_urls() {
    let track: Track =
        serde_json::from_str(r#"{"id":"x","title":"Title","artist":"Artist"}"#).unwrap();
    assert_eq!(track.preview, "");
    assert_eq!(track.artwork, "");
}

#[test]
fn track_payload_round_trips() {
    let track = Track {
        id: "abc".to_string(),
        title: "Take On Me".to_string(),
        artist: "a-ha".to_string(),
        preview: "https://p.example/clip.mp3".to_string(),
        artwork: "https://img.example/cover.jpg".to_string(),
    };
    let json = serde_json::to_string(&track).unwrap();
    assert_eq!(serde_json::from_str::<Track>(&json).unwrap(), track);
}
