// Native tests for title canonicalization. The whole pipeline is plain
// string logic, so it runs under `cargo test` on the host.

use tune_teaser::title::canonical_title;

#[test]
fn remaster_tag_is_dropped() {
    assert_eq!(
        canonical_title("Bohemian Rhapsody (Remastered 2011)"),
        "bohemian rhapsody"
    );
}

#[test]
fn feat_and_dash_suffixes_are_dropped() {
    assert_eq!(canonical_title("Hello (feat. Someone) - Live"), "hello");
}

#[test]
fn apostrophes_are_stripped() {
    assert_eq!(canonical_title("Don't Stop Believin'"), "dont stop believin");
}

#[test]
fn matching_is_case_insensitive_and_trimmed() {
    assert_eq!(
        canonical_title("  BOHEMIAN RHAPSODY "),
        canonical_title("Bohemian Rhapsody (Live)")
    );
}

#[test]
fn all_featuring_marker_spellings_cut() {
    for raw in [
        "Song feat Somebody",
        "Song feat. Somebody",
        "Song ft Somebody",
        "Song FT. Somebody",
        "Song Ft Somebody",
    ] {
        assert_eq!(canonical_title(raw), "song", "marker not cut in {raw:?}");
    }
}

#[test]
fn featuring_marker_requires_leading_whitespace() {
    // "ft"/"feat" inside a word, or at the very start, is not a credit.
    assert_eq!(canonical_title("Crafted Plans"), "crafted plans");
    assert_eq!(canonical_title("feat first"), "feat first");
}

#[test]
fn hyphen_cuts_even_legitimate_ones() {
    assert_eq!(canonical_title("Rock-n-Roll"), "rock");
    assert_eq!(canonical_title("Song - Remastered 2009"), "song");
}

#[test]
fn double_quotes_are_removed() {
    assert_eq!(canonical_title("\"Heroes\""), "heroes");
}

#[test]
fn parenthetical_or_punctuation_only_normalizes_to_empty() {
    assert_eq!(canonical_title("(Intro)"), "");
    assert_eq!(canonical_title("!!!"), "");
    assert_eq!(canonical_title(""), "");
}

#[test]
fn unmatched_parenthesis_is_not_a_group() {
    // No closing paren means no group; only the bare "(" gets stripped as
    // punctuation later.
    assert_eq!(canonical_title("Song (Unfinished"), "song unfinished");
}

#[test]
fn multiple_parenthetical_groups_all_vanish() {
    assert_eq!(
        canonical_title("Song (Remix) (Radio Edit)"),
        "song"
    );
}

#[test]
fn idempotent_on_realistic_titles() {
    let corpus = [
        "Bohemian Rhapsody (Remastered 2011)",
        "Hello (feat. Someone) - Live",
        "Don't Stop Believin'",
        "Rock-n-Roll",
        "\"Heroes\" (2017 Remaster)",
        "Billie Jean",
        "Smells Like Teen Spirit",
        "99 Luftballons",
        "Mr. Brightside",
        "What's Up?",
        "(I Can't Get No) Satisfaction",
        "Song 2",
    ];
    for raw in corpus {
        let once = canonical_title(raw);
        assert_eq!(canonical_title(&once), once, "not idempotent for {raw:?}");
    }
}
