//! Title canonicalization for guess matching.
//!
//! A guess counts iff its canonical form equals the canonical form of the
//! track title — exact string equality, nothing fuzzy. Canonicalization
//! strips the qualifiers players should not have to type: parenthetical
//! remaster/live tags, featured-artist credits, dash suffixes, punctuation.

/// Reduce a raw title or guess to its canonical comparison key.
///
/// Steps run in order, each on the output of the previous one:
/// 1. drop parenthesized groups and the spaces around them,
/// 2. cut at the first whitespace-preceded `feat`/`ft` (optional dot,
///    any case),
/// 3. cut at the first `-` (this also shortens titles with a real hyphen,
///    "Rock-n-Roll" becomes "Rock" — accepted),
/// 4. keep only ASCII alphanumerics, `_`, and whitespace,
/// 5. trim and lowercase.
///
/// A title made of nothing but parentheticals or punctuation canonicalizes
/// to the empty string; callers compare whatever comes out, including empty
/// against empty.
pub fn canonical_title(raw: &str) -> String {
    let stripped = strip_parentheticals(raw);
    let cut = truncate_at_feat(&stripped);
    let cut = match cut.find('-') {
        Some(dash) => &cut[..dash],
        None => cut,
    };
    let mut out = String::with_capacity(cut.len());
    for ch in cut.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' || ch.is_whitespace() {
            out.push(ch);
        }
    }
    out.trim().to_lowercase()
}

/// Remove every `(...)` group together with the spaces hugging it, so
/// `"Song (Remix)"` collapses to `"Song"` rather than `"Song "`. A `(` with
/// no closing `)` is not a group; the tail stays untouched.
fn strip_parentheticals(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find('(') {
        let Some(close) = rest[open..].find(')').map(|rel| open + rel) else {
            break;
        };
        out.push_str(rest[..open].trim_end_matches(' '));
        rest = rest[close + 1..].trim_start_matches(' ');
    }
    out.push_str(rest);
    out
}

/// Cut the string at the first featuring-artist marker: a whitespace run
/// followed by `feat` or `ft` in any case (the trailing dot, or anything
/// else after the marker, is discarded with the rest). Returns the text in
/// front of the whitespace.
fn truncate_at_feat(s: &str) -> &str {
    // ASCII lowering keeps byte offsets aligned with the original string.
    let lower = s.to_ascii_lowercase();
    let mut run_start: Option<usize> = None;
    for (idx, ch) in lower.char_indices() {
        if ch.is_whitespace() {
            run_start.get_or_insert(idx);
            continue;
        }
        if let Some(start) = run_start.take() {
            let tail = &lower[idx..];
            if tail.starts_with("feat") || tail.starts_with("ft") {
                return &s[..start];
            }
        }
    }
    s
}
