//! KDoc summary heuristics
//!
//! Best-effort doc comment matching over raw source text plus first-sentence
//! extraction. Everything here is a pure function that degrades to an empty
//! summary instead of failing; malformed comments are expected noise.

use once_cell::sync::Lazy;
use regex::Regex;

/// How far back (in bytes) to scan for a doc comment when the tree does not
/// attach it as the preceding sibling.
const LOOKBACK_BYTES: usize = 500;

static KDOC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*\*[\s\S]*?\*/").unwrap());
static SENTENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*?[.!?])(?:\s|$)").unwrap());

/// Structured tags that end the free-text portion of a KDoc comment.
const TAG_MARKERS: &[&str] = &["@param", "@return", "@property"];

/// Scan the source text backwards from `decl_start` for a doc comment whose
/// end is separated from the declaration only by whitespace. Takes the last
/// well-formed comment inside the lookback window.
pub fn lookback_summary(source: &str, decl_start: usize) -> String {
    let bytes = source.as_bytes();
    let start = decl_start.min(bytes.len());
    let window_start = start.saturating_sub(LOOKBACK_BYTES);
    let preceding = String::from_utf8_lossy(&bytes[window_start..start]);

    if let Some(m) = KDOC_RE.find_iter(&preceding).last() {
        let after = &preceding[m.end()..];
        if after.trim().is_empty() {
            return summarize(m.as_str());
        }
    }
    String::new()
}

/// Extract the first sentence from a KDoc comment.
///
/// Strips the comment delimiters and per-line leading `*`, joins lines with
/// single spaces, truncates at the first structured tag, then takes the
/// first terminal-punctuation-bounded sentence. Falls back to the first
/// line, then to the whole trimmed text.
pub fn summarize(kdoc: &str) -> String {
    let mut text = kdoc.trim();
    text = text.strip_prefix("/**").unwrap_or(text);
    text = text.strip_suffix("*/").unwrap_or(text);

    let joined = text
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix('*').unwrap_or(line).trim()
        })
        .collect::<Vec<_>>()
        .join(" ");
    let mut text = joined.trim().to_string();

    if let Some(idx) = TAG_MARKERS.iter().filter_map(|tag| text.find(tag)).min() {
        text = text[..idx].trim_end().to_string();
    }

    if let Some(caps) = SENTENCE_RE.captures(&text) {
        return caps[1].trim().to_string();
    }

    match text.split_once('\n') {
        Some((first, _)) => first.trim().to_string(),
        None => text.trim().to_string(),
    }
}
