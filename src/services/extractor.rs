//! Code extraction from free-text model replies
//!
//! Models do not reliably follow formatting instructions, so extraction walks
//! an ordered list of conventions and falls back to the whole reply.

use regex::Regex;
use std::sync::LazyLock;

/// A line starting with the `Code:` marker the event prompt asks for
static CODE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^code:").expect("valid regex"));

/// A fenced block with an info string line: ```` ```lang\n...``` ````
static FENCED_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```([^\n`]*)\r?\n(.*?)```").expect("valid regex"));

/// A fenced block on a single line: ```` ```...``` ````
static INLINE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").expect("valid regex"));

/// Isolate the code in a model reply.
///
/// In priority order:
/// 1. everything after a line beginning with `Code:` (case-insensitive),
/// 2. the first fenced block tagged with `language` (case-insensitive),
/// 3. the first fenced block of any kind,
/// 4. the whole reply.
///
/// The result is always trimmed.
pub fn extract_code_block(text: &str, language: Option<&str>) -> String {
    if text.is_empty() {
        return String::new();
    }

    if let Some(marker) = CODE_MARKER_RE.find(text) {
        return text[marker.end()..].trim().to_string();
    }

    let language = language.map(str::trim).filter(|l| !l.is_empty());

    if let Some(language) = language {
        let tagged = FENCED_BLOCK_RE.captures_iter(text).find(|caps| {
            caps[1]
                .split_whitespace()
                .next()
                .is_some_and(|tag| tag.eq_ignore_ascii_case(language))
        });
        if let Some(caps) = tagged {
            return caps[2].trim().to_string();
        }
    }

    if let Some(caps) = FENCED_BLOCK_RE.captures(text) {
        return caps[2].trim().to_string();
    }

    if let Some(caps) = INLINE_FENCE_RE.captures(text) {
        return caps[1].trim().to_string();
    }

    text.trim().to_string()
}
