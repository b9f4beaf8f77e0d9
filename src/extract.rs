//! JSON extraction from free-form model output.
//!
//! Tiers, first match wins:
//! 1. a ```json fenced block whose markers sit on their own lines
//! 2. a ```json fenced block without the newline assumption
//! 3. everything from the first `{` to the last `}`

use regex::Regex;
use std::sync::LazyLock;

static FENCED_WITH_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\n(.*?)\n```").expect("valid fenced regex"));

static FENCED_INLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json(.*?)```").expect("valid inline fenced regex"));

static BRACE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid brace regex"));

/// Which rule recovered the JSON text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractTier {
    FencedWithNewlines,
    FencedInline,
    BraceSpan,
}

/// Locate the JSON text embedded in `content`.
///
/// An empty capture falls back to the whole match, which will then fail to
/// parse. Returns `None` when no tier matches.
pub fn extract_json(content: &str) -> Option<(ExtractTier, &str)> {
    let tiers: [(ExtractTier, &Regex); 3] = [
        (ExtractTier::FencedWithNewlines, &*FENCED_WITH_NEWLINES),
        (ExtractTier::FencedInline, &*FENCED_INLINE),
        (ExtractTier::BraceSpan, &*BRACE_SPAN),
    ];

    tiers.into_iter().find_map(|(tier, re)| {
        let caps = re.captures(content)?;
        let text = caps
            .get(1)
            .filter(|m| !m.as_str().is_empty())
            .or_else(|| caps.get(0))?
            .as_str();
        Some((tier, text))
    })
}
