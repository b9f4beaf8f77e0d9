//! Result renderers: HTML page for the web front-end, plain text for the CLI.
//!
//! Both read a [`ViewModel`](crate::view::ViewModel) and never touch state.

pub mod html;
pub mod text;

pub use html::render_page;
pub use text::render_text;

/// Characters of summary shown while a card is collapsed
pub const SUMMARY_PREVIEW_CHARS: usize = 320;

/// Cut `text` to at most `max_chars` characters, on a word boundary when
/// possible, appending an ellipsis if anything was dropped.
pub fn truncate_summary(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars).collect();
    let cut = match cut.rfind(char::is_whitespace) {
        Some(pos) if pos > max_chars / 2 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}\u{2026}", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_summary("  short summary ", 50), "short summary");
    }

    #[test]
    fn test_truncate_on_word_boundary() {
        let out = truncate_summary("carbon taxes reduce emissions substantially", 20);
        assert_eq!(out, "carbon taxes reduce\u{2026}");
    }

    #[test]
    fn test_truncate_multibyte_safe() {
        let out = truncate_summary("ééééééééééé", 4);
        assert_eq!(out, "éééé\u{2026}");
    }
}
