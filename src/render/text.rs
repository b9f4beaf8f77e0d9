//! Plain-text rendering for terminal output.

use std::fmt::Write;

use crate::render::{truncate_summary, SUMMARY_PREVIEW_CHARS};
use crate::types::LoadingStage;
use crate::view::{PaperCardView, ViewModel};

/// Render the result area as text. `expand_all` shows every analysis panel.
pub fn render_text(view: &ViewModel, expand_all: bool) -> String {
    let mut out = String::new();

    match view.stage {
        LoadingStage::Searching => {
            out.push_str("Searching...\n");
            return out;
        }
        LoadingStage::Error => {
            let _ = writeln!(out, "Search Error");
            let _ = writeln!(out, "{}", view.error.as_deref().unwrap_or_default());
            return out;
        }
        _ => {}
    }

    if view.papers.is_empty() {
        if view.stage == LoadingStage::Complete {
            out.push_str("No papers returned.\n");
        }
        return out;
    }

    let _ = writeln!(out, "Query: {}", view.searched_query);
    let _ = writeln!(out, "{}", view.results_summary());

    if !view.clarifications.is_empty() {
        out.push_str("\nSuggested refinements:\n");
        for clarification in &view.clarifications {
            let _ = writeln!(out, "  * {}", clarification);
        }
    }

    for (index, card) in view.papers.iter().enumerate() {
        out.push('\n');
        render_card(&mut out, index + 1, card, expand_all || card.expanded);
    }

    out
}

fn render_card(out: &mut String, number: usize, card: &PaperCardView, expanded: bool) {
    let paper = &card.paper;

    let _ = writeln!(out, "[{}] {}", number, paper.title);
    let _ = writeln!(out, "    Authors: {}", paper.authors);
    let _ = writeln!(out, "    Journal: {}", paper.journal);
    let _ = writeln!(out, "    Year:    {}", paper.year);
    if let Some(cited) = &paper.citation_count {
        let _ = writeln!(out, "    Cited:   {}", cited);
    }
    if let Some(paper_id) = &paper.paper_id {
        let _ = writeln!(out, "    ID/DOI:  {}", paper_id);
    }
    if let Some(url) = &paper.url {
        let _ = writeln!(out, "    URL:     {}", url);
    }

    let summary = if expanded {
        paper.summary.trim().to_string()
    } else {
        truncate_summary(&paper.summary, SUMMARY_PREVIEW_CHARS)
    };
    let _ = writeln!(out, "\n    {}", summary);

    if !expanded {
        return;
    }

    section(out, "Key Findings", &paper.key_findings);
    section(out, "Policy Implementations", &paper.policy_implementations);
    if !paper.similar_topics.is_empty() {
        let _ = writeln!(out, "\n    Related Topics: {}", paper.similar_topics.join(" | "));
    }
}

fn section(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out, "\n    {}:", title);
    for item in items {
        let _ = writeln!(out, "      - {}", item);
    }
}
