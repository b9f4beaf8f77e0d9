//! Single-page HTML front-end.
//!
//! Model output is untrusted, so every interpolated string goes through
//! [`escape`].

use crate::render::{truncate_summary, SUMMARY_PREVIEW_CHARS};
use crate::types::LoadingStage;
use crate::view::{PaperCardView, ViewModel};

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Only `http`/`https` links are rendered; model output may carry any scheme.
fn is_web_link(raw: &str) -> bool {
    url::Url::parse(raw.trim())
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Render the whole page for the current view.
pub fn render_page(view: &ViewModel) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">{}
    <title>EconSearch</title>
    <style>{}</style>
</head>
<body>
<header class="masthead">
    <h1>ECON<span class="light">SEARCH</span></h1>
    <p class="tagline">Advanced Research &amp; Policy Analysis Interface</p>
</header>
<main>
{}
<section class="results">
{}
</section>
</main>
</body>
</html>"#,
        refresh_meta(view),
        STYLE,
        render_form(view),
        render_results(view)
    )
}

/// Seconds between reloads while a search is in flight.
const SEARCHING_REFRESH_SECS: u32 = 2;

fn refresh_meta(view: &ViewModel) -> String {
    if view.is_searching() {
        format!(
            "\n    <meta http-equiv=\"refresh\" content=\"{}\">",
            SEARCHING_REFRESH_SECS
        )
    } else {
        String::new()
    }
}

fn render_form(view: &ViewModel) -> String {
    let form = &view.form;
    let refine_attrs = match (view.refine, view.refine_available) {
        (true, true) => " checked",
        (false, true) => "",
        (true, false) => " checked disabled",
        (false, false) => " disabled",
    };
    let submit_attrs = if view.can_submit { "" } else { " disabled" };

    format!(
        r#"<form class="search-panel" method="POST" action="/search">
    <label for="search">Research Topic</label>
    <input type="text" id="search" name="query" autocomplete="off" placeholder="Enter keywords..." value="{query}">
    <div class="refine">
        <input type="checkbox" id="refineCheck" name="refine"{refine_attrs}>
        <label for="refineCheck">Refine previous search <small>(Treat new input as continuation)</small></label>
    </div>
    <div class="filters">
        <div>
            <label for="authors">Author(s) <small>(Optional)</small></label>
            <input type="text" id="authors" name="authors" autocomplete="off" placeholder="Filter by author..." value="{authors}">
        </div>
        <div>
            <label for="journal">Journal / Platform <small>(Optional)</small></label>
            <input type="text" id="journal" name="journal" autocomplete="off" placeholder="Filter by journal..." value="{journal}">
        </div>
        <div>
            <label>Year Range</label>
            <input type="text" name="year_start" autocomplete="off" placeholder="Start" value="{year_start}">
            <input type="text" name="year_end" autocomplete="off" placeholder="End" value="{year_end}">
        </div>
    </div>
    <button type="submit"{submit_attrs}>{label}</button>
</form>"#,
        query = escape(&form.query),
        authors = escape(&form.authors),
        journal = escape(&form.journal),
        year_start = escape(&form.year_start),
        year_end = escape(&form.year_end),
        refine_attrs = refine_attrs,
        submit_attrs = submit_attrs,
        label = view.submit_label,
    )
}

fn render_results(view: &ViewModel) -> String {
    let mut html = String::new();

    if view.is_searching() {
        html.push_str(
            r#"<div class="spinner" role="status">Searching the literature&hellip;</div>"#,
        );
    }

    if view.stage == LoadingStage::Error {
        html.push_str(&format!(
            r#"<div class="error-panel"><h3>Search Error</h3><p>{}</p></div>"#,
            escape(view.error.as_deref().unwrap_or_default())
        ));
    }

    if view.papers.is_empty() {
        return html;
    }

    html.push_str(&format!(
        r#"<div class="results-header"><h2>Results Found</h2><span>{}</span></div>"#,
        escape(&view.results_summary())
    ));

    if !view.clarifications.is_empty() {
        let chips: String = view
            .clarifications
            .iter()
            .map(|c| {
                format!(
                    r#"<form method="POST" action="/clarify"><input type="hidden" name="clarification" value="{value}"><button type="submit" class="chip">{label}</button></form>"#,
                    value = escape(c),
                    label = escape(c)
                )
            })
            .collect();
        html.push_str(&format!(
            r#"<div class="clarifications"><h4>Suggested Refinements</h4><div class="chips">{}</div></div>"#,
            chips
        ));
    }

    for card in &view.papers {
        html.push_str(&render_card(card));
    }

    html
}

fn render_card(card: &PaperCardView) -> String {
    let paper = &card.paper;

    let mut meta = format!(
        r#"<dt>Authors</dt><dd>{}</dd><dt>Journal</dt><dd class="journal">{}</dd><dt>Year</dt><dd>{}</dd>"#,
        escape(&paper.authors),
        escape(&paper.journal),
        escape(&paper.year)
    );
    if let Some(cited) = &paper.citation_count {
        meta.push_str(&format!(r#"<dt>Cited</dt><dd>{}</dd>"#, escape(cited)));
    }
    if let Some(paper_id) = &paper.paper_id {
        meta.push_str(&format!(r#"<dt>ID / DOI</dt><dd>{}</dd>"#, escape(paper_id)));
    }

    let summary = if card.expanded {
        paper.summary.trim().to_string()
    } else {
        truncate_summary(&paper.summary, SUMMARY_PREVIEW_CHARS)
    };

    let toggle_label = if card.expanded {
        "Collapse Analysis"
    } else {
        "View Analysis &amp; Policy"
    };

    let read_original = paper
        .url
        .as_deref()
        .filter(|url| is_web_link(url))
        .map(|url| {
            format!(
                r#"<a class="button primary" href="{}" target="_blank" rel="noopener noreferrer">Read Original &rarr;</a>"#,
                escape(url)
            )
        })
        .unwrap_or_default();

    let analysis = if card.expanded {
        render_analysis(card)
    } else {
        String::new()
    };

    format!(
        r#"<article class="paper" id="{id}">
    <h3>{title}</h3>
    <dl class="meta">{meta}</dl>
    <p class="summary">{summary}</p>
    <div class="actions">
        <form method="POST" action="/papers/{id}/toggle"><button type="submit" class="outline">{toggle_label}</button></form>
        {read_original}
    </div>
    {analysis}
</article>"#,
        id = escape(&paper.id),
        title = escape(&paper.title),
        meta = meta,
        summary = escape(&summary),
        toggle_label = toggle_label,
        read_original = read_original,
        analysis = analysis,
    )
}

fn render_analysis(card: &PaperCardView) -> String {
    let paper = &card.paper;

    let mut html = format!(
        r#"<div class="analysis">
        <div class="findings"><h4>Key Findings</h4><ul>{}</ul></div>
        <div class="policy"><h4>Policy Implementations</h4><ul>{}</ul></div>"#,
        list(&paper.key_findings),
        list(&paper.policy_implementations)
    );

    if !paper.similar_topics.is_empty() {
        let tags: String = paper
            .similar_topics
            .iter()
            .map(|t| format!(r#"<span class="tag">{}</span>"#, escape(t)))
            .collect();
        html.push_str(&format!(
            r#"<div class="topics"><h4>Related Topics:</h4>{}</div>"#,
            tags
        ));
    }

    html.push_str("</div>");
    html
}

fn list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect()
}

const STYLE: &str = r#"
body { margin: 0; font-family: Georgia, serif; background: #f9f9f7; color: #1a1a1a; }
.masthead { border-bottom: 4px solid #1a1a1a; background: #fff; padding: 1.5rem 3rem; }
.masthead h1 { margin: 0; font-size: 2.2rem; }
.masthead .light { font-weight: 300; }
.tagline { font: 0.7rem sans-serif; letter-spacing: 0.2em; text-transform: uppercase; color: #777; }
main { max-width: 72rem; margin: 0 auto; padding: 3rem; }
label { display: block; font: bold 0.7rem sans-serif; text-transform: uppercase; letter-spacing: 0.15em; color: #666; margin-bottom: 0.4rem; }
.refine label { display: inline; text-transform: none; letter-spacing: normal; font-weight: normal; }
input[type=text] { width: 100%; box-sizing: border-box; padding: 0.75rem; border: 1px solid #ccc; font: inherit; }
#search { font-size: 1.3rem; border-width: 2px; }
.search-panel { background: #fff; border: 1px solid #ddd; padding: 2rem; margin-bottom: 3rem; }
.filters { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1.5rem; margin: 1.5rem 0; }
button { padding: 0.6rem 1.5rem; background: #1a1a1a; color: #fff; border: 0; cursor: pointer; }
button:disabled { opacity: 0.4; cursor: default; }
button.outline, .chip { background: #fff; color: #1a1a1a; border: 1px solid #999; }
.spinner { padding: 2rem; text-align: center; color: #666; }
.error-panel { border-left: 4px solid #c0392b; background: #fdecea; color: #7b241c; padding: 1.5rem; }
.results-header { display: flex; justify-content: space-between; border-bottom: 1px solid #ccc; margin-bottom: 2rem; }
.results-header span { font: 0.75rem monospace; color: #888; }
.clarifications { background: #eee; padding: 1.5rem; margin-bottom: 2.5rem; }
.chips { display: flex; flex-wrap: wrap; gap: 0.75rem; }
.chips form { margin: 0; }
.paper { border-bottom: 1px solid #ccc; padding: 2.5rem 0; }
.paper h3 { font-size: 1.8rem; margin: 0 0 1.5rem; }
.meta { display: grid; grid-template-columns: 100px 1fr; gap: 0.4rem; border-left: 2px solid #ddd; padding-left: 1rem; }
.meta dt { font: bold 0.7rem sans-serif; text-transform: uppercase; color: #666; }
.meta dd { margin: 0; }
.meta .journal { font-style: italic; }
.actions { display: flex; gap: 1rem; align-items: center; }
.actions form { margin: 0; }
a.button { padding: 0.6rem 1.5rem; background: #1a1a1a; color: #fff; text-decoration: none; }
.analysis { margin-top: 2rem; padding-top: 1.5rem; border-top: 1px dashed #ccc; display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
.analysis .topics { grid-column: 1 / -1; }
.tag { margin-right: 0.75rem; text-decoration: underline; color: #555; font: 0.8rem sans-serif; }
"#;
