//! Grounded paper search prompt.
//!
//! The model is asked for a fixed number of papers and must answer with a
//! single ```json fenced block matching [`RESPONSE_SCHEMA`].

use crate::types::SearchFilters;

/// JSON shape the model is told to produce.
pub const RESPONSE_SCHEMA: &str = r#"{
  "papers": [
    {
      "title": "String",
      "authors": "String",
      "year": "String",
      "journal": "String",
      "summary": "String",
      "keyFindings": ["String", "String"],
      "policyImplementations": ["String", "String"],
      "similarTopics": ["String"],
      "citationCount": "String",
      "url": "String",
      "paperId": "String"
    }
  ],
  "clarifications": ["String", "String"],
  "totalResultsEstimate": "String (e.g. '200+ matches')"
}"#;

/// Prompt template.
/// Placeholders: {query}, {constraints}, {target_count}, {schema}
pub const SEARCH_PROMPT_TEMPLATE: &str = r#"You are a distinguished Research Economist Assistant.
Perform a rigorous search for academic papers related to the following topic: "{query}".

Constraints:
- Focus on peer-reviewed journals (AER, QJE, JPE, etc.) or high-quality working papers (NBER, CEPR).{constraints}
- Provide exactly {target_count} distinct papers if available.
- Prioritize seminal works or high-impact recent studies.

For each paper, you must extract/generate:
1. Title
2. Authors
3. Year
4. Journal/Platform
5. Executive Summary (concise, academic tone)
6. Key Findings (bullet points)
7. Policy Implementations (practical applications for policymakers)
8. Similar search topics or related paper titles.
9. Citation Count (approximate integer or range, e.g., "1200+", "45")
10. URL (Direct link to the paper or publisher page)
11. Paper ID (DOI, NBER Number, ArXiv ID, or similar identifier)

Additionally, suggest 2-3 "Clarification Queries" to help refine the search if the current topic is too broad.

IMPORTANT: You strictly must output a valid JSON object wrapped in a code block ```json ... ```.
The JSON structure must be:
{schema}"#;

/// Build the "STRICTLY restrict" clauses for every non-blank filter.
///
/// Each clause starts on a new line with `- `. Filter text is inserted as-is.
pub fn build_constraints(filters: &SearchFilters) -> String {
    let mut constraints = String::new();

    if let Some(authors) = filters.authors() {
        constraints.push_str(&format!(
            "\n- STRICTLY restrict results to papers authored by (or co-authored by): \"{}\".",
            authors
        ));
    }
    if let Some(journal) = filters.journal() {
        constraints.push_str(&format!(
            "\n- STRICTLY restrict results to papers published in the journal/platform: \"{}\".",
            journal
        ));
    }

    let (start, end) = (filters.year_start(), filters.year_end());
    if start.is_some() || end.is_some() {
        constraints.push_str(&format!(
            "\n- STRICTLY restrict results to papers published between years {} and {} inclusive.",
            start.unwrap_or("earliest available"),
            end.unwrap_or("present")
        ));
    }

    constraints
}

/// Build the full search prompt for `query` asking for `target_count` papers.
pub fn build_search_prompt(query: &str, filters: &SearchFilters, target_count: usize) -> String {
    // User text goes in last so it is never scanned for the fixed placeholders.
    SEARCH_PROMPT_TEMPLATE
        .replace("{target_count}", &target_count.to_string())
        .replace("{schema}", RESPONSE_SCHEMA)
        .replace("{constraints}", &build_constraints(filters))
        .replace("{query}", query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(authors: &str, journal: &str, start: &str, end: &str) -> SearchFilters {
        SearchFilters {
            authors: Some(authors.to_string()),
            journal: Some(journal.to_string()),
            year_start: Some(start.to_string()),
            year_end: Some(end.to_string()),
        }
    }

    #[test]
    fn test_prompt_with_start_year_only() {
        let prompt = build_search_prompt(
            "carbon tax effectiveness",
            &filters("", "", "2015", ""),
            10,
        );
        assert!(prompt.contains("\"carbon tax effectiveness\""));
        assert!(prompt.contains("between years 2015 and present inclusive"));
        assert!(!prompt.contains("authored by"));
        assert!(!prompt.contains("journal/platform: \""));
        assert!(prompt.contains("Provide exactly 10 distinct papers"));
    }

    #[test]
    fn test_prompt_includes_every_filter() {
        let prompt =
            build_search_prompt("minimum wage", &filters("Card", "AER", "1990", "2000"), 5);
        assert!(prompt.contains("authored by (or co-authored by): \"Card\"."));
        assert!(prompt.contains("journal/platform: \"AER\"."));
        assert!(prompt.contains("between years 1990 and 2000 inclusive"));
        assert!(prompt.contains("Provide exactly 5 distinct papers"));
        assert_eq!(prompt.matches("STRICTLY restrict").count(), 3);
    }

    #[test]
    fn test_whitespace_filters_are_omitted() {
        let prompt = build_search_prompt("trade", &filters("  ", "\t", " ", "   "), 10);
        assert!(!prompt.contains("STRICTLY restrict"));
    }

    #[test]
    fn test_end_year_only_uses_earliest_available() {
        let constraints = build_constraints(&SearchFilters {
            year_end: Some(" 2010 ".to_string()),
            ..Default::default()
        });
        assert_eq!(
            constraints,
            "\n- STRICTLY restrict results to papers published between years earliest available and 2010 inclusive."
        );
    }

    #[test]
    fn test_filter_text_is_not_escaped() {
        let constraints = build_constraints(&SearchFilters {
            authors: Some("O'Neil \"Jr\"".to_string()),
            ..Default::default()
        });
        assert!(constraints.contains("\"O'Neil \"Jr\"\""));
    }

    #[test]
    fn test_prompt_embeds_schema_and_fence_directive() {
        let prompt = build_search_prompt("inflation {targeting}", &SearchFilters::default(), 10);
        assert!(prompt.contains("```json ... ```"));
        assert!(prompt.contains("\"policyImplementations\""));
        assert!(prompt.contains("\"inflation {targeting}\""));
    }
}
