//! Domain types shared by the search client, the view state and the renderers.
//!
//! Paper records arrive from free-form model output, so decoding is lenient:
//! scalar fields accept numbers or string arrays, list fields accept a single
//! string, and anything missing decodes as empty.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single paper summary returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchPaper {
    /// Locally generated, unique within one response only
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub authors: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub year: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub journal: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient::list")]
    pub key_findings: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub policy_implementations: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub similar_topics: Vec<String>,
    /// Approximate, e.g. "1200+"
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub citation_count: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
    /// DOI, NBER number, arXiv id or similar
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub paper_id: Option<String>,
}

/// Parsed result of one search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub papers: Vec<ResearchPaper>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub clarifications: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_results_estimate: Option<String>,
}

/// Optional prompt constraints. Never validated numerically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default)]
    pub year_start: Option<String>,
    #[serde(default)]
    pub year_end: Option<String>,
}

impl SearchFilters {
    /// Authors filter, if non-blank. Returned untrimmed.
    pub fn authors(&self) -> Option<&str> {
        non_blank(&self.authors)
    }

    /// Journal filter, if non-blank. Returned untrimmed.
    pub fn journal(&self) -> Option<&str> {
        non_blank(&self.journal)
    }

    /// Lower year bound, trimmed, if non-blank.
    pub fn year_start(&self) -> Option<&str> {
        non_blank(&self.year_start).map(str::trim)
    }

    /// Upper year bound, trimmed, if non-blank.
    pub fn year_end(&self) -> Option<&str> {
        non_blank(&self.year_end).map(str::trim)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Page lifecycle. `Synthesizing` is reserved and never entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadingStage {
    #[default]
    Idle,
    Searching,
    Synthesizing,
    Complete,
    Error,
}

mod lenient {
    use super::*;

    fn scalar(value: &Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(scalar)
                    .filter(|s| !s.trim().is_empty())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Value::Object(_) => Some(value.to_string()),
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(scalar(&value).unwrap_or_default())
    }

    pub fn optional_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(scalar(&value).filter(|s| !s.trim().is_empty()))
    }

    pub fn list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(match value {
            Value::Array(items) => items.iter().filter_map(scalar).collect(),
            Value::Null => Vec::new(),
            other => scalar(&other).into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_decodes_lenient_fields() {
        let json = r#"{
            "title": "Carbon Taxes and Emissions",
            "authors": ["A. Smith", "B. Jones"],
            "year": 2019,
            "journal": "AER",
            "keyFindings": "Emissions fell",
            "citationCount": 450,
            "url": "  "
        }"#;
        let paper: ResearchPaper = serde_json::from_str(json).expect("decode");
        assert_eq!(paper.authors, "A. Smith, B. Jones");
        assert_eq!(paper.year, "2019");
        assert_eq!(paper.summary, "");
        assert_eq!(paper.key_findings, vec!["Emissions fell".to_string()]);
        assert!(paper.policy_implementations.is_empty());
        assert_eq!(paper.citation_count.as_deref(), Some("450"));
        assert_eq!(paper.url, None);
        assert_eq!(paper.paper_id, None);
    }

    #[test]
    fn test_response_requires_papers() {
        let missing = serde_json::from_str::<SearchResponse>(r#"{"clarifications": []}"#);
        assert!(missing.is_err());

        let ok: SearchResponse = serde_json::from_str(r#"{"papers": []}"#).expect("decode");
        assert!(ok.clarifications.is_empty());
        assert_eq!(ok.total_results_estimate, None);
    }

    #[test]
    fn test_paper_serializes_camel_case() {
        let paper = ResearchPaper {
            id: "paper-1-0".to_string(),
            title: "T".to_string(),
            authors: String::new(),
            year: String::new(),
            journal: String::new(),
            summary: String::new(),
            key_findings: vec![],
            policy_implementations: vec!["p".to_string()],
            similar_topics: vec![],
            citation_count: None,
            url: None,
            paper_id: Some("10.1/x".to_string()),
        };
        let value = serde_json::to_value(&paper).expect("encode");
        assert_eq!(value["policyImplementations"][0], "p");
        assert_eq!(value["paperId"], "10.1/x");
        assert!(value.get("citationCount").is_none());
    }

    #[test]
    fn test_filters_ignore_blank_values() {
        let filters = SearchFilters {
            authors: Some("   ".to_string()),
            journal: Some(" QJE ".to_string()),
            year_start: Some(" 2015 ".to_string()),
            year_end: None,
        };
        assert_eq!(filters.authors(), None);
        assert_eq!(filters.journal(), Some(" QJE "));
        assert_eq!(filters.year_start(), Some("2015"));
        assert_eq!(filters.year_end(), None);
    }

    #[test]
    fn test_loading_stage_wire_names() {
        let json = serde_json::to_string(&LoadingStage::Searching).expect("encode");
        assert_eq!(json, "\"SEARCHING\"");
        assert_eq!(LoadingStage::default(), LoadingStage::Idle);
    }
}
