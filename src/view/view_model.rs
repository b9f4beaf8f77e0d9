use serde::Serialize;

use crate::types::{LoadingStage, ResearchPaper};
use crate::view::SearchForm;

/// Everything a renderer needs, detached from the live state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub stage: LoadingStage,
    #[serde(skip)]
    pub form: SearchForm,
    pub refine: bool,
    pub refine_available: bool,
    pub searched_query: String,
    pub can_submit: bool,
    pub submit_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub papers: Vec<PaperCardView>,
    pub clarifications: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results_estimate: Option<String>,
}

impl ViewModel {
    pub fn is_searching(&self) -> bool {
        self.stage == LoadingStage::Searching
    }

    /// Results header text, e.g. "Displaying 5 papers • Found: 200+ matches".
    pub fn results_summary(&self) -> String {
        match &self.total_results_estimate {
            Some(estimate) => format!(
                "Displaying {} papers \u{2022} Found: {}",
                self.papers.len(),
                estimate
            ),
            None => format!("Displaying {} papers", self.papers.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperCardView {
    #[serde(flatten)]
    pub paper: ResearchPaper,
    pub expanded: bool,
}
