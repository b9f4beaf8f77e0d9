use std::collections::HashSet;

use crate::types::{LoadingStage, ResearchPaper, SearchFilters, SearchResponse};
use crate::view::view_model::{PaperCardView, ViewModel};

/// Shown in the error panel whatever the underlying failure was.
pub const SEARCH_ERROR_MESSAGE: &str =
    "An error occurred while retrieving research data. Please try refining your parameters.";

/// Raw text of the form inputs as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub query: String,
    pub authors: String,
    pub journal: String,
    pub year_start: String,
    pub year_end: String,
}

impl SearchForm {
    /// Filters to send with a search; empty inputs are left out.
    pub fn filters(&self) -> SearchFilters {
        fn field(value: &str) -> Option<String> {
            (!value.is_empty()).then(|| value.to_string())
        }
        SearchFilters {
            authors: field(&self.authors),
            journal: field(&self.journal),
            year_start: field(&self.year_start),
            year_end: field(&self.year_end),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    form: SearchForm,
    refine: bool,
    /// Query last sent to the search client, after refinement
    searched_query: String,
    /// Set once any search has completed successfully
    has_results_once: bool,
    stage: LoadingStage,
    papers: Vec<ResearchPaper>,
    clarifications: Vec<String>,
    total_results_estimate: Option<String>,
    error: Option<String>,
    expanded: HashSet<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> LoadingStage {
        self.stage
    }

    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    pub fn refine(&self) -> bool {
        self.refine
    }

    pub fn searched_query(&self) -> &str {
        &self.searched_query
    }

    pub fn papers(&self) -> &[ResearchPaper] {
        &self.papers
    }

    pub fn clarifications(&self) -> &[String] {
        &self.clarifications
    }

    pub fn total_results_estimate(&self) -> Option<&str> {
        self.total_results_estimate.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The refine checkbox is usable only after a successful search.
    pub fn refine_available(&self) -> bool {
        self.has_results_once
    }

    pub fn is_expanded(&self, paper_id: &str) -> bool {
        self.expanded.contains(paper_id)
    }

    pub fn view(&self) -> ViewModel {
        let searching = self.stage == LoadingStage::Searching;
        ViewModel {
            stage: self.stage,
            form: self.form.clone(),
            refine: self.refine,
            refine_available: self.refine_available(),
            searched_query: self.searched_query.clone(),
            can_submit: !searching && !self.form.query.trim().is_empty(),
            submit_label: if searching { "Analyzing..." } else { "Search" },
            error: self.error.clone(),
            papers: self
                .papers
                .iter()
                .map(|paper| PaperCardView {
                    expanded: self.is_expanded(&paper.id),
                    paper: paper.clone(),
                })
                .collect(),
            clarifications: self.clarifications.clone(),
            total_results_estimate: self.total_results_estimate.clone(),
        }
    }

    pub(crate) fn form_mut(&mut self) -> &mut SearchForm {
        &mut self.form
    }

    pub(crate) fn set_refine(&mut self, refine: bool) {
        self.refine = refine;
    }

    /// Enter `Searching` and drop everything shown for the previous search.
    pub(crate) fn begin_search(&mut self, effective_query: String) {
        self.stage = LoadingStage::Searching;
        self.error = None;
        self.papers.clear();
        self.clarifications.clear();
        self.total_results_estimate = None;
        self.expanded.clear();
        self.searched_query = effective_query;
    }

    pub(crate) fn apply_results(&mut self, response: SearchResponse) {
        self.papers = response.papers;
        self.clarifications = response.clarifications;
        self.total_results_estimate = response.total_results_estimate;
        self.error = None;
        self.expanded.clear();
        self.has_results_once = true;
        self.stage = LoadingStage::Complete;
    }

    pub(crate) fn apply_failure(&mut self) {
        self.papers.clear();
        self.clarifications.clear();
        self.total_results_estimate = None;
        self.expanded.clear();
        self.error = Some(SEARCH_ERROR_MESSAGE.to_string());
        self.stage = LoadingStage::Error;
    }

    /// Flip a card's analysis panel. Unknown ids are ignored.
    pub(crate) fn toggle_expanded(&mut self, paper_id: &str) -> bool {
        if !self.papers.iter().any(|p| p.id == paper_id) {
            return false;
        }
        if !self.expanded.remove(paper_id) {
            self.expanded.insert(paper_id.to_string());
        }
        true
    }
}
