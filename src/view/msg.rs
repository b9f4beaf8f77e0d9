use crate::types::SearchResponse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the topic input.
    QueryChanged(String),
    AuthorsChanged(String),
    JournalChanged(String),
    YearStartChanged(String),
    YearEndChanged(String),
    /// User flipped the "refine previous search" checkbox.
    RefineToggled(bool),
    /// User submitted the main form.
    Submitted,
    /// User picked a suggested clarification; searched verbatim.
    ClarificationChosen(String),
    /// Search client returned results.
    SearchSucceeded(SearchResponse),
    /// Search client gave up. Carries diagnostic detail for logs.
    SearchFailed(String),
    /// User expanded or collapsed a paper's analysis panel.
    AnalysisToggled(String),
}
