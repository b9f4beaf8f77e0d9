use tracing::{debug, error};

use crate::view::{Effect, Msg, ViewState};

/// Joins the previous effective query and new input when refining.
pub const REFINEMENT_SEPARATOR: &str = ". Refinement: ";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ViewState, msg: Msg) -> (ViewState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryChanged(text) => {
            state.form_mut().query = text;
            Vec::new()
        }
        Msg::AuthorsChanged(text) => {
            state.form_mut().authors = text;
            Vec::new()
        }
        Msg::JournalChanged(text) => {
            state.form_mut().journal = text;
            Vec::new()
        }
        Msg::YearStartChanged(text) => {
            state.form_mut().year_start = text;
            Vec::new()
        }
        Msg::YearEndChanged(text) => {
            state.form_mut().year_end = text;
            Vec::new()
        }
        Msg::RefineToggled(on) => {
            if state.refine_available() {
                state.set_refine(on);
            } else {
                debug!("Refine toggle ignored before first completed search");
            }
            Vec::new()
        }
        // No in-flight guard: a submission while searching starts another
        // search and whichever resolves last is shown.
        Msg::Submitted => start_search(&mut state, None),
        Msg::ClarificationChosen(text) => {
            if !text.is_empty() {
                state.form_mut().query = text.clone();
            }
            start_search(&mut state, Some(text))
        }
        Msg::SearchSucceeded(response) => {
            debug!(papers = response.papers.len(), "Applying search results");
            state.apply_results(response);
            Vec::new()
        }
        Msg::SearchFailed(detail) => {
            error!(error = %detail, "Search failed");
            state.apply_failure();
            Vec::new()
        }
        Msg::AnalysisToggled(paper_id) => {
            if !state.toggle_expanded(&paper_id) {
                debug!(paper_id = %paper_id, "Toggle for unknown paper ignored");
            }
            Vec::new()
        }
    };

    (state, effects)
}

/// Shared submit path for the main form and clarification chips.
///
/// An empty override falls back to the query input. Refinement applies only
/// to main-form submissions.
fn start_search(state: &mut ViewState, override_query: Option<String>) -> Vec<Effect> {
    let override_query = override_query.filter(|q| !q.is_empty());
    let from_main_input = override_query.is_none();
    let active = override_query.unwrap_or_else(|| state.form().query.clone());

    if active.trim().is_empty() {
        return Vec::new();
    }

    let effective = if from_main_input && state.refine() && !state.searched_query().is_empty() {
        format!("{}{}{}", state.searched_query(), REFINEMENT_SEPARATOR, active)
    } else {
        active
    };

    state.begin_search(effective.clone());

    vec![Effect::Search {
        query: effective,
        filters: state.form().filters(),
    }]
}
