use crate::types::SearchFilters;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run a search for `query` exactly as given.
    Search {
        query: String,
        filters: SearchFilters,
    },
}
