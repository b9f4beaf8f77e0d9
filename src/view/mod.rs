//! View state controller: pure state machine plus the view model renderers read.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{SearchForm, ViewState, SEARCH_ERROR_MESSAGE};
pub use update::{update, REFINEMENT_SEPARATOR};
pub use view_model::{PaperCardView, ViewModel};
