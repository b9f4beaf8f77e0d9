//! # econsearch
//!
//! Grounded LLM research-paper search with a single-page web front-end.
//!
//! ## Modules
//!
//! - [`prompts`] - Search prompt construction
//! - [`extract`] - JSON recovery from free-form model output
//! - [`search`] - Gemini client with the 10-then-5 fallback
//! - [`view`] - Form/result state machine
//! - [`render`] - HTML and plain-text result rendering
//! - [`session`] - Drives the state machine against a live client
//! - [`server`] - axum routes for the web front-end and JSON API
//! - [`config`] - Endpoint and credential settings
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use econsearch::{SearchClient, SearchConfig, SearchFilters};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SearchClient::new(SearchConfig::from_env())?;
//!     let response = client.search("carbon tax effectiveness", &SearchFilters::default()).await?;
//!     println!("Found {} papers", response.papers.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod prompts;
pub mod render;
pub mod search;
pub mod server;
pub mod session;
pub mod types;
pub mod view;

pub use config::SearchConfig;
pub use error::{EconSearchError, Result};
pub use search::SearchClient;
pub use session::Session;
pub use types::{LoadingStage, ResearchPaper, SearchFilters, SearchResponse};
