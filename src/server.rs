//! HTTP front-end.
//!
//! Pages are server-rendered from the shared [`Session`]; every form post
//! redirects back to `/` without waiting for the search, and the page
//! refreshes itself until the search settles. `/api/search` is stateless and bypasses the view.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::render::render_page;
use crate::types::SearchFilters;
use crate::view::Msg;
use crate::Session;

pub type SharedSession = Arc<Session>;

/// Build the router for the web front-end and JSON API.
pub fn build_router(session: SharedSession) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/search", post(search_handler))
        .route("/clarify", post(clarify_handler))
        .route("/papers/{id}/toggle", post(toggle_handler))
        .route("/api/search", get(api_search_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(session)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(session: SharedSession, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, build_router(session)).await
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

async fn index_handler(State(session): State<SharedSession>) -> Html<String> {
    Html(render_page(&session.view()))
}

/// Main search form body. Unchecked checkboxes are absent.
#[derive(Debug, Deserialize)]
struct SearchFormBody {
    #[serde(default)]
    query: String,
    #[serde(default)]
    authors: String,
    #[serde(default)]
    journal: String,
    #[serde(default)]
    year_start: String,
    #[serde(default)]
    year_end: String,
    refine: Option<String>,
}

async fn search_handler(
    State(session): State<SharedSession>,
    Form(body): Form<SearchFormBody>,
) -> Redirect {
    info!(query = %body.query, refine = body.refine.is_some(), "Search form submitted");

    session.dispatch_in_background([
        Msg::QueryChanged(body.query),
        Msg::AuthorsChanged(body.authors),
        Msg::JournalChanged(body.journal),
        Msg::YearStartChanged(body.year_start),
        Msg::YearEndChanged(body.year_end),
        Msg::RefineToggled(body.refine.is_some()),
        Msg::Submitted,
    ]);

    Redirect::to("/")
}

#[derive(Debug, Deserialize)]
struct ClarifyBody {
    clarification: String,
}

async fn clarify_handler(
    State(session): State<SharedSession>,
    Form(body): Form<ClarifyBody>,
) -> Redirect {
    info!(clarification = %body.clarification, "Clarification chosen");
    session.dispatch_in_background([Msg::ClarificationChosen(body.clarification)]);
    Redirect::to("/")
}

async fn toggle_handler(
    State(session): State<SharedSession>,
    Path(id): Path<String>,
) -> Redirect {
    // Only ids we assigned are safe to echo into the Location header.
    let known = session.view().papers.iter().any(|card| card.paper.id == id);
    session.dispatch(Msg::AnalysisToggled(id.clone())).await;

    if known {
        Redirect::to(&format!("/#{}", id))
    } else {
        Redirect::to("/")
    }
}

/// Query string for the JSON API
#[derive(Debug, Deserialize)]
struct ApiSearchParams {
    q: String,
    authors: Option<String>,
    journal: Option<String>,
    year_start: Option<String>,
    year_end: Option<String>,
}

async fn api_search_handler(
    State(session): State<SharedSession>,
    Query(params): Query<ApiSearchParams>,
) -> Response {
    if params.q.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "query parameter 'q' is empty" })),
        )
            .into_response();
    }

    let filters = SearchFilters {
        authors: params.authors,
        journal: params.journal,
        year_start: params.year_start,
        year_end: params.year_end,
    };

    match session.client().search(&params.q, &filters).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            error!(error = %e, "API search failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
