//! Grounded paper search against the Gemini `generateContent` API.
//!
//! One search asks for [`RESULT_COUNT_LADDER`]`[0]` papers and, on any
//! failure, retries once asking for fewer. Attempts run strictly in sequence.

use crate::config::SearchConfig;
use crate::error::{EconSearchError, Result};
use crate::extract::extract_json;
use crate::prompts::build_search_prompt;
use crate::types::{SearchFilters, SearchResponse};
use chrono::Utc;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Papers requested per attempt, in order.
pub const RESULT_COUNT_LADDER: [usize; 2] = [10, 5];

/// Low sampling temperature for factual answers
const TEMPERATURE: f64 = 0.3;

/// Grounded generation is slow; allow for it
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Gemini API response structures
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.is_empty()).then_some(text)
    }
}

/// Client for grounded paper searches.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    config: SearchConfig,
}

impl SearchClient {
    /// Build a client. Fails if the config has no credential.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| EconSearchError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search for papers on `query`, falling back to a smaller request once.
    pub async fn search(&self, query: &str, filters: &SearchFilters) -> Result<SearchResponse> {
        let mut last_error = None;

        for (attempt, &target_count) in RESULT_COUNT_LADDER.iter().enumerate() {
            match self.search_with_count(query, filters, target_count).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    match RESULT_COUNT_LADDER.get(attempt + 1) {
                        Some(next) => warn!(
                            requested = target_count,
                            retry_with = next,
                            error = %e,
                            "Search attempt failed, retrying with fewer results"
                        ),
                        None => error!(
                            requested = target_count,
                            error = %e,
                            "Fallback search failed"
                        ),
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| EconSearchError::format("no search attempts configured")))
    }

    /// Run a single attempt asking for `target_count` papers.
    pub async fn search_with_count(
        &self,
        query: &str,
        filters: &SearchFilters,
        target_count: usize,
    ) -> Result<SearchResponse> {
        info!(
            query = %query,
            target_count = target_count,
            model = %self.config.model,
            "Starting grounded paper search"
        );

        let prompt = build_search_prompt(query, filters, target_count);
        let text = self.generate(&prompt).await?;
        let response = parse_search_payload(&text, Utc::now().timestamp_millis())?;

        info!(
            papers = response.papers.len(),
            clarifications = response.clarifications.len(),
            "Paper search complete"
        );

        Ok(response)
    }

    /// Send one grounded generation request and return the response text.
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request_body = serde_json::json!({
            "contents": [
                {"role": "user", "parts": [{"text": prompt}]}
            ],
            "tools": [{"google_search": {}}],
            "generationConfig": {
                "temperature": TEMPERATURE
            }
        });

        let api_url = self.config.generate_url();
        debug!(url = %api_url, "Sending generateContent request");

        let response = self
            .client
            .post(&api_url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(EconSearchError::Api {
                code: status.as_u16(),
                message: format!("Gemini API error: {} - {}", status, error_text),
            });
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| EconSearchError::format(format!("Failed to decode API response: {}", e)))?;

        api_response
            .text()
            .ok_or_else(|| EconSearchError::format("Model response contained no text"))
    }
}

/// Parse the JSON payload embedded in model text and assign local ids.
///
/// Ids are `paper-<stamp>-<index>`, so they are unique within one response
/// only.
pub fn parse_search_payload(text: &str, stamp: i64) -> Result<SearchResponse> {
    let Some((tier, json)) = extract_json(text) else {
        let preview: String = text.chars().take(200).collect();
        warn!(content_preview = %preview, "No JSON found in model response");
        return Err(EconSearchError::format("no JSON block in model response"));
    };
    debug!(tier = ?tier, "Extracted JSON from model response");

    let mut response: SearchResponse = serde_json::from_str(json).map_err(|e| {
        let preview: String = json.chars().take(200).collect();
        warn!(error = %e, content_preview = %preview, "Model JSON failed to parse");
        EconSearchError::format(format!("invalid JSON: {}", e))
    })?;

    for (index, paper) in response.papers.iter_mut().enumerate() {
        paper.id = format!("paper-{}-{}", stamp, index);
    }

    Ok(response)
}
