//! econsearch - Grounded LLM research-paper search
//!
//! Builds a research prompt from a topic and optional filters, asks Gemini
//! (with Google Search grounding) for matching papers, and renders the
//! parsed summaries.
//!
//! ## Usage
//!
//! ### CLI Mode
//! ```bash
//! econsearch search "carbon tax effectiveness" --year-start 2015
//! ```
//!
//! ### HTTP Server Mode
//! ```bash
//! econsearch serve --port 3000
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use econsearch::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use econsearch::render::render_text;
use econsearch::view::Msg;
use econsearch::{server, LoadingStage, SearchClient, SearchConfig, Session};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Grounded LLM research-paper search
#[derive(Parser)]
#[command(name = "econsearch")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Gemini API key (defaults to GEMINI_API_KEY, then API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Model identifier
    #[arg(long, global = true, default_value = DEFAULT_MODEL)]
    model: String,

    /// API base URL
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for papers on a research topic
    Search {
        /// Research topic
        topic: String,

        /// Restrict to papers by these author(s)
        #[arg(long)]
        authors: Option<String>,

        /// Restrict to a journal or platform
        #[arg(long)]
        journal: Option<String>,

        /// Earliest publication year
        #[arg(long)]
        year_start: Option<String>,

        /// Latest publication year
        #[arg(long)]
        year_end: Option<String>,

        /// Show key findings, policy implications and related topics
        #[arg(long)]
        expand: bool,

        /// Print the view model as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Run the web front-end
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .init();

    // The credential is read once here and shared by every search.
    let mut config = SearchConfig::from_env()
        .with_model(cli.model)
        .with_base_url(cli.base_url);
    if let Some(key) = cli.api_key {
        config = config.with_api_key(key);
    }
    let client = SearchClient::new(config).context("Failed to configure search client")?;

    match cli.command {
        Commands::Search {
            topic,
            authors,
            journal,
            year_start,
            year_end,
            expand,
            json,
        } => {
            run_search(
                client,
                topic,
                [authors, journal, year_start, year_end],
                expand,
                json,
            )
            .await
        }
        Commands::Serve { port, host } => run_server(client, host, port).await,
    }
}

// ============================================================================
// One-shot Search
// ============================================================================

async fn run_search(
    client: SearchClient,
    topic: String,
    [authors, journal, year_start, year_end]: [Option<String>; 4],
    expand: bool,
    json: bool,
) -> Result<()> {
    if topic.trim().is_empty() {
        anyhow::bail!("Topic is empty");
    }

    let session = Session::new(client);
    session
        .dispatch_all([
            Msg::QueryChanged(topic),
            Msg::AuthorsChanged(authors.unwrap_or_default()),
            Msg::JournalChanged(journal.unwrap_or_default()),
            Msg::YearStartChanged(year_start.unwrap_or_default()),
            Msg::YearEndChanged(year_end.unwrap_or_default()),
            Msg::Submitted,
        ])
        .await;

    let view = session.view();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("Failed to serialize results")?
        );
    } else {
        print!("{}", render_text(&view, expand));
    }

    if view.stage == LoadingStage::Error {
        anyhow::bail!("Search failed");
    }
    Ok(())
}

// ============================================================================
// HTTP Server
// ============================================================================

async fn run_server(client: SearchClient, host: String, port: u16) -> Result<()> {
    info!(host = %host, port = port, model = %client.config().model, "Starting HTTP server");

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .context("Invalid host:port")?;

    println!("Open http://{} in your browser", addr);

    let session = Arc::new(Session::new(client));
    server::serve(session, addr).await.context("Server error")?;

    Ok(())
}
