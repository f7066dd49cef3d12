//! HTTP service for factura - AI invoice extraction and reconciliation.

mod api;
mod config;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use factura_core::DataStore;
use factura_inference::GeminiClient;

use config::AppConfig;

/// Whole-request body ceiling; generous enough for a batch of files at the
/// 10 MB per-file limit enforced in the handler.
const MAX_BODY_SIZE: usize = 64 * 1024 * 1024;

/// AI invoice extraction and reconciliation service
#[derive(Parser)]
#[command(name = "factura-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bind address (overrides SERVER_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides SERVER_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Shared state: the in-memory record store and the inference client.
///
/// State is process-memory only and resets on restart. The store assumes one
/// logical writer at a time; the lock makes that explicit for the server.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<DataStore>>,
    pub model: Arc<GeminiClient>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // The inference API key is required here, not on the first request.
    let mut config = AppConfig::from_env()?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let model = GeminiClient::new(config.gemini.api_key).with_model(config.gemini.model);
    let state = AppState {
        store: Arc::new(RwLock::new(DataStore::new())),
        model: Arc::new(model),
    };

    let app = Router::new()
        .route("/health", get(api::health_check))
        .route("/api/extract", post(api::extract))
        .route("/api/records", get(api::records))
        .route("/api/records/edit", post(api::edit_record))
        .route("/api/reset", post(api::reset))
        .layer(ServiceBuilder::new().layer(DefaultBodyLimit::max(MAX_BODY_SIZE)))
        .with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {addr}");
    info!("API Endpoints:");
    info!("  POST /api/extract      - extract records from uploaded files");
    info!("  GET  /api/records      - current record sets");
    info!("  POST /api/records/edit - edit one field with reconciliation");
    info!("  POST /api/reset        - clear all record sets");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
