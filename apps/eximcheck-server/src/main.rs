//! Eximcheck API server
//!
//! Serves the document compliance pipeline over REST:
//!
//! - Rule-based compliance evaluation and annotation
//! - Job registration, status intake and lifecycle tracking
//! - Invoice vs Bill of Entry reconciliation
//!
//! ## Architecture
//!
//! The server is thin glue over the core crates. The in-process job
//! registry doubles as the status oracle the lifecycle tracker polls; the
//! external processing backend pushes snapshots into it over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post, put},
    Router,
};
use clap::Parser;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod jobs;
mod state;

use api::{
    handle_annotate, handle_evaluate_compliance, handle_get_job, handle_health,
    handle_list_document_types, handle_reconcile, handle_register_job, handle_track_job,
    handle_update_status, handle_validate_boe,
};
use compliance_engine::EngineConfig;
use doc_lifecycle::TrackerConfig;
use state::AppState;

/// Command-line arguments for the eximcheck server
#[derive(Parser, Debug)]
#[command(name = "eximcheck-server")]
#[command(about = "Eximcheck compliance API server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Status poll interval in seconds
    #[arg(long, default_value = "2")]
    poll_interval_secs: u64,

    /// Single-document tracking bound in seconds
    #[arg(long, default_value = "120")]
    track_timeout_secs: u64,

    /// Dual-document tracking bound in seconds
    #[arg(long, default_value = "300")]
    pair_timeout_secs: u64,

    /// Compliance score required for a document to be valid
    #[arg(long, default_value = "70")]
    pass_threshold: u8,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting eximcheck server on {}:{}", args.host, args.port);

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .expect("Failed to create rate limiter config"),
    );

    // Create shared state
    let state = AppState::new(
        EngineConfig {
            pass_threshold: args.pass_threshold,
        },
        TrackerConfig {
            poll_interval: Duration::from_secs(args.poll_interval_secs),
            timeout: Duration::from_secs(args.track_timeout_secs),
            pair_timeout: Duration::from_secs(args.pair_timeout_secs),
        },
    );

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(handle_health))
        // API endpoints
        .route("/api/document-types", get(handle_list_document_types))
        .route("/api/compliance", post(handle_evaluate_compliance))
        .route("/api/annotate", post(handle_annotate))
        .route("/api/reconcile", post(handle_reconcile))
        .route("/api/jobs", post(handle_register_job))
        .route("/api/jobs/:id", get(handle_get_job))
        .route("/api/jobs/:id/status", put(handle_update_status))
        .route("/api/jobs/:id/track", post(handle_track_job))
        .route("/api/validate-boe", post(handle_validate_boe))
        // Apply middleware
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors)
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!(
        "Tracking bounds: {}s single, {}s dual, {}s polls",
        args.track_timeout_secs, args.pair_timeout_secs, args.poll_interval_secs
    );

    axum::serve(listener, app).await?;

    Ok(())
}
