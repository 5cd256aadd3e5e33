mod config;
mod logging;
mod seed;
mod servers;
mod signals;
mod store;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use clap::{Parser, Subcommand};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{Span, field::Empty};

use crate::config::AppConfig;
use crate::seed::Seed;
use crate::servers::Mock;
use crate::store::Store;

/// In-memory accounts management API for development and tests.
#[derive(Parser)]
#[command(
    name = "ams-mock-server",
    about = "In-memory accounts management API server",
    version
)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the API (default)
    Run,
    /// Validate the configuration and the seed file
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_verbosity(cli.verbose);

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_pretty()?);
        return Ok(());
    }

    logging::init(&config.logging);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(&config).await,
        Commands::Check => check(&config),
    }
}

fn check(config: &AppConfig) -> Result<()> {
    if let Some(path) = &config.seed {
        let seed = Seed::load(path)?;
        seed.apply(&Store::new(&config.api.prefix))?;
    }
    println!("Configuration is valid");
    println!("{}", config.to_pretty()?);
    Ok(())
}

async fn run(config: &AppConfig) -> Result<()> {
    let store = Arc::new(Store::new(&config.api.prefix));
    if let Some(path) = &config.seed {
        let count = Seed::load(path)?.apply(&store)?;
        tracing::info!(path = %path.display(), objects = count, "seed loaded");
    }

    let mock = Mock::new(store, config.server.current_username.as_deref());
    let router = with_layers(
        accounts_mgmt::router(Arc::new(mock), &config.api),
        Duration::from_secs(config.server.timeout_secs),
    );

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(
        addr = %listener.local_addr()?,
        prefix = %config.api.prefix,
        "accounts management mock listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = signals::wait_for_shutdown().await {
                tracing::error!(error = %e, "signal handling failed");
            }
        })
        .await
        .context("server failed")?;
    tracing::info!("server stopped");
    Ok(())
}

/// Request id, tracing and timeout around the API router. The last layer
/// added runs first.
fn with_layers(router: Router, timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            timeout,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<Body>| {
                    let request_id = req
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("n/a");
                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri().path(),
                        request_id = %request_id,
                        status = Empty,
                        latency_ms = Empty,
                    )
                })
                .on_response(|res: &Response<Body>, latency: Duration, span: &Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                }),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
