//! DeedVault Backend Server
//!
//! Backend server for tokenized real-estate title escrow: a title registry
//! issuing property deed tokens and an escrow ledger that takes custody of
//! listed titles and records their sale terms.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum::{routing::get, Router};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

use deedvault_server::config::Config;
use deedvault_server::escrow::{EscrowLedger, EscrowRoles, ListingPolicy};
use deedvault_server::middleware;
use deedvault_server::registry::TitleRegistry;
use deedvault_server::routes;
use deedvault_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .init();

    tracing::info!(environment = config.environment.as_str(), "Starting DeedVault");

    // Wire up the registry and the escrow ledger
    let registry = Arc::new(TitleRegistry::new());
    let ledger = Arc::new(EscrowLedger::new(
        registry.clone(),
        EscrowRoles {
            seller: config.seller_address,
            inspector: config.inspector_address,
            lender: config.lender_address,
        },
        ListingPolicy {
            enforce_deposit_cap: config.enforce_deposit_cap,
        },
    ));

    tracing::info!(
        registry = %registry.address(),
        ledger = %ledger.address(),
        seller = %ledger.seller(),
        inspector = %ledger.inspector(),
        lender = %ledger.lender(),
        "Escrow ledger deployed"
    );

    let app_state = AppState::new(registry, ledger);

    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(routes::api_router())
        .with_state(app_state)
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .layer(configure_cors(config.cors_allowed_origins.as_deref()));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn root() -> &'static str {
    "DeedVault API Server"
}

/// Health check response
#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    version: String,
}

/// Health check endpoint
async fn health_check() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn configure_cors(allowed_origins: Option<&str>) -> CorsLayer {
    let allowed_origins = allowed_origins.unwrap_or_default();

    if allowed_origins.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
