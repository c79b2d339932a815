//! Dash Dashboard Backend
//!
//! REST backend for the shared admin document and per-server user configuration.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod storage;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use storage::StorageClient;

/// Lifetime of tokens minted with `issue-session`.
const DEV_SESSION_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageClient>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // `issue-session <discord-id>` prints a session token for local testing
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("issue-session") {
        let discord_id = args.get(2).ok_or("usage: dash-backend issue-session <discord-id>")?;
        let secret = config
            .session_secret
            .as_deref()
            .ok_or("DASH_SESSION_SECRET must be set to issue sessions")?;
        println!(
            "{}",
            auth::issue_session_token(secret, discord_id, DEV_SESSION_TTL)?
        );
        return Ok(());
    }

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting Dash Dashboard Backend");
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.database_url.is_none() {
        tracing::warn!(
            "No database configured (DASH_DATABASE_URL). Admin document is read-only, user config is unavailable!"
        );
    }
    if config.session_secret.is_none() {
        tracing::warn!("No session secret configured (DASH_SESSION_SECRET). All sessions will be rejected!");
    }
    if config.admin_psk.is_none() {
        tracing::warn!("No admin PSK configured (DASH_ADMIN_PSK). Admin document is open!");
    }

    // Storage connects on first request
    let storage = Arc::new(StorageClient::new(config.database_url.clone()));

    let state = AppState {
        storage,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let psk = state.config.admin_psk.clone();

    let admin_routes = Router::new()
        .route(
            "/document",
            get(api::get_document).post(api::update_document),
        )
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Session checks happen in the `CallerIdentity` extractor
    let user_routes = Router::new().route(
        "/user-config/{server_id}",
        get(api::get_user_config).put(api::update_user_config),
    );

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/admin", admin_routes)
        .merge(user_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
