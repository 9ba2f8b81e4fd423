//! # Sign-in Gateway
//!
//! A small web server that signs users in two ways:
//! - a local sign-in form protected by Google reCAPTCHA
//! - Google OAuth2 ("Sign in with Google")
//!
//! ## Key Concepts
//! - **reCAPTCHA**: a challenge the browser solves; the server verifies the resulting token
//! - **OAuth2 authorization-code flow**: redirect to Google, receive a code, exchange it for a profile
//! - **Sessions**: a signed cookie pointing at server-side session data

mod config;      // Configuration management (environment variables, settings)
mod db;          // Database connection
mod error;       // Error handling and custom error types
mod forms;       // Request body types
mod handlers;    // HTTP request handlers (routes)
mod middleware;  // Request interceptors (authentication, reCAPTCHA)
mod oauth;       // Google OAuth2
mod recaptcha;   // reCAPTCHA verification
mod routes;      // Route table and middleware order
mod session;     // Session storage and cookie settings
mod state;       // Shared application state

use crate::config::Config;
use crate::session::{session_layer, SessionBackend};
use crate::state::AppState;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main application entry point
///
/// This function:
/// 1. Sets up logging
/// 2. Loads configuration from environment variables
/// 3. Connects to the database and builds the Google clients
/// 4. Configures the session store and cookie
/// 5. Starts the HTTP server
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default: info level for most crates, debug level for our app
    // Can be overridden with RUST_LOG environment variable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,signin_gateway=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    let app_state = AppState::new(&config).await?;
    tracing::info!("Application state initialized");

    let session_store = SessionBackend::from_config(config.session_store, &app_state.db).await?;
    tracing::info!("Session store: {:?}", config.session_store);
    let sessions = session_layer(session_store, &config.session_secret);

    let app = routes::app(app_state, sessions);

    let bind_addr = config.bind_address();
    tracing::info!("Server is running on {}", bind_addr);

    // ConnectInfo gives the reCAPTCHA guard the caller's IP
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
