//! # Application State
//!
//! This module defines the shared state that's accessible to all request handlers.
//! In Axum, state is how you share resources (database connections, configuration, etc.)
//! across different parts of your application.
//!
//! The outbound services (reCAPTCHA and the identity provider) are held as
//! trait objects so handlers never know whether they talk to Google or to a
//! test double.

use crate::config::Config;
use crate::db;
use crate::oauth::{GoogleOAuth, IdentityProvider};
use crate::recaptcha::{GoogleRecaptcha, RecaptchaVerifier};
use anyhow::Result;
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;

/// Shared application state
///
/// Cloned for every request; every field is either a pool or an `Arc`, so a
/// clone only copies pointers.
#[derive(Clone)]
pub struct AppState {
    /// The single database connection
    pub db: SqlitePool,

    /// Settings loaded at startup
    pub config: Arc<Config>,

    /// Checks reCAPTCHA tokens for guarded routes
    pub recaptcha: Arc<dyn RecaptchaVerifier>,

    /// Google sign-in
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Initialize application state
    ///
    /// # Errors
    /// Returns an error if:
    /// - Database connection fails
    /// - An OAuth URL (e.g. `CALLBACK_URL`) is malformed
    pub async fn new(config: &Config) -> Result<Self> {
        let db = db::connect(&config.database_url).await?;

        let recaptcha = GoogleRecaptcha::new(
            config.recaptcha_secret_key.clone(),
            config.recaptcha_verify_url.clone(),
        );
        let identity = GoogleOAuth::new(config)?;

        Ok(AppState {
            db,
            config: Arc::new(config.clone()),
            recaptcha: Arc::new(recaptcha),
            identity: Arc::new(identity),
        })
    }
}

#[cfg(test)]
impl AppState {
    /// State with the given outbound services and a lazily opened in-memory database.
    pub fn for_tests(
        config: Config,
        recaptcha: impl RecaptchaVerifier + 'static,
        identity: impl IdentityProvider + 'static,
    ) -> Self {
        AppState {
            db: db::connect_lazy(&config.database_url).unwrap(),
            config: Arc::new(config),
            recaptcha: Arc::new(recaptcha),
            identity: Arc::new(identity),
        }
    }
}
