//! # Configuration Management
//!
//! This module handles loading configuration from environment variables.
//! It uses the "12-factor app" methodology where configuration comes from the environment.
//!
//! ## Environment Variables
//! - `HOST`: Server bind address (default: 127.0.0.1)
//! - `PORT`: Server port (default: 3000)
//! - `DATABASE_URL`: SQLite database connection string
//! - `SESSION_SECRET`: Secret used to sign the session cookie
//! - `SESSION_STORE`: Session backing storage, `memory` or `sqlite`
//! - `CLIENT_ID` / `CLIENT_SECRET`: Google OAuth2 client credentials (required)
//! - `CALLBACK_URL`: Where Google sends the user back after consent
//! - `CLIENT_URL`: Where the user lands after a successful Google login
//! - `RECAPTCHA_SITE_KEY`: Public key rendered into the sign-in page widget
//! - `RECAPTCHA_SECRET_KEY`: Shared secret for reCAPTCHA verification
//! - `RECAPTCHA_VERIFY_URL`: reCAPTCHA verification endpoint

use anyhow::{bail, Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Google's reCAPTCHA verification endpoint.
pub const DEFAULT_RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Where session data lives between requests
///
/// - `Memory`: process-local map, lost on restart
/// - `Sqlite`: `tower_sessions` table in the application database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStoreKind {
    #[default]
    Memory,
    Sqlite,
}

impl FromStr for SessionStoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            other => bail!("Unknown SESSION_STORE '{}', expected 'memory' or 'sqlite'", other),
        }
    }
}

/// Application configuration
///
/// This struct holds all configuration values needed to run the server.
/// All fields are public for easy access from other modules.
///
/// `Debug` is implemented by hand so secrets never end up in the logs.
#[derive(Clone)]
pub struct Config {
    /// Server host/IP address to bind to
    pub host: String,

    /// Server port number
    /// Default: 3000
    pub port: u16,

    /// SQLite database connection URL
    /// Format: "sqlite:filename.db?mode=rwc"
    pub database_url: String,

    /// Secret the session cookie is signed with
    pub session_secret: String,

    /// Which session store backs the session layer
    pub session_store: SessionStoreKind,

    /// Google OAuth2 client id
    pub client_id: String,

    /// Google OAuth2 client secret
    pub client_secret: String,

    /// Absolute URL of `/auth/google/callback` as registered with Google
    pub callback_url: String,

    /// Redirect target after a successful Google login
    pub client_url: String,

    /// reCAPTCHA site key, public
    pub recaptcha_site_key: String,

    /// reCAPTCHA shared secret
    pub recaptcha_secret_key: String,

    /// reCAPTCHA verification endpoint
    pub recaptcha_verify_url: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads variables from .env file (if present) using dotenvy
    /// 2. Reads each configuration value from environment
    /// 3. Falls back to defaults where the service can run without a value
    /// 4. Returns an error if a required value is missing or fails to parse
    ///
    /// ## Example .env file
    /// ```text
    /// PORT=3000
    /// SESSION_SECRET=change-me
    /// CLIENT_ID=1234.apps.googleusercontent.com
    /// CLIENT_SECRET=shhh
    /// CALLBACK_URL=http://localhost:3000/auth/google/callback
    /// CLIENT_URL=http://localhost:5173
    /// RECAPTCHA_SITE_KEY=6Lc...
    /// RECAPTCHA_SECRET_KEY=6Lc...
    /// ```
    pub fn from_env() -> Result<Self> {
        // dotenvy doesn't error if the file is missing
        dotenvy::dotenv().ok();

        let recaptcha_secret_key = env::var("RECAPTCHA_SECRET_KEY").unwrap_or_default();
        if recaptcha_secret_key.is_empty() {
            tracing::warn!("RECAPTCHA_SECRET_KEY is not set; every reCAPTCHA check will be rejected");
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),

            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid port number")?,

            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:app.db?mode=rwc".to_string()),

            session_secret: env::var("SESSION_SECRET").unwrap_or_else(|_| "SecretKey".to_string()),

            session_store: env::var("SESSION_STORE")
                .map(|s| s.parse())
                .unwrap_or(Ok(SessionStoreKind::default()))?,

            client_id: env::var("CLIENT_ID").context("CLIENT_ID not set")?,
            client_secret: env::var("CLIENT_SECRET").context("CLIENT_SECRET not set")?,

            callback_url: env::var("CALLBACK_URL")
                .unwrap_or_else(|_| "http://localhost:3000/auth/google/callback".to_string()),

            client_url: env::var("CLIENT_URL").unwrap_or_else(|_| "/".to_string()),

            recaptcha_site_key: env::var("RECAPTCHA_SITE_KEY").unwrap_or_default(),

            recaptcha_secret_key,

            recaptcha_verify_url: env::var("RECAPTCHA_VERIFY_URL")
                .unwrap_or_else(|_| DEFAULT_RECAPTCHA_VERIFY_URL.to_string()),
        })
    }

    /// Get the socket address to bind the server to
    ///
    /// Example: "127.0.0.1:3000"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("session_secret", &"<redacted>")
            .field("session_store", &self.session_store)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("callback_url", &self.callback_url)
            .field("client_url", &self.client_url)
            .field("recaptcha_site_key", &self.recaptcha_site_key)
            .field("recaptcha_secret_key", &"<redacted>")
            .field("recaptcha_verify_url", &self.recaptcha_verify_url)
            .finish()
    }
}

#[cfg(test)]
impl Config {
    /// Configuration for tests: in-memory database and sessions, no real secrets.
    pub fn for_tests() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: "sqlite::memory:".to_string(),
            session_secret: "test-secret".to_string(),
            session_store: SessionStoreKind::Memory,
            client_id: "test-client".to_string(),
            client_secret: "test-client-secret".to_string(),
            callback_url: "http://localhost:3000/auth/google/callback".to_string(),
            client_url: "http://localhost:5173/dashboard".to_string(),
            recaptcha_site_key: "test-site-key".to_string(),
            recaptcha_secret_key: "test-recaptcha-secret".to_string(),
            recaptcha_verify_url: DEFAULT_RECAPTCHA_VERIFY_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_store_kind_parses_known_values() {
        assert_eq!("memory".parse::<SessionStoreKind>().unwrap(), SessionStoreKind::Memory);
        assert_eq!(" SQLite ".parse::<SessionStoreKind>().unwrap(), SessionStoreKind::Sqlite);
        assert!("redis".parse::<SessionStoreKind>().is_err());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = Config::for_tests();
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("test-secret"));
        assert!(!rendered.contains("test-client-secret"));
        assert!(!rendered.contains("test-recaptcha-secret"));
        assert!(rendered.contains("test-client"));
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        let mut config = Config::for_tests();
        config.port = 3000;
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }
}
