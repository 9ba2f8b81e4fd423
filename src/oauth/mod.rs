//! # OAuth Module
//!
//! Google sign-in through the OAuth2 authorization-code flow (with PKCE).
//!
//! ## Submodules
//! - `types`: Values passed between the login redirect and the callback
//! - `google`: Google implementation built on the `oauth2` crate
//!
//! ## Flow Overview
//! 1. `GET /auth/google` → `IdentityProvider::authorization_request()`
//! 2. CSRF state and PKCE verifier are parked in the session
//! 3. The user is redirected to Google's consent screen
//! 4. Google redirects back to `/auth/google/callback?code=...&state=...`
//! 5. The state is checked against the session → `IdentityProvider::fetch_profile()`
//! 6. The profile is stored in the session, the user goes to `CLIENT_URL`

pub mod google;
pub mod types;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use google::GoogleOAuth;
pub use types::{AuthorizationRequest, CallbackParams};

/// Failures of the provider exchange
#[derive(Error, Debug)]
pub enum OAuthError {
    #[error("invalid OAuth endpoint URL: {0}")]
    InvalidUrl(#[from] oauth2::url::ParseError),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// An OAuth2 identity provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Build the consent-screen URL together with the secrets the callback needs.
    fn authorization_request(&self) -> AuthorizationRequest;

    /// Exchange an authorization code and return the user's profile, untouched.
    async fn fetch_profile(&self, code: &str, pkce_verifier: &str) -> Result<Value, OAuthError>;
}
