//! # reCAPTCHA Module
//!
//! Verifies reCAPTCHA tokens submitted with guarded forms.
//!
//! ## Submodules
//! - `types`: Wire types of the `siteverify` endpoint
//! - `google`: `reqwest`-backed client for Google's endpoint
//!
//! ## Verification Flow
//! 1. The browser solves the challenge and posts the token as `g-recaptcha-response`
//! 2. The guard (`middleware::recaptcha`) pulls the token out of the body
//! 3. The server POSTs secret + token + caller IP to `siteverify`
//! 4. `success: true` lets the request through, anything else stops it

pub mod google;
pub mod types;

use async_trait::async_trait;
use std::net::IpAddr;
use thiserror::Error;

pub use google::GoogleRecaptcha;
pub use types::SiteVerifyResponse;

/// Failure to obtain a verdict from the verification endpoint
///
/// A verdict of `success: false` is *not* an error; it is returned as a
/// normal [`SiteVerifyResponse`].
#[derive(Error, Debug)]
pub enum RecaptchaError {
    #[error("verification request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Something that can check a reCAPTCHA token
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecaptchaVerifier: Send + Sync {
    /// Ask the verification endpoint about `token`, submitted from `remote_ip`.
    async fn verify(
        &self,
        token: &str,
        remote_ip: Option<IpAddr>,
    ) -> Result<SiteVerifyResponse, RecaptchaError>;
}
