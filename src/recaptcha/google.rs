//! `reqwest` client for Google's `siteverify` endpoint.

use super::{RecaptchaError, RecaptchaVerifier, SiteVerifyResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::net::IpAddr;

/// Verifies tokens against Google (or any endpoint speaking the same protocol).
///
/// One request per call: no retry, no timeout beyond reqwest's defaults, no caching.
#[derive(Debug, Clone)]
pub struct GoogleRecaptcha {
    http: Client,
    secret: String,
    verify_url: String,
}

impl GoogleRecaptcha {
    pub fn new(secret: impl Into<String>, verify_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            secret: secret.into(),
            verify_url: verify_url.into(),
        }
    }
}

#[async_trait]
impl RecaptchaVerifier for GoogleRecaptcha {
    async fn verify(
        &self,
        token: &str,
        remote_ip: Option<IpAddr>,
    ) -> Result<SiteVerifyResponse, RecaptchaError> {
        let remote_ip = remote_ip.map(|ip| ip.to_string());

        let mut params = vec![("secret", self.secret.as_str()), ("response", token)];
        if let Some(ip) = remote_ip.as_deref() {
            params.push(("remoteip", ip));
        }

        let verdict = self
            .http
            .post(&self.verify_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<SiteVerifyResponse>()
            .await?;

        tracing::debug!(
            success = verdict.success,
            hostname = ?verdict.hostname,
            challenge_ts = ?verdict.challenge_ts,
            error_codes = ?verdict.error_codes,
            "reCAPTCHA verdict received"
        );

        Ok(verdict)
    }
}
