//! reCAPTCHA guard for form submissions.
//!
//! The body is buffered so the token can be read, then handed to the next
//! handler unchanged.

use crate::error::{AppError, AppResult};
use crate::forms::FormBody;
use crate::state::AppState;
use axum::{
    body::{to_bytes, Body},
    extract::{ConnectInfo, FromRequest, Request, State},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;

/// Largest body the guard will buffer (100 KiB)
pub const BODY_LIMIT: usize = 100 * 1024;

pub async fn verify_recaptcha(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    let remote_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, BODY_LIMIT).await.map_err(|e| {
        tracing::warn!("Could not read form body: {}", e);
        AppError::RecaptchaMissing
    })?;

    // Only the token is read here; the handler parses the rest from the original bytes
    let mut copy = Request::new(Body::from(bytes.clone()));
    *copy.method_mut() = parts.method.clone();
    *copy.headers_mut() = parts.headers.clone();
    let form = FormBody::from_request(copy, &()).await.unwrap_or_default();

    let token = form.recaptcha_token().ok_or(AppError::RecaptchaMissing)?;

    let verdict = state.recaptcha.verify(&token, remote_ip).await?;
    if !verdict.success {
        tracing::warn!(error_codes = ?verdict.error_codes, "reCAPTCHA rejected");
        return Err(AppError::RecaptchaRejected);
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}
