//! # User Handlers
//!
//! The local sign-in form. Credentials are not checked here; reaching the
//! handler means the reCAPTCHA guard accepted the submission.

use crate::forms::SignInForm;
use crate::state::AppState;
use axum::{extract::State, response::Html, Json};
use serde::Serialize;
use serde_json::Value;

/// Sign-in page with the reCAPTCHA widget; the site key is filled in per request
const SIGN_IN_PAGE: &str = include_str!("../../public/signin.html");

/// Body of a successful sign-in
///
/// ## Example JSON
/// ```json
/// {
///   "message": "Đăng nhập thành công với reCAPTCHA!",
///   "email": "ninja@example.com"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub message: &'static str,

    /// Echo of the submitted email, as submitted; omitted when none was sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
}

/// Serve the sign-in page
///
/// ## Route
/// GET /user/signin
pub async fn sign_in_page(State(state): State<AppState>) -> Html<String> {
    Html(SIGN_IN_PAGE.replace("{{RECAPTCHA_SITE_KEY}}", &state.config.recaptcha_site_key))
}

/// Acknowledge a sign-in
///
/// ## Route
/// POST /user/signin (guarded by `middleware::recaptcha::verify_recaptcha`)
pub async fn sign_in(form: SignInForm) -> Json<SignInResponse> {
    tracing::info!(email = ?form.email, "Sign-in accepted");

    Json(SignInResponse {
        message: "Đăng nhập thành công với reCAPTCHA!",
        email: form.email,
    })
}
