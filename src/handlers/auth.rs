use crate::error::{AppError, AppResult};
use crate::oauth::{CallbackParams, OAuthError};
use crate::session::{current_user, OAUTH_STATE_KEY, PKCE_VERIFIER_KEY, USER_KEY};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tower_sessions::Session;

/// Where a failed Google login ends up.
pub const LOGIN_FAILED_PATH: &str = "/auth/login/failed";

/// Reasons a callback does not log the user in
#[derive(Error, Debug)]
enum LoginFailure {
    #[error("provider returned error '{0}'")]
    Provider(String),

    #[error("callback is missing the code or state parameter")]
    MissingParams,

    #[error("no login in progress for this session")]
    NoPendingLogin,

    #[error("state parameter does not match the session")]
    StateMismatch,

    #[error(transparent)]
    Exchange(#[from] OAuthError),
}

// Google login

pub async fn google_login(State(state): State<AppState>, session: Session) -> AppResult<Redirect> {
    let request = state.identity.authorization_request();

    session.insert(OAUTH_STATE_KEY, &request.csrf_state).await?;
    session.insert(PKCE_VERIFIER_KEY, &request.pkce_verifier).await?;

    Ok(Redirect::to(&request.url))
}

pub async fn google_callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> AppResult<Redirect> {
    // The pending login is single-use whatever the outcome
    let expected_state: Option<String> = session.remove(OAUTH_STATE_KEY).await?;
    let pkce_verifier: Option<String> = session.remove(PKCE_VERIFIER_KEY).await?;

    match complete_login(&state, params, expected_state, pkce_verifier).await {
        Ok(profile) => {
            session.cycle_id().await?;
            session.insert(USER_KEY, profile).await?;
            Ok(Redirect::to(&state.config.client_url))
        }
        Err(reason) => {
            tracing::warn!("Google login failed: {}", reason);
            Ok(Redirect::to(LOGIN_FAILED_PATH))
        }
    }
}

async fn complete_login(
    state: &AppState,
    params: CallbackParams,
    expected_state: Option<String>,
    pkce_verifier: Option<String>,
) -> Result<Value, LoginFailure> {
    if let Some(error) = params.error {
        return Err(LoginFailure::Provider(error));
    }
    let (Some(code), Some(returned_state)) = (params.code, params.state) else {
        return Err(LoginFailure::MissingParams);
    };
    let (Some(expected_state), Some(pkce_verifier)) = (expected_state, pkce_verifier) else {
        return Err(LoginFailure::NoPendingLogin);
    };
    if returned_state != expected_state {
        return Err(LoginFailure::StateMismatch);
    }

    Ok(state.identity.fetch_profile(&code, &pkce_verifier).await?)
}

// Login outcome

pub async fn login_success(session: Session) -> AppResult<Json<Value>> {
    let user = current_user(&session)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "user": user
    })))
}

pub async fn login_failed() -> impl IntoResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "success": false,
            "message": "Login failed"
        })),
    )
}

pub async fn logout(session: Session) -> AppResult<Json<Value>> {
    session.flush().await?;

    Ok(Json(json!({
        "success": true,
        "message": "Logged out"
    })))
}
