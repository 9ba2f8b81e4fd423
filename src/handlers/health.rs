//! # Health Check Handler
//!
//! Simple endpoint to check if the server and its database connection are up.
//! Used by load balancers and monitoring systems.

use crate::db;
use crate::error::AppResult;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// Health check endpoint
///
/// ## Route
/// GET /health
///
/// ## Response
/// ```json
/// {
///   "status": "healthy",
///   "service": "signin-gateway"
/// }
/// ```
///
/// Answers 500 when the database ping fails.
pub async fn health_check(State(state): State<AppState>) -> AppResult<Json<Value>> {
    db::ping(&state.db).await?;

    Ok(Json(json!({
        "status": "healthy",
        "service": "signin-gateway"
    })))
}
