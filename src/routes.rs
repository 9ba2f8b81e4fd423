//! # Router
//!
//! Maps every path to its handler and fixes the middleware order:
//!
//! ```text
//! request → trace → CORS → session → [require_auth | verify_recaptcha] → handler
//! ```

use crate::handlers::auth::{google_callback, google_login, login_failed, login_success, logout};
use crate::handlers::health::health_check;
use crate::handlers::home::index;
use crate::handlers::users::{sign_in, sign_in_page};
use crate::middleware::{auth::require_auth, recaptcha::verify_recaptcha};
use crate::session::SessionBackend;
use crate::state::AppState;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::service::SignedCookie;
use tower_sessions::SessionManagerLayer;

/// Directory served for paths no route claims
const STATIC_DIR: &str = "public";

/// Routes and route-level guards, without the outer layers
pub fn router(state: AppState) -> Router {
    // The sign-in page is open; its submission must pass reCAPTCHA first
    let sign_in_routes = Router::new().route(
        "/user/signin",
        get(sign_in_page).merge(
            post(sign_in)
                .route_layer(axum_middleware::from_fn_with_state(state.clone(), verify_recaptcha)),
        ),
    );

    // Routes that need a logged-in Google user
    let protected_routes = Router::new()
        .route("/auth/login/success", get(login_success))
        .route_layer(axum_middleware::from_fn(require_auth));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        // Google OAuth2
        .route("/auth/google", get(google_login))
        .route("/auth/google/callback", get(google_callback))
        .route("/auth/login/failed", get(login_failed))
        .route("/auth/logout", post(logout))
        .merge(sign_in_routes)
        .merge(protected_routes)
        .fallback_service(ServeDir::new(STATIC_DIR))
        .with_state(state)
}

/// The complete application: routes plus session, CORS and tracing layers
pub fn app(state: AppState, sessions: SessionManagerLayer<SessionBackend, SignedCookie>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router(state)
        .layer(sessions)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
