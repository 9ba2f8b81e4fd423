use serde::Deserialize;

/// Everything produced when starting a login
///
/// `url` goes to the browser; `csrf_state` and `pkce_verifier` stay in the
/// session until the callback arrives.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: String,
    pub csrf_state: String,
    pub pkce_verifier: String,
}

/// Query string of `/auth/google/callback`
///
/// On success Google sends `code` and `state`; when the user denies
/// consent it sends `error` (e.g. `access_denied`) instead.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}
