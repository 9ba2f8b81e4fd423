//! # Google OAuth 2.0 implementation
//!
//! Authorization Code flow with PKCE against Google's endpoints.
//! Scopes requested: `profile` and `email`.
//!
//! The profile returned by the userinfo endpoint is handed back as raw JSON;
//! nothing here validates or normalizes it.

use super::{AuthorizationRequest, IdentityProvider, OAuthError};
use crate::config::Config;
use async_trait::async_trait;
use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use reqwest::Client;
use serde_json::Value;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Google identity provider.
pub struct GoogleOAuth {
    client: ConfiguredClient,
    http: Client,
}

impl GoogleOAuth {
    /// Create a Google client from the configured credentials and callback URL.
    pub fn new(config: &Config) -> Result<Self, OAuthError> {
        let client = BasicClient::new(ClientId::new(config.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.client_secret.clone()))
            .set_auth_uri(AuthUrl::new(GOOGLE_AUTH_URL.to_string())?)
            .set_token_uri(TokenUrl::new(GOOGLE_TOKEN_URL.to_string())?)
            .set_redirect_uri(RedirectUrl::new(config.callback_url.clone())?);

        // The token exchange must not follow redirects
        let http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self { client, http })
    }
}

#[async_trait]
impl IdentityProvider for GoogleOAuth {
    fn authorization_request(&self) -> AuthorizationRequest {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_state) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("profile".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        AuthorizationRequest {
            url: auth_url.to_string(),
            csrf_state: csrf_state.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
        }
    }

    async fn fetch_profile(&self, code: &str, pkce_verifier: &str) -> Result<Value, OAuthError> {
        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| OAuthError::TokenExchange(e.to_string()))?;

        let profile = self
            .http
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oauth2::url::Url;
    use std::collections::HashMap;

    fn query_of(url: &str) -> HashMap<String, String> {
        Url::parse(url).unwrap().query_pairs().into_owned().collect()
    }

    #[test]
    fn authorization_url_targets_google_with_pkce() {
        let google = GoogleOAuth::new(&Config::for_tests()).unwrap();
        let request = google.authorization_request();

        assert!(request.url.starts_with(GOOGLE_AUTH_URL));

        let query = query_of(&request.url);
        assert_eq!(query["client_id"], "test-client");
        assert_eq!(query["redirect_uri"], "http://localhost:3000/auth/google/callback");
        assert_eq!(query["response_type"], "code");
        assert_eq!(query["scope"], "profile email");
        assert_eq!(query["code_challenge_method"], "S256");
        assert_eq!(query["state"], request.csrf_state);
        assert!(!request.pkce_verifier.is_empty());
    }

    #[test]
    fn each_request_gets_fresh_secrets() {
        let google = GoogleOAuth::new(&Config::for_tests()).unwrap();
        let first = google.authorization_request();
        let second = google.authorization_request();

        assert_ne!(first.csrf_state, second.csrf_state);
        assert_ne!(first.pkce_verifier, second.pkce_verifier);
    }

    #[test]
    fn malformed_callback_url_is_rejected() {
        let mut config = Config::for_tests();
        config.callback_url = "not a url".to_string();

        assert!(matches!(GoogleOAuth::new(&config), Err(OAuthError::InvalidUrl(_))));
    }
}
