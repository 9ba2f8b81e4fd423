//! Request body types shared by the guard and the handlers.
//!
//! Bodies are parsed loosely: one odd field never hides the others.

use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde_json::Value;
use std::convert::Infallible;

/// Field the reCAPTCHA widget posts its token in
pub const RECAPTCHA_FIELD: &str = "g-recaptcha-response";

/// A submitted form, untyped
///
/// `application/json` bodies are kept as a JSON value, everything else is
/// read as `application/x-www-form-urlencoded` pairs. A body that parses as
/// neither is `Empty`.
#[derive(Debug, Clone, Default)]
pub enum FormBody {
    Json(Value),
    Pairs(Vec<(String, String)>),
    #[default]
    Empty,
}

impl FormBody {
    /// Value of `name`; for repeated urlencoded keys the first one wins
    pub fn field(&self, name: &str) -> Option<Value> {
        match self {
            Self::Json(value) => value.get(name).filter(|v| !v.is_null()).cloned(),
            Self::Pairs(pairs) => pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| Value::String(value.clone())),
            Self::Empty => None,
        }
    }

    /// The reCAPTCHA token, if one was actually submitted
    ///
    /// Empty strings, `false` and `0` count as missing; other non-string
    /// values are sent to the verifier in their JSON text form.
    pub fn recaptcha_token(&self) -> Option<String> {
        match self.field(RECAPTCHA_FIELD)? {
            Value::String(token) if !token.is_empty() => Some(token),
            Value::String(_) | Value::Bool(false) | Value::Null => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

impl<S> FromRequest<S> for FormBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        let body = if is_json {
            Json::<Value>::from_request(req, state)
                .await
                .map(|Json(value)| Self::Json(value))
                .ok()
        } else {
            Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map(|Form(pairs)| Self::Pairs(pairs))
                .ok()
        };

        Ok(body.unwrap_or_default())
    }
}

/// Body of `POST /user/signin`
///
/// `email` is whatever was submitted, string or not.
#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: Option<Value>,
}

impl<S> FromRequest<S> for SignInForm
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = FormBody::from_request(req, state).await?;
        Ok(SignInForm {
            email: body.field("email"),
        })
    }
}
