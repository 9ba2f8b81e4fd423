//! # Middleware Module
//!
//! Middleware intercepts HTTP requests before they reach a handler and can
//! short-circuit them with an error response.
//!
//! ## Our Middleware
//! - `auth`: Checks that a Google user is stored in the session
//! - `recaptcha`: Checks the reCAPTCHA token of a submitted form

pub mod auth;
pub mod recaptcha;
