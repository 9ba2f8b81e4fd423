//! # HTTP Request Handlers
//!
//! This module contains all the HTTP route handlers (controllers).
//! Each handler processes a specific endpoint.
//!
//! ## Submodules
//! - `home`: Greeting at `/`
//! - `health`: Health check endpoint (for monitoring)
//! - `auth`: Google login, callback, login outcome and logout
//! - `users`: Sign-in page and local sign-in form (behind the reCAPTCHA guard)

pub mod auth;
pub mod health;
pub mod home;
pub mod users;
