//! # Sessions
//!
//! Sessions keep a browser correlated with server-side state through an
//! opaque, signed id cookie. The data itself lives in a [`SessionStore`],
//! chosen at startup:
//!
//! - `memory`: a process-local map (lost on restart)
//! - `sqlite`: a table in the application database, created on startup
//!
//! ## Keys
//! - [`USER_KEY`]: Google profile of the logged-in user, stored verbatim
//! - [`OAUTH_STATE_KEY`] / [`PKCE_VERIFIER_KEY`]: secrets of an in-flight Google login

use crate::config::SessionStoreKind;
use crate::error::AppResult;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use sha2::{Digest, Sha512};
use sqlx::SqlitePool;
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, SessionStore};
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

pub const USER_KEY: &str = "user";
pub const OAUTH_STATE_KEY: &str = "oauth_state";
pub const PKCE_VERIFIER_KEY: &str = "pkce_verifier";

/// Session storage selected by `SESSION_STORE`
#[derive(Debug, Clone)]
pub enum SessionBackend {
    Memory(MemoryStore),
    Sqlite(SqliteStore),
}

impl SessionBackend {
    /// Build the configured backend
    ///
    /// The SQLite backend shares the application's pool and creates its
    /// table if it doesn't exist yet.
    pub async fn from_config(kind: SessionStoreKind, pool: &SqlitePool) -> Result<Self> {
        match kind {
            SessionStoreKind::Memory => Ok(Self::Memory(MemoryStore::default())),
            SessionStoreKind::Sqlite => {
                let store = SqliteStore::new(pool.clone());
                store.migrate().await?;
                Ok(Self::Sqlite(store))
            }
        }
    }
}

#[async_trait]
impl SessionStore for SessionBackend {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        match self {
            Self::Memory(store) => store.create(record).await,
            Self::Sqlite(store) => store.create(record).await,
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        match self {
            Self::Memory(store) => store.save(record).await,
            Self::Sqlite(store) => store.save(record).await,
        }
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        match self {
            Self::Memory(store) => store.load(session_id).await,
            Self::Sqlite(store) => store.load(session_id).await,
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        match self {
            Self::Memory(store) => store.delete(session_id).await,
            Self::Sqlite(store) => store.delete(session_id).await,
        }
    }
}

/// Build the session layer
///
/// The cookie lives for the browser session, is not marked `Secure` (the
/// server speaks plain HTTP) and is signed with a key derived from `secret`.
pub fn session_layer(
    store: SessionBackend,
    secret: &str,
) -> SessionManagerLayer<SessionBackend, SignedCookie> {
    // Key::from needs 64 bytes of key material
    let key = Key::from(Sha512::digest(secret.as_bytes()).as_slice());

    SessionManagerLayer::new(store)
        .with_secure(false)
        .with_expiry(Expiry::OnSessionEnd)
        .with_signed(key)
}

/// The Google profile stored in the session, if someone is logged in
pub async fn current_user(session: &Session) -> AppResult<Option<Value>> {
    Ok(session.get::<Value>(USER_KEY).await?)
}
