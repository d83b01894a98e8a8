//! Session state: who is signed in, persisted across restarts.
//!
//! # Design
//! The manager is an owned value, generic over its `KeyValueStore`, so tests
//! build isolated instances. Identity-mutating operations (`restore`,
//! `login`, `logout`) take the `mutation` lock for their whole duration and
//! therefore never interleave. Readers only take the `state` lock and are not
//! blocked by an in-flight login request.
//!
//! Writes go to the store before memory. The `state` lock is synchronous, so
//! once the store write has completed the in-memory update follows without
//! another suspension point, even if the caller drops the future. After any
//! completed mutation the in-memory identity and the persisted record agree.

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{SessionError, StorageError};
use crate::resources::{AuthApi, LoginOutcome};
use crate::storage::KeyValueStore;
use crate::types::Identity;

/// Store key holding the JSON-encoded `Identity`.
pub const IDENTITY_KEY: &str = "@smartclass:user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Initial state, before the persisted record has been read.
    Unknown,
    Anonymous,
    Authenticated(Identity),
}

pub struct SessionManager<S> {
    auth: AuthApi,
    store: S,
    state: RwLock<SessionState>,
    mutation: Mutex<()>,
}

impl<S: KeyValueStore> SessionManager<S> {
    pub fn new(auth: AuthApi, store: S) -> Self {
        Self {
            auth,
            store,
            state: RwLock::new(SessionState::Unknown),
            mutation: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    pub async fn identity(&self) -> Option<Identity> {
        match &*self.state.read() {
            SessionState::Authenticated(identity) => Some(identity.clone()),
            _ => None,
        }
    }

    /// True until `restore` has completed.
    pub async fn is_loading(&self) -> bool {
        matches!(*self.state.read(), SessionState::Unknown)
    }

    /// Read the persisted identity. A missing, unreadable, or malformed record
    /// leaves the session anonymous.
    pub async fn restore(&self) -> SessionState {
        let _guard = self.mutation.lock().await;

        let restored = match self.store.get(IDENTITY_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => {
                    debug!(user_id = %identity.id, "restored persisted session");
                    SessionState::Authenticated(identity)
                }
                Err(err) => {
                    warn!(error = %err, "discarding malformed session record");
                    SessionState::Anonymous
                }
            },
            Ok(None) => SessionState::Anonymous,
            Err(err) => {
                warn!(error = %err, "could not read session record");
                SessionState::Anonymous
            }
        };

        *self.state.write() = restored.clone();
        restored
    }

    /// Attempt a login. On success the identity is persisted, then held in
    /// memory, before this returns. A failed attempt changes nothing.
    ///
    /// Returns `Err` only when the identity could not be persisted, in which
    /// case the session is also left unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, SessionError> {
        let _guard = self.mutation.lock().await;

        let outcome = self.auth.login(email, password).await;
        if let LoginOutcome::Authenticated(identity) = &outcome {
            let record = serde_json::to_string(identity)
                .map_err(|e| StorageError::Encode(e.to_string()))?;
            self.store.set(IDENTITY_KEY, &record).await?;
            *self.state.write() = SessionState::Authenticated(identity.clone());
            info!(user_id = %identity.id, role = ?identity.role, "signed in");
        }
        Ok(outcome)
    }

    /// Clear the session. Always ends anonymous; a failure to remove the
    /// persisted record is logged and otherwise ignored.
    pub async fn logout(&self) {
        let _guard = self.mutation.lock().await;

        *self.state.write() = SessionState::Anonymous;
        if let Err(err) = self.store.remove(IDENTITY_KEY).await {
            warn!(error = %err, "could not remove session record");
        }
        info!("signed out");
    }

    /// The current identity, provided it may manage content.
    pub async fn require_instructor(&self, action: &'static str) -> Result<Identity, SessionError> {
        let identity = self.identity().await.ok_or(SessionError::NotAuthenticated)?;
        if !identity.role.can_manage_content() {
            return Err(SessionError::Forbidden(action));
        }
        Ok(identity)
    }
}
