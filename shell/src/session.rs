//! Session lifecycle: login, startup restore, invalidation
//!
//! Only the access token survives restarts, encrypted at rest. The user
//! record is never persisted; it is re-fetched from `/auth/me` whenever
//! a session is restored.

use crate::AppState;
use folio_core::{Error, Result, User};
use folio_networking::PortfolioClient;
use folio_persistence::sqlite::session as token_store;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// An authenticated session: the verified user plus a client carrying
/// the bearer token
#[derive(Clone)]
pub struct SessionContext {
    pub user: User,
    pub client: PortfolioClient,
}

/// Owns the current session and the persisted token behind it
pub struct SessionManager {
    state: AppState,
    current: RwLock<Option<SessionContext>>,
}

impl SessionManager {
    pub fn new(state: AppState) -> Arc<Self> {
        Arc::new(Self {
            state,
            current: RwLock::new(None),
        })
    }

    /// Exchange credentials for a session
    ///
    /// The token is persisted only after the profile fetch confirms it
    /// actually works.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let client = PortfolioClient::new(&self.state.api_base);
        let token = client.login(username, password).await?;

        let authed = PortfolioClient::with_token(&self.state.api_base, &token.access_token);
        let user = authed.me().await?;

        self.store_token(&token.access_token).await?;

        let mut current = self.current.write().await;
        *current = Some(SessionContext {
            user: user.clone(),
            client: authed,
        });

        info!("Session established for user: {}", user.username);
        Ok(user)
    }

    /// Restore a session from the persisted token, if possible
    ///
    /// Returns `Ok(None)` when there is no stored token or the backend
    /// rejected it (the dead token is cleared). Network failures
    /// propagate so the caller can retry without losing the token.
    pub async fn check_session(&self) -> Result<Option<User>> {
        if let Some(ctx) = self.current.read().await.as_ref() {
            return Ok(Some(ctx.user.clone()));
        }

        let Some(encrypted) = self.load_stored_token().await? else {
            debug!("No stored session token");
            return Ok(None);
        };

        let token = match self.state.encryptor.decrypt(&encrypted) {
            Ok(token) => token,
            Err(e) => {
                warn!("Stored token cannot be decrypted, discarding: {}", e);
                self.clear_stored_token().await;
                return Ok(None);
            }
        };

        let client = PortfolioClient::with_token(&self.state.api_base, &token);
        match client.me().await {
            Ok(user) => {
                info!("Session restored for user: {}", user.username);
                let mut current = self.current.write().await;
                *current = Some(SessionContext {
                    user: user.clone(),
                    client,
                });
                Ok(Some(user))
            }
            Err(Error::SessionExpired) => {
                info!("Stored token rejected by backend, clearing");
                self.clear_stored_token().await;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// End the session, telling the backend first
    ///
    /// A failed backend logout still tears the local session down.
    pub async fn logout(&self) {
        let ctx = self.current.write().await.take();
        if let Some(ctx) = ctx {
            if let Err(e) = ctx.client.logout().await {
                warn!("Backend logout failed: {}", e);
            }
        }
        self.clear_stored_token().await;
        info!("Session ended");
    }

    /// Drop the session without contacting the backend
    ///
    /// Used when a request came back 401. Idempotent: returns whether an
    /// active session was actually torn down, so repeated 401s from
    /// parallel requests invalidate only once.
    pub async fn invalidate(&self) -> bool {
        let had_session = self.current.write().await.take().is_some();
        self.clear_stored_token().await;
        if had_session {
            info!("Session invalidated after token rejection");
        }
        had_session
    }

    /// Client carrying the current session's bearer token
    pub async fn client(&self) -> Result<PortfolioClient> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|ctx| ctx.client.clone())
            .ok_or(Error::SessionExpired)
    }

    /// The authenticated user, if a session is active
    pub async fn current_user(&self) -> Option<User> {
        self.current.read().await.as_ref().map(|ctx| ctx.user.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    async fn store_token(&self, token: &str) -> Result<()> {
        let encrypted = self.state.encryptor.encrypt(token)?;
        let db_guard = self.state.db.read().await;
        let db = db_guard
            .as_ref()
            .ok_or_else(|| Error::StorageError("Database not initialized".to_string()))?;
        token_store::save_token(db.pool(), &encrypted).await
    }

    async fn load_stored_token(
        &self,
    ) -> Result<Option<folio_persistence::encryption::EncryptedToken>> {
        let db_guard = self.state.db.read().await;
        let db = db_guard
            .as_ref()
            .ok_or_else(|| Error::StorageError("Database not initialized".to_string()))?;
        token_store::load_token(db.pool()).await
    }

    /// Best-effort removal of the persisted token
    async fn clear_stored_token(&self) {
        let db_guard = self.state.db.read().await;
        if let Some(db) = db_guard.as_ref() {
            if let Err(e) = token_store::clear_token(db.pool()).await {
                warn!("Failed to clear stored token: {}", e);
            }
        }
    }
}
