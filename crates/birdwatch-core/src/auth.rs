//! Who is signed in.
//!
//! [`SessionStore`] owns the current [`Session`] and mirrors it to a single
//! record in durable key-value storage, so a restart does not sign the user
//! out. Credential checks go through an [`AuthProvider`]; the only provider
//! shipped is [`DemoAuth`], which accepts one fixed account after a
//! simulated network delay.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;

use crate::config::AuthConfig;
use crate::error::{BirdwatchError, Result};
use crate::model::{Session, SessionState, SubscriptionTier};
use crate::storage::KeyValueStore;

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "password";
pub const DEMO_USER_ID: u64 = 1;
pub const DEMO_USER_NAME: &str = "Demo User";

/// Backend that verifies credentials and creates accounts.
pub trait AuthProvider: Send + Sync {
    /// Resolve credentials to an identity, or fail with
    /// [`BirdwatchError::InvalidCredentials`].
    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session>> + Send;

    fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session>> + Send;
}

/// Accepts only [`DEMO_EMAIL`] / [`DEMO_PASSWORD`]; signup always succeeds.
#[derive(Debug, Clone)]
pub struct DemoAuth {
    latency: Duration,
}

impl DemoAuth {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.latency())
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for DemoAuth {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}

impl AuthProvider for DemoAuth {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Session> {
        self.round_trip().await;
        // Same error whether the email or the password is wrong.
        if email != DEMO_EMAIL || password != DEMO_PASSWORD {
            return Err(BirdwatchError::InvalidCredentials);
        }
        Ok(Session::new(
            DEMO_USER_ID,
            DEMO_USER_NAME.to_string(),
            email.to_string(),
            SubscriptionTier::Pro,
        ))
    }

    async fn register(&self, name: &str, email: &str, _password: &str) -> Result<Session> {
        self.round_trip().await;
        let id = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        Ok(Session::new(
            id,
            name.to_string(),
            email.to_string(),
            SubscriptionTier::Free,
        ))
    }
}

pub struct SessionStore<A = DemoAuth> {
    provider: A,
    storage: Arc<dyn KeyValueStore>,
    key: String,
    state: watch::Sender<SessionState>,
}

impl<A: AuthProvider> SessionStore<A> {
    /// A store with no session and `loading = true`. Call
    /// [`restore`](Self::restore) to pick up a previously saved session.
    pub fn new(provider: A, storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            provider,
            storage,
            key: key.into(),
            state,
        }
    }

    /// Adopt the saved session, if there is a readable one. Nothing is
    /// validated against the provider. Unreadable or malformed records are
    /// treated as signed out. Always leaves `loading = false`.
    pub fn restore(&self) -> Option<Session> {
        let user = match self.storage.get(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::debug!(
                        key = %self.key,
                        "auth: ignoring malformed session record: {e}"
                    );
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key = %self.key, "auth: failed to read session record: {e}");
                None
            }
        };

        self.state.send_replace(SessionState {
            user: user.clone(),
            loading: false,
        });
        if let Some(ref session) = user {
            tracing::info!(user_id = session.id, "auth: restored session");
        }
        user
    }

    /// Sign in. On failure the current session, if any, is left as it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        match self.provider.authenticate(email, password).await {
            Ok(session) => self.establish(session),
            Err(e) => {
                tracing::info!("auth: login rejected: {e}");
                Err(e)
            }
        }
    }

    /// Create an account and sign in as it.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<Session> {
        let session = self.provider.register(name, email, password).await?;
        self.establish(session)
    }

    /// Save first, then publish, so a failed write leaves the old session live.
    fn establish(&self, session: Session) -> Result<Session> {
        let raw = serde_json::to_string(&session)?;
        self.storage.set(&self.key, &raw)?;
        self.state.send_modify(|s| {
            s.user = Some(session.clone());
            s.loading = false;
        });
        tracing::info!(user_id = session.id, tier = %session.subscription, "auth: signed in");
        Ok(session)
    }

    /// Sign out and delete the saved record. Safe to call when signed out.
    pub fn logout(&self) {
        let was_signed_in = self.state.send_if_modified(|s| s.user.take().is_some());
        if let Err(e) = self.storage.remove(&self.key) {
            tracing::warn!(key = %self.key, "auth: failed to delete session record: {e}");
        }
        if was_signed_in {
            tracing::info!("auth: signed out");
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.state.borrow().user.clone()
    }

    /// The current session, or [`BirdwatchError::NotAuthenticated`].
    pub fn require(&self) -> Result<Session> {
        self.current().ok_or(BirdwatchError::NotAuthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }
}
