use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Free,
    Pro,
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Pro => write!(f, "pro"),
        }
    }
}

/// The signed-in identity. This is the exact record mirrored to durable storage,
/// so the field names follow the stored JSON (`joinedAt`, `subscription`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub subscription: SubscriptionTier,
    pub joined_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: u64, name: String, email: String, subscription: SubscriptionTier) -> Self {
        Self {
            id,
            name,
            email,
            subscription,
            joined_at: Utc::now(),
        }
    }

    pub fn is_pro(&self) -> bool {
        self.subscription == SubscriptionTier::Pro
    }
}

/// What the session store publishes to views.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<Session>,
    /// `true` until the durable record has been checked once.
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}
