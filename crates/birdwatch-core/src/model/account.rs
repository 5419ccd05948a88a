use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Prefix every stored handle carries.
pub const HANDLE_MARKER: char = '@';

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for AccountId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| format!("invalid account id: {s}"))
    }
}

/// Prepend [`HANDLE_MARKER`] unless the handle already starts with it.
pub fn normalize_handle(handle: &str) -> String {
    if handle.starts_with(HANDLE_MARKER) {
        handle.to_string()
    } else {
        format!("{HANDLE_MARKER}{handle}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedAccount {
    pub id: AccountId,
    pub handle: String,
    pub last_seen_post_id: String,
    pub follower_count: u64,
    pub mention_count: u64,
    pub status: AccountStatus,
    pub added_date: NaiveDate,
}

impl TrackedAccount {
    /// A freshly tracked account: no activity seen yet, active.
    pub fn new(id: AccountId, handle: &str, added_date: NaiveDate) -> Self {
        Self {
            id,
            handle: normalize_handle(handle),
            last_seen_post_id: String::new(),
            follower_count: 0,
            mention_count: 0,
            status: AccountStatus::Active,
            added_date,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}
