use serde::{Deserialize, Serialize};

use super::AccountId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(pub u64);

impl std::fmt::Display for AlertId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for AlertId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| format!("invalid alert id: {s}"))
    }
}

/// A user-defined monitoring rule for one tracked account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    #[serde(default)]
    pub trigger_condition: Option<String>,
    pub channel: NotificationChannel,
    pub frequency: NotificationFrequency,
    /// Not checked against the account collection.
    pub account_id: AccountId,
    pub status: AlertStatus,
}

impl Alert {
    /// Materialize caller-supplied fields into a new, active alert.
    pub fn from_new(id: AlertId, fields: NewAlert) -> Self {
        Self {
            id,
            kind: fields.kind,
            trigger_condition: fields.trigger_condition,
            channel: fields.channel,
            frequency: fields.frequency,
            account_id: fields.account_id,
            status: AlertStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AlertStatus::Active
    }

    /// Shallow merge: fields set in the patch overwrite, the rest are kept.
    pub fn apply(&mut self, patch: &AlertPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(ref condition) = patch.trigger_condition {
            self.trigger_condition = condition.clone();
        }
        if let Some(channel) = patch.channel {
            self.channel = channel;
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
        if let Some(account_id) = patch.account_id {
            self.account_id = account_id;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Fields supplied when creating an alert. The store assigns `id` and `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAlert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    #[serde(default)]
    pub trigger_condition: Option<String>,
    pub channel: NotificationChannel,
    pub frequency: NotificationFrequency,
    pub account_id: AccountId,
}

impl NewAlert {
    pub fn new(kind: AlertKind, account_id: AccountId) -> Self {
        Self {
            kind,
            trigger_condition: None,
            channel: NotificationChannel::Email,
            frequency: NotificationFrequency::Immediate,
            account_id,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.trigger_condition = Some(condition.into());
        self
    }

    pub fn with_channel(mut self, channel: NotificationChannel) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_frequency(mut self, frequency: NotificationFrequency) -> Self {
        self.frequency = frequency;
        self
    }
}

/// Partial update for an alert. `None` leaves the field untouched;
/// `trigger_condition: Some(None)` clears the condition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertPatch {
    pub kind: Option<AlertKind>,
    pub trigger_condition: Option<Option<String>>,
    pub channel: Option<NotificationChannel>,
    pub frequency: Option<NotificationFrequency>,
    pub account_id: Option<AccountId>,
    pub status: Option<AlertStatus>,
}

impl AlertPatch {
    pub fn status(status: AlertStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    #[serde(alias = "new_tweet")]
    NewPost,
    Mention,
    FollowerChange,
    #[serde(alias = "retweet")]
    Repost,
    Like,
}

impl AlertKind {
    pub const ALL: [Self; 5] = [
        Self::NewPost,
        Self::Mention,
        Self::FollowerChange,
        Self::Repost,
        Self::Like,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::NewPost => "New Post",
            Self::Mention => "Mention",
            Self::FollowerChange => "Follower Change",
            Self::Repost => "Repost",
            Self::Like => "Like",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewPost => write!(f, "new_post"),
            Self::Mention => write!(f, "mention"),
            Self::FollowerChange => write!(f, "follower_change"),
            Self::Repost => write!(f, "repost"),
            Self::Like => write!(f, "like"),
        }
    }
}

impl std::str::FromStr for AlertKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new_post" | "new_tweet" => Ok(Self::NewPost),
            "mention" => Ok(Self::Mention),
            "follower_change" => Ok(Self::FollowerChange),
            "repost" | "retweet" => Ok(Self::Repost),
            "like" => Ok(Self::Like),
            _ => Err(format!("unknown alert type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    Email,
    Telegram,
    Webhook,
}

impl NotificationChannel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Telegram => "Telegram",
            Self::Webhook => "Webhook",
        }
    }
}

impl std::fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Telegram => write!(f, "telegram"),
            Self::Webhook => write!(f, "webhook"),
        }
    }
}

impl std::str::FromStr for NotificationChannel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "telegram" => Ok(Self::Telegram),
            "webhook" => Ok(Self::Webhook),
            _ => Err(format!("unknown notification channel: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationFrequency {
    Immediate,
    Hourly,
    Daily,
    Weekly,
}

impl NotificationFrequency {
    pub fn label(self) -> &'static str {
        match self {
            Self::Immediate => "Immediate",
            Self::Hourly => "Hourly",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
        }
    }
}

impl std::fmt::Display for NotificationFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Immediate => write!(f, "immediate"),
            Self::Hourly => write!(f, "hourly"),
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
        }
    }
}

impl std::str::FromStr for NotificationFrequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "immediate" => Ok(Self::Immediate),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            _ => Err(format!("unknown notification frequency: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    #[default]
    Active,
    Paused,
}

impl AlertStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Paused,
            Self::Paused => Self::Active,
        }
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Paused => write!(f, "paused"),
        }
    }
}

impl std::str::FromStr for AlertStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            _ => Err(format!("unknown alert status: {s}")),
        }
    }
}
