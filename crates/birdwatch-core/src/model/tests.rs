use chrono::NaiveDate;

use crate::model::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn alert(id: u64, account: u64, status: AlertStatus, freq: NotificationFrequency) -> Alert {
    let mut alert = Alert::from_new(
        AlertId(id),
        NewAlert::new(AlertKind::Mention, AccountId(account)).with_frequency(freq),
    );
    alert.status = status;
    alert
}

#[test]
fn test_normalize_handle_prepends_marker() {
    assert_eq!(normalize_handle("alice"), "@alice");
    assert_eq!(normalize_handle(""), "@");
}

#[test]
fn test_normalize_handle_keeps_existing_marker() {
    assert_eq!(normalize_handle("@alice"), "@alice");
    assert_eq!(normalize_handle("@@odd"), "@@odd");
}

#[test]
fn test_tracked_account_defaults() {
    let account = TrackedAccount::new(AccountId(7), "alice", date(2024, 3, 1));
    assert_eq!(account.handle, "@alice");
    assert_eq!(account.follower_count, 0);
    assert_eq!(account.mention_count, 0);
    assert!(account.last_seen_post_id.is_empty());
    assert_eq!(account.status, AccountStatus::Active);
    assert_eq!(account.added_date, date(2024, 3, 1));
}

#[test]
fn test_tracked_account_serializes_date_as_string() {
    let account = TrackedAccount::new(AccountId(1), "@a", date(2024, 1, 15));
    let json = serde_json::to_value(&account).unwrap();
    assert_eq!(json["added_date"], "2024-01-15");
    assert_eq!(json["id"], 1);
    assert_eq!(json["status"], "active");
}

#[test]
fn test_new_alert_is_active() {
    let fields = NewAlert::new(AlertKind::FollowerChange, AccountId(3))
        .with_condition("increase > 1000")
        .with_channel(NotificationChannel::Webhook)
        .with_frequency(NotificationFrequency::Weekly);
    let alert = Alert::from_new(AlertId(9), fields);
    assert_eq!(alert.id, AlertId(9));
    assert_eq!(alert.status, AlertStatus::Active);
    assert_eq!(alert.trigger_condition.as_deref(), Some("increase > 1000"));
    assert_eq!(alert.channel, NotificationChannel::Webhook);
    assert_eq!(alert.account_id, AccountId(3));
}

#[test]
fn test_patch_overwrites_only_supplied_fields() {
    let mut a = alert(1, 1, AlertStatus::Active, NotificationFrequency::Immediate);
    a.trigger_condition = Some("any".into());
    let patch = AlertPatch {
        channel: Some(NotificationChannel::Telegram),
        ..AlertPatch::default()
    };
    a.apply(&patch);
    assert_eq!(a.channel, NotificationChannel::Telegram);
    assert_eq!(a.kind, AlertKind::Mention);
    assert_eq!(a.trigger_condition.as_deref(), Some("any"));
    assert_eq!(a.frequency, NotificationFrequency::Immediate);
}

#[test]
fn test_patch_can_clear_condition() {
    let mut a = alert(1, 1, AlertStatus::Active, NotificationFrequency::Daily);
    a.trigger_condition = Some("keyword: AI".into());
    a.apply(&AlertPatch {
        trigger_condition: Some(None),
        ..AlertPatch::default()
    });
    assert!(a.trigger_condition.is_none());
}

#[test]
fn test_patch_applied_twice_is_stable() {
    let mut once = alert(1, 1, AlertStatus::Active, NotificationFrequency::Daily);
    let patch = AlertPatch {
        kind: Some(AlertKind::Like),
        status: Some(AlertStatus::Paused),
        account_id: Some(AccountId(4)),
        ..AlertPatch::default()
    };
    once.apply(&patch);
    let mut twice = once.clone();
    twice.apply(&patch);
    assert_eq!(once, twice);
}

#[test]
fn test_empty_patch() {
    assert!(AlertPatch::default().is_empty());
    assert!(!AlertPatch::status(AlertStatus::Paused).is_empty());
}

#[test]
fn test_alert_kind_parsing_accepts_legacy_names() {
    assert_eq!("new_tweet".parse::<AlertKind>().unwrap(), AlertKind::NewPost);
    assert_eq!("retweet".parse::<AlertKind>().unwrap(), AlertKind::Repost);
    assert_eq!("Mention".parse::<AlertKind>().unwrap(), AlertKind::Mention);
    assert!("boost".parse::<AlertKind>().is_err());
}

#[test]
fn test_alert_kind_display_matches_wire_name() {
    for kind in AlertKind::ALL {
        let wire = serde_json::to_value(kind).unwrap();
        assert_eq!(wire, kind.to_string());
        assert_eq!(kind.to_string().parse::<AlertKind>().unwrap(), kind);
    }
}

#[test]
fn test_alert_deserializes_legacy_type() {
    let json = r#"{
        "id": 1,
        "type": "new_tweet",
        "trigger_condition": "any",
        "channel": "email",
        "frequency": "immediate",
        "account_id": 1,
        "status": "active"
    }"#;
    let alert: Alert = serde_json::from_str(json).unwrap();
    assert_eq!(alert.kind, AlertKind::NewPost);
    assert_eq!(alert.account_id, AccountId(1));
}

#[test]
fn test_labels() {
    assert_eq!(AlertKind::FollowerChange.label(), "Follower Change");
    assert_eq!(NotificationChannel::Telegram.label(), "Telegram");
    assert_eq!(NotificationFrequency::Weekly.label(), "Weekly");
}

#[test]
fn test_alert_status_toggle() {
    assert_eq!(AlertStatus::Active.toggled(), AlertStatus::Paused);
    assert_eq!(AlertStatus::Paused.toggled(), AlertStatus::Active);
}

#[test]
fn test_id_parsing() {
    assert_eq!(" 42 ".parse::<AccountId>().unwrap(), AccountId(42));
    assert_eq!("5".parse::<AlertId>().unwrap(), AlertId(5));
    assert!("abc".parse::<AccountId>().is_err());
}

#[test]
fn test_session_serializes_camel_case() {
    let session = Session::new(
        1,
        "Demo User".into(),
        "demo@example.com".into(),
        SubscriptionTier::Pro,
    );
    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(json["subscription"], "pro");
    assert!(json.get("joinedAt").is_some());
    assert!(session.is_pro());

    let back: Session = serde_json::from_value(json).unwrap();
    assert_eq!(back, session);
}

#[test]
fn test_session_state_starts_loading() {
    let state = SessionState::default();
    assert!(state.loading);
    assert!(state.user.is_none());
}

#[test]
fn test_dashboard_summary() {
    let mut a = TrackedAccount::new(AccountId(1), "a", date(2024, 1, 1));
    a.follower_count = 100;
    a.mention_count = 5;
    let mut b = TrackedAccount::new(AccountId(2), "b", date(2024, 1, 2));
    b.follower_count = 50;
    b.mention_count = 1;
    let alerts = vec![
        alert(1, 1, AlertStatus::Active, NotificationFrequency::Daily),
        alert(2, 2, AlertStatus::Paused, NotificationFrequency::Daily),
    ];

    let summary = DashboardSummary::compute(&[a, b], &alerts, 10);
    assert_eq!(summary.tracked_accounts, 2);
    assert_eq!(summary.active_alerts, 1);
    assert_eq!(summary.total_followers, 150);
    assert_eq!(summary.total_mentions, 6);
    assert_eq!(summary.slots, SlotUsage { used: 2, limit: 10 });
}

#[test]
fn test_slot_usage_ratio() {
    assert!((SlotUsage { used: 3, limit: 10 }.ratio() - 0.3).abs() < f64::EPSILON);
    assert!((SlotUsage { used: 12, limit: 10 }.ratio() - 1.0).abs() < f64::EPSILON);
    assert_eq!(SlotUsage { used: 0, limit: 0 }.ratio(), 0.0);
    assert!(SlotUsage { used: 10, limit: 10 }.is_full());
}

#[test]
fn test_alert_breakdown() {
    let alerts = vec![
        alert(1, 1, AlertStatus::Active, NotificationFrequency::Immediate),
        alert(2, 1, AlertStatus::Active, NotificationFrequency::Daily),
        alert(3, 2, AlertStatus::Paused, NotificationFrequency::Immediate),
    ];
    let breakdown = AlertBreakdown::compute(&alerts);
    assert_eq!(
        breakdown,
        AlertBreakdown {
            active: 2,
            paused: 1,
            immediate: 2
        }
    );
}

#[test]
fn test_analytics_helpers() {
    let snapshot = AnalyticsSnapshot {
        post_volume: vec![
            DailyCount::new(date(2024, 1, 1), 10),
            DailyCount::new(date(2024, 1, 2), 30),
            DailyCount::new(date(2024, 1, 3), 20),
        ],
        follower_growth: vec![
            DailyCount::new(date(2024, 1, 1), 1_000),
            DailyCount::new(date(2024, 1, 3), 900),
        ],
        engagement: EngagementMetrics::default(),
    };
    assert_eq!(snapshot.follower_delta(), -100);
    assert_eq!(snapshot.peak_post_day().unwrap().date, date(2024, 1, 2));
    assert!(!snapshot.is_empty());
    assert!(AnalyticsSnapshot::default().is_empty());
    assert_eq!(AnalyticsSnapshot::default().follower_delta(), 0);
}
