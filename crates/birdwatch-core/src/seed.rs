//! Fixed demo content the monitoring store starts with.

use chrono::NaiveDate;

use crate::model::*;

/// Largest id used by the seeded records. Fresh ids start above it.
pub const MAX_SEED_ID: u64 = 3;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    // Only called with literal calendar dates below.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn demo_accounts() -> Vec<TrackedAccount> {
    let rows = [
        (
            1,
            "@elonmusk",
            "1234567890",
            150_000_000,
            5_432,
            AccountStatus::Active,
            day(2024, 1, 15),
        ),
        (
            2,
            "@openai",
            "1234567891",
            2_500_000,
            1_234,
            AccountStatus::Active,
            day(2024, 1, 20),
        ),
        (
            3,
            "@vercel",
            "1234567892",
            180_000,
            567,
            AccountStatus::Inactive,
            day(2024, 1, 25),
        ),
    ];
    rows.into_iter()
        .map(
            |(id, handle, last_post, followers, mentions, status, added)| TrackedAccount {
                id: AccountId(id),
                handle: handle.to_string(),
                last_seen_post_id: last_post.to_string(),
                follower_count: followers,
                mention_count: mentions,
                status,
                added_date: added,
            },
        )
        .collect()
}

pub fn demo_alerts() -> Vec<Alert> {
    vec![
        Alert {
            id: AlertId(1),
            kind: AlertKind::NewPost,
            trigger_condition: Some("any".to_string()),
            channel: NotificationChannel::Email,
            frequency: NotificationFrequency::Immediate,
            account_id: AccountId(1),
            status: AlertStatus::Active,
        },
        Alert {
            id: AlertId(2),
            kind: AlertKind::Mention,
            trigger_condition: Some("keyword: AI".to_string()),
            channel: NotificationChannel::Telegram,
            frequency: NotificationFrequency::Daily,
            account_id: AccountId(2),
            status: AlertStatus::Active,
        },
        Alert {
            id: AlertId(3),
            kind: AlertKind::FollowerChange,
            trigger_condition: Some("increase > 1000".to_string()),
            channel: NotificationChannel::Email,
            frequency: NotificationFrequency::Weekly,
            account_id: AccountId(1),
            status: AlertStatus::Paused,
        },
    ]
}

pub fn demo_analytics() -> AnalyticsSnapshot {
    let posts: [u64; 7] = [45, 52, 38, 61, 42, 55, 48];
    let followers: [u64; 7] = [
        149_500_000,
        149_650_000,
        149_800_000,
        149_900_000,
        149_950_000,
        150_000_000,
        150_100_000,
    ];
    let series = |values: &[u64]| -> Vec<DailyCount> {
        values
            .iter()
            .zip(1..)
            .map(|(&count, d)| DailyCount::new(day(2024, 1, d), count))
            .collect()
    };

    AnalyticsSnapshot {
        post_volume: series(&posts),
        follower_growth: series(&followers),
        engagement: EngagementMetrics {
            total_posts: 342,
            total_mentions: 7_233,
            average_engagement: 4.2,
            top_keywords: ["AI", "technology", "innovation", "future", "Tesla"]
                .into_iter()
                .map(String::from)
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_within_bound() {
        assert!(demo_accounts().iter().all(|a| a.id.0 <= MAX_SEED_ID));
        assert!(demo_alerts().iter().all(|a| a.id.0 <= MAX_SEED_ID));
    }

    #[test]
    fn seed_alerts_reference_seed_accounts() {
        let accounts = demo_accounts();
        for alert in demo_alerts() {
            assert!(accounts.iter().any(|a| a.id == alert.account_id));
        }
    }

    #[test]
    fn seed_handles_are_marked() {
        assert!(demo_accounts().iter().all(|a| a.handle.starts_with(HANDLE_MARKER)));
    }

    #[test]
    fn analytics_covers_first_week() {
        let analytics = demo_analytics();
        assert_eq!(analytics.post_volume.len(), 7);
        assert_eq!(analytics.follower_growth.len(), 7);
        assert_eq!(analytics.post_volume[0].date, day(2024, 1, 1));
        assert_eq!(analytics.post_volume[6].date, day(2024, 1, 7));
        assert_eq!(analytics.follower_delta(), 600_000);
        assert_eq!(analytics.peak_post_day().map(|d| d.count), Some(61));
    }
}
