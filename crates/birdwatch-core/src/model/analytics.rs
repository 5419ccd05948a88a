use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Alert, AlertStatus, NotificationFrequency, TrackedAccount};

/// One point of a daily time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

impl DailyCount {
    pub fn new(date: NaiveDate, count: u64) -> Self {
        Self { date, count }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub total_posts: u64,
    pub total_mentions: u64,
    pub average_engagement: f64,
    pub top_keywords: Vec<String>,
}

/// Chart data for the analytics page. Built once when the store is seeded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub post_volume: Vec<DailyCount>,
    pub follower_growth: Vec<DailyCount>,
    pub engagement: EngagementMetrics,
}

impl AnalyticsSnapshot {
    pub fn is_empty(&self) -> bool {
        self.post_volume.is_empty() && self.follower_growth.is_empty()
    }

    /// Net follower change across the growth series (last minus first).
    pub fn follower_delta(&self) -> i64 {
        match (self.follower_growth.first(), self.follower_growth.last()) {
            (Some(first), Some(last)) => last.count as i64 - first.count as i64,
            _ => 0,
        }
    }

    pub fn peak_post_day(&self) -> Option<DailyCount> {
        self.post_volume.iter().copied().max_by_key(|d| d.count)
    }
}

/// How many of the plan's account slots are in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotUsage {
    pub used: usize,
    pub limit: usize,
}

impl SlotUsage {
    /// Fraction of slots in use, capped at 1.0. Zero when there are no slots.
    pub fn ratio(&self) -> f64 {
        if self.limit == 0 {
            return 0.0;
        }
        (self.used as f64 / self.limit as f64).min(1.0)
    }

    pub fn is_full(&self) -> bool {
        self.used >= self.limit
    }
}

/// Headline numbers for the dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub tracked_accounts: usize,
    pub active_alerts: usize,
    pub total_followers: u64,
    pub total_mentions: u64,
    pub slots: SlotUsage,
}

impl DashboardSummary {
    pub fn compute(accounts: &[TrackedAccount], alerts: &[Alert], slot_limit: usize) -> Self {
        Self {
            tracked_accounts: accounts.len(),
            active_alerts: alerts.iter().filter(|a| a.is_active()).count(),
            total_followers: accounts.iter().map(|a| a.follower_count).sum(),
            total_mentions: accounts.iter().map(|a| a.mention_count).sum(),
            slots: SlotUsage {
                used: accounts.len(),
                limit: slot_limit,
            },
        }
    }
}

/// Status counts shown under the alert list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertBreakdown {
    pub active: usize,
    pub paused: usize,
    pub immediate: usize,
}

impl AlertBreakdown {
    pub fn compute(alerts: &[Alert]) -> Self {
        alerts.iter().fold(Self::default(), |mut acc, alert| {
            match alert.status {
                AlertStatus::Active => acc.active += 1,
                AlertStatus::Paused => acc.paused += 1,
            }
            if alert.frequency == NotificationFrequency::Immediate {
                acc.immediate += 1;
            }
            acc
        })
    }
}
