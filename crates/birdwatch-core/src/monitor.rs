//! In-memory store for tracked accounts, alerts and the analytics snapshot.
//!
//! All three collections live behind one `watch` channel. Every mutation is a
//! single publish, so subscribers only ever see complete states: removing an
//! account and its alerts happens in the same step. Absent ids are no-ops and
//! publish nothing. No operation here can fail.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::model::*;
use crate::seed;

/// Point-in-time copy of everything the monitoring pages render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitoringSnapshot {
    pub accounts: Vec<TrackedAccount>,
    pub alerts: Vec<Alert>,
    pub analytics: AnalyticsSnapshot,
}

impl MonitoringSnapshot {
    pub fn account(&self, id: AccountId) -> Option<&TrackedAccount> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn alert(&self, id: AlertId) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    /// Handle of the account an alert points at, or `"Unknown"` when that
    /// account is gone (alert foreign keys are never validated).
    pub fn account_handle(&self, id: AccountId) -> &str {
        self.account(id).map_or("Unknown", |a| a.handle.as_str())
    }

    pub fn summary(&self, slot_limit: usize) -> DashboardSummary {
        DashboardSummary::compute(&self.accounts, &self.alerts, slot_limit)
    }

    pub fn alert_breakdown(&self) -> AlertBreakdown {
        AlertBreakdown::compute(&self.alerts)
    }
}

#[derive(Debug)]
pub struct MonitoringStore {
    state: watch::Sender<MonitoringSnapshot>,
    next_id: AtomicU64,
    seeded: AtomicBool,
}

impl Default for MonitoringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitoringStore {
    /// An empty store. Call [`initialize`](Self::initialize) to load the demo data.
    pub fn new() -> Self {
        let (state, _) = watch::channel(MonitoringSnapshot::default());
        Self {
            state,
            next_id: AtomicU64::new(seed::MAX_SEED_ID + 1),
            seeded: AtomicBool::new(false),
        }
    }

    /// Load the demo accounts, alerts and analytics. Only the first call per
    /// store does anything; returns whether this call seeded.
    pub fn initialize(&self) -> bool {
        if self.seeded.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.state.send_modify(|s| {
            s.accounts = seed::demo_accounts();
            s.alerts = seed::demo_alerts();
            s.analytics = seed::demo_analytics();
        });
        tracing::debug!("monitor: seeded demo data");
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.seeded.load(Ordering::SeqCst)
    }

    fn fresh_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    // -- Accounts --

    /// Start tracking `handle`, prefixing `@` if it is missing. Duplicate
    /// handles are accepted.
    pub fn add_account(&self, handle: &str) -> TrackedAccount {
        let account = TrackedAccount::new(
            AccountId(self.fresh_id()),
            handle,
            Utc::now().date_naive(),
        );
        let created = account.clone();
        self.state.send_modify(|s| s.accounts.push(account));
        tracing::debug!(id = %created.id, handle = %created.handle, "monitor: account added");
        created
    }

    /// Stop tracking an account and delete every alert that references it.
    /// Returns `false` (and changes nothing) when no account has this id.
    pub fn remove_account(&self, id: AccountId) -> bool {
        let mut cascaded = 0;
        let removed = self.state.send_if_modified(|s| {
            let before = s.accounts.len();
            s.accounts.retain(|a| a.id != id);
            if s.accounts.len() == before {
                return false;
            }
            let alerts_before = s.alerts.len();
            s.alerts.retain(|a| a.account_id != id);
            cascaded = alerts_before - s.alerts.len();
            true
        });
        if removed {
            tracing::debug!(%id, cascaded, "monitor: account removed");
        }
        removed
    }

    // -- Alerts --

    /// Append a new active alert. `fields.account_id` is not checked.
    pub fn add_alert(&self, fields: NewAlert) -> Alert {
        let alert = Alert::from_new(AlertId(self.fresh_id()), fields);
        let created = alert.clone();
        self.state.send_modify(|s| s.alerts.push(alert));
        tracing::debug!(id = %created.id, kind = %created.kind, "monitor: alert added");
        created
    }

    /// Merge `patch` into the alert. Returns the alert after the merge, or
    /// `None` when no alert has this id.
    pub fn update_alert(&self, id: AlertId, patch: &AlertPatch) -> Option<Alert> {
        self.modify_alert(id, |alert| alert.apply(patch))
    }

    /// Flip an alert between active and paused.
    pub fn toggle_alert(&self, id: AlertId) -> Option<Alert> {
        self.modify_alert(id, |alert| alert.status = alert.status.toggled())
    }

    fn modify_alert(&self, id: AlertId, f: impl FnOnce(&mut Alert)) -> Option<Alert> {
        let mut result = None;
        self.state.send_if_modified(|s| {
            let Some(alert) = s.alerts.iter_mut().find(|a| a.id == id) else {
                return false;
            };
            let before = alert.clone();
            f(alert);
            let changed = *alert != before;
            result = Some(alert.clone());
            changed
        });
        if let Some(ref alert) = result {
            tracing::debug!(%id, status = %alert.status, "monitor: alert updated");
        }
        result
    }

    /// Returns `false` (and changes nothing) when no alert has this id.
    pub fn remove_alert(&self, id: AlertId) -> bool {
        let removed = self.state.send_if_modified(|s| {
            let before = s.alerts.len();
            s.alerts.retain(|a| a.id != id);
            s.alerts.len() != before
        });
        if removed {
            tracing::debug!(%id, "monitor: alert removed");
        }
        removed
    }

    // -- Reads --

    pub fn snapshot(&self) -> MonitoringSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver that is notified after every effective mutation.
    pub fn subscribe(&self) -> watch::Receiver<MonitoringSnapshot> {
        self.state.subscribe()
    }

    pub fn accounts(&self) -> Vec<TrackedAccount> {
        self.state.borrow().accounts.clone()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.state.borrow().alerts.clone()
    }

    pub fn analytics(&self) -> AnalyticsSnapshot {
        self.state.borrow().analytics.clone()
    }

    pub fn account(&self, id: AccountId) -> Option<TrackedAccount> {
        self.state.borrow().account(id).cloned()
    }

    pub fn alert(&self, id: AlertId) -> Option<Alert> {
        self.state.borrow().alert(id).cloned()
    }

    pub fn alerts_for(&self, account_id: AccountId) -> Vec<Alert> {
        self.state
            .borrow()
            .alerts
            .iter()
            .filter(|a| a.account_id == account_id)
            .cloned()
            .collect()
    }

    pub fn account_handle(&self, id: AccountId) -> String {
        self.state.borrow().account_handle(id).to_string()
    }

    pub fn summary(&self, slot_limit: usize) -> DashboardSummary {
        self.state.borrow().summary(slot_limit)
    }

    pub fn alert_breakdown(&self) -> AlertBreakdown {
        self.state.borrow().alert_breakdown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mention_for(id: AccountId) -> NewAlert {
        NewAlert::new(AlertKind::Mention, id).with_condition("keyword: rust")
    }

    #[test]
    fn new_store_is_empty() {
        let store = MonitoringStore::new();
        let snap = store.snapshot();
        assert!(snap.accounts.is_empty());
        assert!(snap.alerts.is_empty());
        assert!(snap.analytics.is_empty());
        assert!(!store.is_initialized());
    }

    #[test]
    fn initialize_seeds_once() {
        let store = MonitoringStore::new();
        assert!(store.initialize());
        assert_eq!(store.accounts().len(), 3);
        assert_eq!(store.alerts().len(), 3);
        assert!(!store.analytics().is_empty());

        store.add_account("extra");
        assert!(!store.initialize());
        assert_eq!(store.accounts().len(), 4);
    }

    #[test]
    fn add_account_normalizes_and_appends() {
        let store = MonitoringStore::new();
        let a = store.add_account("alice");
        let b = store.add_account("@bob");
        assert_eq!(a.handle, "@alice");
        assert_eq!(b.handle, "@bob");
        assert_eq!(a.follower_count, 0);
        assert_eq!(a.status, AccountStatus::Active);
        assert_eq!(a.added_date, Utc::now().date_naive());

        let handles: Vec<_> = store.accounts().into_iter().map(|a| a.handle).collect();
        assert_eq!(handles, vec!["@alice", "@bob"]);
    }

    #[test]
    fn duplicate_handles_are_allowed() {
        let store = MonitoringStore::new();
        let a = store.add_account("alice");
        let b = store.add_account("@alice");
        assert_ne!(a.id, b.id);
        assert_eq!(store.accounts().len(), 2);
    }

    #[test]
    fn ids_are_unique_across_collections_and_above_seed() {
        let store = MonitoringStore::new();
        store.initialize();
        let account = store.add_account("x");
        let alert = store.add_alert(mention_for(account.id));
        assert!(account.id.0 > seed::MAX_SEED_ID);
        assert!(alert.id.0 > account.id.0);
    }

    #[test]
    fn remove_account_cascades_to_alerts() {
        let store = MonitoringStore::new();
        store.initialize();
        assert_eq!(store.alerts_for(AccountId(1)).len(), 2);

        assert!(store.remove_account(AccountId(1)));
        assert!(store.account(AccountId(1)).is_none());
        assert!(store.alerts_for(AccountId(1)).is_empty());
        assert_eq!(store.alerts().len(), 1);
        assert_eq!(store.accounts().len(), 2);
    }

    #[test]
    fn remove_missing_ids_change_nothing() {
        let store = MonitoringStore::new();
        store.initialize();
        let before = store.snapshot();

        assert!(!store.remove_account(AccountId(999)));
        assert!(!store.remove_alert(AlertId(999)));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn add_alert_does_not_validate_account() {
        let store = MonitoringStore::new();
        let alert = store.add_alert(mention_for(AccountId(404)));
        assert_eq!(alert.status, AlertStatus::Active);
        assert_eq!(store.alerts().len(), 1);
        assert_eq!(store.account_handle(AccountId(404)), "Unknown");
    }

    #[test]
    fn update_alert_merges() {
        let store = MonitoringStore::new();
        let account = store.add_account("alice");
        let alert = store.add_alert(mention_for(account.id));

        let patch = AlertPatch {
            frequency: Some(NotificationFrequency::Hourly),
            ..AlertPatch::default()
        };
        let updated = store.update_alert(alert.id, &patch).unwrap();
        assert_eq!(updated.frequency, NotificationFrequency::Hourly);
        assert_eq!(updated.trigger_condition.as_deref(), Some("keyword: rust"));
        assert_eq!(store.alert(alert.id), Some(updated.clone()));

        let again = store.update_alert(alert.id, &patch).unwrap();
        assert_eq!(again, updated);
    }

    #[test]
    fn update_missing_alert_is_noop() {
        let store = MonitoringStore::new();
        store.initialize();
        let before = store.snapshot();
        assert!(store
            .update_alert(AlertId(77), &AlertPatch::status(AlertStatus::Paused))
            .is_none());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn toggle_alert_flips_status() {
        let store = MonitoringStore::new();
        store.initialize();
        let paused = store.toggle_alert(AlertId(1)).unwrap();
        assert_eq!(paused.status, AlertStatus::Paused);
        let active = store.toggle_alert(AlertId(1)).unwrap();
        assert_eq!(active.status, AlertStatus::Active);
        assert!(store.toggle_alert(AlertId(99)).is_none());
    }

    #[test]
    fn remove_alert_keeps_order() {
        let store = MonitoringStore::new();
        store.initialize();
        assert!(store.remove_alert(AlertId(2)));
        let ids: Vec<_> = store.alerts().into_iter().map(|a| a.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn summary_over_seed() {
        let store = MonitoringStore::new();
        store.initialize();
        let summary = store.summary(10);
        assert_eq!(summary.tracked_accounts, 3);
        assert_eq!(summary.active_alerts, 2);
        assert_eq!(summary.total_followers, 152_680_000);
        assert_eq!(summary.total_mentions, 7_233);
        assert_eq!(summary.slots.used, 3);

        let breakdown = store.alert_breakdown();
        assert_eq!(breakdown.active, 2);
        assert_eq!(breakdown.paused, 1);
        assert_eq!(breakdown.immediate, 1);
        assert_eq!(store.account_handle(AccountId(2)), "@openai");
    }

    #[test]
    fn subscribers_see_effective_mutations_only() {
        let store = MonitoringStore::new();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.remove_alert(AlertId(5));
        assert!(!rx.has_changed().unwrap());

        let account = store.add_account("alice");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().accounts.len(), 1);

        store.add_alert(mention_for(account.id));
        store.remove_account(account.id);
        assert!(rx.has_changed().unwrap());
        let snap = rx.borrow_and_update().clone();
        assert!(snap.accounts.is_empty());
        assert!(snap.alerts.is_empty());
    }

    #[test]
    fn unchanged_update_publishes_nothing() {
        let store = MonitoringStore::new();
        let alert = store.add_alert(mention_for(AccountId(1)));
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        let returned = store.update_alert(alert.id, &AlertPatch::status(AlertStatus::Active));
        assert_eq!(returned, Some(alert));
        assert!(!rx.has_changed().unwrap());
    }
}
