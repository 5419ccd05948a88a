//! Session and monitoring state for the Birdwatch dashboard.
//!
//! The crate exposes two stores, both owned by an [`AppContext`](context::AppContext):
//! the [`SessionStore`](auth::SessionStore) tracks who is signed in and mirrors that
//! to durable key-value storage, and the [`MonitoringStore`](monitor::MonitoringStore)
//! holds tracked accounts, alerts and the analytics snapshot in memory.

pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod monitor;
pub mod seed;
pub mod storage;
