use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use std::time::Duration;

/// Forced in `main` so uptime counts from process start, not the first health check.
pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Whole seconds elapsed since `START_TIME` as of `now`; never negative.
pub fn uptime_at(now: DateTime<Utc>) -> Duration {
    let secs = now.signed_duration_since(*START_TIME).num_seconds().max(0);
    Duration::from_secs(secs as u64)
}
