//! Work timer
//!
//! One durable key-value entry holds the session start timestamp so a
//! running timer survives reloads. Reads degrade to "not running" on any
//! storage or parse failure; the start write is escalated because a timer
//! that was never persisted would silently vanish on reload.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::domain::DomainResult;
use crate::infrastructure::storage::KeyValueStore;

pub const TIMER_KEY: &str = "timer.started-at";

#[derive(Debug, Clone, PartialEq)]
pub struct TimerStatus {
    pub running: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub elapsed_secs: u64,
}

impl TimerStatus {
    fn stopped() -> Self {
        Self {
            running: false,
            started_at: None,
            elapsed_secs: 0,
        }
    }
}

pub struct WorkTimerService {
    store: Arc<dyn KeyValueStore>,
}

impl WorkTimerService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn persisted_start(&self) -> Option<DateTime<Utc>> {
        let raw = match self.store.get(TIMER_KEY).await {
            Ok(value) => value?,
            Err(e) => {
                warn!(error = %e, "failed reading work timer");
                return None;
            }
        };
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(ts) => Some(ts.with_timezone(&Utc)),
            Err(e) => {
                warn!(error = %e, %raw, "work timer entry is corrupt");
                None
            }
        }
    }

    fn status_for(started_at: DateTime<Utc>) -> TimerStatus {
        let elapsed = (Utc::now() - started_at).num_seconds().max(0) as u64;
        TimerStatus {
            running: true,
            started_at: Some(started_at),
            elapsed_secs: elapsed,
        }
    }

    /// Start the timer. Idempotent: an already-running timer keeps its
    /// original start instant.
    pub async fn start(&self) -> DomainResult<TimerStatus> {
        if let Some(started_at) = self.persisted_start().await {
            return Ok(Self::status_for(started_at));
        }

        let now = Utc::now();
        self.store.set(TIMER_KEY, &now.to_rfc3339()).await?;
        Ok(Self::status_for(now))
    }

    pub async fn status(&self) -> TimerStatus {
        match self.persisted_start().await {
            Some(started_at) => Self::status_for(started_at),
            None => TimerStatus::stopped(),
        }
    }

    /// Stop the timer and return the final elapsed time. Removing the
    /// entry is best-effort.
    pub async fn stop(&self) -> TimerStatus {
        let Some(started_at) = self.persisted_start().await else {
            return TimerStatus::stopped();
        };

        if let Err(e) = self.store.remove(TIMER_KEY).await {
            warn!(error = %e, "failed clearing work timer");
        }

        let final_status = Self::status_for(started_at);
        TimerStatus {
            running: false,
            ..final_status
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryKvStore;

    #[tokio::test]
    async fn start_status_stop_cycle() {
        let store = Arc::new(InMemoryKvStore::new());
        let timer = WorkTimerService::new(store);

        assert!(!timer.status().await.running);

        let started = timer.start().await.unwrap();
        assert!(started.running);
        assert!(timer.status().await.running);

        let stopped = timer.stop().await;
        assert!(!stopped.running);
        assert!(stopped.started_at.is_some());
        assert!(!timer.status().await.running);
    }

    #[tokio::test]
    async fn start_is_idempotent() {
        let store = Arc::new(InMemoryKvStore::new());
        let timer = WorkTimerService::new(store);

        let first = timer.start().await.unwrap();
        let second = timer.start().await.unwrap();
        assert_eq!(first.started_at, second.started_at);
    }

    #[tokio::test]
    async fn timer_survives_reload() {
        let store = Arc::new(InMemoryKvStore::new());
        let started = WorkTimerService::new(store.clone()).start().await.unwrap();

        // A fresh service over the same store sees the running timer.
        let reloaded = WorkTimerService::new(store);
        let status = reloaded.status().await;
        assert!(status.running);
        assert_eq!(status.started_at, started.started_at);
    }

    #[tokio::test]
    async fn corrupt_entry_reads_as_stopped() {
        let store = Arc::new(InMemoryKvStore::new());
        store.set(TIMER_KEY, "yesterday-ish").await.unwrap();

        let timer = WorkTimerService::new(store);
        assert!(!timer.status().await.running);
    }
}
