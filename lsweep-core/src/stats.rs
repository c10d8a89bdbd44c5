use std::time::{Duration, Instant, SystemTime};

use serde::{Deserialize, Serialize};

/// Lifetime usage counters, persisted across sessions and page reloads
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionStats {
    /// Number of bulk-mode sessions started
    pub sessions_count: u64,
    /// Items deleted across all sessions
    pub total_deleted: u64,
    /// Total time spent in bulk mode, in milliseconds
    pub total_session_ms: u64,
    /// Derived: total session time / total deleted
    pub average_delete_ms: f64,
    /// When bulk mode was last enabled
    pub last_used: Option<SystemTime>,
}

/// Counters scoped to one continuous bulk-mode session
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    started: Instant,
    pub deleted_in_session: u64,
    pub errors_in_session: u64,
}

impl SessionSnapshot {
    fn new() -> Self {
        Self {
            started: Instant::now(),
            deleted_in_session: 0,
            errors_in_session: 0,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl SessionStats {
    /// Begin a session: bump the lifetime count, stamp last-used, and hand
    /// back fresh per-session counters.
    pub fn start_session(&mut self) -> SessionSnapshot {
        self.sessions_count += 1;
        self.last_used = Some(SystemTime::now());
        SessionSnapshot::new()
    }

    pub fn record_deleted(&mut self, session: &mut SessionSnapshot) {
        self.total_deleted += 1;
        session.deleted_in_session += 1;
    }

    pub fn record_error(&mut self, session: &mut SessionSnapshot) {
        session.errors_in_session += 1;
    }

    /// Fold a finished session into the lifetime totals
    pub fn end_session(&mut self, session: SessionSnapshot) {
        self.fold_elapsed(session.elapsed());
    }

    /// Fold elapsed session time and recompute the average delete time.
    /// The average stays untouched until at least one item was ever deleted.
    pub fn fold_elapsed(&mut self, elapsed: Duration) {
        self.total_session_ms += elapsed.as_millis() as u64;
        if self.total_deleted > 0 {
            self.average_delete_ms = self.total_session_ms as f64 / self.total_deleted as f64;
        }
    }
}
