use serde::{Deserialize, Serialize};

use crate::Result;
use crate::stats::SessionStats;

/// The small opaque record the engine persists between page loads.
///
/// Missing or unknown state defaults sensibly; there is no versioning
/// requirement beyond that.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PersistedState {
    /// Whether bulk mode was enabled
    pub enabled: bool,
    /// Selected item identifiers
    pub selected: Vec<String>,
    /// Lifetime usage statistics
    pub stats: SessionStats,
    /// Last control-panel position, if the host repositions one
    pub panel_position: Option<(i32, i32)>,
}

/// Persistence seam for the surrounding host. Failures are reported, never
/// fatal: the engine logs them and keeps operating in memory.
pub trait StateStore {
    /// Load the persisted record, `None` when nothing was saved yet
    fn load(&mut self) -> Result<Option<PersistedState>>;

    /// Save the record
    fn save(&mut self, state: &PersistedState) -> Result<()>;
}

/// In-memory store, used in tests and when persistence is disabled
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Option<PersistedState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: PersistedState) -> Self {
        Self { state: Some(state) }
    }

    pub fn state(&self) -> Option<&PersistedState> {
        self.state.as_ref()
    }
}

impl StateStore for MemoryStore {
    fn load(&mut self) -> Result<Option<PersistedState>> {
        Ok(self.state.clone())
    }

    fn save(&mut self, state: &PersistedState) -> Result<()> {
        self.state = Some(state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let state = PersistedState {
            enabled: true,
            selected: vec!["item-00000001".to_string()],
            stats: SessionStats::default(),
            panel_position: Some((120, 40)),
        };
        store.save(&state).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, state);
    }
}
