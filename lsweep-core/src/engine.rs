use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::Receiver;

use crate::error::{Result, SweepError};
use crate::filter::{FilterCriteria, FilterOutcome, apply_filters};
use crate::format::format_elapsed;
use crate::identity::resolve_items;
use crate::item::{ItemId, ListItem, RawItem};
use crate::ops::{self, DeselectOutcome, SelectOutcome};
use crate::pipeline::{
    CancellationToken, Clock, DeleteMessage, DeletePipeline, DeleteSummary, ItemRemover,
    JobStatus, PipelineConfig, SystemClock,
};
use crate::selection::SelectionSet;
use crate::stats::{SessionSnapshot, SessionStats};
use crate::store::{PersistedState, StateStore};

/// Notification sink for human-readable status messages
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Discards all notifications
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _message: &str) {}
}

/// What a deletion request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionScope {
    /// Selected identifiers, revalidated against current visibility
    Selected,
    /// Everything the filter currently shows
    AllVisible,
}

/// Synchronous snapshot of the engine for the host UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStatus {
    pub enabled: bool,
    pub selected: usize,
    pub total_items: usize,
    pub deleting: bool,
}

/// A running deletion job
struct ActiveJob {
    rx: Receiver<DeleteMessage>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<DeleteSummary>>,
}

/// Selection/filter state engine with an explicit lifecycle.
///
/// One engine per page context; the surrounding host creates it on
/// navigation and destroys it when the page goes away. The engine holds no
/// global state. Selection and filter mutations are synchronous; deletion
/// runs on a background thread and is observed through [`poll_deletion`].
///
/// [`poll_deletion`]: SweepEngine::poll_deletion
pub struct SweepEngine {
    enabled: bool,
    items: Vec<ListItem>,
    criteria: FilterCriteria,
    visible: FilterOutcome,
    selection: SelectionSet,
    stats: SessionStats,
    session: Option<SessionSnapshot>,
    panel_position: Option<(i32, i32)>,
    pipeline_config: PipelineConfig,
    store: Box<dyn StateStore>,
    notifier: Box<dyn Notifier>,
    job: Option<ActiveJob>,
    status: JobStatus,
}

impl SweepEngine {
    /// Create an engine for one page context, restoring persisted state.
    /// A missing or unreadable record defaults to a disabled engine with an
    /// empty selection; load failures are logged, never fatal.
    pub fn create(mut store: Box<dyn StateStore>, notifier: Box<dyn Notifier>) -> Self {
        let state = match store.load() {
            Ok(state) => state.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load persisted state, starting fresh");
                PersistedState::default()
            }
        };

        let mut stats = state.stats;
        let session = state.enabled.then(|| stats.start_session());

        Self {
            enabled: state.enabled,
            items: Vec::new(),
            criteria: FilterCriteria::default(),
            visible: FilterOutcome::default(),
            selection: state.selected.iter().map(|id| ItemId::new(id.clone())).collect(),
            stats,
            session,
            panel_position: state.panel_position,
            pipeline_config: PipelineConfig::default(),
            store,
            notifier,
            job: None,
            status: JobStatus::Idle,
        }
    }

    /// Tear the engine down: cancel any running job, close the session,
    /// persist a final snapshot.
    pub fn destroy(mut self) {
        if let Some(mut job) = self.job.take() {
            job.cancel.cancel();
            if let Some(handle) = job.handle.take() {
                let _ = handle.join();
            }
        }
        if let Some(session) = self.session.take() {
            self.stats.end_session(session);
        }
        self.persist();
    }

    pub fn set_pipeline_config(&mut self, config: PipelineConfig) {
        self.pipeline_config = config;
    }

    // --- Queries ---

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_deleting(&self) -> bool {
        self.job.is_some()
    }

    pub fn job_status(&self) -> JobStatus {
        self.status
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn hidden_count(&self) -> usize {
        self.visible.hidden.len()
    }

    pub fn filter_active(&self) -> bool {
        self.criteria.is_active()
    }

    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.selection.contains(id)
    }

    pub fn visible_ids(&self) -> &[ItemId] {
        &self.visible.visible
    }

    /// Visible items in render order
    pub fn visible_items(&self) -> Vec<&ListItem> {
        self.items
            .iter()
            .filter(|item| !self.visible.hidden.contains(&item.id))
            .collect()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn session(&self) -> Option<&SessionSnapshot> {
        self.session.as_ref()
    }

    pub fn panel_position(&self) -> Option<(i32, i32)> {
        self.panel_position
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            enabled: self.enabled,
            selected: self.selection.len(),
            total_items: self.items.len(),
            deleting: self.is_deleting(),
        }
    }

    // --- Commands ---

    /// Replace the rendered item list (called by the host whenever the page
    /// renders new or changed entries) and recompute visibility.
    pub fn set_items(&mut self, raw_items: &[RawItem]) {
        self.items = resolve_items(raw_items);
        self.refresh_visibility();
    }

    /// Update the filter criteria from the two text fields and recompute
    pub fn set_filter(&mut self, title: &str, range_text: &str) {
        self.criteria = FilterCriteria::new(title, range_text);
        self.refresh_visibility();

        if self.criteria.is_active() {
            let message = format!(
                "Filter applied: {} of {} items visible",
                self.visible.visible.len(),
                self.items.len()
            );
            self.notifier.notify(&message);
        }
    }

    /// Toggle bulk mode. Enabling starts a stats session; disabling clears
    /// the selection and filters and ends the session.
    pub fn toggle_mode(&mut self) -> bool {
        self.enabled = !self.enabled;

        if self.enabled {
            self.session = Some(self.stats.start_session());
        } else {
            self.selection.clear();
            self.criteria = FilterCriteria::default();
            self.refresh_visibility();
            if let Some(session) = self.session.take() {
                self.stats.end_session(session);
            }
        }

        self.persist();
        self.notifier.notify(if self.enabled {
            "Bulk mode enabled"
        } else {
            "Bulk mode disabled"
        });
        self.enabled
    }

    /// Flip one visible item in or out of the selection.
    /// Hidden items are never touched; returns the new membership, or `None`
    /// when the id is not currently visible.
    pub fn toggle_item(&mut self, id: &ItemId) -> Option<bool> {
        if !self.visible.is_visible(id) {
            return None;
        }

        let selected = if self.selection.remove(id) {
            false
        } else {
            self.selection.insert(id.clone());
            true
        };
        self.persist();
        Some(selected)
    }

    /// Select every visible item. With a filter active, the whole selection
    /// is cleared first so nothing hidden stays selected.
    pub fn select_all(&mut self) -> SelectOutcome {
        // The clear happens even when the filter hides everything, so stale
        // memberships never outlive a select-all.
        if self.criteria.is_active() {
            self.selection.clear();
        }

        if self.visible.visible.is_empty() {
            self.persist();
            self.notifier.notify("No visible items to select");
            return SelectOutcome::default();
        }

        let outcome = ops::select_all(&mut self.selection, &self.visible.visible);
        self.persist();

        let message = if outcome.newly_selected > 0 {
            format!(
                "Selected {} visible items ({} selected in total)",
                outcome.newly_selected,
                self.selection.len()
            )
        } else {
            format!(
                "All {} visible items were already selected",
                outcome.already_selected
            )
        };
        self.notifier.notify(&message);
        outcome
    }

    /// Select only what the filter currently shows. The same operation as
    /// [`select_all`]; both always scope to the one visibility computation.
    ///
    /// [`select_all`]: SweepEngine::select_all
    pub fn select_visible(&mut self) -> SelectOutcome {
        self.select_all()
    }

    /// Deselect every visible item; selections outside the visible set stay
    pub fn deselect_all(&mut self) -> DeselectOutcome {
        if self.visible.visible.is_empty() {
            self.notifier.notify("No visible items to deselect");
            return DeselectOutcome::default();
        }

        let outcome = ops::deselect_all(&mut self.selection, &self.visible.visible);
        self.persist();

        let message = if outcome.newly_deselected > 0 {
            format!(
                "Deselected {} visible items ({} still selected)",
                outcome.newly_deselected,
                self.selection.len()
            )
        } else {
            format!(
                "All {} visible items were already deselected",
                outcome.already_deselected
            )
        };
        self.notifier.notify(&message);
        outcome
    }

    /// Invert membership for every visible item
    pub fn invert_selection(&mut self) -> usize {
        if self.visible.visible.is_empty() {
            self.notifier.notify("No visible items to invert");
            return 0;
        }

        let inverted = ops::invert(&mut self.selection, &self.visible.visible);
        self.persist();

        let message = format!(
            "Inverted selection for {} visible items ({} selected)",
            inverted,
            self.selection.len()
        );
        self.notifier.notify(&message);
        inverted
    }

    /// Remember the host's control-panel position
    pub fn set_panel_position(&mut self, position: Option<(i32, i32)>) {
        self.panel_position = position;
        self.persist();
    }

    /// Start a deletion job with the wall clock
    pub fn start_deletion<R>(
        &mut self,
        scope: DeletionScope,
        remover: R,
        confirm: impl FnOnce() -> bool,
    ) -> Result<usize>
    where
        R: ItemRemover + 'static,
    {
        self.start_deletion_with_clock(scope, remover, SystemClock, confirm)
    }

    /// Start a deletion job with an injected clock (simulation and tests).
    ///
    /// The target list is revalidated against current visibility before
    /// anything runs: identifiers the filter hides, or that are no longer
    /// rendered at all, are discarded. An empty revalidated list never
    /// starts. The `confirm` gate runs last, before any mutation.
    pub fn start_deletion_with_clock<R, C>(
        &mut self,
        scope: DeletionScope,
        remover: R,
        clock: C,
        confirm: impl FnOnce() -> bool,
    ) -> Result<usize>
    where
        R: ItemRemover + 'static,
        C: Clock + 'static,
    {
        if self.job.is_some() {
            self.notifier.notify("A deletion is already in progress");
            return Err(SweepError::DeletionInProgress);
        }

        let targets: Vec<ItemId> = match scope {
            DeletionScope::Selected => self
                .visible
                .visible
                .iter()
                .filter(|id| self.selection.contains(id))
                .cloned()
                .collect(),
            DeletionScope::AllVisible => self.visible.visible.clone(),
        };

        if targets.is_empty() {
            self.notifier.notify("No visible items to delete");
            return Err(SweepError::NothingToDelete);
        }

        if !confirm() {
            return Err(SweepError::ConfirmationDeclined);
        }

        let total = targets.len();
        let cancel = CancellationToken::new();
        let pipeline =
            DeletePipeline::new(self.pipeline_config.clone()).with_cancellation(cancel.clone());
        let (rx, handle) = pipeline.run(targets, remover, clock);

        self.job = Some(ActiveJob {
            rx,
            cancel,
            handle: Some(handle),
        });
        self.status = JobStatus::Running;
        tracing::debug!(total, "deletion job started");
        self.notifier.notify(&format!("Deleting {total} items"));
        Ok(total)
    }

    /// Request cancellation; takes effect at the next item boundary
    pub fn cancel_deletion(&mut self) {
        if let Some(job) = &self.job {
            job.cancel.cancel();
            self.notifier.notify("Cancelling after the current item");
        }
    }

    /// Drain pipeline messages and fold them into engine state.
    ///
    /// Selection membership for each deleted identifier is removed as the
    /// message arrives, not batched at the end, so a cancelled job leaves an
    /// accurate remaining selection. Returns the drained messages so the
    /// host can render progress.
    pub fn poll_deletion(&mut self) -> Vec<DeleteMessage> {
        let messages: Vec<DeleteMessage> = match &self.job {
            Some(job) => {
                let mut drained = Vec::new();
                while let Ok(msg) = job.rx.try_recv() {
                    drained.push(msg);
                }
                drained
            }
            None => return Vec::new(),
        };

        let mut dirty = false;
        for msg in &messages {
            match msg {
                DeleteMessage::ItemDeleted(id) => {
                    self.selection.remove(id);
                    if let Some(session) = self.session.as_mut() {
                        self.stats.record_deleted(session);
                    } else {
                        self.stats.total_deleted += 1;
                    }
                    dirty = true;
                }
                DeleteMessage::ItemFailed { id, attempts } => {
                    tracing::warn!(%id, attempts, "recorded permanent deletion error");
                    if let Some(session) = self.session.as_mut() {
                        self.stats.record_error(session);
                    }
                }
                DeleteMessage::Completed(summary) => {
                    self.finish_job(JobStatus::Completed, summary);
                    dirty = true;
                }
                DeleteMessage::Cancelled(summary) => {
                    self.finish_job(JobStatus::Cancelled, summary);
                    dirty = true;
                }
                DeleteMessage::Started { .. } | DeleteMessage::Progress(_) => {}
            }
        }

        if dirty {
            self.persist();
        }
        messages
    }

    // --- Internals ---

    /// Recompute visibility and revoke selection membership for anything the
    /// filter now hides. Returns the number of revoked memberships.
    fn refresh_visibility(&mut self) -> usize {
        self.visible = apply_filters(&self.criteria, &self.items);

        let mut revoked = 0;
        for id in &self.visible.hidden {
            if self.selection.remove(id) {
                revoked += 1;
            }
        }

        if revoked > 0 {
            tracing::debug!(revoked, "revoked selections for items the filter hides");
            self.persist();
        }
        revoked
    }

    fn finish_job(&mut self, status: JobStatus, summary: &DeleteSummary) {
        if let Some(mut job) = self.job.take()
            && let Some(handle) = job.handle.take()
        {
            let _ = handle.join();
        }
        self.status = status;

        let message = match status {
            JobStatus::Completed => format!(
                "Deletion finished: {} deleted, {} failed in {}",
                summary.deleted,
                summary.errors,
                format_elapsed(Duration::from_millis(summary.elapsed_ms))
            ),
            JobStatus::Cancelled => format!(
                "Deletion cancelled: {} deleted, {} remaining",
                summary.deleted, summary.remaining
            ),
            JobStatus::Idle | JobStatus::Running => return,
        };
        self.notifier.notify(&message);
    }

    fn persist(&mut self) {
        let state = PersistedState {
            enabled: self.enabled,
            selected: self
                .selection
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
            stats: self.stats.clone(),
            panel_position: self.panel_position,
        };

        if let Err(e) = self.store.save(&state) {
            tracing::warn!(error = %e, "failed to persist state, continuing in memory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    /// Store whose contents stay inspectable after the engine takes it
    #[derive(Clone, Default)]
    struct SharedStore(Arc<Mutex<MemoryStore>>);

    impl StateStore for SharedStore {
        fn load(&mut self) -> Result<Option<PersistedState>> {
            self.0.lock().unwrap().load()
        }

        fn save(&mut self, state: &PersistedState) -> Result<()> {
            self.0.lock().unwrap().save(state)
        }
    }

    /// Store that always fails, to prove persistence never blocks an op
    struct BrokenStore;

    impl StateStore for BrokenStore {
        fn load(&mut self) -> Result<Option<PersistedState>> {
            Err(SweepError::Store("disk on fire".to_string()))
        }

        fn save(&mut self, _state: &PersistedState) -> Result<()> {
            Err(SweepError::Store("disk on fire".to_string()))
        }
    }

    #[derive(Clone, Default)]
    struct RecordingNotifier(Arc<Mutex<Vec<String>>>);

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    /// Remover that always succeeds and records removal order
    #[derive(Clone, Default)]
    struct CapturingRemover {
        removed: Arc<Mutex<Vec<ItemId>>>,
    }

    impl ItemRemover for CapturingRemover {
        fn trigger_remove(&mut self, id: &ItemId) -> bool {
            self.removed.lock().unwrap().push(id.clone());
            true
        }

        fn is_rendered(&mut self, _id: &ItemId) -> bool {
            false
        }
    }

    /// Clock that never actually waits
    #[derive(Clone, Copy, Default)]
    struct InstantClock;

    impl Clock for InstantClock {
        fn sleep(&self, _duration: Duration) {}
    }

    fn raw_items(count: usize) -> Vec<RawItem> {
        (1..=count)
            .map(|i| RawItem {
                title: format!("Video number {i}"),
                watch_href: Some(format!("https://host.example/watch?v=item-{i:08}&list=WL")),
                ..RawItem::default()
            })
            .collect()
    }

    fn id(i: usize) -> ItemId {
        ItemId::new(format!("item-{i:08}"))
    }

    fn fresh_engine() -> SweepEngine {
        let mut engine = SweepEngine::create(
            Box::new(MemoryStore::new()),
            Box::new(NullNotifier),
        );
        engine.toggle_mode();
        engine
    }

    fn drain_until_idle(engine: &mut SweepEngine) -> Vec<DeleteMessage> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut messages = Vec::new();
        while engine.is_deleting() {
            messages.extend(engine.poll_deletion());
            assert!(Instant::now() < deadline, "deletion job never finished");
            std::thread::yield_now();
        }
        messages
    }

    #[test]
    fn test_create_restores_persisted_state() {
        let store = SharedStore::default();
        store
            .0
            .lock()
            .unwrap()
            .save(&PersistedState {
                enabled: true,
                selected: vec!["item-00000001".to_string()],
                stats: SessionStats {
                    total_deleted: 7,
                    ..SessionStats::default()
                },
                panel_position: Some((10, 20)),
            })
            .unwrap();

        let engine = SweepEngine::create(Box::new(store), Box::new(NullNotifier));
        assert!(engine.is_enabled());
        assert_eq!(engine.selected_count(), 1);
        assert_eq!(engine.stats().total_deleted, 7);
        assert_eq!(engine.panel_position(), Some((10, 20)));
        // A restored enabled engine begins a fresh session
        assert!(engine.session().is_some());
    }

    #[test]
    fn test_broken_store_defaults_and_never_blocks() {
        let mut engine =
            SweepEngine::create(Box::new(BrokenStore), Box::new(NullNotifier));
        assert!(!engine.is_enabled());

        engine.toggle_mode();
        engine.set_items(&raw_items(3));
        let outcome = engine.select_all();
        assert_eq!(outcome.newly_selected, 3);
    }

    #[test]
    fn test_toggle_mode_clears_selection_and_filters() {
        let mut engine = fresh_engine();
        engine.set_items(&raw_items(5));
        engine.set_filter("", "1-3");
        engine.select_all();
        assert_eq!(engine.selected_count(), 3);

        engine.toggle_mode();
        assert!(!engine.is_enabled());
        assert_eq!(engine.selected_count(), 0);
        assert!(!engine.filter_active());
        assert_eq!(engine.visible_ids().len(), 5);
    }

    #[test]
    fn test_hidden_items_lose_selection_on_recompute() {
        let mut engine = fresh_engine();
        engine.set_items(&raw_items(5));
        engine.select_all();
        assert_eq!(engine.selected_count(), 5);

        engine.set_filter("", "1-2");
        // Nothing hidden may stay selected
        assert_eq!(engine.selected_count(), 2);
        for id in engine.visible_ids() {
            assert!(engine.is_selected(id));
        }
    }

    #[test]
    fn test_select_all_with_active_filter_clears_stale_members() {
        let store = SharedStore::default();
        store
            .0
            .lock()
            .unwrap()
            .save(&PersistedState {
                enabled: true,
                // Persisted selection for an item that is no longer rendered
                selected: vec!["item-offscreen".to_string()],
                ..PersistedState::default()
            })
            .unwrap();

        let mut engine = SweepEngine::create(Box::new(store), Box::new(NullNotifier));
        engine.set_items(&raw_items(4));
        assert!(engine.is_selected(&ItemId::from("item-offscreen")));

        engine.set_filter("", "1-2");
        engine.select_all();

        // Only the two visible items remain selected
        assert_eq!(engine.selected_count(), 2);
        assert!(!engine.is_selected(&ItemId::from("item-offscreen")));
    }

    #[test]
    fn test_select_all_under_all_hiding_filter_clears_stale_members() {
        let store = SharedStore::default();
        store
            .0
            .lock()
            .unwrap()
            .save(&PersistedState {
                enabled: true,
                selected: vec!["item-offscreen".to_string()],
                ..PersistedState::default()
            })
            .unwrap();

        let mut engine = SweepEngine::create(Box::new(store.clone()), Box::new(NullNotifier));
        engine.set_items(&raw_items(3));
        // The filter matches nothing; the offscreen member is not rendered,
        // so visibility recomputation alone cannot revoke it
        engine.set_filter("no such title", "");
        assert!(engine.visible_ids().is_empty());
        assert!(engine.is_selected(&ItemId::from("item-offscreen")));

        let outcome = engine.select_all();
        assert_eq!(outcome, SelectOutcome::default());
        assert_eq!(engine.selected_count(), 0);

        let persisted = store.0.lock().unwrap().state().cloned().unwrap();
        assert!(persisted.selected.is_empty());
    }

    #[test]
    fn test_select_visible_is_select_all() {
        let mut a = fresh_engine();
        let mut b = fresh_engine();
        for engine in [&mut a, &mut b] {
            engine.set_items(&raw_items(6));
            engine.set_filter("video", "2-4");
        }

        let via_all = a.select_all();
        let via_visible = b.select_visible();
        assert_eq!(via_all, via_visible);
        assert_eq!(a.selected_count(), b.selected_count());
    }

    #[test]
    fn test_toggle_item_refuses_hidden() {
        let mut engine = fresh_engine();
        engine.set_items(&raw_items(4));
        engine.set_filter("", "1-2");

        assert_eq!(engine.toggle_item(&id(1)), Some(true));
        assert_eq!(engine.toggle_item(&id(1)), Some(false));
        assert_eq!(engine.toggle_item(&id(4)), None);
        assert!(!engine.is_selected(&id(4)));
    }

    #[test]
    fn test_notifications_carry_counts() {
        let notifier = RecordingNotifier::default();
        let mut engine = SweepEngine::create(
            Box::new(MemoryStore::new()),
            Box::new(notifier.clone()),
        );
        engine.toggle_mode();
        engine.set_items(&raw_items(3));
        engine.select_all();
        engine.deselect_all();
        engine.invert_selection();

        let messages = notifier.0.lock().unwrap().clone();
        assert!(messages.contains(&"Bulk mode enabled".to_string()));
        assert!(messages.contains(&"Selected 3 visible items (3 selected in total)".to_string()));
        assert!(messages.contains(&"Deselected 3 visible items (0 still selected)".to_string()));
        assert!(messages.contains(&"Inverted selection for 3 visible items (3 selected)".to_string()));
    }

    #[test]
    fn test_deletion_revalidates_against_visibility() {
        let mut engine = fresh_engine();
        engine.set_items(&raw_items(6));
        engine.select_all();
        assert_eq!(engine.selected_count(), 6);

        // Hiding 4..6 revokes them; 1..3 stay selected and visible
        engine.set_filter("", "1-3");

        let remover = CapturingRemover::default();
        let started = engine
            .start_deletion_with_clock(
                DeletionScope::Selected,
                remover.clone(),
                InstantClock,
                || true,
            )
            .unwrap();
        assert_eq!(started, 3);
        drain_until_idle(&mut engine);

        let removed = remover.removed.lock().unwrap().clone();
        assert_eq!(removed, vec![id(1), id(2), id(3)]);
    }

    #[test]
    fn test_deletion_rejects_empty_target() {
        let mut engine = fresh_engine();
        engine.set_items(&raw_items(3));

        let result = engine.start_deletion_with_clock(
            DeletionScope::Selected,
            CapturingRemover::default(),
            InstantClock,
            || true,
        );
        assert!(matches!(result, Err(SweepError::NothingToDelete)));
        assert!(!engine.is_deleting());
    }

    #[test]
    fn test_deletion_rejects_declined_confirmation() {
        let mut engine = fresh_engine();
        engine.set_items(&raw_items(3));
        engine.select_all();

        let result = engine.start_deletion_with_clock(
            DeletionScope::Selected,
            CapturingRemover::default(),
            InstantClock,
            || false,
        );
        assert!(matches!(result, Err(SweepError::ConfirmationDeclined)));
        assert!(!engine.is_deleting());
        // No mutation happened
        assert_eq!(engine.selected_count(), 3);
    }

    #[test]
    fn test_deletion_rejects_reentrant_start() {
        let mut engine = fresh_engine();
        engine.set_items(&raw_items(3));
        engine.select_all();

        engine
            .start_deletion_with_clock(
                DeletionScope::Selected,
                CapturingRemover::default(),
                InstantClock,
                || true,
            )
            .unwrap();

        // The job stays active until poll observes its terminal message
        let second = engine.start_deletion_with_clock(
            DeletionScope::AllVisible,
            CapturingRemover::default(),
            InstantClock,
            || true,
        );
        assert!(matches!(second, Err(SweepError::DeletionInProgress)));

        drain_until_idle(&mut engine);
    }

    #[test]
    fn test_poll_folds_stats_and_prunes_selection() {
        let mut engine = fresh_engine();
        engine.set_items(&raw_items(4));
        engine.select_all();

        engine
            .start_deletion_with_clock(
                DeletionScope::Selected,
                CapturingRemover::default(),
                InstantClock,
                || true,
            )
            .unwrap();
        let messages = drain_until_idle(&mut engine);

        assert_eq!(engine.selected_count(), 0);
        assert_eq!(engine.stats().total_deleted, 4);
        assert_eq!(engine.session().unwrap().deleted_in_session, 4);
        assert_eq!(engine.job_status(), JobStatus::Completed);
        assert!(messages
            .iter()
            .any(|m| matches!(m, DeleteMessage::Completed(s) if s.deleted == 4)));
    }

    #[test]
    fn test_delete_all_visible_scope() {
        let mut engine = fresh_engine();
        engine.set_items(&raw_items(5));
        engine.set_filter("", "4-");

        let remover = CapturingRemover::default();
        engine
            .start_deletion_with_clock(
                DeletionScope::AllVisible,
                remover.clone(),
                InstantClock,
                || true,
            )
            .unwrap();
        drain_until_idle(&mut engine);

        let removed = remover.removed.lock().unwrap().clone();
        assert_eq!(removed, vec![id(4), id(5)]);
    }

    #[test]
    fn test_persisted_selection_tracks_mutations() {
        let store = SharedStore::default();
        let mut engine = SweepEngine::create(Box::new(store.clone()), Box::new(NullNotifier));
        engine.toggle_mode();
        engine.set_items(&raw_items(2));
        engine.select_all();

        let persisted = store.0.lock().unwrap().state().cloned().unwrap();
        assert!(persisted.enabled);
        assert_eq!(persisted.selected.len(), 2);
    }
}
