use std::sync::{Arc, Mutex};

use lsweep_core::{
    DeleteMessage, DeleteProgress, DeleteSummary, DeletionScope, ItemId, ListItem, Notifier,
    SweepEngine,
};

use crate::sim::{SimPage, SimRemover};

/// Which filter field the editor is focused on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Title,
    Range,
}

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Browsing the list
    Browsing,
    /// Showing help overlay
    Help,
    /// Showing stats overlay
    Stats,
    /// Editing one of the filter fields
    EditFilter(FilterField),
    /// Showing delete confirmation dialog
    ConfirmDelete,
    /// Deletion in progress with progress overlay
    Deleting,
}

/// Shared slot for the engine's latest status message; the engine writes,
/// the footer reads.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard(Arc<Mutex<Option<String>>>);

impl NoticeBoard {
    pub fn post(&self, message: &str) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(message.to_string());
        }
    }

    pub fn latest(&self) -> Option<String> {
        self.0.lock().ok().and_then(|slot| slot.clone())
    }
}

impl Notifier for NoticeBoard {
    fn notify(&mut self, message: &str) {
        self.post(message);
    }
}

/// Counters for the running (or last finished) deletion job
#[derive(Debug, Clone, Default)]
pub struct JobView {
    pub progress: DeleteProgress,
    pub deleted: usize,
    pub errors: usize,
    pub last_summary: Option<DeleteSummary>,
}

/// Application state
pub struct AppState {
    /// Selection/filter engine
    pub engine: SweepEngine,
    /// The simulated page, shared with deletion workers
    pub page: Arc<Mutex<SimPage>>,
    /// Current mode
    pub mode: AppMode,
    /// Cursor index into the visible list
    pub cursor: usize,
    /// Scroll offset for the list view
    pub scroll_offset: usize,
    /// Visible area height (set by UI)
    pub visible_height: usize,
    /// Whether app should quit
    pub should_quit: bool,
    /// Title filter input buffer
    pub title_input: String,
    /// Range filter input buffer
    pub range_input: String,
    /// Buffer contents before the current edit, for Esc
    edit_undo: String,
    /// Deletion scope pending confirmation
    pub pending_scope: Option<DeletionScope>,
    /// Number of items the pending deletion covers
    pub pending_count: usize,
    /// Progress of the running job
    pub job: JobView,
    /// Latest engine notification
    pub notice: NoticeBoard,
    /// Transient failure injection for the simulated remover
    fail_every: Option<usize>,
}

impl AppState {
    pub fn new(
        engine: SweepEngine,
        page: Arc<Mutex<SimPage>>,
        notice: NoticeBoard,
        fail_every: Option<usize>,
    ) -> Self {
        Self {
            engine,
            page,
            mode: AppMode::Browsing,
            cursor: 0,
            scroll_offset: 0,
            visible_height: 20,
            should_quit: false,
            title_input: String::new(),
            range_input: String::new(),
            edit_undo: String::new(),
            pending_scope: None,
            pending_count: 0,
            job: JobView::default(),
            notice,
            fail_every,
        }
    }

    /// Push the page's current render into the engine and clamp the cursor
    pub fn sync_page(&mut self) {
        let raw = match self.page.lock() {
            Ok(page) => page.rendered_items(),
            Err(_) => return,
        };
        self.engine.set_items(&raw);
        self.clamp_cursor();
    }

    /// Visible items in render order
    pub fn visible_items(&self) -> Vec<&ListItem> {
        self.engine.visible_items()
    }

    fn visible_len(&self) -> usize {
        self.engine.visible_ids().len()
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
        if self.scroll_offset > 0 && self.scroll_offset >= len {
            self.scroll_offset = len.saturating_sub(1);
        }
    }

    fn ensure_cursor_visible(&mut self) {
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + self.visible_height {
            self.scroll_offset = self.cursor - self.visible_height + 1;
        }
    }

    // --- Navigation ---

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.ensure_cursor_visible();
    }

    pub fn move_down(&mut self) {
        if self.cursor < self.visible_len().saturating_sub(1) {
            self.cursor += 1;
        }
        self.ensure_cursor_visible();
    }

    pub fn page_up(&mut self) {
        let page_size = self.visible_height.saturating_sub(2);
        self.cursor = self.cursor.saturating_sub(page_size);
        self.ensure_cursor_visible();
    }

    pub fn page_down(&mut self) {
        let page_size = self.visible_height.saturating_sub(2);
        self.cursor = (self.cursor + page_size).min(self.visible_len().saturating_sub(1));
        self.ensure_cursor_visible();
    }

    pub fn go_to_first(&mut self) {
        self.cursor = 0;
        self.ensure_cursor_visible();
    }

    pub fn go_to_last(&mut self) {
        self.cursor = self.visible_len().saturating_sub(1);
        self.ensure_cursor_visible();
    }

    // --- Selection ---

    fn item_under_cursor(&self) -> Option<ItemId> {
        self.engine.visible_ids().get(self.cursor).cloned()
    }

    pub fn toggle_current(&mut self) {
        if !self.engine.is_enabled() {
            self.notice.post("Enable bulk mode first (b)");
            return;
        }
        if let Some(id) = self.item_under_cursor() {
            self.engine.toggle_item(&id);
        }
    }

    pub fn toggle_bulk_mode(&mut self) {
        self.engine.toggle_mode();
        if !self.engine.is_enabled() {
            self.title_input.clear();
            self.range_input.clear();
        }
    }

    pub fn select_all(&mut self) {
        if self.require_bulk_mode() {
            self.engine.select_all();
        }
    }

    pub fn deselect_all(&mut self) {
        if self.require_bulk_mode() {
            self.engine.deselect_all();
        }
    }

    pub fn invert_selection(&mut self) {
        if self.require_bulk_mode() {
            self.engine.invert_selection();
        }
    }

    fn require_bulk_mode(&self) -> bool {
        if self.engine.is_enabled() {
            true
        } else {
            self.notice.post("Enable bulk mode first (b)");
            false
        }
    }

    // --- Filters ---

    pub fn begin_edit(&mut self, field: FilterField) {
        self.edit_undo = match field {
            FilterField::Title => self.title_input.clone(),
            FilterField::Range => self.range_input.clone(),
        };
        self.mode = AppMode::EditFilter(field);
    }

    pub fn input_char(&mut self, c: char) {
        if let AppMode::EditFilter(field) = self.mode {
            match field {
                FilterField::Title => self.title_input.push(c),
                FilterField::Range => self.range_input.push(c),
            }
        }
    }

    pub fn backspace(&mut self) {
        if let AppMode::EditFilter(field) = self.mode {
            match field {
                FilterField::Title => self.title_input.pop(),
                FilterField::Range => self.range_input.pop(),
            };
        }
    }

    pub fn apply_filter(&mut self) {
        self.engine.set_filter(&self.title_input, &self.range_input);
        self.clamp_cursor();
        self.mode = AppMode::Browsing;
    }

    pub fn cancel_edit(&mut self) {
        if let AppMode::EditFilter(field) = self.mode {
            match field {
                FilterField::Title => self.title_input = std::mem::take(&mut self.edit_undo),
                FilterField::Range => self.range_input = std::mem::take(&mut self.edit_undo),
            }
            self.mode = AppMode::Browsing;
        }
    }

    pub fn clear_filters(&mut self) {
        self.title_input.clear();
        self.range_input.clear();
        self.engine.set_filter("", "");
        self.clamp_cursor();
        self.notice.post("Filters cleared");
    }

    // --- Deletion ---

    /// Show the confirmation dialog for a deletion request
    pub fn request_delete(&mut self, scope: DeletionScope) {
        if !self.require_bulk_mode() {
            return;
        }
        if self.engine.is_deleting() {
            self.notice.post("A deletion is already in progress");
            return;
        }

        let count = match scope {
            DeletionScope::Selected => self
                .engine
                .visible_ids()
                .iter()
                .filter(|id| self.engine.is_selected(id))
                .count(),
            DeletionScope::AllVisible => self.visible_len(),
        };
        if count == 0 {
            self.notice.post("No visible items to delete");
            return;
        }

        self.pending_scope = Some(scope);
        self.pending_count = count;
        self.mode = AppMode::ConfirmDelete;
    }

    /// Confirm and start the deletion job
    pub fn confirm_delete(&mut self) {
        let Some(scope) = self.pending_scope.take() else {
            self.mode = AppMode::Browsing;
            return;
        };
        self.pending_count = 0;

        let remover = SimRemover::new(self.page.clone(), self.fail_every);
        // The dialog already asked; the engine's own gate stays open
        match self.engine.start_deletion(scope, remover, || true) {
            Ok(_) => {
                self.job = JobView::default();
                self.mode = AppMode::Deleting;
            }
            Err(e) => {
                tracing::warn!(error = %e, "deletion did not start");
                self.mode = AppMode::Browsing;
            }
        }
    }

    pub fn cancel_dialog(&mut self) {
        self.pending_scope = None;
        self.pending_count = 0;
        self.mode = AppMode::Browsing;
    }

    pub fn cancel_deletion(&mut self) {
        self.engine.cancel_deletion();
    }

    /// Drain pipeline messages and update the job view
    pub fn poll(&mut self) {
        let messages = self.engine.poll_deletion();
        if messages.is_empty() {
            return;
        }

        for msg in messages {
            match msg {
                DeleteMessage::Progress(p) => self.job.progress = p,
                DeleteMessage::ItemDeleted(_) => self.job.deleted += 1,
                DeleteMessage::ItemFailed { .. } => self.job.errors += 1,
                DeleteMessage::Completed(summary) | DeleteMessage::Cancelled(summary) => {
                    self.job.last_summary = Some(summary);
                    if self.mode == AppMode::Deleting {
                        self.mode = AppMode::Browsing;
                    }
                }
                DeleteMessage::Started { .. } => {}
            }
        }
        self.sync_page();
    }

    // --- Overlays / lifecycle ---

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
    }

    pub fn show_stats(&mut self) {
        self.mode = AppMode::Stats;
    }

    pub fn close_overlay(&mut self) {
        self.mode = AppMode::Browsing;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Stop any running job and persist a final snapshot
    pub fn shutdown(self) {
        self.engine.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsweep_core::MemoryStore;

    fn state_with(count: usize) -> AppState {
        let notice = NoticeBoard::default();
        let engine = SweepEngine::create(
            Box::new(MemoryStore::new()),
            Box::new(notice.clone()),
        );
        let page = Arc::new(Mutex::new(SimPage::demo(count)));
        let mut state = AppState::new(engine, page, notice, None);
        state.sync_page();
        state
    }

    #[test]
    fn test_selection_requires_bulk_mode() {
        let mut state = state_with(5);
        state.select_all();
        assert_eq!(state.engine.selected_count(), 0);
        assert!(state.notice.latest().unwrap().contains("bulk mode"));

        state.toggle_bulk_mode();
        state.select_all();
        assert_eq!(state.engine.selected_count(), 5);
    }

    #[test]
    fn test_filter_edit_esc_restores_previous_value() {
        let mut state = state_with(5);
        state.toggle_bulk_mode();

        state.begin_edit(FilterField::Range);
        for c in "1-3".chars() {
            state.input_char(c);
        }
        state.apply_filter();
        assert_eq!(state.visible_items().len(), 3);

        state.begin_edit(FilterField::Range);
        state.backspace();
        state.input_char('9');
        state.cancel_edit();
        assert_eq!(state.range_input, "1-3");
        assert_eq!(state.mode, AppMode::Browsing);
    }

    #[test]
    fn test_request_delete_needs_targets() {
        let mut state = state_with(3);
        state.toggle_bulk_mode();

        state.request_delete(DeletionScope::Selected);
        assert_eq!(state.mode, AppMode::Browsing);
        assert!(state.notice.latest().unwrap().contains("No visible items"));

        state.select_all();
        state.request_delete(DeletionScope::Selected);
        assert_eq!(state.mode, AppMode::ConfirmDelete);
        assert_eq!(state.pending_count, 3);

        state.cancel_dialog();
        assert_eq!(state.mode, AppMode::Browsing);
        assert!(state.pending_scope.is_none());
    }

    #[test]
    fn test_cursor_clamps_when_filter_shrinks_list() {
        let mut state = state_with(10);
        state.toggle_bulk_mode();
        state.go_to_last();
        assert_eq!(state.cursor, 9);

        state.begin_edit(FilterField::Range);
        for c in "1-2".chars() {
            state.input_char(c);
        }
        state.apply_filter();
        assert_eq!(state.cursor, 1);
    }
}
