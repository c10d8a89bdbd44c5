/// User actions that can be performed in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move cursor up
    MoveUp,
    /// Move cursor down
    MoveDown,
    /// Move cursor up by a page
    PageUp,
    /// Move cursor down by a page
    PageDown,
    /// Go to first item
    GoToFirst,
    /// Go to last item
    GoToLast,
    /// Toggle the item under the cursor in/out of the selection
    ToggleItem,
    /// Toggle bulk mode on/off
    ToggleBulkMode,
    /// Select all visible items
    SelectAll,
    /// Deselect all visible items
    DeselectAll,
    /// Invert selection over the visible items
    InvertSelection,
    /// Start editing the title filter
    EditTitleFilter,
    /// Start editing the range filter
    EditRangeFilter,
    /// Clear both filters
    ClearFilters,
    /// Request deletion of the selected items (shows confirmation)
    DeleteSelected,
    /// Request deletion of everything visible (shows confirmation)
    DeleteAllVisible,
    /// Confirm the pending deletion
    ConfirmDelete,
    /// Dismiss the active dialog or filter editor
    CancelDialog,
    /// Cancel the running deletion job
    CancelDeletion,
    /// Append a character to the filter being edited
    Input(char),
    /// Delete the last character of the filter being edited
    Backspace,
    /// Apply the edited filter
    ApplyFilter,
    /// Show help overlay
    ShowHelp,
    /// Hide help overlay
    HideHelp,
    /// Show stats overlay
    ShowStats,
    /// Hide stats overlay
    HideStats,
    /// Quit the application
    Quit,
    /// No action (for tick events)
    Tick,
}
