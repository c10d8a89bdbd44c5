use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Action, AppMode};

/// Map key events to actions based on current mode
pub fn handle_key(key: KeyEvent, mode: AppMode) -> Action {
    match mode {
        AppMode::Help => handle_key_help(key),
        AppMode::Stats => handle_key_stats(key),
        AppMode::EditFilter(_) => handle_key_edit(key),
        AppMode::ConfirmDelete => handle_key_confirm(key),
        AppMode::Deleting => handle_key_deleting(key),
        AppMode::Browsing => handle_key_browsing(key),
    }
}

fn handle_key_help(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Action::HideHelp,
        _ => Action::Tick,
    }
}

fn handle_key_stats(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('s') => Action::HideStats,
        _ => Action::Tick,
    }
}

fn handle_key_edit(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::ApplyFilter,
        KeyCode::Esc => Action::CancelDialog,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char(c) => Action::Input(c),
        _ => Action::Tick,
    }
}

fn handle_key_confirm(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => Action::ConfirmDelete,
        KeyCode::Char('n') | KeyCode::Esc => Action::CancelDialog,
        _ => Action::Tick,
    }
}

fn handle_key_deleting(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('c') => Action::CancelDeletion,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::Tick,
    }
}

fn handle_key_browsing(key: KeyEvent) -> Action {
    match key.code {
        // Quit
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Home | KeyCode::Char('g') => Action::GoToFirst,
        KeyCode::End | KeyCode::Char('G') => Action::GoToLast,

        // Mode and selection
        KeyCode::Char('b') => Action::ToggleBulkMode,
        KeyCode::Char(' ') => Action::ToggleItem,
        KeyCode::Char('a') => Action::SelectAll,
        KeyCode::Char('x') => Action::DeselectAll,
        KeyCode::Char('i') => Action::InvertSelection,

        // Filters
        KeyCode::Char('/') => Action::EditTitleFilter,
        KeyCode::Char('r') => Action::EditRangeFilter,
        KeyCode::Char('c') => Action::ClearFilters,

        // Deletion
        KeyCode::Char('d') => Action::DeleteSelected,
        KeyCode::Char('D') => Action::DeleteAllVisible,

        // Overlays
        KeyCode::Char('s') => Action::ShowStats,
        KeyCode::Char('?') => Action::ShowHelp,

        _ => Action::Tick,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_browsing_keys() {
        assert_eq!(
            handle_key(key(KeyCode::Char('a')), AppMode::Browsing),
            Action::SelectAll
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('d')), AppMode::Browsing),
            Action::DeleteSelected
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('D')), AppMode::Browsing),
            Action::DeleteAllVisible
        );
    }

    #[test]
    fn test_edit_mode_captures_text() {
        let mode = AppMode::EditFilter(crate::app::FilterField::Title);
        assert_eq!(handle_key(key(KeyCode::Char('q')), mode), Action::Input('q'));
        assert_eq!(handle_key(key(KeyCode::Enter), mode), Action::ApplyFilter);
        assert_eq!(handle_key(key(KeyCode::Esc), mode), Action::CancelDialog);
    }

    #[test]
    fn test_confirm_mode() {
        assert_eq!(
            handle_key(key(KeyCode::Char('y')), AppMode::ConfirmDelete),
            Action::ConfirmDelete
        );
        assert_eq!(
            handle_key(key(KeyCode::Esc), AppMode::ConfirmDelete),
            Action::CancelDialog
        );
    }
}
