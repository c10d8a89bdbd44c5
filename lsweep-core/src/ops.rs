use crate::item::ItemId;
use crate::selection::SelectionSet;

/// Counts reported by a select-all pass over the visible list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectOutcome {
    pub newly_selected: usize,
    pub already_selected: usize,
}

/// Counts reported by a deselect-all pass over the visible list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeselectOutcome {
    pub newly_deselected: usize,
    pub already_deselected: usize,
}

/// Select every visible id not already selected. Hidden items are never
/// touched; any clear-before-select policy is the caller's responsibility.
pub fn select_all(selection: &mut SelectionSet, visible: &[ItemId]) -> SelectOutcome {
    let mut outcome = SelectOutcome::default();

    for id in visible {
        if selection.insert(id.clone()) {
            outcome.newly_selected += 1;
        } else {
            outcome.already_selected += 1;
        }
    }

    outcome
}

/// Deselect every visible id that is currently selected. Selections outside
/// the visible list are preserved.
pub fn deselect_all(selection: &mut SelectionSet, visible: &[ItemId]) -> DeselectOutcome {
    let mut outcome = DeselectOutcome::default();

    for id in visible {
        if selection.remove(id) {
            outcome.newly_deselected += 1;
        } else {
            outcome.already_deselected += 1;
        }
    }

    outcome
}

/// Flip membership for every visible id. Returns the number flipped.
pub fn invert(selection: &mut SelectionSet, visible: &[ItemId]) -> usize {
    for id in visible {
        if !selection.remove(id) {
            selection.insert(id.clone());
        }
    }

    visible.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<ItemId> {
        names.iter().map(|n| ItemId::from(*n)).collect()
    }

    #[test]
    fn test_select_all_counts() {
        let visible = ids(&["aaaaaaaaaa", "bbbbbbbbbb", "cccccccccc"]);
        let mut selection = SelectionSet::new();
        selection.insert(visible[0].clone());

        let outcome = select_all(&mut selection, &visible);
        assert_eq!(outcome.newly_selected, 2);
        assert_eq!(outcome.already_selected, 1);
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn test_select_then_deselect_restricted_to_visible() {
        let visible = ids(&["aaaaaaaaaa", "bbbbbbbbbb"]);
        let offscreen = ItemId::from("zzzzzzzzzz");

        let mut selection = SelectionSet::new();
        selection.insert(offscreen.clone());

        select_all(&mut selection, &visible);
        let outcome = deselect_all(&mut selection, &visible);

        assert_eq!(outcome.newly_deselected, 2);
        // The selection outside the visible set is preserved
        assert_eq!(selection.len(), 1);
        assert!(selection.contains(&offscreen));
    }

    #[test]
    fn test_deselect_all_counts() {
        let visible = ids(&["aaaaaaaaaa", "bbbbbbbbbb", "cccccccccc"]);
        let mut selection = SelectionSet::new();
        selection.insert(visible[1].clone());

        let outcome = deselect_all(&mut selection, &visible);
        assert_eq!(outcome.newly_deselected, 1);
        assert_eq!(outcome.already_deselected, 2);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_invert_twice_restores_selection() {
        let visible = ids(&["aaaaaaaaaa", "bbbbbbbbbb", "cccccccccc"]);
        let mut selection = SelectionSet::new();
        selection.insert(visible[0].clone());
        selection.insert(visible[2].clone());

        let before: Vec<bool> = visible.iter().map(|id| selection.contains(id)).collect();

        assert_eq!(invert(&mut selection, &visible), 3);
        assert!(!selection.contains(&visible[0]));
        assert!(selection.contains(&visible[1]));

        assert_eq!(invert(&mut selection, &visible), 3);
        let after: Vec<bool> = visible.iter().map(|id| selection.contains(id)).collect();
        assert_eq!(before, after);
    }
}
