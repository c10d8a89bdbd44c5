use std::collections::HashSet;

use crate::item::ItemId;

/// The set of selected item identifiers; source of truth for bulk operations.
///
/// Insertion order is irrelevant. A member may or may not correspond to a
/// currently rendered item — items scroll out and re-render — so consumers
/// must re-validate against current visibility before acting on members.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ids: HashSet<ItemId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the id was newly added
    pub fn insert(&mut self, id: ItemId) -> bool {
        self.ids.insert(id)
    }

    /// Returns true if the id was present
    pub fn remove(&mut self, id: &ItemId) -> bool {
        self.ids.remove(id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.ids.iter()
    }
}

impl FromIterator<ItemId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove_contains() {
        let mut set = SelectionSet::new();
        assert!(set.insert(ItemId::from("item-000000001")));
        assert!(!set.insert(ItemId::from("item-000000001")));
        assert!(set.contains(&ItemId::from("item-000000001")));
        assert_eq!(set.len(), 1);

        assert!(set.remove(&ItemId::from("item-000000001")));
        assert!(!set.remove(&ItemId::from("item-000000001")));
        assert!(set.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut set: SelectionSet = ["aaaaaaaaaa", "bbbbbbbbbb"]
            .into_iter()
            .map(ItemId::from)
            .collect();
        assert_eq!(set.len(), 2);
        set.clear();
        assert!(set.is_empty());
    }
}
