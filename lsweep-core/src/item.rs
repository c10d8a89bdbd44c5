use std::fmt;

/// Stable identifier for a list item
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque handle for one rendered list entry, as captured by the host page
/// adapter. Any of the identifying fields may be missing; the identity
/// resolver tries them in priority order.
#[derive(Debug, Clone, Default)]
pub struct RawItem {
    /// Display title of the entry
    pub title: String,
    /// href of the entry's watch link, if one was rendered
    pub watch_href: Option<String>,
    /// The entry's own data attribute carrying an id
    pub id_attr: Option<String>,
    /// A nested thumbnail element's data attribute carrying an id
    pub thumb_id_attr: Option<String>,
}

/// A resolved list item at its current render position.
///
/// Positions are 1-based and assigned by render order on every pass; they are
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: ItemId,
    pub title: String,
    pub position: usize,
}
