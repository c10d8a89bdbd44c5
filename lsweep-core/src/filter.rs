use std::collections::HashSet;

use crate::item::{ItemId, ListItem};

/// Positional constraint parsed from a single text field.
///
/// Accepts a bare integer or a hyphenated range; all bounds are 1-based and
/// inclusive. A non-numeric bound is treated as unconstrained for that bound,
/// never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeSpec {
    #[default]
    Unconstrained,
    /// Exactly position n
    Exact(usize),
    /// Position n and beyond
    From(usize),
    /// Up to and including position n
    To(usize),
    /// Positions lo..=hi
    Between(usize, usize),
}

impl RangeSpec {
    /// Parse user input like "1-10", "5-", "-20" or "7".
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::Unconstrained;
        }

        if let Some((start, end)) = input.split_once('-') {
            let lo = start.trim().parse::<usize>().ok();
            let hi = end.trim().parse::<usize>().ok();
            match (lo, hi) {
                (Some(lo), Some(hi)) => Self::Between(lo, hi),
                (Some(lo), None) => Self::From(lo),
                (None, Some(hi)) => Self::To(hi),
                (None, None) => Self::Unconstrained,
            }
        } else {
            match input.parse::<usize>() {
                Ok(n) => Self::Exact(n),
                Err(_) => Self::Unconstrained,
            }
        }
    }

    /// Whether a 1-based render position passes this constraint
    pub fn matches(&self, position: usize) -> bool {
        match *self {
            Self::Unconstrained => true,
            Self::Exact(n) => position == n,
            Self::From(n) => position >= n,
            Self::To(n) => position <= n,
            Self::Between(lo, hi) => position >= lo && position <= hi,
        }
    }

    pub fn is_constrained(&self) -> bool {
        !matches!(self, Self::Unconstrained)
    }
}

/// Combined title and position predicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Lowercased, trimmed title substring; empty means no constraint
    title: String,
    range: RangeSpec,
}

impl FilterCriteria {
    pub fn new(title: &str, range_text: &str) -> Self {
        Self {
            title: title.trim().to_lowercase(),
            range: RangeSpec::parse(range_text),
        }
    }

    /// Whether any constraint is in effect
    pub fn is_active(&self) -> bool {
        !self.title.is_empty() || self.range.is_constrained()
    }

    pub fn range(&self) -> RangeSpec {
        self.range
    }

    /// Visibility predicate: title match AND range match
    pub fn matches(&self, item: &ListItem) -> bool {
        let title_match = self.title.is_empty() || item.title.to_lowercase().contains(&self.title);
        title_match && self.range.matches(item.position)
    }
}

/// Result of one visibility recomputation
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Visible item ids in render order
    pub visible: Vec<ItemId>,
    /// Rendered items the filter currently hides
    pub hidden: HashSet<ItemId>,
}

impl FilterOutcome {
    pub fn is_visible(&self, id: &ItemId) -> bool {
        self.visible.contains(id)
    }
}

/// Compute visibility for every rendered item under the given criteria.
///
/// Pure function of the current render order and the criteria; callers must
/// recompute on every criteria change and render-list mutation, never cache
/// across one.
pub fn apply_filters(criteria: &FilterCriteria, items: &[ListItem]) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();

    for item in items {
        if criteria.matches(item) {
            outcome.visible.push(item.id.clone());
        } else {
            outcome.hidden.insert(item.id.clone());
        }
    }

    outcome
}
