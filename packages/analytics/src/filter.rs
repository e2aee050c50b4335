//! Violence type filter set.

use std::collections::BTreeSet;

use conflict_map_event_models::{ConflictEvent, ViolenceType};
use serde::{Deserialize, Serialize};

/// The set of violence types currently selected in the filter bar.
///
/// An empty set means "no filter": every event passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeFilter {
    types: BTreeSet<ViolenceType>,
}

impl TypeFilter {
    /// An empty (pass-everything) filter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            types: BTreeSet::new(),
        }
    }

    /// Whether no type is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of selected types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether `violence_type` is selected.
    #[must_use]
    pub fn contains(&self, violence_type: &ViolenceType) -> bool {
        self.types.contains(violence_type)
    }

    /// Whether an event of type `violence_type` passes this filter.
    #[must_use]
    pub fn allows(&self, violence_type: &ViolenceType) -> bool {
        self.is_empty() || self.contains(violence_type)
    }

    /// Adds `violence_type` if absent, removes it if present.
    pub fn toggle(&mut self, violence_type: ViolenceType) {
        if !self.types.remove(&violence_type) {
            self.types.insert(violence_type);
        }
    }

    /// Returns a copy with `violence_type` toggled. Applying this twice
    /// with the same type yields the original set.
    #[must_use]
    pub fn toggled(&self, violence_type: ViolenceType) -> Self {
        let mut next = self.clone();
        next.toggle(violence_type);
        next
    }

    /// Deselects every type.
    pub fn clear(&mut self) {
        self.types.clear();
    }

    /// Selected types in key order.
    pub fn iter(&self) -> impl Iterator<Item = &ViolenceType> {
        self.types.iter()
    }

    /// Parses a comma-separated list of type keys (`"non-state,one-sided"`).
    /// Unparseable entries are skipped.
    #[must_use]
    pub fn parse_list(list: &str) -> Self {
        list.split(',')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| s.trim().parse().ok())
            .collect()
    }
}

impl FromIterator<ViolenceType> for TypeFilter {
    fn from_iter<I: IntoIterator<Item = ViolenceType>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

/// Returns the events that pass `filter`, in their original order.
///
/// An empty filter returns every event.
#[must_use]
pub fn apply_filter<'a>(events: &'a [ConflictEvent], filter: &TypeFilter) -> Vec<&'a ConflictEvent> {
    if filter.is_empty() {
        return events.iter().collect();
    }
    events
        .iter()
        .filter(|e| filter.contains(&e.violence_type()))
        .collect()
}

/// Types offered as filter options: the three known violence types.
#[must_use]
pub fn available_types() -> Vec<ViolenceType> {
    ViolenceType::KNOWN.to_vec()
}
