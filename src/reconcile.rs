//! Diff two feature tree snapshots into view updates.
//!
//! Features are matched by id only. The diff does not detect reordering and
//! does not look inside a feature: any feature present in both snapshots is
//! reported as updated and the view re-applies its full value, which is
//! idempotent.

use std::collections::HashSet;

use crate::models::{Feature, FeatureTree};
use crate::view::ViewTree;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeDiff {
    /// In `previous` only.
    pub removed: Vec<Feature>,
    /// In both, carrying the `next` value, in `next` order.
    pub updated: Vec<Feature>,
    /// In `next` only, in `next` order.
    pub added: Vec<Feature>,
}

impl TreeDiff {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.updated.is_empty() && self.added.is_empty()
    }
}

/// Compute the view updates that take `previous` to `next`.
///
/// Identical snapshots produce an empty diff.
pub fn diff(previous: &FeatureTree, next: &FeatureTree) -> TreeDiff {
    if previous == next {
        return TreeDiff::default();
    }

    let previous_ids: HashSet<&str> = previous.iter().map(|f| f.id.as_str()).collect();
    let next_ids: HashSet<&str> = next.iter().map(|f| f.id.as_str()).collect();

    let removed = previous
        .iter()
        .filter(|f| !next_ids.contains(f.id.as_str()))
        .cloned()
        .collect();

    let (updated, added): (Vec<Feature>, Vec<Feature>) = next
        .iter()
        .cloned()
        .partition(|f| previous_ids.contains(f.id.as_str()));

    TreeDiff {
        removed,
        updated,
        added,
    }
}

/// Apply `diff` to `view`: removals first, then updates, then appends.
pub fn apply<V: ViewTree + ?Sized>(diff: &TreeDiff, view: &mut V) {
    for feature in &diff.removed {
        view.remove(&feature.id);
    }
    for feature in &diff.updated {
        view.update(feature);
    }
    for feature in &diff.added {
        view.append(feature);
    }
}
