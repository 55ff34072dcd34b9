//! Deferred view reconciliation.
//!
//! Mutations commit immediately; the view catches up on the next tick. All
//! commits between two ticks collapse into one diff against the snapshot
//! the view last rendered.

use crate::models::FeatureTree;
use crate::reconcile::{self, TreeDiff};
use crate::view::ViewTree;

#[derive(Debug, Default)]
pub struct RenderScheduler {
    rendered: FeatureTree,
    pending: bool,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_pending(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The snapshot the view currently shows.
    pub fn rendered(&self) -> &FeatureTree {
        &self.rendered
    }

    /// Bring `view` up to `current` if a reconciliation is pending.
    pub fn flush<V: ViewTree + ?Sized>(
        &mut self,
        current: &FeatureTree,
        view: &mut V,
    ) -> Option<TreeDiff> {
        if !self.pending {
            return None;
        }
        self.pending = false;

        let diff = reconcile::diff(&self.rendered, current);
        reconcile::apply(&diff, view);
        view.set_count(current.len());
        self.rendered = current.clone();

        tracing::debug!(
            removed = diff.removed.len(),
            updated = diff.updated.len(),
            added = diff.added.len(),
            "Reconciled view"
        );
        Some(diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::TextView;

    #[test]
    fn flush_without_pending_is_a_no_op() {
        let mut scheduler = RenderScheduler::new();
        let mut view = TextView::new();
        let tree = FeatureTree::new().create_feature(1).unwrap();

        assert!(scheduler.flush(&tree, &mut view).is_none());
        assert!(view.rows().is_empty());
    }

    #[test]
    fn commits_between_ticks_collapse_into_one_diff() {
        let mut scheduler = RenderScheduler::new();
        let mut view = TextView::new();

        let first = FeatureTree::new().create_feature(1).unwrap();
        scheduler.mark_pending();
        let second = first.create_feature(2).unwrap().delete_feature("1");
        scheduler.mark_pending();

        let diff = scheduler.flush(&second, &mut view).unwrap();
        assert!(diff.removed.is_empty());
        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.added[0].id, "2");
        assert_eq!(view.count(), 1);
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.rendered(), &second);
    }
}
