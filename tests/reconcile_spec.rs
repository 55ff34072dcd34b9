use feature_flags::models::*;
use feature_flags::reconcile::{apply, diff, TreeDiff};
use feature_flags::view::{TextView, ViewTree};
use speculate2::speculate;

fn tree_with(ids: &[u64]) -> FeatureTree {
    FeatureTree::from_features(ids.iter().copied().map(Feature::new).collect())
        .expect("Failed to build tree")
}

/// Records the order in which a diff is applied.
#[derive(Default)]
struct RecordingView {
    calls: Vec<String>,
}

impl ViewTree for RecordingView {
    fn remove(&mut self, feature_id: &str) {
        self.calls.push(format!("remove {}", feature_id));
    }

    fn update(&mut self, feature: &Feature) {
        self.calls.push(format!("update {}", feature.id));
    }

    fn append(&mut self, feature: &Feature) {
        self.calls.push(format!("append {}", feature.id));
    }

    fn set_count(&mut self, count: usize) {
        self.calls.push(format!("count {}", count));
    }
}

speculate! {
    describe "diff" {
        it "is empty for identical snapshots" {
            let tree = tree_with(&[1, 2, 3]);
            assert_eq!(diff(&tree, &tree.clone()), TreeDiff::default());
        }

        it "reports an added feature and every common feature as updated" {
            let previous = tree_with(&[1, 2]);
            let next = previous.create_feature(3).expect("Failed to create");

            let result = diff(&previous, &next);
            assert!(result.removed.is_empty());
            assert_eq!(result.added, vec![Feature::new(3)]);
            assert_eq!(result.updated, vec![Feature::new(1), Feature::new(2)]);
        }

        it "reports removed features from the previous snapshot" {
            let previous = tree_with(&[1, 2, 3]);
            let next = previous.delete_feature("2");

            let result = diff(&previous, &next);
            assert_eq!(result.removed, vec![Feature::new(2)]);
            assert!(result.added.is_empty());
            assert_eq!(result.updated.len(), 2);
        }

        it "carries the next value for content changes" {
            let previous = tree_with(&[1]);
            let next = previous.rename_feature("1", "Checkout");

            let result = diff(&previous, &next);
            assert_eq!(result.updated.len(), 1);
            assert_eq!(result.updated[0].name, "Checkout");
        }

        it "keeps next order for added features" {
            let previous = tree_with(&[1]);
            let next = tree_with(&[5, 1, 4]);

            let result = diff(&previous, &next);
            let added: Vec<&str> = result.added.iter().map(|f| f.id.as_str()).collect();
            assert_eq!(added, vec!["5", "4"]);
        }
    }

    describe "apply" {
        it "removes before updating and appending" {
            let previous = tree_with(&[1, 2]);
            let next = tree_with(&[2, 3]);
            let mut view = RecordingView::default();

            apply(&diff(&previous, &next), &mut view);
            assert_eq!(view.calls, vec!["remove 1", "update 2", "append 3"]);
        }

        it "brings a text view in line with the next snapshot" {
            let previous = tree_with(&[1, 2]);
            let mut view = TextView::new();
            apply(&diff(&FeatureTree::new(), &previous), &mut view);

            let next = previous
                .delete_feature("1")
                .set_feature_visible("2", false)
                .create_feature(3)
                .expect("Failed to create");
            apply(&diff(&previous, &next), &mut view);

            let ids: Vec<&str> = view.rows().iter().map(|r| r.id.as_str()).collect();
            assert_eq!(ids, vec!["2", "3"]);
            assert!(!view.row("2").unwrap().visible);
        }
    }
}
