use feature_flags::models::*;
use feature_flags::InvariantError;
use speculate2::speculate;

fn seeded_tree() -> FeatureTree {
    FeatureTree::new()
        .create_feature(1)
        .expect("Failed to create feature 1")
        .create_feature(2)
        .expect("Failed to create feature 2")
        .add_items("1", &[Item::node("n1"), Item::node("n2")])
        .add_items("2", &[Item::node("n3")])
}

speculate! {
    before {
        let tree = seeded_tree();
    }

    describe "create_feature" {
        it "appends a visible empty feature named after the index" {
            let next = FeatureTree::new().create_feature(1).expect("Failed to create");

            assert_eq!(next.len(), 1);
            let feature = &next.features()[0];
            assert_eq!(feature.id, "1");
            assert_eq!(feature.name, "Feature 1");
            assert_eq!(feature.kind, FeatureKind::Feature);
            assert!(feature.visible);
            assert!(feature.items.is_empty());
        }

        it "appends at the end" {
            let next = tree.create_feature(3).expect("Failed to create");
            let ids: Vec<&str> = next.iter().map(|f| f.id.as_str()).collect();
            assert_eq!(ids, vec!["1", "2", "3"]);
        }

        it "rejects an index that collides with an existing id" {
            let err = tree.create_feature(2).unwrap_err();
            assert_eq!(err, InvariantError::DuplicateFeatureId("2".to_string()));
        }

        it "round-trips with delete_feature" {
            let created = tree.create_feature(7).expect("Failed to create");
            assert_eq!(created.delete_feature("7"), tree);
        }
    }

    describe "delete_feature" {
        it "removes the matching feature" {
            let next = tree.delete_feature("1");
            assert_eq!(next.len(), 1);
            assert!(next.get("1").is_none());
            assert!(next.get("2").is_some());
        }
    }

    describe "rename_feature" {
        it "sets the name on the matching feature only" {
            let next = tree.rename_feature("2", "Dark mode");
            assert_eq!(next.get("2").unwrap().name, "Dark mode");
            assert_eq!(next.get("1").unwrap().name, "Feature 1");
        }
    }

    describe "set_feature_visible" {
        it "sets the flag without touching items" {
            let next = tree.set_feature_visible("1", false);
            let feature = next.get("1").unwrap();
            assert!(!feature.visible);
            assert_eq!(feature.items.len(), 2);
        }
    }

    describe "add_items" {
        it "appends in order without deduplicating" {
            let next = tree.add_items("1", &[Item::node("n9"), Item::node("n1")]);
            let ids: Vec<&str> = next.get("1").unwrap().items.iter().map(|i| i.id.as_str()).collect();
            assert_eq!(ids, vec!["n1", "n2", "n9", "n1"]);
        }
    }

    describe "remove_item" {
        it "removes the item from its feature and leaves siblings alone" {
            let next = tree.remove_item("n2");
            assert_eq!(next.get("1").unwrap().items, vec![Item::node("n1")]);
            assert_eq!(next.get("2").unwrap().items, tree.get("2").unwrap().items);
        }

        it "removes only the first occurrence across features" {
            let shared = tree.add_items("2", &[Item::node("n1")]);
            let next = shared.remove_item("n1");
            assert!(!next.get("1").unwrap().contains_item("n1"));
            assert!(next.get("2").unwrap().contains_item("n1"));
        }
    }

    describe "missing targets" {
        it "leaves the tree unchanged for every id-taking operation" {
            assert_eq!(tree.delete_feature("missing"), tree);
            assert_eq!(tree.rename_feature("missing", "x"), tree);
            assert_eq!(tree.set_feature_visible("missing", false), tree);
            assert_eq!(tree.add_items("missing", &[Item::node("n4")]), tree);
            assert_eq!(tree.remove_item("missing"), tree);
        }
    }
}
