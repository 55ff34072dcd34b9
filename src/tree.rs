//! Copy-on-write mutations on [`FeatureTree`].
//!
//! Every operation borrows the current snapshot and returns a new one. An
//! operation aimed at a feature or item that does not exist returns a tree
//! equal to the input.

use crate::error::InvariantError;
use crate::models::{Feature, FeatureTree, Item};

impl FeatureTree {
    /// Append a new visible, empty feature with id `index`.
    ///
    /// `index` comes from a monotonically increasing creation counter; an
    /// index that collides with an existing feature id is rejected.
    pub fn create_feature(&self, index: u64) -> Result<Self, InvariantError> {
        let feature = Feature::new(index);
        if self.contains(&feature.id) {
            return Err(InvariantError::DuplicateFeatureId(feature.id));
        }

        let mut features = self.features.clone();
        features.push(feature);
        Ok(Self { features })
    }

    pub fn delete_feature(&self, feature_id: &str) -> Self {
        let features = self
            .features
            .iter()
            .filter(|f| f.id != feature_id)
            .cloned()
            .collect();
        Self { features }
    }

    pub fn rename_feature(&self, feature_id: &str, name: &str) -> Self {
        self.with_feature(feature_id, |feature| feature.name = name.to_string())
    }

    pub fn set_feature_visible(&self, feature_id: &str, visible: bool) -> Self {
        self.with_feature(feature_id, |feature| feature.visible = visible)
    }

    /// Append `items` to the end of a feature's item list. No deduplication.
    pub fn add_items(&self, feature_id: &str, items: &[Item]) -> Self {
        self.with_feature(feature_id, |feature| {
            feature.items.extend(items.iter().cloned())
        })
    }

    /// Remove the first item with `item_id`, searching features in order.
    ///
    /// Item ids are only unique within one feature. When the same id is
    /// attached to several features, only the first feature loses it.
    pub fn remove_item(&self, item_id: &str) -> Self {
        let mut features = self.features.clone();
        let owners: Vec<usize> = features
            .iter()
            .enumerate()
            .filter(|(_, f)| f.contains_item(item_id))
            .map(|(i, _)| i)
            .collect();

        if let Some(&first) = owners.first() {
            if owners.len() > 1 {
                tracing::warn!(
                    item_id,
                    feature_id = %features[first].id,
                    owners = owners.len(),
                    "Item id is attached to several features; removing from the first only"
                );
            }
            let items = &mut features[first].items;
            if let Some(pos) = items.iter().position(|item| item.id == item_id) {
                items.remove(pos);
            }
        }

        Self { features }
    }

    /// Clone the tree and apply `update` to the matching feature, if any.
    fn with_feature(&self, feature_id: &str, update: impl FnOnce(&mut Feature)) -> Self {
        let mut features = self.features.clone();
        if let Some(feature) = features.iter_mut().find(|f| f.id == feature_id) {
            update(feature);
        }
        Self { features }
    }
}
