use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::Feature;
use crate::error::InvariantError;

/// The authoritative ordered list of top-level features.
///
/// A `FeatureTree` is a value: every mutation in [`crate::tree`] returns a
/// new tree and leaves the receiver untouched, so any two snapshots can be
/// diffed by value. Feature ids are unique across the tree; constructing a
/// tree from a list with duplicate ids fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Feature>", into = "Vec<Feature>")]
pub struct FeatureTree {
    pub(crate) features: Vec<Feature>,
}

impl FeatureTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from host-supplied features, rejecting duplicate ids.
    pub fn from_features(features: Vec<Feature>) -> Result<Self, InvariantError> {
        let mut seen = HashSet::with_capacity(features.len());
        for feature in &features {
            if !seen.insert(feature.id.as_str()) {
                return Err(InvariantError::DuplicateFeatureId(feature.id.clone()));
            }
        }
        Ok(Self { features })
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    pub fn get(&self, feature_id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == feature_id)
    }

    pub fn contains(&self, feature_id: &str) -> bool {
        self.get(feature_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn into_features(self) -> Vec<Feature> {
        self.features
    }
}

impl TryFrom<Vec<Feature>> for FeatureTree {
    type Error = InvariantError;

    fn try_from(features: Vec<Feature>) -> Result<Self, Self::Error> {
        Self::from_features(features)
    }
}

impl From<FeatureTree> for Vec<Feature> {
    fn from(tree: FeatureTree) -> Self {
        tree.features
    }
}

impl<'a> IntoIterator for &'a FeatureTree {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_feature_ids() {
        let err = FeatureTree::from_features(vec![Feature::new(1), Feature::new(1)]).unwrap_err();
        assert_eq!(err, InvariantError::DuplicateFeatureId("1".to_string()));
    }

    #[test]
    fn serializes_as_bare_array() {
        let tree = FeatureTree::from_features(vec![Feature::new(1)]).unwrap();
        let json = serde_json::to_string(&tree).unwrap();
        assert!(json.starts_with('['));

        let back: FeatureTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn deserializing_duplicates_fails() {
        let json = r#"[{"id":"1","name":"a","visible":true},{"id":"1","name":"b","visible":true}]"#;
        assert!(serde_json::from_str::<FeatureTree>(json).is_err());
    }
}
