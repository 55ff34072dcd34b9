//! Derive host visibility requests from a feature.

use crate::models::Feature;
use crate::protocol::OutboundMessage;

/// The visibility every node of one feature should have on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityChange {
    pub node_ids: Vec<String>,
    pub visible: bool,
}

/// Pair the feature's own node items with its current visibility.
///
/// Only items directly owned by `feature` are collected; nested feature
/// references are skipped rather than descended into.
pub fn sync_visibility(feature: &Feature) -> VisibilityChange {
    VisibilityChange {
        node_ids: feature.node_ids(),
        visible: feature.visible,
    }
}

impl From<VisibilityChange> for OutboundMessage {
    fn from(change: VisibilityChange) -> Self {
        OutboundMessage::RequestChangeNodeVisible {
            nodes: change.node_ids,
            visible: change.visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;

    #[test]
    fn hidden_feature_reports_hidden_nodes() {
        let mut feature = Feature::new(1);
        feature.visible = false;
        feature.items = vec![Item::node("n1"), Item::node("n2")];

        let change = sync_visibility(&feature);
        assert_eq!(change.node_ids, vec!["n1", "n2"]);
        assert!(!change.visible);
    }

    #[test]
    fn converts_to_host_request() {
        let mut feature = Feature::new(1);
        feature.items.push(Item::node("n1"));

        let message: OutboundMessage = sync_visibility(&feature).into();
        assert_eq!(
            message,
            OutboundMessage::RequestChangeNodeVisible {
                nodes: vec!["n1".to_string()],
                visible: true,
            }
        );
    }
}
