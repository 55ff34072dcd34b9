//! Dispatch table from inbound messages to tree mutations.
//!
//! | Event              | Mutation              | Follow-up                    |
//! |--------------------|-----------------------|------------------------------|
//! | `CREATE_FEATURE`   | `create_feature`      |                              |
//! | `DELETE_FEATURE`   | `delete_feature`      |                              |
//! | `DELETE_NODE`      | `remove_item`         |                              |
//! | `RENAME_FEATURE`   | `rename_feature`      |                              |
//! | `CHANGE_VISIBLE`   | `set_feature_visible` | visibility sync              |
//! | `ADD_NODES`        | `add_items`           | visibility sync              |
//! | `REQUEST_SYNC`     |                       | `REQUEST_SYNC_FEATURES`      |
//!
//! Every committed mutation is followed by a `REQUEST_UPDATE_FEATURES`
//! carrying the full snapshot. Visibility requests are emitted before that
//! snapshot, in the same dispatch.

use crate::error::Result;
use crate::models::{FeatureTree, Item, ItemKind};
use crate::protocol::{DomainEvent, HostMessage, OutboundMessage};
use crate::store::FeatureStore;
use crate::visibility::sync_visibility;

/// What one dispatch did.
#[derive(Debug, Default, PartialEq)]
pub struct Routed {
    /// A new snapshot was committed and the view needs reconciling.
    pub changed: bool,
    /// Requests for the host, in emission order.
    pub outbound: Vec<OutboundMessage>,
}

/// Apply one domain event to the store.
pub fn dispatch_event(store: &mut FeatureStore, event: DomainEvent) -> Result<Routed> {
    store.ensure_initialized()?;
    tracing::debug!(event = event.tag(), "Dispatching domain event");

    let mut routed = Routed::default();
    match event {
        DomainEvent::CreateFeature => on_create_feature(store, &mut routed)?,
        DomainEvent::DeleteFeature { id } => {
            let next = store.tree().delete_feature(&id);
            commit(store, next, &mut routed);
        }
        DomainEvent::DeleteItem { id } => {
            let next = store.tree().remove_item(&id);
            commit(store, next, &mut routed);
        }
        DomainEvent::RenameFeature { id, name, target } => {
            on_rename_feature(store, &id, &name, target, &mut routed)
        }
        DomainEvent::ChangeFeatureVisible { id, visible } => {
            let next = store.tree().set_feature_visible(&id, visible);
            sync_feature(&next, &id, &mut routed);
            commit(store, next, &mut routed);
        }
        DomainEvent::AddItems { feature_id, nodes } => {
            on_add_items(store, &feature_id, nodes, &mut routed)
        }
        DomainEvent::RequestSync => routed.outbound.push(OutboundMessage::RequestSyncFeatures),
    }
    Ok(routed)
}

/// Apply one host message to the store.
///
/// Host-originated trees are authoritative and are not echoed back.
pub fn dispatch_host(store: &mut FeatureStore, message: HostMessage) -> Result<Routed> {
    tracing::debug!(message = message.tag(), "Dispatching host message");

    let mut routed = Routed::default();
    match message {
        HostMessage::InitFeatures { features } => {
            let tree = FeatureTree::from_features(features)?;
            tracing::info!(features = tree.len(), "Initializing features");
            store.init(tree)?;
            routed.changed = true;
        }
        HostMessage::UpdateFeatures { features } => {
            store.ensure_initialized()?;
            let tree = FeatureTree::from_features(features)?;
            routed.changed = store.replace(tree);
        }
        HostMessage::UpdateSelection { nodes } => {
            tracing::debug!(nodes = nodes.len(), "Selection updated");
            store.set_selection(nodes);
        }
    }
    Ok(routed)
}

fn on_create_feature(store: &mut FeatureStore, routed: &mut Routed) -> Result<()> {
    // The index is spent even when the create is rejected, so a retry
    // moves past the collision instead of hitting it again.
    let index = store.next_index();
    store.advance_index();
    let next = store.tree().create_feature(index)?;
    commit(store, next, routed);
    Ok(())
}

fn on_rename_feature(
    store: &mut FeatureStore,
    id: &str,
    name: &str,
    target: ItemKind,
    routed: &mut Routed,
) {
    if target != ItemKind::Feature {
        tracing::debug!(id, target = target.as_str(), "Ignoring rename of non-feature");
        return;
    }
    let next = store.tree().rename_feature(id, name);
    commit(store, next, routed);
}

fn on_add_items(
    store: &mut FeatureStore,
    feature_id: &str,
    nodes: Option<Vec<Item>>,
    routed: &mut Routed,
) {
    let items = nodes.unwrap_or_else(|| store.selection().to_vec());
    let next = store.tree().add_items(feature_id, &items);
    sync_feature(&next, feature_id, routed);
    commit(store, next, routed);
}

/// Emit the visibility request for `feature_id` as it stands in `tree`.
fn sync_feature(tree: &FeatureTree, feature_id: &str, routed: &mut Routed) {
    if let Some(feature) = tree.get(feature_id) {
        routed.outbound.push(sync_visibility(feature).into());
    }
}

fn commit(store: &mut FeatureStore, next: FeatureTree, routed: &mut Routed) {
    if store.commit(next) {
        routed.changed = true;
        routed.outbound.push(OutboundMessage::RequestUpdateFeatures {
            features: store.tree().clone(),
        });
    } else {
        tracing::debug!("Mutation left the tree unchanged");
    }
}
