use serde::{Deserialize, Serialize};

/// What an [`Item`] refers to.
///
/// - `Node`: an object on the host's canvas, addressed by the host's own id
/// - `Feature`: a nested sub-feature, addressed by feature id
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    Node,
    Feature,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "NODE",
            Self::Feature => "FEATURE",
        }
    }
}

/// A leaf reference to exactly one external object.
///
/// Items are immutable once attached to a feature; the only change they
/// ever see is removal. The `id` is unique within the owning feature but
/// may repeat across features, since it is the host's id for the object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Display label supplied by the host selection, carried verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Item {
    /// A reference to a host canvas object.
    pub fn node(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ItemKind::Node,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_node(&self) -> bool {
        self.kind == ItemKind::Node
    }
}

/// Type marker serialized as `"type": "FEATURE"` on every feature.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureKind {
    #[default]
    Feature,
}

/// A named container of items.
///
/// `visible` is the single authoritative visibility flag for everything the
/// feature references; it is never derived from item state. Item order is
/// render order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: FeatureKind,
    pub visible: bool,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Feature {
    /// A fresh, visible, empty feature for creation counter `index`.
    pub fn new(index: u64) -> Self {
        Self {
            id: index.to_string(),
            name: format!("Feature {}", index),
            kind: FeatureKind::Feature,
            visible: true,
            items: Vec::new(),
        }
    }

    /// Ids of the node items owned directly by this feature, in order.
    pub fn node_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.is_node())
            .map(|item| item.id.clone())
            .collect()
    }

    pub fn contains_item(&self, item_id: &str) -> bool {
        self.items.iter().any(|item| item.id == item_id)
    }
}
