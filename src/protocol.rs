//! Wire shapes exchanged with the host application and the view layer.
//!
//! Host messages arrive in an envelope, `{"type": TAG, "value": {...}}`.
//! Domain events from the view and outbound requests are flat,
//! `{"type": TAG, ...fields}`. Parsing checks the tag before the body so
//! an unknown tag is reported as such, not as a malformed body.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{Feature, FeatureTree, Item, ItemKind};

const HOST_TAGS: &[&str] = &["INIT_FEATURES", "UPDATE_FEATURES", "UPDATE_SELECTION"];

const EVENT_TAGS: &[&str] = &[
    "CREATE_FEATURE",
    "DELETE_FEATURE",
    "DELETE_NODE",
    "RENAME_FEATURE",
    "CHANGE_VISIBLE",
    "ADD_NODES",
    "REQUEST_SYNC",
];

/// Messages pushed by the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostMessage {
    /// Seed the tree. Delivered once per session.
    InitFeatures { features: Vec<Feature> },
    /// Replace the tree wholesale with the host's copy.
    UpdateFeatures { features: Vec<Feature> },
    /// The host's current selection, consumed by a later `ADD_NODES`.
    UpdateSelection { nodes: Vec<Item> },
}

/// User intents raised by the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    CreateFeature,
    DeleteFeature {
        id: String,
    },
    #[serde(rename = "DELETE_NODE")]
    DeleteItem {
        id: String,
    },
    RenameFeature {
        id: String,
        name: String,
        /// What the rename targets; only features can be renamed.
        #[serde(rename = "targetType", default = "default_target")]
        target: ItemKind,
    },
    #[serde(rename = "CHANGE_VISIBLE")]
    ChangeFeatureVisible {
        id: String,
        visible: bool,
    },
    /// Attach items to a feature. Without `nodes`, the last host selection
    /// is used.
    #[serde(rename = "ADD_NODES")]
    AddItems {
        #[serde(rename = "featureId")]
        feature_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        nodes: Option<Vec<Item>>,
    },
    RequestSync,
}

fn default_target() -> ItemKind {
    ItemKind::Feature
}

impl DomainEvent {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::CreateFeature => "CREATE_FEATURE",
            Self::DeleteFeature { .. } => "DELETE_FEATURE",
            Self::DeleteItem { .. } => "DELETE_NODE",
            Self::RenameFeature { .. } => "RENAME_FEATURE",
            Self::ChangeFeatureVisible { .. } => "CHANGE_VISIBLE",
            Self::AddItems { .. } => "ADD_NODES",
            Self::RequestSync => "REQUEST_SYNC",
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        parse_tagged(raw, EVENT_TAGS)
    }
}

impl HostMessage {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::InitFeatures { .. } => "INIT_FEATURES",
            Self::UpdateFeatures { .. } => "UPDATE_FEATURES",
            Self::UpdateSelection { .. } => "UPDATE_SELECTION",
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        parse_tagged(raw, HOST_TAGS)
    }
}

/// Requests sent to the host. Fire-and-forget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutboundMessage {
    RequestChangeNodeVisible { nodes: Vec<String>, visible: bool },
    /// Full snapshot after every committed mutation.
    RequestUpdateFeatures { features: FeatureTree },
    RequestSyncFeatures,
}

/// Anything a transport may receive on its single inbound channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Host(HostMessage),
    Event(DomainEvent),
}

impl Inbound {
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        let tag = type_tag(&value)?;
        if HOST_TAGS.contains(&tag.as_str()) {
            Ok(Self::Host(serde_json::from_value(value)?))
        } else if EVENT_TAGS.contains(&tag.as_str()) {
            Ok(Self::Event(serde_json::from_value(value)?))
        } else {
            Err(Error::UnrecognizedEvent(tag))
        }
    }
}

fn parse_tagged<T: DeserializeOwned>(raw: &str, known: &[&str]) -> Result<T> {
    let value: Value = serde_json::from_str(raw)?;
    let tag = type_tag(&value)?;
    if !known.contains(&tag.as_str()) {
        return Err(Error::UnrecognizedEvent(tag));
    }
    Ok(serde_json::from_value(value)?)
}

fn type_tag(value: &Value) -> Result<String> {
    value
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::Malformed("missing \"type\" tag".to_string()))
}
