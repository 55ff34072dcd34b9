//! Domain models for the feature session.
//!
//! # Core Concepts
//!
//! - [`Feature`]: A named, user-editable container with a single visibility flag
//!   and an ordered list of items.
//! - [`Item`]: A reference to one external object (a host canvas node) or to a
//!   nested sub-feature.
//! - [`FeatureTree`]: The authoritative ordered list of top-level features. It is
//!   replaced wholesale on every mutation, never edited in place.

mod feature;
mod feature_tree;

pub use feature::*;
pub use feature_tree::*;
