//! Feature tree session engine.
//!
//! Keeps three things consistent for one design-tool plugin session: the
//! authoritative [`models::FeatureTree`], the rendered view that mirrors it,
//! and the visibility of the host objects its features reference.
//!
//! Inbound message → [`router`] → tree mutation committed in the [`store`] →
//! host requests sent → on the next tick the [`scheduler`] diffs the last
//! rendered snapshot against the current one ([`reconcile`]) and updates the
//! [`view`].

pub mod api;
pub mod config;
pub mod error;
pub mod host;
pub mod models;
pub mod protocol;
pub mod reconcile;
pub mod router;
pub mod scheduler;
pub mod session;
pub mod stdio;
pub mod store;
pub mod tree;
pub mod view;
pub mod visibility;

pub use error::{Error, InvariantError, Result};
pub use session::Session;
