//! The owned state handle for one session.

use crate::error::{Error, Result};
use crate::models::{FeatureTree, Item};

/// Holds the current [`FeatureTree`] snapshot and the inputs mutations need.
///
/// There is exactly one store per session and it is the only place a
/// snapshot is committed. Readers get a borrow of the current snapshot;
/// nothing downstream keeps a reference to tree state.
#[derive(Debug)]
pub struct FeatureStore {
    tree: FeatureTree,
    next_index: u64,
    selection: Vec<Item>,
    initialized: bool,
}

impl Default for FeatureStore {
    fn default() -> Self {
        Self {
            tree: FeatureTree::new(),
            next_index: 1,
            selection: Vec::new(),
            initialized: false,
        }
    }
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store. Allowed once.
    pub fn init(&mut self, tree: FeatureTree) -> Result<()> {
        if self.initialized {
            return Err(Error::AlreadyInitialized);
        }
        self.next_index = seed_index(&tree);
        self.tree = tree;
        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    pub fn tree(&self) -> &FeatureTree {
        &self.tree
    }

    /// Commit `next` as the current snapshot. Returns `false`, and keeps the
    /// current snapshot, when `next` is equal to it.
    pub fn commit(&mut self, next: FeatureTree) -> bool {
        if next == self.tree {
            return false;
        }
        self.tree = next;
        true
    }

    /// Replace the tree with the host's copy.
    ///
    /// The creation counter never moves backwards, so ids handed out earlier
    /// in the session are not reissued.
    pub fn replace(&mut self, tree: FeatureTree) -> bool {
        self.next_index = self.next_index.max(seed_index(&tree));
        self.commit(tree)
    }

    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    pub fn advance_index(&mut self) {
        self.next_index += 1;
    }

    pub fn selection(&self) -> &[Item] {
        &self.selection
    }

    pub fn set_selection(&mut self, nodes: Vec<Item>) {
        self.selection = nodes;
    }
}

/// First creation index that cannot collide with a numeric id in `tree`.
fn seed_index(tree: &FeatureTree) -> u64 {
    let highest = tree
        .iter()
        .filter_map(|f| f.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (tree.len() as u64 + 1).max(highest.saturating_add(1))
}
