//! Rendered view of the feature tree.
//!
//! The reconciler drives a [`ViewTree`]: a list of rendered feature subtrees
//! addressable by feature id. [`TextView`] keeps that list in memory and
//! renders it as a text tree.

use crate::models::{Feature, Item, ItemKind};

const VISIBLE: char = '●';
const HIDDEN: char = '○';
const NESTED: char = '▸';

/// Consumer side of a reconciliation pass.
pub trait ViewTree {
    /// Detach and discard the subtree for `feature_id`.
    fn remove(&mut self, feature_id: &str);

    /// Re-synchronize the subtree addressed by `feature.id` from the full
    /// feature value. Subtrees that are not rendered are left alone.
    fn update(&mut self, feature: &Feature);

    /// Construct a subtree for `feature` and attach it at the end.
    fn append(&mut self, feature: &Feature);

    fn set_count(&mut self, count: usize);
}

/// One rendered item row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: String,
    pub label: String,
    pub nested: bool,
}

impl From<&Item> for ItemRow {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            label: item.name.clone().unwrap_or_else(|| item.id.clone()),
            nested: item.kind == ItemKind::Feature,
        }
    }
}

/// A rendered feature subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRow {
    pub id: String,
    pub name: String,
    pub visible: bool,
    pub items: Vec<ItemRow>,
}

impl FeatureRow {
    pub fn new(feature: &Feature) -> Self {
        let mut row = Self {
            id: feature.id.clone(),
            name: String::new(),
            visible: true,
            items: Vec::new(),
        };
        row.update(feature);
        row
    }

    /// Name, visibility indicator and item list, all taken from `feature`.
    pub fn update(&mut self, feature: &Feature) {
        self.name = feature.name.clone();
        self.visible = feature.visible;
        self.items = feature.items.iter().map(ItemRow::from).collect();
    }
}

/// In-memory view rendered as text.
#[derive(Debug, Clone, Default)]
pub struct TextView {
    rows: Vec<FeatureRow>,
    count: usize,
}

impl TextView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn row(&self, feature_id: &str) -> Option<&FeatureRow> {
        self.rows.iter().find(|row| row.id == feature_id)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Render the view.
    ///
    /// Example output:
    /// ```text
    /// Features (2)
    /// ● Checkout
    /// ├── Pay button
    /// └── ▸ 3
    /// ○ Dark mode
    /// ```
    pub fn render(&self) -> String {
        let mut output = format!("Features ({})\n", self.count);
        for row in &self.rows {
            render_row(&mut output, row);
        }
        output
    }
}

impl ViewTree for TextView {
    fn remove(&mut self, feature_id: &str) {
        self.rows.retain(|row| row.id != feature_id);
    }

    fn update(&mut self, feature: &Feature) {
        if let Some(row) = self.rows.iter_mut().find(|row| row.id == feature.id) {
            row.update(feature);
        }
    }

    fn append(&mut self, feature: &Feature) {
        self.rows.push(FeatureRow::new(feature));
    }

    fn set_count(&mut self, count: usize) {
        self.count = count;
    }
}

fn render_row(output: &mut String, row: &FeatureRow) {
    let symbol = if row.visible { VISIBLE } else { HIDDEN };
    output.push(symbol);
    output.push(' ');
    output.push_str(&row.name);
    output.push('\n');

    for (i, item) in row.items.iter().enumerate() {
        let is_last = i == row.items.len() - 1;
        let branch = if is_last { "└── " } else { "├── " };
        output.push_str(branch);
        if item.nested {
            output.push(NESTED);
            output.push(' ');
        }
        output.push_str(&item.label);
        output.push('\n');
    }
}
