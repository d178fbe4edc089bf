use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::{ControlType, FormItem};

/// The root aggregate: form metadata plus the ordered item tree.
///
/// A definition owns its tree exclusively. It is always replaced wholesale
/// (seed, editor text, or generative service, each through the validator
/// gate), never patched in place; every query here is pure and
/// side-effect-free.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormDefinition {
    pub title: String,
    pub version: String,
    pub publisher: String,
    pub items: Vec<FormItem>,
}

impl FormDefinition {
    pub fn new(
        title: impl Into<String>,
        version: impl Into<String>,
        publisher: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            publisher: publisher.into(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: FormItem) -> Self {
        self.items.push(item);
        self
    }

    /// Depth-first walk over every node in authored order. Root items are
    /// visited at depth 0.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a FormItem, usize)) {
        walk_items(&self.items, 0, visit);
    }

    /// All leaf fields, depth-first in authored order.
    pub fn leaf_fields(&self) -> Vec<&FormItem> {
        let mut leaves = Vec::new();
        self.walk(&mut |item, _| {
            if !item.is_container() {
                leaves.push(item);
            }
        });
        leaves
    }

    /// Look up an item by id anywhere in the tree.
    pub fn find(&self, id: &str) -> Option<&FormItem> {
        let mut found = None;
        self.walk(&mut |item, _| {
            if found.is_none() && item.id() == id {
                found = Some(item);
            }
        });
        found
    }

    /// Node counts per control type, in deterministic tag order.
    pub fn counts_by_type(&self) -> BTreeMap<ControlType, usize> {
        let mut counts = BTreeMap::new();
        self.walk(&mut |item, _| {
            *counts.entry(item.control_type()).or_insert(0) += 1;
        });
        counts
    }

    /// Total node count across the whole tree.
    pub fn item_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_, _| count += 1);
        count
    }

    /// Deepest nesting level present; 0 for an empty tree, 1 for a flat one.
    pub fn max_depth(&self) -> usize {
        let mut max = 0;
        self.walk(&mut |_, depth| max = max.max(depth + 1));
        max
    }

    /// The canonical textual form used by the schema editor buffer.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn walk_items<'a>(items: &'a [FormItem], depth: usize, visit: &mut dyn FnMut(&'a FormItem, usize)) {
    for item in items {
        visit(item, depth);
        if let Some(children) = item.children() {
            walk_items(children, depth + 1, visit);
        }
    }
}

impl fmt::Display for FormDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FormDefinition({} v{})", self.title, self.version)?;
        if !self.publisher.is_empty() {
            write!(f, " by {}", self.publisher)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChoiceItem, ContainerItem, FieldItem};

    fn sample() -> FormDefinition {
        FormDefinition::new("T", "1.0.0", "P").with_item(FormItem::Section(
            ContainerItem::new("s1", "Section")
                .with_item(FormItem::Text(FieldItem::new("q1", "Name")))
                .with_item(FormItem::Radio(ChoiceItem::new("q2", "Pick", ["a", "b"]))),
        ))
    }

    #[test]
    fn walk_visits_depth_first_in_authored_order() {
        let mut seen = Vec::new();
        sample().walk(&mut |item, depth| seen.push((item.id().to_string(), depth)));
        assert_eq!(
            seen,
            vec![
                ("s1".to_string(), 0),
                ("q1".to_string(), 1),
                ("q2".to_string(), 1)
            ]
        );
    }

    #[test]
    fn find_reaches_nested_nodes() {
        let def = sample();
        assert_eq!(def.find("q2").map(|i| i.control_type()), Some(ControlType::Radio));
        assert!(def.find("missing").is_none());
    }

    #[test]
    fn counts_and_depth() {
        let def = sample();
        assert_eq!(def.item_count(), 3);
        assert_eq!(def.max_depth(), 2);
        assert_eq!(def.leaf_fields().len(), 2);
        assert_eq!(def.counts_by_type()[&ControlType::Section], 1);
    }
}
