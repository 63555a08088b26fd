//! Snapshot rows for diagnostics

use serde::{Deserialize, Serialize};

/// One node of the graph with its ordered child values
///
/// Produced by `GraphStructuredStack::snapshot`. This is a diagnostic
/// view, detached from the live structure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEntry<T> {
    /// The node's value (its identity)
    pub value: T,

    /// Child values in attachment order
    pub children: Vec<T>,
}

impl<T> NodeEntry<T> {
    pub fn new(value: T, children: Vec<T>) -> Self {
        NodeEntry { value, children }
    }

    /// Whether this node is currently a stack top (no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl<T: std::fmt::Display> std::fmt::Display for NodeEntry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.value)?;
        for child in &self.children {
            write!(f, " {}", child)?;
        }
        Ok(())
    }
}
