//! Node handles and slot storage

use serde::{Deserialize, Serialize};

/// Stable handle to a node in a `GraphStructuredStack`
///
/// A handle stays valid until the node it names is deleted by `pop`.
/// Slots are recycled, so every handle carries the generation of the
/// slot it was issued for; a handle from an older generation is stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        NodeId {
            index: index as u32,
            generation,
        }
    }

    /// Slot index of this handle
    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// A live node: its value and ordered out-edges
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub value: T,
    pub children: Vec<NodeId>,
}

impl<T> Node<T> {
    pub fn new(value: T) -> Self {
        Node {
            value,
            children: Vec::new(),
        }
    }

    /// Append `child` unless it is already present
    ///
    /// Returns whether an edge was added.
    pub fn attach(&mut self, child: NodeId) -> bool {
        if self.children.contains(&child) {
            false
        } else {
            self.children.push(child);
            true
        }
    }

    /// Remove every occurrence of `child`
    ///
    /// Returns whether anything was removed.
    pub fn detach(&mut self, child: NodeId) -> bool {
        let before = self.children.len();
        self.children.retain(|c| *c != child);
        self.children.len() != before
    }
}

/// A storage slot; `node` is `None` while the slot sits on the free list
#[derive(Clone, Debug)]
pub(crate) struct Slot<T> {
    pub generation: u32,
    pub node: Option<Node<T>>,
}
