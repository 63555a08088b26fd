//! Adjacency store and the insertion/merge protocol

use crate::model::{Node, NodeId, Slot};
use crate::{Error, Result};
use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use tracing::debug;

/// A graph-structured stack over values of type `T`
///
/// A node's identity is its value: pushing an equal value twice names the
/// same node. Each node owns an ordered list of children, and a child may
/// be shared by several parents. The structure provides:
/// - Create-or-attach insertion (`push`, `insert`) and merging (`add_edge`)
/// - Retraction of the deepest frontier under a parent (`pop`)
/// - Lookup and introspection (`find`, `top`, `snapshot`)
///
/// `S` is the hasher used by the value index.
pub struct GraphStructuredStack<T, S = RandomState> {
    /// value → slot of its node; membership here means the node exists
    pub(super) index: HashMap<T, NodeId, S>,
    pub(super) slots: Vec<Slot<T>>,
    /// Recyclable slot indices
    pub(super) free: Vec<usize>,
    /// Values in the order they were first introduced
    pub(super) history: Vec<T>,
}

impl<T: Eq + Hash + Clone> GraphStructuredStack<T, RandomState> {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Create an empty stack with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<T: Eq + Hash + Clone> Default for GraphStructuredStack<T, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> GraphStructuredStack<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher,
{
    /// Create an empty stack using `hasher` for the value index
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        GraphStructuredStack {
            index: HashMap::with_capacity_and_hasher(capacity, hasher),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            history: Vec::with_capacity(capacity),
        }
    }

    /// The hasher used by the value index
    pub fn hasher(&self) -> &S {
        self.index.hasher()
    }

    // === Insertion / merge ===

    /// Create `value` if it is new, then attach it under every parent
    ///
    /// Existing edges are left alone, so repeating a call changes nothing.
    /// All parent handles are checked before anything is modified.
    pub fn push(&mut self, value: T, parents: &[NodeId]) -> Result<NodeId> {
        for parent in parents {
            self.node(*parent)?;
        }

        let id = self.intern(value);
        for parent in parents {
            self.link(*parent, id)?;
        }
        Ok(id)
    }

    /// Attach `value` under a single parent and return its handle
    pub fn insert(&mut self, parent: NodeId, value: T) -> Result<NodeId> {
        self.push(value, &[parent])
    }

    /// Add an edge between two existing nodes
    ///
    /// This is the convergence step: two independently grown paths that
    /// reach the same state start sharing `child` as a suffix.
    pub fn add_edge(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(child)?;
        self.node(parent)?;
        self.link(parent, child)
    }

    // === Internal helpers ===

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node<T>> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(Error::StaleHandle(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<T>> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(Error::StaleHandle(id))
    }

    fn link(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if self.node_mut(parent)?.attach(child) {
            debug!(%parent, %child, "added edge");
        }
        Ok(())
    }

    /// Return the node for `value`, creating and recording it if absent
    fn intern(&mut self, value: T) -> NodeId {
        if let Some(&id) = self.index.get(&value) {
            return id;
        }

        let id = self.allocate(Node::new(value.clone()));
        self.index.insert(value.clone(), id);
        self.history.push(value);
        debug!(node = %id, "created node");
        id
    }

    fn allocate(&mut self, node: Node<T>) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.node = Some(node);
                NodeId::new(index, slot.generation)
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId::new(self.slots.len() - 1, 0)
            }
        }
    }

    /// Delete a node's entry and retire its handle
    ///
    /// Edges pointing at the node are not touched; callers must have
    /// removed them already.
    pub(super) fn release(&mut self, id: NodeId) -> Option<T> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        self.index.remove(&node.value);
        debug!(node = %id, "deleted node");
        Some(node.value)
    }
}

impl<T, S> std::fmt::Debug for GraphStructuredStack<T, S>
where
    T: Eq + Hash + Clone + std::fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
