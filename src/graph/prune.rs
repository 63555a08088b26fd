//! Deletion / pruning protocol

use super::GraphStructuredStack;
use crate::model::NodeId;
use crate::{Error, Result};
use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};
use tracing::{debug, trace};

impl<T, S> GraphStructuredStack<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher,
{
    /// Retract the deepest frontier reachable from `parent`
    ///
    /// The frontier is found by following the last child of each node
    /// until a node without children is reached. That value is removed
    /// as a child throughout the subgraph under `parent`; its node is
    /// deleted only if no node anywhere in the graph still lists it.
    ///
    /// Returns the retracted value. The insertion history is left as is,
    /// so `top` may still report a value that was deleted here.
    pub fn pop(&mut self, parent: NodeId) -> Result<T> {
        if self.history.is_empty() {
            return Err(Error::EmptyGraph);
        }

        let target = self.frontier(parent)?;
        debug!(%parent, %target, "popping frontier");

        self.node_mut(parent)?.detach(target);
        self.purge(parent, target);

        let value = self.node(target)?.value.clone();
        if !self.is_referenced(target) {
            self.release(target);
        }
        Ok(value)
    }

    /// Follow last children from `parent` down to a node with none
    ///
    /// Revisiting a node can only happen in a cyclic graph; the walk
    /// stops there rather than spinning.
    fn frontier(&self, parent: NodeId) -> Result<NodeId> {
        let mut current = *self
            .node(parent)?
            .children
            .last()
            .ok_or(Error::NoChildren)?;

        let mut visited = HashSet::from([parent, current]);
        while let Some(&next) = self.node(current)?.children.last() {
            if !visited.insert(next) {
                break;
            }
            current = next;
        }
        Ok(current)
    }

    /// Remove `target` from every child list reachable from `parent`'s
    /// remaining children
    ///
    /// Every reachable node is visited, whether or not it listed `target`,
    /// so no surviving branch keeps a stale edge.
    fn purge(&mut self, parent: NodeId, target: NodeId) {
        let mut pending = match self.node(parent) {
            Ok(node) => node.children.clone(),
            Err(_) => return,
        };
        let mut visited = HashSet::new();

        while let Some(id) = pending.pop() {
            if !visited.insert(id) {
                continue;
            }
            if let Ok(node) = self.node_mut(id) {
                if node.detach(target) {
                    trace!(node = %id, %target, "purged edge");
                }
                pending.extend(node.children.iter().copied());
            }
        }
    }

    /// Whether any live node still lists `target` as a child
    fn is_referenced(&self, target: NodeId) -> bool {
        self.slots
            .iter()
            .filter_map(|slot| slot.node.as_ref())
            .any(|node| node.children.contains(&target))
    }
}
