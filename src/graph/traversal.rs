//! Lookup, top-of-stack access and enumeration

use super::GraphStructuredStack;
use crate::model::{NodeEntry, NodeId, Slot};
use crate::{Error, Result};
use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

impl<T, S> GraphStructuredStack<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher,
{
    /// The most recently introduced value
    ///
    /// This follows introduction order across the whole graph, not any
    /// single path, and is unaffected by `pop`: the value returned may no
    /// longer be present.
    pub fn top(&self) -> Result<&T> {
        self.history.last().ok_or(Error::EmptyGraph)
    }

    /// Get the handle of the node for `value`
    pub fn find<Q>(&self, value: &Q) -> Result<NodeId>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(value).copied().ok_or(Error::NotFound)
    }

    /// Check if a node for `value` exists
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(value)
    }

    /// True if no value has ever been introduced
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Number of nodes currently in the graph
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Number of introductions recorded, including deleted nodes
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The value of a node
    pub fn value(&self, id: NodeId) -> Result<&T> {
        self.node(id).map(|node| &node.value)
    }

    /// Child values of a node, in attachment order
    pub fn children(&self, id: NodeId) -> Result<Vec<&T>> {
        let node = self.node(id)?;
        Ok(resolve(&self.slots, &node.children))
    }

    /// Child handles of a node, in attachment order
    pub fn child_ids(&self, id: NodeId) -> Result<&[NodeId]> {
        self.node(id).map(|node| node.children.as_slice())
    }

    /// Iterate over every node as `(value, children)`
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            inner: self.slots.iter(),
        }
    }

    /// Owned copy of the adjacency relation, for diagnostics
    pub fn snapshot(&self) -> Vec<NodeEntry<T>> {
        self.iter()
            .map(|(value, children)| {
                NodeEntry::new(value.clone(), children.into_iter().cloned().collect())
            })
            .collect()
    }
}

/// Iterator over `(value, children)` pairs of a `GraphStructuredStack`
pub struct Iter<'a, T> {
    slots: &'a [Slot<T>],
    inner: std::slice::Iter<'a, Slot<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a T, Vec<&'a T>);

    fn next(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        self.inner
            .by_ref()
            .find_map(|slot| slot.node.as_ref())
            .map(|node| (&node.value, resolve(slots, &node.children)))
    }
}

impl<'a, T, S> IntoIterator for &'a GraphStructuredStack<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher,
{
    type Item = (&'a T, Vec<&'a T>);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Dumps one `value: child child` line per node
impl<T, S> std::fmt::Display for GraphStructuredStack<T, S>
where
    T: Eq + Hash + Clone + std::fmt::Display,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (value, children) in self.iter() {
            write!(f, "{}:", value)?;
            for child in children {
                write!(f, " {}", child)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn resolve<'a, T>(slots: &'a [Slot<T>], ids: &[NodeId]) -> Vec<&'a T> {
    ids.iter()
        .filter_map(|id| {
            slots
                .get(id.index())
                .filter(|slot| slot.generation == id.generation)
                .and_then(|slot| slot.node.as_ref())
        })
        .map(|node| &node.value)
        .collect()
}
