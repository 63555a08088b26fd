//! Externally synchronized access to a graph-structured stack
//!
//! `GraphStructuredStack` has no internal locking. When several threads
//! explore divergent paths of one parse, they share a `SharedStack`,
//! which serializes every call behind a single mutex.

use crate::graph::GraphStructuredStack;
use crate::model::{NodeEntry, NodeId};
use crate::Result;
use parking_lot::{Mutex, MutexGuard};
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

/// A cloneable, mutex-guarded handle to one `GraphStructuredStack`
pub struct SharedStack<T, S = RandomState> {
    inner: Arc<Mutex<GraphStructuredStack<T, S>>>,
}

impl<T, S> Clone for SharedStack<T, S> {
    fn clone(&self) -> Self {
        SharedStack {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Eq + Hash + Clone> SharedStack<T, RandomState> {
    pub fn new() -> Self {
        Self::from(GraphStructuredStack::new())
    }
}

impl<T: Eq + Hash + Clone> Default for SharedStack<T, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> From<GraphStructuredStack<T, S>> for SharedStack<T, S> {
    fn from(gss: GraphStructuredStack<T, S>) -> Self {
        SharedStack {
            inner: Arc::new(Mutex::new(gss)),
        }
    }
}

impl<T, S> SharedStack<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher,
{
    /// Run `f` with exclusive access to the stack
    ///
    /// Use this to make a sequence of calls atomic, e.g. a `find`
    /// followed by an `insert` under the found node.
    pub fn with<R>(&self, f: impl FnOnce(&mut GraphStructuredStack<T, S>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// Lock the stack for the lifetime of the returned guard
    pub fn lock(&self) -> MutexGuard<'_, GraphStructuredStack<T, S>> {
        self.inner.lock()
    }

    pub fn push(&self, value: T, parents: &[NodeId]) -> Result<NodeId> {
        self.inner.lock().push(value, parents)
    }

    pub fn insert(&self, parent: NodeId, value: T) -> Result<NodeId> {
        self.inner.lock().insert(parent, value)
    }

    pub fn add_edge(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.inner.lock().add_edge(parent, child)
    }

    pub fn pop(&self, parent: NodeId) -> Result<T> {
        self.inner.lock().pop(parent)
    }

    /// Clone of the most recently introduced value
    pub fn top(&self) -> Result<T> {
        self.inner.lock().top().cloned()
    }

    pub fn find(&self, value: &T) -> Result<NodeId> {
        self.inner.lock().find(value)
    }

    pub fn snapshot(&self) -> Vec<NodeEntry<T>> {
        self.inner.lock().snapshot()
    }

    /// Recover the stack if this is the last handle
    pub fn into_inner(self) -> Option<GraphStructuredStack<T, S>> {
        Arc::try_unwrap(self.inner).ok().map(Mutex::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_threads_grow_shared_root() {
        let shared = SharedStack::new();
        let root = shared.push(0u32, &[]).unwrap();

        let handles: Vec<_> = (1..=4u32)
            .map(|worker| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for step in 0..10 {
                        shared.insert(root, worker * 100 + step).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let gss = shared.into_inner().unwrap();
        assert_eq!(gss.len(), 41);
        assert_eq!(gss.children(root).unwrap().len(), 40);
    }

    #[test]
    fn test_with_runs_atomically() {
        let shared = SharedStack::new();
        shared.push("s0", &[]).unwrap();

        let child = shared.with(|gss| {
            let parent = gss.find(&"s0")?;
            gss.insert(parent, "s1")
        });

        assert!(child.is_ok());
        assert_eq!(shared.top(), Ok("s1"));
        assert_eq!(shared.lock().len(), 2);
    }

    #[test]
    fn test_into_inner_with_live_clone() {
        let shared: SharedStack<u8> = SharedStack::new();
        let _other = shared.clone();
        assert!(shared.into_inner().is_none());
    }
}
