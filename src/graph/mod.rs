//! The graph-structured stack
//!
//! Nodes live in a single slot vector indexed by value. Edges are stored
//! as ordered child lists of node handles, so one node can be shared by
//! any number of parents without shared ownership.

mod prune;
mod stack;
mod traversal;

pub use stack::GraphStructuredStack;
pub use traversal::Iter;
