//! # gss
//!
//! A graph-structured stack: many simultaneously active stacks that share
//! common suffixes, as explored by generalized (GLR-style) parsers and
//! other searches that follow several alternatives in parallel.
//!
//! ## Core Concepts
//!
//! - **Nodes**: identified by value; pushing an equal value names the same node
//! - **Divergence**: one node with several children, each an active stack top
//! - **Convergence**: one node with several parents, a shared suffix
//! - **Pop**: retracts the deepest frontier under a parent without
//!   destroying nodes other branches still reference
//!
//! ## Example
//!
//! ```
//! use gss::GraphStructuredStack;
//!
//! let mut gss = GraphStructuredStack::new();
//! let one = gss.push(1, &[])?;
//! let two = gss.insert(one, 2)?;
//! let three = gss.insert(one, 3)?;
//! gss.add_edge(two, three)?;
//!
//! assert_eq!(gss.top()?, &3);
//! assert_eq!(gss.pop(one)?, 3);
//! assert!(gss.find(&3).is_err());
//! # Ok::<(), gss::Error>(())
//! ```

pub mod graph;
pub mod model;
pub mod script;
pub mod shared;

mod error;

pub use error::{Error, Result};
pub use graph::GraphStructuredStack;
pub use model::{NodeEntry, NodeId};
pub use shared::SharedStack;
