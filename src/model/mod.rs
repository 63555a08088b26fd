//! Core data model types for gss

mod entry;
mod node;

pub use entry::NodeEntry;
pub use node::NodeId;
pub(crate) use node::{Node, Slot};
