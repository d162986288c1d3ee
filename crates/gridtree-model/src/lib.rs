//! Object model for spreadsheet-defined group/attribute trees.
//!
//! A run of the ingestion engine produces a [`Model`]: a forest of group
//! nodes (one root per source), a flat attribute store in discovery order,
//! and a set of shared type definitions (domains) deduplicated by name.
//! Nodes carry deterministic identifiers derived from their kind and name,
//! so re-running the tool over the same input yields identical ids.

pub mod error;
pub mod ids;
pub mod model;
pub mod node;

pub use error::ModelError;
pub use ids::{IdNamespace, NodeId};
pub use model::Model;
pub use node::{AttrHandle, Attribute, Child, Domain, Group, GroupHandle};
