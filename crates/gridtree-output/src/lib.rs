//! Object-model export XML generation.
//!
//! Consumes a finished [`gridtree_model::Model`] and serializes it; no
//! model mutation happens here.

pub mod xml;

pub use xml::{write_model, write_model_xml};
