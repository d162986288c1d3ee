//! Node types: the closed tagged-variant tree.
//!
//! A node is either a [`Group`] holding an ordered list of child variants or
//! an [`Attribute`] terminal. Parent/child links use arena handles owned by
//! [`crate::Model`], never direct references, so identity resolution stays
//! explicit and O(1).

use crate::error::ModelError;
use crate::ids::{IdNamespace, NodeId};

/// Handle into the group arena of a [`crate::Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupHandle(pub(crate) usize);

/// Handle into the flat attribute store of a [`crate::Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttrHandle(pub(crate) usize);

/// One ordered child of a group. Insertion order is significant and is
/// preserved all the way to the emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child {
    Group(GroupHandle),
    Attribute(AttrHandle),
}

/// Hierarchical container: a table or sub-table grouping of attributes.
#[derive(Debug, Clone)]
pub struct Group {
    pub id: NodeId,
    pub name: String,
    pub description: Option<String>,
    pub children: Vec<Child>,
}

impl Group {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Result<Self, ModelError> {
        let name = name.into();
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ModelError::EmptyGroupName);
        }
        let id = NodeId::derive(IdNamespace::Group, &name);
        Ok(Self {
            id,
            name,
            description,
            children: Vec::new(),
        })
    }
}

/// Terminal leaf: one named, typed field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Attribute {
    pub id: NodeId,
    pub name: String,
    pub description: Option<String>,
    /// Raw type token from the source, lowercased.
    pub type_token: Option<String>,
    /// Explicit shared-type reference name, when the row carries one.
    pub base_type: Option<String>,
    pub length: Option<u32>,
    pub decimals: Option<u32>,
    pub sign: bool,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ModelError::EmptyAttributeName);
        }
        let id = NodeId::derive(IdNamespace::Attribute, &name);
        Ok(Self {
            id,
            name,
            description: None,
            type_token: None,
            base_type: None,
            length: None,
            decimals: None,
            sign: false,
        })
    }

    /// Compact rendering of the typed shape, used to detect and report
    /// redefinitions with a different signature.
    pub fn signature(&self) -> String {
        format!(
            "type={} base={} length={} decimals={} sign={}",
            self.type_token.as_deref().unwrap_or("-"),
            self.base_type.as_deref().unwrap_or("-"),
            self.length.map_or_else(|| "-".to_string(), |v| v.to_string()),
            self.decimals
                .map_or_else(|| "-".to_string(), |v| v.to_string()),
            self.sign,
        )
    }
}

/// A named, shared type definition referenced by attributes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Domain {
    pub id: NodeId,
    pub name: String,
    /// Canonical type token, fixed by the first attribute that referenced
    /// this domain.
    pub type_token: String,
}

impl Domain {
    pub fn new(name: impl Into<String>, type_token: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ModelError::EmptyDomainName);
        }
        let id = NodeId::derive(IdNamespace::Domain, &name);
        Ok(Self {
            id,
            name,
            type_token: type_token.into(),
        })
    }
}
