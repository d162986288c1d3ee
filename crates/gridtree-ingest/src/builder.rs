//! The tree builder state machine.
//!
//! Processes rows strictly in order over a shared [`Model`]. Per-source
//! state is the table from external reference id to group handle, seeded
//! with `{0 -> root}`, and the active group the continuation rule attaches
//! to. No lookahead, no backtracking.

use std::collections::HashMap;

use gridtree_model::{AttrHandle, Attribute, Group, GroupHandle, Model, ModelError};

use crate::error::RowError;

/// Result of a group-row transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOutcome {
    /// Id 0 re-declared: the existing root, re-activated.
    Root(GroupHandle),
    /// A new group was created, linked, and activated.
    Created(GroupHandle),
}

pub struct TreeBuilder<'a> {
    model: &'a mut Model,
    groups_by_ref: HashMap<u32, GroupHandle>,
    active: GroupHandle,
}

impl<'a> TreeBuilder<'a> {
    /// Start a source scan with its root group already registered under
    /// reference id 0.
    pub fn new(model: &'a mut Model, root: GroupHandle) -> Self {
        let mut groups_by_ref = HashMap::new();
        groups_by_ref.insert(0, root);
        Self {
            model,
            groups_by_ref,
            active: root,
        }
    }

    /// The group continuation rows currently attach to.
    pub fn active(&self) -> GroupHandle {
        self.active
    }

    /// Process a group row.
    ///
    /// Id 0 returns the existing root and makes it the active group again,
    /// leaving the root node itself untouched; the row's name/description
    /// are not validated on that visit. Any other id creates a group under
    /// the given parent, which must have been declared on an earlier row,
    /// and activates it. Reference ids are never reassigned within a source.
    pub fn declare_group(
        &mut self,
        row: u32,
        id: Option<u32>,
        id_column: u32,
        parent: u32,
        name: Option<String>,
        name_column: u32,
        description: Option<String>,
    ) -> Result<GroupOutcome, RowError> {
        let id = id.ok_or_else(|| RowError::MalformedIdentifier {
            row,
            column: id_column,
            value: String::new(),
        })?;
        if id == 0 {
            let root = self.groups_by_ref[&0];
            self.active = root;
            return Ok(GroupOutcome::Root(root));
        }
        if self.groups_by_ref.contains_key(&id) {
            return Err(RowError::MalformedIdentifier {
                row,
                column: id_column,
                value: id.to_string(),
            });
        }
        let parent_handle = *self
            .groups_by_ref
            .get(&parent)
            .ok_or(RowError::UnresolvedParent { row, parent })?;
        let name = name.ok_or(RowError::MissingGroupName {
            row,
            column: name_column,
        })?;
        let group = Group::new(name, description).map_err(|_| RowError::MissingGroupName {
            row,
            column: name_column,
        })?;
        let handle = self.model.add_group(parent_handle, group);
        self.groups_by_ref.insert(id, handle);
        self.active = handle;
        Ok(GroupOutcome::Created(handle))
    }

    /// Attach an attribute, either to an explicitly targeted group or to the
    /// active group (continuation rule). Explicit targeting never changes
    /// the active group; an unregistered target falls back to the active
    /// group.
    ///
    /// Returns the attribute handle and the previous definition when the
    /// name was already taken (last write wins).
    pub fn attach(
        &mut self,
        target: Option<u32>,
        attribute: Attribute,
    ) -> (AttrHandle, Option<Attribute>) {
        let parent = target
            .and_then(|id| self.groups_by_ref.get(&id).copied())
            .unwrap_or(self.active);
        let (handle, previous) = self.model.upsert_attribute(attribute);
        self.model.attach_attribute(parent, handle);
        (handle, previous)
    }

    /// Record a shared type definition for an attribute's explicit base
    /// type. First registration fixes the canonical type token.
    pub fn register_domain(&mut self, name: &str, type_token: &str) -> Result<(), ModelError> {
        self.model.register_domain(name, type_token)?;
        Ok(())
    }
}
