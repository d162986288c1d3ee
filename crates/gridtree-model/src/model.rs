//! The run accumulator.
//!
//! One [`Model`] lives for an entire ingestion run and is threaded through
//! every source. Groups live in an arena and are linked by handle; the
//! attribute store is flat and keeps discovery order with last-write-wins
//! upsert by name; domains are deduplicated case-insensitively with
//! first-write-wins semantics.

use std::collections::HashMap;

use crate::error::ModelError;
use crate::node::{AttrHandle, Attribute, Child, Domain, Group, GroupHandle};

#[derive(Debug, Default)]
pub struct Model {
    groups: Vec<Group>,
    roots: Vec<GroupHandle>,
    attributes: Vec<Attribute>,
    attr_index: HashMap<String, AttrHandle>,
    domains: Vec<Domain>,
    domain_index: HashMap<String, usize>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new root group (one per source).
    pub fn add_root(&mut self, group: Group) -> GroupHandle {
        let handle = GroupHandle(self.groups.len());
        self.groups.push(group);
        self.roots.push(handle);
        handle
    }

    /// Create a group and append it as the last child of `parent`.
    pub fn add_group(&mut self, parent: GroupHandle, group: Group) -> GroupHandle {
        let handle = GroupHandle(self.groups.len());
        self.groups.push(group);
        self.groups[parent.0].children.push(Child::Group(handle));
        handle
    }

    /// Look up a group by handle. Handles are only ever minted by this
    /// model, so indexing cannot fail for handles obtained from it.
    pub fn group(&self, handle: GroupHandle) -> &Group {
        &self.groups[handle.0]
    }

    /// Root handles in source order.
    pub fn roots(&self) -> &[GroupHandle] {
        &self.roots
    }

    pub fn attribute(&self, handle: AttrHandle) -> &Attribute {
        &self.attributes[handle.0]
    }

    /// Flat attribute store in discovery order. A redefinition replaces the
    /// entry in place, keeping its original position.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute_by_name(&self, name: &str) -> Option<&Attribute> {
        self.attr_index.get(name).map(|&h| &self.attributes[h.0])
    }

    /// Insert or replace an attribute definition by exact name.
    ///
    /// Returns the handle and, on a redefinition, the previous definition so
    /// the caller can report it. Last write wins; this is never an error.
    pub fn upsert_attribute(&mut self, attribute: Attribute) -> (AttrHandle, Option<Attribute>) {
        if let Some(&handle) = self.attr_index.get(&attribute.name) {
            let previous = std::mem::replace(&mut self.attributes[handle.0], attribute);
            return (handle, Some(previous));
        }
        let handle = AttrHandle(self.attributes.len());
        self.attr_index.insert(attribute.name.clone(), handle);
        self.attributes.push(attribute);
        (handle, None)
    }

    /// Append an attribute as the last child of `parent`.
    pub fn attach_attribute(&mut self, parent: GroupHandle, handle: AttrHandle) {
        self.groups[parent.0].children.push(Child::Attribute(handle));
    }

    /// Register a shared type definition if its name has not been seen yet.
    ///
    /// The lookup key is case-insensitive and the stored type token is fixed
    /// by the first registration; later calls return the existing entry
    /// unchanged.
    pub fn register_domain(
        &mut self,
        name: &str,
        type_token: &str,
    ) -> Result<&Domain, ModelError> {
        let key = name.trim().to_lowercase();
        if let Some(&index) = self.domain_index.get(&key) {
            return Ok(&self.domains[index]);
        }
        let domain = Domain::new(name, type_token)?;
        let index = self.domains.len();
        self.domains.push(domain);
        self.domain_index.insert(key, index);
        Ok(&self.domains[index])
    }

    /// Domains in registration order.
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_keeps_discovery_order_on_redefinition() {
        let mut model = Model::new();
        let mut first = Attribute::new("Amount").unwrap();
        first.type_token = Some("numeric".to_string());
        model.upsert_attribute(first);
        model.upsert_attribute(Attribute::new("Name").unwrap());

        let mut second = Attribute::new("Amount").unwrap();
        second.type_token = Some("character".to_string());
        let (_, previous) = model.upsert_attribute(second);

        assert_eq!(previous.unwrap().type_token.as_deref(), Some("numeric"));
        let names: Vec<&str> = model.attributes().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Amount", "Name"]);
        assert_eq!(
            model.attribute_by_name("Amount").unwrap().type_token.as_deref(),
            Some("character")
        );
    }

    #[test]
    fn domain_registration_is_case_insensitive_first_write_wins() {
        let mut model = Model::new();
        let first = model.register_domain("Currency", "numeric").unwrap().clone();
        let second = model.register_domain("CURRENCY", "character").unwrap().clone();

        assert_eq!(first.id, second.id);
        assert_eq!(second.type_token, "numeric");
        assert_eq!(model.domains().len(), 1);
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut model = Model::new();
        let root = model.add_root(Group::new("Customer", None).unwrap());
        let (a, _) = model.upsert_attribute(Attribute::new("A").unwrap());
        model.attach_attribute(root, a);
        let sub = model.add_group(root, Group::new("Orders", None).unwrap());
        let (b, _) = model.upsert_attribute(Attribute::new("B").unwrap());
        model.attach_attribute(root, b);

        let children = &model.group(root).children;
        assert_eq!(children.len(), 3);
        assert!(matches!(children[0], Child::Attribute(h) if h == a));
        assert!(matches!(children[1], Child::Group(h) if h == sub));
        assert!(matches!(children[2], Child::Attribute(h) if h == b));
    }
}
