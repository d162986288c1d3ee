#![allow(missing_docs)]

use gridtree_model::{Attribute, Child, Group, IdNamespace, Model, NodeId};

#[test]
fn nested_groups_resolve_through_handles() {
    let mut model = Model::new();
    let root = model.add_root(Group::new("Invoice", Some("Invoice header".to_string())).unwrap());
    let lines = model.add_group(root, Group::new("Lines", None).unwrap());

    let (qty, _) = model.upsert_attribute(Attribute::new("Quantity").unwrap());
    model.attach_attribute(lines, qty);

    let root_children = &model.group(root).children;
    assert_eq!(root_children.len(), 1);
    let Child::Group(handle) = root_children[0] else {
        panic!("expected group child");
    };
    assert_eq!(model.group(handle).name, "Lines");

    let line_children = &model.group(lines).children;
    let Child::Attribute(attr) = line_children[0] else {
        panic!("expected attribute child");
    };
    assert_eq!(model.attribute(attr).name, "Quantity");
}

#[test]
fn node_ids_survive_serde() {
    let id = NodeId::derive(IdNamespace::Domain, "Currency");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{}\"", id.to_hex()));
    let back: NodeId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn redefined_attribute_is_visible_from_every_parent() {
    // The flat store is authoritative: when a name is redefined, every
    // handle already embedded in the tree resolves to the final definition.
    let mut model = Model::new();
    let root = model.add_root(Group::new("Customer", None).unwrap());
    let sub = model.add_group(root, Group::new("Contacts", None).unwrap());

    let mut first = Attribute::new("Phone").unwrap();
    first.type_token = Some("numeric".to_string());
    let (handle, _) = model.upsert_attribute(first);
    model.attach_attribute(root, handle);

    let mut second = Attribute::new("Phone").unwrap();
    second.type_token = Some("character".to_string());
    let (handle_again, previous) = model.upsert_attribute(second);
    model.attach_attribute(sub, handle_again);

    assert_eq!(handle, handle_again);
    assert!(previous.is_some());
    assert_eq!(
        model.attribute(handle).type_token.as_deref(),
        Some("character")
    );
}
