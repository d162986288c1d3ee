//! Export XML writer.
//!
//! The document carries the three ordered collections the ingestion run
//! accumulated: the rooted object tree (nested `Object` elements with
//! `AttributeRef` leaves in insertion order), the flat attribute list in
//! discovery order, and the shared type definitions.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use gridtree_model::{Attribute, Child, Domain, GroupHandle, Model};

/// Write the export document to `output_path`, creating parent directories
/// as needed.
pub fn write_model_xml(output_path: &Path, model: &Model) -> Result<()> {
    if model.roots().is_empty() {
        return Err(anyhow!("no objects to export"));
    }
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output directory {}", parent.display()))?;
        }
    }
    let file = File::create(output_path)
        .with_context(|| format!("create {}", output_path.display()))?;
    write_model(BufWriter::new(file), model)
}

/// Write the export document to any writer.
pub fn write_model<W: Write>(writer: W, model: &Model) -> Result<()> {
    let mut xml = Writer::new_with_indent(writer, b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    xml.write_event(Event::Start(BytesStart::new("ObjectModelExport")))?;

    xml.write_event(Event::Start(BytesStart::new("Objects")))?;
    for &root in model.roots() {
        write_group(&mut xml, model, root)?;
    }
    xml.write_event(Event::End(BytesEnd::new("Objects")))?;

    xml.write_event(Event::Start(BytesStart::new("Attributes")))?;
    for attribute in model.attributes() {
        write_attribute(&mut xml, attribute)?;
    }
    xml.write_event(Event::End(BytesEnd::new("Attributes")))?;

    if !model.domains().is_empty() {
        xml.write_event(Event::Start(BytesStart::new("Domains")))?;
        for domain in model.domains() {
            write_domain(&mut xml, domain)?;
        }
        xml.write_event(Event::End(BytesEnd::new("Domains")))?;
    }

    xml.write_event(Event::End(BytesEnd::new("ObjectModelExport")))?;
    Ok(())
}

fn write_group<W: Write>(xml: &mut Writer<W>, model: &Model, handle: GroupHandle) -> Result<()> {
    let group = model.group(handle);
    let mut start = BytesStart::new("Object");
    start.push_attribute(("id", group.id.to_hex().as_str()));
    start.push_attribute(("name", group.name.as_str()));
    if let Some(description) = &group.description {
        start.push_attribute(("description", description.as_str()));
    }

    if group.children.is_empty() {
        xml.write_event(Event::Empty(start))?;
        return Ok(());
    }

    xml.write_event(Event::Start(start))?;
    for child in &group.children {
        match child {
            Child::Group(sub) => write_group(xml, model, *sub)?,
            Child::Attribute(attr) => {
                let mut leaf = BytesStart::new("AttributeRef");
                leaf.push_attribute(("name", model.attribute(*attr).name.as_str()));
                xml.write_event(Event::Empty(leaf))?;
            }
        }
    }
    xml.write_event(Event::End(BytesEnd::new("Object")))?;
    Ok(())
}

fn write_attribute<W: Write>(xml: &mut Writer<W>, attribute: &Attribute) -> Result<()> {
    let mut elem = BytesStart::new("Attribute");
    elem.push_attribute(("id", attribute.id.to_hex().as_str()));
    elem.push_attribute(("name", attribute.name.as_str()));
    if let Some(description) = &attribute.description {
        elem.push_attribute(("description", description.as_str()));
    }
    if let Some(token) = &attribute.type_token {
        elem.push_attribute(("type", token.as_str()));
    }
    if let Some(base) = &attribute.base_type {
        elem.push_attribute(("domain", base.as_str()));
    }
    if let Some(length) = attribute.length {
        elem.push_attribute(("length", length.to_string().as_str()));
    }
    if let Some(decimals) = attribute.decimals {
        elem.push_attribute(("decimals", decimals.to_string().as_str()));
    }
    if attribute.sign {
        elem.push_attribute(("sign", "true"));
    }
    xml.write_event(Event::Empty(elem))?;
    Ok(())
}

fn write_domain<W: Write>(xml: &mut Writer<W>, domain: &Domain) -> Result<()> {
    let mut elem = BytesStart::new("Domain");
    elem.push_attribute(("id", domain.id.to_hex().as_str()));
    elem.push_attribute(("name", domain.name.as_str()));
    elem.push_attribute(("type", domain.type_token.as_str()));
    xml.write_event(Event::Empty(elem))?;
    Ok(())
}
