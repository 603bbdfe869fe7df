//! Rendering of content nodes into XML element trees

use crate::address::ContentAddress;
use crate::error::{CourseExportError, Result};
use crate::node::{ContentNode, NodeKind};
use crate::source::ContentSource;
use crate::value::encode_attribute;
use crate::xml::{is_xml_name, Element};
use std::collections::HashMap;
use tracing::debug;

/// State threaded through a single render pass
pub struct RenderContext<'a> {
    /// Where child nodes are looked up
    source: &'a dyn ContentSource,
    /// Export-time attributes keyed by node address
    export_attributes: HashMap<ContentAddress, Vec<(String, String)>>,
}

impl<'a> RenderContext<'a> {
    /// Create a context reading children from `source`
    pub fn new(source: &'a dyn ContentSource) -> Self {
        Self {
            source,
            export_attributes: HashMap::new(),
        }
    }

    /// Attach an extra attribute to the element rendered for `address`
    pub fn with_attribute(
        mut self,
        address: &ContentAddress,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.export_attributes
            .entry(address.clone())
            .or_default()
            .push((name.into(), value.into()));
        self
    }

    fn attributes_for(&self, address: &ContentAddress) -> &[(String, String)] {
        self.export_attributes
            .get(address)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Walks a node and its descendants into an element tree
pub struct TreeSerializer;

impl TreeSerializer {
    /// Render `root` into a fresh placeholder element
    pub fn serialize(root: &ContentNode, ctx: &RenderContext<'_>) -> Result<Element> {
        let mut element = Element::placeholder();
        Self::render(root, &mut element, ctx)?;
        Ok(element)
    }

    /// Render `node` into `into`, recursing into children in order
    ///
    /// `url_name` and export-time attributes take precedence over node
    /// attributes and metadata of the same name.
    pub fn render(node: &ContentNode, into: &mut Element, ctx: &RenderContext<'_>) -> Result<()> {
        into.tag = node.kind.category().to_string();
        into.set("url_name", node.name());

        for (name, value) in ctx.attributes_for(&node.address) {
            into.set(name.as_str(), value.as_str());
        }
        for (name, value) in &node.xml_attributes {
            Self::set_node_attribute(node, into, name, value.clone())?;
        }
        for (key, value) in &node.metadata {
            Self::set_node_attribute(node, into, key, encode_attribute(value)?)?;
        }

        match &node.kind {
            NodeKind::Course | NodeKind::Chapter | NodeKind::Sequential | NodeKind::Vertical => {
                Self::render_children(node, into, ctx)?;
            }
            NodeKind::Html
            | NodeKind::Problem
            | NodeKind::Video
            | NodeKind::Discussion
            | NodeKind::StaticTab
            | NodeKind::CustomTagTemplate
            | NodeKind::CourseInfo
            | NodeKind::About => {
                Self::render_body(node, into);
            }
            NodeKind::Other(_) => {
                // Unknown kinds may carry either shape
                Self::render_body(node, into);
                Self::render_children(node, into, ctx)?;
            }
        }
        Ok(())
    }

    fn render_children(node: &ContentNode, into: &mut Element, ctx: &RenderContext<'_>) -> Result<()> {
        for child_address in &node.children {
            let child = ctx.source.get_item(child_address)?;
            let mut child_element = Element::placeholder();
            Self::render(&child, &mut child_element, ctx)?;
            into.push(child_element);
        }
        Ok(())
    }

    fn set_node_attribute(
        node: &ContentNode,
        into: &mut Element,
        name: &str,
        value: String,
    ) -> Result<()> {
        if !is_xml_name(name) {
            return Err(CourseExportError::UnsupportedValue(format!(
                "{:?} is not a valid attribute name on {}",
                name, node.address
            )));
        }
        if into.get(name).is_some() {
            debug!("Keeping existing {} attribute on {}", name, node.address);
            return Ok(());
        }
        into.set(name, value);
        Ok(())
    }

    fn render_body(node: &ContentNode, into: &mut Element) {
        if !node.data.is_empty() {
            into.text = Some(node.data.clone());
        }
    }
}
