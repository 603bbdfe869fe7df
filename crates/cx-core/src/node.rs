//! Content node model

use crate::address::ContentAddress;
use crate::value::{Metadata, MetadataValue};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Kind of content node, derived from the address category
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Course,
    Chapter,
    Sequential,
    Vertical,
    Html,
    Problem,
    Video,
    Discussion,
    StaticTab,
    CustomTagTemplate,
    CourseInfo,
    About,
    Other(String),
}

impl NodeKind {
    /// Map an address category to a node kind
    pub fn from_category(category: &str) -> Self {
        match category {
            "course" => NodeKind::Course,
            "chapter" => NodeKind::Chapter,
            "sequential" => NodeKind::Sequential,
            "vertical" => NodeKind::Vertical,
            "html" => NodeKind::Html,
            "problem" => NodeKind::Problem,
            "video" => NodeKind::Video,
            "discussion" => NodeKind::Discussion,
            "static_tab" => NodeKind::StaticTab,
            "custom_tag_template" => NodeKind::CustomTagTemplate,
            "course_info" => NodeKind::CourseInfo,
            "about" => NodeKind::About,
            other => NodeKind::Other(other.to_string()),
        }
    }

    /// Category string for this kind
    pub fn category(&self) -> &str {
        match self {
            NodeKind::Course => "course",
            NodeKind::Chapter => "chapter",
            NodeKind::Sequential => "sequential",
            NodeKind::Vertical => "vertical",
            NodeKind::Html => "html",
            NodeKind::Problem => "problem",
            NodeKind::Video => "video",
            NodeKind::Discussion => "discussion",
            NodeKind::StaticTab => "static_tab",
            NodeKind::CustomTagTemplate => "custom_tag_template",
            NodeKind::CourseInfo => "course_info",
            NodeKind::About => "about",
            NodeKind::Other(category) => category,
        }
    }

    /// Whether nodes of this kind hold children rather than a body
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Course | NodeKind::Chapter | NodeKind::Sequential | NodeKind::Vertical
        )
    }
}

/// A unit of course content
#[derive(Debug, Clone, PartialEq)]
pub struct ContentNode {
    pub address: ContentAddress,
    pub kind: NodeKind,
    /// Child addresses, in presentation order
    pub children: Vec<ContentAddress>,
    pub metadata: Metadata,
    /// Raw body for leaf content
    pub data: String,
    /// Extra attributes emitted on the rendered element
    pub xml_attributes: BTreeMap<String, String>,
    /// Grading policy document (course nodes only)
    pub grading_policy: Option<serde_json::Value>,
}

impl ContentNode {
    /// Create an empty node at the given address
    pub fn new(address: ContentAddress) -> Self {
        let kind = NodeKind::from_category(address.category());
        Self {
            address,
            kind,
            children: Vec::new(),
            metadata: Metadata::new(),
            data: String::new(),
            xml_attributes: BTreeMap::new(),
            grading_policy: None,
        }
    }

    /// Set the child sequence
    pub fn with_children(mut self, children: Vec<ContentAddress>) -> Self {
        self.children = children;
        self
    }

    /// Set the raw body
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Set the grading policy
    pub fn with_grading_policy(mut self, policy: serde_json::Value) -> Self {
        self.grading_policy = Some(policy);
        self
    }

    /// Unit name (last address component)
    pub fn name(&self) -> &str {
        self.address.name()
    }

    /// Display name from metadata, if present
    pub fn display_name(&self) -> Option<&str> {
        match self.metadata.get("display_name") {
            Some(MetadataValue::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// Snapshot form of a node, as read from course snapshot files
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub address: ContentAddress,
    #[serde(default)]
    pub children: Vec<ContentAddress>,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub xml_attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub grading_policy: Option<serde_json::Value>,
}

impl From<NodeRecord> for ContentNode {
    fn from(record: NodeRecord) -> Self {
        let mut node = ContentNode::new(record.address).with_children(record.children);
        node.metadata = record
            .metadata
            .into_iter()
            .map(|(k, v)| (k, MetadataValue::from(v)))
            .collect();
        node.data = record.data;
        node.xml_attributes = record.xml_attributes;
        node.grading_policy = record.grading_policy;
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_from_category() {
        assert_eq!(NodeKind::from_category("vertical"), NodeKind::Vertical);
        assert_eq!(NodeKind::from_category("static_tab"), NodeKind::StaticTab);
        assert_eq!(
            NodeKind::from_category("word_cloud"),
            NodeKind::Other("word_cloud".to_string())
        );
        assert_eq!(NodeKind::from_category("word_cloud").category(), "word_cloud");
    }

    #[test]
    fn test_container_kinds() {
        assert!(NodeKind::Course.is_container());
        assert!(NodeKind::Vertical.is_container());
        assert!(!NodeKind::Html.is_container());
        assert!(!NodeKind::About.is_container());
    }

    #[test]
    fn test_node_builder() {
        let address = ContentAddress::new("MITx", "6.002x", "html", "intro", None).unwrap();
        let node = ContentNode::new(address)
            .with_data("<p>Hello</p>")
            .with_metadata("display_name", "Intro");

        assert_eq!(node.kind, NodeKind::Html);
        assert_eq!(node.name(), "intro");
        assert_eq!(node.display_name(), Some("Intro"));
        assert_eq!(node.data, "<p>Hello</p>");
    }

    #[test]
    fn test_record_conversion() {
        let json = r#"{
            "address": "i4x://MITx/6.002x/chapter/week1",
            "children": ["i4x://MITx/6.002x/sequential/s1"],
            "metadata": {"display_name": "Week 1", "graded": false}
        }"#;
        let record: NodeRecord = serde_json::from_str(json).unwrap();
        let node = ContentNode::from(record);

        assert_eq!(node.kind, NodeKind::Chapter);
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.metadata.get("graded"), Some(&MetadataValue::Bool(false)));
        assert!(node.data.is_empty());
    }
}
