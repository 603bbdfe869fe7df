//! Minimal XML element tree used for rendered content

use std::fmt::Write;

/// Tag given to freshly created elements before a node renders into them
pub const PLACEHOLDER_TAG: &str = "unknown";

/// An XML element with ordered attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Create a placeholder element for a node to render into
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_TAG)
    }

    /// Set an attribute, replacing an existing value but keeping its position
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Get an attribute value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attributes in insertion order
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Append a child element
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Render on a single line
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out, None, 0);
        out
    }

    /// Render with one element per line, indented by `indent` spaces per level
    pub fn to_pretty_string(&self, indent: usize) -> String {
        let mut out = String::new();
        self.write_to(&mut out, Some(indent), 0);
        out.push('\n');
        out
    }

    fn write_to(&self, out: &mut String, indent: Option<usize>, depth: usize) {
        if let Some(width) = indent {
            if depth > 0 {
                out.push('\n');
            }
            out.push_str(&" ".repeat(width * depth));
        }

        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape(value, true));
        }

        if self.text.is_none() && self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');

        if let Some(text) = &self.text {
            out.push_str(&escape(text, false));
        }
        for child in &self.children {
            child.write_to(out, indent, depth + 1);
        }

        if let Some(width) = indent {
            if !self.children.is_empty() {
                out.push('\n');
                out.push_str(&" ".repeat(width * depth));
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Whether `name` can be used as an attribute or tag name
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'))
}

/// Escape markup characters; quotes only inside attribute values
fn escape(s: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\n' if attribute => out.push_str("&#10;"),
            c => out.push(c),
        }
    }
    out
}
