use super::document::Document;
use super::types::{Node, NodeId};
use serde::{Deserialize, Serialize};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const OUTLINE_INDENT: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xml,
    Outline,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializeOptions {
    pub format: OutputFormat,
    /// Spaces per nesting level; `None` writes compact XML.
    pub indent: Option<usize>,
    pub xml_declaration: bool,
}

impl SerializeOptions {
    pub fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
            ..Self::default()
        }
    }
}

/// Depth-first, pre-order dump of `document`. Never mutates the tree.
pub fn serialize(document: &Document, options: &SerializeOptions) -> String {
    let mut out = String::new();
    match options.format {
        OutputFormat::Xml => {
            if options.xml_declaration {
                out.push_str(XML_DECLARATION);
                if options.indent.is_some() {
                    out.push('\n');
                }
            }
            write_xml(document, document.root(), 0, options.indent, &mut out);
        }
        OutputFormat::Outline => {
            write_outline(document, document.root(), 0, &mut out);
        }
    }
    while out.ends_with('\n') {
        out.pop();
    }
    out
}

fn write_xml(
    document: &Document,
    id: NodeId,
    depth: usize,
    indent: Option<usize>,
    out: &mut String,
) {
    let Some(node) = document.get(id) else {
        return;
    };

    match node {
        Node::Container(container) => {
            for &child in &container.children {
                write_xml(document, child, depth, indent, out);
            }
        }
        Node::Element(element) => {
            write_indent(out, depth, indent);
            out.push('<');
            out.push_str(&element.tag);
            for (name, value) in element.props.attributes() {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                write_escaped(out, &value);
                out.push('"');
            }

            if element.children.is_empty() {
                out.push_str("/>");
            } else if indent.is_none() || is_text_only(document, &element.children) {
                out.push('>');
                for &child in &element.children {
                    write_xml(document, child, depth + 1, None, out);
                }
                write_close(out, &element.tag);
            } else {
                out.push('>');
                out.push('\n');
                for &child in &element.children {
                    write_xml(document, child, depth + 1, indent, out);
                }
                write_indent(out, depth, indent);
                write_close(out, &element.tag);
            }

            if indent.is_some() {
                out.push('\n');
            }
        }
        Node::Text(text) => {
            write_indent(out, depth, indent);
            write_escaped(out, text.content());
            if indent.is_some() {
                out.push('\n');
            }
        }
    }
}

fn write_outline(document: &Document, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = document.get(id) else {
        return;
    };

    out.extend(std::iter::repeat_n(' ', depth * OUTLINE_INDENT));
    match node {
        Node::Container(_) => out.push_str("#document"),
        Node::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for (name, value) in element.props.attributes() {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                write_escaped(out, &value);
                out.push('"');
            }
            out.push('>');
        }
        Node::Text(text) => {
            out.push('"');
            write_escaped(out, text.content());
            out.push('"');
        }
    }
    out.push('\n');

    for &child in node.children() {
        write_outline(document, child, depth + 1, out);
    }
}

fn is_text_only(document: &Document, children: &[NodeId]) -> bool {
    children
        .iter()
        .all(|&child| matches!(document.get(child), Some(Node::Text(_))))
}

fn write_indent(out: &mut String, depth: usize, indent: Option<usize>) {
    if let Some(step) = indent {
        out.extend(std::iter::repeat_n(' ', depth * step));
    }
}

fn write_close(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_escaped(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
