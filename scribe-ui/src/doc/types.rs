use serde::{Deserialize, Serialize};
use smartstring::{LazyCompact, SmartString};
use std::collections::BTreeMap;
use std::fmt;

pub type Tag = SmartString<LazyCompact>;

/// Prop holding text children collapsed into the element itself.
pub const CHILDREN_PROP: &str = "children";
/// Prop used by callers to identify siblings; never rendered.
pub const KEY_PROP: &str = "key";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Container,
    Element,
    Text,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Container => write!(f, "container"),
            NodeKind::Element => write!(f, "element"),
            NodeKind::Text => write!(f, "text"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<PropValue>),
    Map(BTreeMap<String, PropValue>),
}

impl PropValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            PropValue::Bool(b) => *b,
            PropValue::Int(n) => *n != 0,
            PropValue::Float(n) => *n != 0.0,
            PropValue::Text(s) => !s.is_empty(),
            PropValue::List(_) | PropValue::Map(_) => true,
        }
    }

    /// Scalar text form; `None` for lists and maps.
    pub fn to_text(&self) -> Option<String> {
        match self {
            PropValue::Bool(b) => Some(b.to_string()),
            PropValue::Int(n) => Some(n.to_string()),
            PropValue::Float(n) => Some(n.to_string()),
            PropValue::Text(s) => Some(s.clone()),
            PropValue::List(_) | PropValue::Map(_) => None,
        }
    }

    /// Attribute value for `name`, or `None` when the attribute is omitted.
    pub fn to_attribute(&self, name: &str) -> Option<String> {
        match self {
            PropValue::Bool(true) => Some(name.to_string()),
            PropValue::Bool(false) => None,
            PropValue::List(items) => Some(
                items
                    .iter()
                    .filter_map(|item| item.to_attribute(name))
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            PropValue::Map(entries) => Some(
                entries
                    .iter()
                    .filter_map(|(k, v)| v.to_attribute(k).map(|v| format!("{}: {}", k, v)))
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            scalar => scalar.to_text(),
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for PropValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PropValue::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Element props. Sorted by key so serialization never depends on
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(PropValue::to_text)
    }

    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(PropValue::is_truthy)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Props rendered as attributes, in key order, with reserved keys
    /// dropped and React-style names mapped to their markup names.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, String)> {
        self.iter()
            .filter(|(k, _)| *k != CHILDREN_PROP && *k != KEY_PROP)
            .filter_map(|(k, v)| {
                let name = attribute_name(k);
                if !is_xml_name(name) {
                    tracing::debug!(prop = k, "skipping prop that is not a valid attribute name");
                    return None;
                }
                v.to_attribute(name).map(|value| (name, value))
            })
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// XML name check shared by tags and attribute names: an ASCII letter or
/// `_` followed by letters, digits, `-`, `_`, `.` or `:`.
pub(crate) fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}

fn attribute_name(prop: &str) -> &str {
    match prop {
        "className" => "class",
        "htmlFor" => "for",
        other => other,
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContainerNode {
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct ElementNode {
    pub tag: Tag,
    pub props: Props,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct TextNode {
    content: SmartString<LazyCompact>,
}

impl TextNode {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone)]
pub enum Node {
    Container(ContainerNode),
    Element(ElementNode),
    Text(TextNode),
}

impl Node {
    pub fn container() -> Self {
        Self::Container(ContainerNode::default())
    }

    pub fn element(tag: &str, props: Props) -> Self {
        Self::Element(ElementNode {
            tag: tag.into(),
            props,
            children: vec![],
        })
    }

    pub fn text(content: &str) -> Self {
        Self::Text(TextNode::new(content))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Container(_) => NodeKind::Container,
            Node::Element(_) => NodeKind::Element,
            Node::Text(_) => NodeKind::Text,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::Container(c) => &c.children,
            Node::Element(e) => &e.children,
            Node::Text(_) => &[],
        }
    }

    /// Whether the node accepts children through the generic append path.
    /// Containers hold a top-level child set instead.
    pub fn supports_append(&self) -> bool {
        matches!(self, Node::Element(_))
    }
}
