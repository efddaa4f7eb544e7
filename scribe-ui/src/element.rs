use crate::doc::{CHILDREN_PROP, PropValue, Props};
use serde::{Deserialize, Serialize};

/// Declarative tree handed to the renderer.
///
/// JSON form: a string is a text node, an array is a fragment, and an object
/// is an element (`{"type": "p", "props": {...}, "children": [...]}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VNode {
    Text(String),
    Fragment(Vec<VNode>),
    Element(VElement),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VElement {
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub props: Props,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VNode>,
}

pub fn element(tag: impl Into<String>) -> VElement {
    VElement {
        tag: tag.into(),
        props: Props::new(),
        children: vec![],
    }
}

pub fn text(content: impl Into<String>) -> VNode {
    VNode::Text(content.into())
}

pub fn fragment(children: impl IntoIterator<Item = VNode>) -> VNode {
    VNode::Fragment(children.into_iter().collect())
}

impl VElement {
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key, value);
        self
    }

    pub fn child(mut self, child: impl Into<VNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, C>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<VNode>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Children with nested fragments spliced in place.
    pub fn flat_children(&self) -> Vec<&VNode> {
        let mut out = Vec::with_capacity(self.children.len());
        flatten_into(&self.children, &mut out);
        out
    }

    /// Props as the host sees them: when every child is text, the joined
    /// text rides along in the `children` prop. A caller-supplied `children`
    /// prop is always dropped.
    pub fn host_props(&self) -> Props {
        let mut props = self.props.clone();
        props.remove(CHILDREN_PROP);
        if let Some(text) = self.text_content() {
            props.insert(CHILDREN_PROP, text);
        }
        props
    }

    fn text_content(&self) -> Option<String> {
        let children = self.flat_children();
        if children.is_empty() {
            return None;
        }
        let mut joined = String::new();
        for child in children {
            match child {
                VNode::Text(s) => joined.push_str(s),
                _ => return None,
            }
        }
        Some(joined)
    }
}

pub(crate) fn flatten_into<'a>(nodes: &'a [VNode], out: &mut Vec<&'a VNode>) {
    for node in nodes {
        match node {
            VNode::Fragment(inner) => flatten_into(inner, out),
            other => out.push(other),
        }
    }
}

impl From<VElement> for VNode {
    fn from(value: VElement) -> Self {
        VNode::Element(value)
    }
}

impl From<&str> for VNode {
    fn from(value: &str) -> Self {
        VNode::Text(value.to_string())
    }
}

impl From<String> for VNode {
    fn from(value: String) -> Self {
        VNode::Text(value)
    }
}

impl From<Vec<VNode>> for VNode {
    fn from(value: Vec<VNode>) -> Self {
        VNode::Fragment(value)
    }
}
