use crate::doc::{Node, Props, Tag, is_xml_name};
use crate::error::{RenderError, Result};
use std::collections::BTreeSet;

/// Tag producing a container node.
pub const ROOT_TAG: &str = "root";
/// Tag producing a text leaf.
pub const TEXT_TAG: &str = "text";
/// Prop carrying a text leaf's payload.
pub const TEXT_CONTENT_PROP: &str = "content";

/// Built-in element tags, sorted for binary search.
const BUILTIN_ELEMENTS: &[&str] = &[
    "a",
    "article",
    "aside",
    "b",
    "blockquote",
    "body",
    "br",
    "caption",
    "code",
    "div",
    "em",
    "figcaption",
    "figure",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "head",
    "header",
    "hr",
    "html",
    "i",
    "img",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "small",
    "span",
    "strong",
    "sub",
    "sup",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "title",
    "tr",
    "u",
    "ul",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Container,
    Text,
    Element,
}

/// Maps element-type tags to node constructors.
///
/// The built-in table is shared read-only by every factory; custom tags are
/// per factory value.
#[derive(Debug, Clone, Default)]
pub struct ElementFactory {
    custom: BTreeSet<Tag>,
}

impl ElementFactory {
    pub fn new() -> Self {
        Self {
            custom: BTreeSet::new(),
        }
    }

    pub fn with_tags<I, S>(tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut factory = Self::new();
        for tag in tags {
            factory.register(tag.as_ref())?;
        }
        Ok(factory)
    }

    /// Adds a custom element tag. Names must be valid XML names.
    pub fn register(&mut self, tag: &str) -> Result<()> {
        if !is_valid_name(tag) || tag == ROOT_TAG || tag == TEXT_TAG {
            return Err(RenderError::unsupported(tag));
        }
        self.custom.insert(tag.into());
        Ok(())
    }

    pub fn kind_of(&self, tag: &str) -> Option<TagKind> {
        match tag {
            ROOT_TAG => Some(TagKind::Container),
            TEXT_TAG => Some(TagKind::Text),
            _ if BUILTIN_ELEMENTS.binary_search(&tag).is_ok() => Some(TagKind::Element),
            _ if self.custom.contains(tag) => Some(TagKind::Element),
            _ => None,
        }
    }

    pub fn is_supported(&self, tag: &str) -> bool {
        self.kind_of(tag).is_some()
    }

    /// Every recognized tag, built-in first.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        [ROOT_TAG, TEXT_TAG]
            .into_iter()
            .chain(BUILTIN_ELEMENTS.iter().copied())
            .chain(self.custom.iter().map(|t| t.as_str()))
    }

    /// Builds the node for `tag`. Text leaves take their payload from the
    /// `content` prop and ignore everything else, children included.
    pub fn create(&self, tag: &str, props: &Props) -> Result<Node> {
        match self.kind_of(tag) {
            Some(TagKind::Container) => Ok(Node::container()),
            Some(TagKind::Text) => {
                let content = props.text(TEXT_CONTENT_PROP).unwrap_or_default();
                Ok(Node::text(&content))
            }
            Some(TagKind::Element) => Ok(Node::element(tag, props.clone())),
            None => Err(RenderError::unsupported(tag)),
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    is_xml_name(name) && !name.to_ascii_lowercase().starts_with("xml")
}
