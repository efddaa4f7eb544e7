mod arena;
mod container;
mod document;
mod serialize;
mod types;

pub use arena::NodeArena;
pub use container::Container;
pub use document::Document;
pub use serialize::{OutputFormat, SerializeOptions, serialize};
pub use types::{
    CHILDREN_PROP, ContainerNode, ElementNode, KEY_PROP, Node, NodeId, NodeKind, PropValue,
    Props, Tag, TextNode,
};
pub(crate) use types::is_xml_name;
