use super::arena::NodeArena;
use super::serialize::{self, SerializeOptions};
use super::types::{Node, NodeId, NodeKind};
use crate::error::Result;

/// A strict tree of nodes hanging off a single container node.
#[derive(Debug, Clone)]
pub struct Document {
    arena: NodeArena,
    root: NodeId,
}

impl Document {
    pub fn new() -> Self {
        let mut arena = NodeArena::new();
        let root = arena.create(Node::container());
        Self { arena, root }
    }

    /// Takes over a built arena with `child` as the top-level subtree.
    ///
    /// A container-kind `child` becomes the document root itself. Nodes
    /// that are not reachable from the root are dropped.
    pub fn adopt(mut arena: NodeArena, child: NodeId) -> Result<Self> {
        let root = match arena.kind(child)? {
            NodeKind::Container => child,
            NodeKind::Element | NodeKind::Text => {
                let root = arena.create(Node::container());
                arena.attach_top_level(root, child)?;
                root
            }
        };
        let pruned = arena.retain_reachable(root);
        if pruned > 0 {
            tracing::trace!(pruned, "dropped unreachable nodes on adopt");
        }
        Ok(Self { arena, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn create(&mut self, node: Node) -> NodeId {
        self.arena.create(node)
    }

    pub fn top_level(&self) -> &[NodeId] {
        self.arena.children(self.root)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.arena.children(id)
    }

    pub fn is_empty(&self) -> bool {
        self.top_level().is_empty()
    }

    /// Appends `child` to a container or element. Text nodes never take
    /// children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        match self.arena.kind(parent)? {
            NodeKind::Container => self.arena.attach_top_level(parent, child),
            _ => self.arena.append_child(parent, child),
        }
    }

    pub fn serialize(&self) -> String {
        self.serialize_with(&SerializeOptions::default())
    }

    pub fn serialize_with(&self, options: &SerializeOptions) -> String {
        serialize::serialize(self, options)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
