use super::types::{Node, NodeId, NodeKind};
use crate::error::{RenderError, Result};

/// Slot arena for document nodes with parent tracking.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<Option<Node>>,
    parents: Vec<Option<NodeId>>,
    free_list: Vec<u32>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            parents: Vec::new(),
            free_list: Vec::new(),
        }
    }

    pub fn create(&mut self, node: Node) -> NodeId {
        let index = if let Some(idx) = self.free_list.pop() {
            idx as usize
        } else {
            self.nodes.len()
        };

        if index >= self.nodes.len() {
            self.nodes.push(Some(node));
            self.parents.push(None);
        } else {
            self.nodes[index] = Some(node);
            self.parents[index] = None;
        }

        NodeId(index as u32)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())?.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())?.as_mut()
    }

    pub fn kind(&self, id: NodeId) -> Result<NodeKind> {
        self.get(id)
            .map(Node::kind)
            .ok_or(RenderError::UnknownNode(id))
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        *self.parents.get(node.index())?
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or(&[])
    }

    /// Generic append: `parent` must be an element.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let kind = self.kind(parent)?;
        if kind != NodeKind::Element {
            return Err(RenderError::InvalidParentKind { parent, kind });
        }
        self.link(parent, child)
    }

    /// Adds `child` to a container node's top-level child set.
    pub fn attach_top_level(&mut self, container: NodeId, child: NodeId) -> Result<()> {
        let kind = self.kind(container)?;
        if kind != NodeKind::Container {
            return Err(RenderError::InvalidParentKind {
                parent: container,
                kind,
            });
        }
        self.link(container, child)
    }

    fn link(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        // A container only ever sits at the root of a tree.
        if self.kind(child)? == NodeKind::Container {
            return Err(RenderError::InvalidParentKind {
                parent,
                kind: self.kind(parent)?,
            });
        }

        if let Some(current) = self.parent(child) {
            // Re-appending the last child of the same parent changes nothing.
            if current == parent && self.children(parent).last() == Some(&child) {
                return Ok(());
            }
            return Err(RenderError::AlreadyAttached {
                child,
                parent: current,
            });
        }

        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(RenderError::WouldCycle { child, parent });
            }
            cursor = self.parent(ancestor);
        }

        match self.get_mut(parent) {
            Some(Node::Element(e)) => e.children.push(child),
            Some(Node::Container(c)) => c.children.push(child),
            Some(Node::Text(_)) => {
                return Err(RenderError::InvalidParentKind {
                    parent,
                    kind: NodeKind::Text,
                });
            }
            None => return Err(RenderError::UnknownNode(parent)),
        }
        self.parents[child.index()] = Some(parent);
        Ok(())
    }

    pub fn dispose(&mut self, id: NodeId) {
        let idx = id.index();
        if idx < self.nodes.len() && self.nodes[idx].is_some() {
            self.nodes[idx] = None;
            self.parents[idx] = None;
            self.free_list.push(id.0);
        }
    }

    /// Disposes every node not reachable from `root`.
    pub fn retain_reachable(&mut self, root: NodeId) -> usize {
        let mut reachable = vec![false; self.nodes.len()];
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(slot) = reachable.get_mut(id.index()) {
                if !*slot {
                    *slot = true;
                    stack.extend_from_slice(self.children(id));
                }
            }
        }

        let mut disposed = 0;
        for (idx, keep) in reachable.into_iter().enumerate() {
            if !keep && self.nodes[idx].is_some() {
                self.dispose(NodeId(idx as u32));
                disposed += 1;
            }
        }
        disposed
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
