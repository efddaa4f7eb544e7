use crate::doc::Tag;

/// Immutable value threaded from parent to child during the build walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostContext {
    depth: u32,
    parent: Option<Tag>,
}

impl HostContext {
    pub fn root() -> Self {
        Self::default()
    }

    /// Context for the children of a `tag` node.
    pub fn enter(&self, tag: &str) -> Self {
        Self {
            depth: self.depth + 1,
            parent: Some(tag.into()),
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn parent_tag(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}
