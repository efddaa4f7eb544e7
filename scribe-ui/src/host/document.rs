use super::context::HostContext;
use super::traits::HostAdapter;
use crate::doc::{CHILDREN_PROP, Container, Document, NodeArena, NodeId, NodeKind, Props};
use crate::error::{RenderError, Result};
use crate::factory::{ElementFactory, TEXT_CONTENT_PROP, TEXT_TAG, TagKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Prop that asks for post-mount work on an element.
pub const AUTOFOCUS_PROP: &str = "autofocus";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostOptions {
    /// Fold all-text children into the element instead of creating text
    /// instances for them one by one.
    pub collapse_text: bool,
}

/// Host adapter building the document model.
///
/// Build callbacks only touch the private work arena. The container sees the
/// result when `attach_to_container` hands the arena over.
pub struct DocumentHost {
    factory: ElementFactory,
    options: HostOptions,
    work: NodeArena,
    mounted: Vec<NodeId>,
}

impl DocumentHost {
    pub fn new(factory: ElementFactory, options: HostOptions) -> Self {
        Self {
            factory,
            options,
            work: NodeArena::new(),
            mounted: Vec::new(),
        }
    }

    pub fn factory(&self) -> &ElementFactory {
        &self.factory
    }

    pub fn options(&self) -> &HostOptions {
        &self.options
    }

    /// Instances whose `after_mount` hook ran for the last commit, in call
    /// order.
    pub fn mounted(&self) -> &[NodeId] {
        &self.mounted
    }

    /// Uncommitted build work.
    pub fn work(&self) -> &NodeArena {
        &self.work
    }

    fn create_text(&mut self, content: &str) -> Result<NodeId> {
        let props = Props::new().with(TEXT_CONTENT_PROP, content);
        let node = self.factory.create(TEXT_TAG, &props)?;
        Ok(self.work.create(node))
    }
}

impl Default for DocumentHost {
    fn default() -> Self {
        Self::new(ElementFactory::new(), HostOptions::default())
    }
}

impl HostAdapter for DocumentHost {
    type Instance = NodeId;
    type Context = HostContext;

    fn root_context(&self, _container: &Container) -> HostContext {
        HostContext::root()
    }

    fn child_context(&self, parent: &HostContext, tag: &str) -> HostContext {
        parent.enter(tag)
    }

    fn create_instance(
        &mut self,
        tag: &str,
        props: &Props,
        context: &HostContext,
    ) -> Result<NodeId> {
        match self.factory.kind_of(tag) {
            Some(TagKind::Text) => return Err(RenderError::unsupported(tag)),
            Some(TagKind::Container) if props.attributes().next().is_some() => {
                warn!(tag, "container props are not rendered");
            }
            _ => {}
        }

        let node = self.factory.create(tag, props)?;
        let id = self.work.create(node);
        trace!(%id, tag, depth = context.depth(), "created instance");

        if self.should_set_text_content(tag, props) {
            if let Some(content) = props.text(CHILDREN_PROP) {
                let text = self.create_text(&content)?;
                self.work.append_child(id, text)?;
            }
        }
        Ok(id)
    }

    fn create_text_instance(&mut self, content: &str, context: &HostContext) -> Result<NodeId> {
        let id = self.create_text(content)?;
        trace!(%id, depth = context.depth(), "created text instance");
        Ok(id)
    }

    fn append_initial_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let node = self.work.get(parent).ok_or(RenderError::UnknownNode(parent))?;
        let (appendable, kind) = (node.supports_append(), node.kind());
        if appendable {
            self.work.append_child(parent, child)
        } else if kind == NodeKind::Container {
            // Containers keep a top-level child set rather than generic
            // children.
            self.work.attach_top_level(parent, child)
        } else {
            Err(RenderError::InvalidParentKind { parent, kind })
        }
    }

    fn finalize_children(
        &mut self,
        _instance: NodeId,
        _tag: &str,
        props: &Props,
        _context: &HostContext,
    ) -> bool {
        props.is_truthy(AUTOFOCUS_PROP)
    }

    fn should_set_text_content(&self, _tag: &str, props: &Props) -> bool {
        self.options.collapse_text && props.text(CHILDREN_PROP).is_some()
    }

    fn prepare_commit(&mut self, container: &mut Container) -> Result<()> {
        self.mounted.clear();
        container.begin_commit();
        Ok(())
    }

    fn attach_to_container(&mut self, container: &mut Container, child: NodeId) -> Result<()> {
        let work = std::mem::take(&mut self.work);
        let document = Document::adopt(work, child)?;
        debug!(root = %child, nodes = document.arena().len(), "attaching to container");
        container.stage(document)
    }

    fn complete_commit(&mut self, container: &mut Container) -> Result<()> {
        self.work = NodeArena::new();
        container.finish_commit()
    }

    fn after_mount(&mut self, instance: NodeId, tag: &str, _props: &Props) {
        debug!(%instance, tag, "after mount");
        self.mounted.push(instance);
    }

    fn reset_work(&mut self) {
        if !self.work.is_empty() {
            trace!(nodes = self.work.len(), "discarding build work");
        }
        self.work = NodeArena::new();
    }
}
