mod commit;

use crate::doc::{Container, Props};
use crate::element::{VElement, VNode, flatten_into};
use crate::error::{RenderError, Result};
use crate::factory::ROOT_TAG;
use crate::host::HostAdapter;
use commit::CommitPhase;
use smallvec::SmallVec;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, trace, warn};

type Built<I> = SmallVec<[I; 8]>;

/// Cancels the next commit of a root. Checked after `prepare_commit` and
/// before the tree is attached.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle(Rc<Cell<bool>>);

impl AbortHandle {
    pub fn abort(&self) {
        self.0.set(true);
    }

    pub fn is_aborted(&self) -> bool {
        self.0.get()
    }

    fn take(&self) -> bool {
        self.0.replace(false)
    }
}

/// Engine-side state for one container.
#[derive(Debug)]
pub struct RootHandle {
    container: Container,
    abort: AbortHandle,
    renders: u64,
}

impl RootHandle {
    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn into_container(self) -> Container {
        self.container
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Completed renders.
    pub fn renders(&self) -> u64 {
        self.renders
    }
}

struct PendingMount<I> {
    instance: I,
    tag: String,
    props: Props,
}

/// Mount-only driver for a `HostAdapter`.
///
/// Every update walks the whole tree, calls the build callbacks in engine
/// order and commits the result in one step. There is no diffing: the new
/// tree replaces whatever the container held before.
pub struct Reconciler<H: HostAdapter> {
    host: H,
}

impl<H: HostAdapter> Reconciler<H> {
    pub fn new(host: H) -> Self {
        debug!(
            primary = host.is_primary_renderer(),
            mutation = host.supports_mutation(),
            persistence = host.supports_persistence(),
            hydration = host.supports_hydration(),
            "reconciler created"
        );
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn create_container(&self, container: Container) -> RootHandle {
        RootHandle {
            container,
            abort: AbortHandle::default(),
            renders: 0,
        }
    }

    pub fn update_container(&mut self, tree: &VNode, root: &mut RootHandle) -> Result<()> {
        if !self.host.supports_mutation() {
            return Err(RenderError::aborted("host does not support mutation"));
        }

        let started = self.host.now();

        let context = self.host.root_context(&root.container);
        let mut mounts = Vec::new();
        let top = match self.build_node(tree, &context, &mut mounts) {
            Ok(top) => top,
            Err(err) => {
                self.host.reset_work();
                warn!(error = %err, "build failed");
                return Err(err);
            }
        };

        if let Err(err) = self.commit(root, top) {
            self.host.reset_work();
            warn!(error = %err, "commit failed");
            return Err(err);
        }

        for mount in mounts {
            self.host
                .after_mount(mount.instance, &mount.tag, &mount.props);
        }

        root.renders += 1;
        let elapsed = self.host.now().saturating_duration_since(started);
        debug!(
            renders = root.renders,
            elapsed_us = elapsed.as_micros() as u64,
            "render committed"
        );
        Ok(())
    }

    fn commit(&mut self, root: &mut RootHandle, top: H::Instance) -> Result<()> {
        let mut phase = CommitPhase::begin(&mut self.host, &mut root.container)?;
        if root.abort.take() {
            return Err(RenderError::aborted("abort requested"));
        }
        phase.attach(top)?;
        phase.complete()
    }

    fn build_node(
        &mut self,
        node: &VNode,
        context: &H::Context,
        mounts: &mut Vec<PendingMount<H::Instance>>,
    ) -> Result<H::Instance> {
        match node {
            VNode::Text(content) => self.host.create_text_instance(content, context),
            VNode::Element(element) => self.build_element(element, context, mounts),
            VNode::Fragment(children) => {
                // Siblings without a common parent share an implicit root.
                let mut flat = Vec::with_capacity(children.len());
                flatten_into(children, &mut flat);
                let child_context = self.host.child_context(context, ROOT_TAG);
                let built = self.build_children(&flat, &child_context, mounts)?;
                let root = self.host.create_instance(ROOT_TAG, &Props::new(), context)?;
                for child in built {
                    self.host.append_initial_child(root, child)?;
                }
                Ok(root)
            }
        }
    }

    fn build_element(
        &mut self,
        element: &VElement,
        context: &H::Context,
        mounts: &mut Vec<PendingMount<H::Instance>>,
    ) -> Result<H::Instance> {
        let tag = element.tag.as_str();
        let props = element.host_props();
        if self.host.should_deprioritize_subtree(tag, &props) {
            trace!(tag, "subtree deprioritized");
        }

        let children = if self.host.should_set_text_content(tag, &props) {
            Built::new()
        } else {
            let child_context = self.host.child_context(context, tag);
            self.build_children(&element.flat_children(), &child_context, mounts)?
        };

        let instance = self.host.create_instance(tag, &props, context)?;
        for child in children {
            self.host.append_initial_child(instance, child)?;
        }

        if self.host.finalize_children(instance, tag, &props, context) {
            mounts.push(PendingMount {
                instance,
                tag: element.tag.clone(),
                props,
            });
        }
        Ok(instance)
    }

    fn build_children(
        &mut self,
        nodes: &[&VNode],
        context: &H::Context,
        mounts: &mut Vec<PendingMount<H::Instance>>,
    ) -> Result<Built<H::Instance>> {
        let mut built = Built::with_capacity(nodes.len());
        for node in nodes {
            built.push(self.build_node(node, context, mounts)?);
        }
        Ok(built)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::NodeKind;
    use crate::element::{element, fragment, text};
    use crate::host::{AUTOFOCUS_PROP, HostCall, RecordingHost};

    fn hello_world() -> VNode {
        element("div")
            .child(element("p").prop("className", "hello-class").child("Hello"))
            .child(element("span").child("World"))
            .into()
    }

    #[test]
    fn test_commit_runs_after_build() {
        let mut reconciler = Reconciler::new(RecordingHost::new());
        let mut root = reconciler.create_container(Container::new());
        reconciler.update_container(&hello_world(), &mut root).unwrap();

        let host = reconciler.host();
        let calls = host.calls();
        let prepare = host.position(&HostCall::PrepareCommit).unwrap();
        let complete = host.position(&HostCall::CompleteCommit).unwrap();
        let last_create = calls
            .iter()
            .rposition(|c| matches!(c, HostCall::CreateInstance { .. }))
            .unwrap();
        let attaches: Vec<_> = calls
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, HostCall::AttachToContainer { .. }))
            .collect();

        assert_eq!(calls[0], HostCall::RootContext);
        assert!(last_create < prepare);
        assert_eq!(attaches.len(), 1);
        assert!(prepare < attaches[0].0 && attaches[0].0 < complete);
        assert_eq!(
            root.container().serialize(),
            r#"<div><p class="hello-class">Hello</p><span>World</span></div>"#
        );
    }

    #[test]
    fn test_children_created_before_parent() {
        let mut reconciler = Reconciler::new(RecordingHost::new());
        let mut root = reconciler.create_container(Container::new());
        reconciler
            .update_container(&element("p").child("Hello").into(), &mut root)
            .unwrap();

        let host = reconciler.host();
        let text_at = host
            .position(&HostCall::CreateTextInstance {
                content: "Hello".into(),
            })
            .unwrap();
        let p_at = host
            .position(&HostCall::CreateInstance { tag: "p".into() })
            .unwrap();
        let child_ctx_at = host
            .position(&HostCall::ChildContext { tag: "p".into() })
            .unwrap();
        assert!(child_ctx_at < text_at);
        assert!(text_at < p_at);
    }

    #[test]
    fn test_unsupported_tag_leaves_container_empty() {
        let mut reconciler = Reconciler::new(RecordingHost::new());
        let mut root = reconciler.create_container(Container::new());
        let tree: VNode = element("div")
            .child(element("p").child("fine"))
            .child(element("blink").child("nope"))
            .into();

        let err = reconciler.update_container(&tree, &mut root).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnsupportedElementType {
                tag: "blink".into()
            }
        );
        assert!(root.container().is_empty());
        assert_eq!(root.renders(), 0);

        let host = reconciler.host();
        assert!(host.position(&HostCall::PrepareCommit).is_none());
        assert!(host.position(&HostCall::ResetWork).is_some());
        assert!(host.inner().work().is_empty());
    }

    #[test]
    fn test_abort_completes_commit_without_attaching() {
        let mut reconciler = Reconciler::new(RecordingHost::new());
        let mut root = reconciler.create_container(Container::new());
        root.abort_handle().abort();

        let err = reconciler
            .update_container(&hello_world(), &mut root)
            .unwrap_err();
        assert!(matches!(err, RenderError::CommitAborted { .. }));
        assert!(root.container().is_empty());
        assert!(!root.container().is_committing());
        assert!(!root.abort_handle().is_aborted());

        let host = reconciler.host();
        assert!(host.position(&HostCall::CompleteCommit).is_some());
        assert!(
            !host
                .calls()
                .iter()
                .any(|c| matches!(c, HostCall::AttachToContainer { .. }))
        );
    }

    #[test]
    fn test_failed_attach_keeps_previous_commit() {
        let mut reconciler = Reconciler::new(RecordingHost::new());
        let mut root = reconciler.create_container(Container::new());
        reconciler
            .update_container(&element("p").child("v1").into(), &mut root)
            .unwrap();

        let mut failing = Reconciler::new(RecordingHost::failing_attach());
        let mut root2 = failing.create_container(root.into_container());
        let err = failing
            .update_container(&element("p").child("v2").into(), &mut root2)
            .unwrap_err();

        assert!(matches!(err, RenderError::InvalidParentKind { .. }));
        assert_eq!(root2.container().serialize(), "<p>v1</p>");
        assert!(!root2.container().is_committing());
        assert!(
            failing
                .host()
                .position(&HostCall::CompleteCommit)
                .is_some()
        );
    }

    #[test]
    fn test_failed_prepare_still_completes() {
        let mut reconciler = Reconciler::new(RecordingHost::failing_prepare());
        let mut root = reconciler.create_container(Container::new());

        let err = reconciler
            .update_container(&hello_world(), &mut root)
            .unwrap_err();
        assert_eq!(err, RenderError::aborted("prepare refused"));

        let host = reconciler.host();
        assert!(host.position(&HostCall::CompleteCommit).is_some());
        assert!(host.position(&HostCall::ResetWork).is_some());
        assert!(!root.container().is_committing());
        assert!(root.container().is_empty());
    }

    #[test]
    fn test_top_level_fragment_uses_implicit_root() {
        let mut reconciler = Reconciler::new(RecordingHost::new());
        let mut root = reconciler.create_container(Container::new());
        let tree = fragment([
            element("p").child("Hello").into(),
            fragment([element("span").child("World").into()]),
        ]);
        reconciler.update_container(&tree, &mut root).unwrap();

        assert_eq!(
            root.container().serialize(),
            "<p>Hello</p><span>World</span>"
        );
        assert!(
            reconciler
                .host()
                .position(&HostCall::CreateInstance {
                    tag: ROOT_TAG.into()
                })
                .is_some()
        );
    }

    #[test]
    fn test_text_at_top_level() {
        let mut reconciler = Reconciler::new(RecordingHost::new());
        let mut root = reconciler.create_container(Container::new());
        reconciler
            .update_container(&text("plain & simple"), &mut root)
            .unwrap();
        assert_eq!(root.container().serialize(), "plain &amp; simple");
    }

    #[test]
    fn test_after_mount_runs_after_commit() {
        let mut reconciler = Reconciler::new(RecordingHost::new());
        let mut root = reconciler.create_container(Container::new());
        let tree: VNode = element("div")
            .child(element("p").prop(AUTOFOCUS_PROP, true).child("focus me"))
            .child(element("span"))
            .into();
        reconciler.update_container(&tree, &mut root).unwrap();

        let host = reconciler.host();
        let complete = host.position(&HostCall::CompleteCommit).unwrap();
        let mount = host
            .position(&HostCall::AfterMount { tag: "p".into() })
            .unwrap();
        assert!(complete < mount);
        assert_eq!(host.inner().mounted().len(), 1);

        let mounted = host.inner().mounted()[0];
        assert!(root.container().document().get(mounted).is_some());
    }

    #[test]
    fn test_mounted_tracks_last_commit_only() {
        let mut reconciler = Reconciler::new(RecordingHost::new());
        let mut root = reconciler.create_container(Container::new());
        let tree: VNode = element("div").prop(AUTOFOCUS_PROP, true).into();
        for _ in 0..5 {
            reconciler.update_container(&tree, &mut root).unwrap();
        }

        let mounted = reconciler.host().inner().mounted();
        assert_eq!(mounted.len(), 1);
        assert_eq!(root.container().document().top_level(), mounted);
    }

    #[test]
    fn test_update_replaces_committed_tree() {
        let mut reconciler = Reconciler::new(RecordingHost::new());
        let mut root = reconciler.create_container(Container::new());
        reconciler
            .update_container(&element("p").child("first").into(), &mut root)
            .unwrap();
        reconciler
            .update_container(&element("h1").child("second").into(), &mut root)
            .unwrap();

        assert_eq!(root.container().serialize(), "<h1>second</h1>");
        assert_eq!(root.renders(), 2);
        assert_eq!(root.container().commits(), 2);
    }

    #[test]
    fn test_nested_root_tag_rejected() {
        let mut reconciler = Reconciler::new(RecordingHost::new());
        let mut root = reconciler.create_container(Container::new());
        let tree: VNode = element("div")
            .child(
                element(ROOT_TAG)
                    .prop("id", "x")
                    .child(element("p").child("hi")),
            )
            .into();

        let err = reconciler.update_container(&tree, &mut root).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidParentKind {
                kind: NodeKind::Element,
                ..
            }
        ));
        assert!(root.container().is_empty());
        assert!(reconciler.host().position(&HostCall::PrepareCommit).is_none());
    }

    #[test]
    fn test_text_tag_is_not_an_instance() {
        let mut reconciler = Reconciler::new(RecordingHost::new());
        let mut root = reconciler.create_container(Container::new());
        let tree: VNode = element("div").child(element("text")).into();

        let err = reconciler.update_container(&tree, &mut root).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedElementType { .. }));
        assert!(root.container().is_empty());
    }
}
