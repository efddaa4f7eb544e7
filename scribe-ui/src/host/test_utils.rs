use super::context::HostContext;
use super::document::DocumentHost;
use super::traits::HostAdapter;
use crate::doc::{Container, NodeId, NodeKind, Props};
use crate::error::{RenderError, Result};
use std::cell::RefCell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    RootContext,
    ChildContext { tag: String },
    CreateInstance { tag: String },
    CreateTextInstance { content: String },
    AppendInitialChild { parent: NodeId, child: NodeId },
    FinalizeChildren { tag: String },
    ShouldSetTextContent { tag: String },
    PrepareCommit,
    AttachToContainer { child: NodeId },
    CompleteCommit,
    AfterMount { tag: String },
    ResetWork,
}

/// Test host that records every callback before forwarding it to a
/// `DocumentHost`.
pub struct RecordingHost {
    inner: DocumentHost,
    calls: RefCell<Vec<HostCall>>,
    fail_attach: bool,
    fail_prepare: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            inner: DocumentHost::default(),
            calls: RefCell::new(Vec::new()),
            fail_attach: false,
            fail_prepare: false,
        }
    }

    /// Makes `attach_to_container` fail once the commit is prepared.
    pub fn failing_attach() -> Self {
        Self {
            fail_attach: true,
            ..Self::new()
        }
    }

    /// Makes `prepare_commit` fail before the container is touched.
    pub fn failing_prepare() -> Self {
        Self {
            fail_prepare: true,
            ..Self::new()
        }
    }

    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(self.calls.get_mut())
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    pub fn inner(&self) -> &DocumentHost {
        &self.inner
    }

    fn record(&self, call: HostCall) {
        self.calls.borrow_mut().push(call);
    }

    pub fn position(&self, call: &HostCall) -> Option<usize> {
        self.calls.borrow().iter().position(|c| c == call)
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostAdapter for RecordingHost {
    type Instance = NodeId;
    type Context = HostContext;

    fn root_context(&self, container: &Container) -> HostContext {
        self.record(HostCall::RootContext);
        self.inner.root_context(container)
    }

    fn child_context(&self, parent: &HostContext, tag: &str) -> HostContext {
        self.record(HostCall::ChildContext { tag: tag.into() });
        self.inner.child_context(parent, tag)
    }

    fn create_instance(
        &mut self,
        tag: &str,
        props: &Props,
        context: &HostContext,
    ) -> Result<NodeId> {
        self.record(HostCall::CreateInstance { tag: tag.into() });
        self.inner.create_instance(tag, props, context)
    }

    fn create_text_instance(&mut self, content: &str, context: &HostContext) -> Result<NodeId> {
        self.record(HostCall::CreateTextInstance {
            content: content.into(),
        });
        self.inner.create_text_instance(content, context)
    }

    fn append_initial_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.record(HostCall::AppendInitialChild { parent, child });
        self.inner.append_initial_child(parent, child)
    }

    fn finalize_children(
        &mut self,
        instance: NodeId,
        tag: &str,
        props: &Props,
        context: &HostContext,
    ) -> bool {
        self.record(HostCall::FinalizeChildren { tag: tag.into() });
        self.inner.finalize_children(instance, tag, props, context)
    }

    fn should_set_text_content(&self, tag: &str, props: &Props) -> bool {
        self.record(HostCall::ShouldSetTextContent { tag: tag.into() });
        self.inner.should_set_text_content(tag, props)
    }

    fn prepare_commit(&mut self, container: &mut Container) -> Result<()> {
        self.record(HostCall::PrepareCommit);
        if self.fail_prepare {
            return Err(RenderError::aborted("prepare refused"));
        }
        self.inner.prepare_commit(container)
    }

    fn attach_to_container(&mut self, container: &mut Container, child: NodeId) -> Result<()> {
        self.record(HostCall::AttachToContainer { child });
        if self.fail_attach {
            return Err(RenderError::InvalidParentKind {
                parent: child,
                kind: NodeKind::Container,
            });
        }
        self.inner.attach_to_container(container, child)
    }

    fn complete_commit(&mut self, container: &mut Container) -> Result<()> {
        self.record(HostCall::CompleteCommit);
        self.inner.complete_commit(container)
    }

    fn after_mount(&mut self, instance: NodeId, tag: &str, props: &Props) {
        self.record(HostCall::AfterMount { tag: tag.into() });
        self.inner.after_mount(instance, tag, props);
    }

    fn reset_work(&mut self) {
        self.record(HostCall::ResetWork);
        self.inner.reset_work();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_host_captures_calls() {
        let mut host = RecordingHost::new();
        let ctx = HostContext::root();
        let p = host.create_instance("p", &Props::new(), &ctx).unwrap();
        let text = host.create_text_instance("Hi", &ctx).unwrap();
        host.append_initial_child(p, text).unwrap();

        let calls = host.take_calls();
        assert_eq!(
            calls,
            vec![
                HostCall::CreateInstance { tag: "p".into() },
                HostCall::CreateTextInstance {
                    content: "Hi".into()
                },
                HostCall::AppendInitialChild {
                    parent: p,
                    child: text
                },
            ]
        );
        assert!(host.calls().is_empty());
    }
}
