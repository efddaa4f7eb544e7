use crate::doc::{Container, Props};
use crate::error::Result;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeoutHandle(pub u64);

impl TimeoutHandle {
    pub const NONE: TimeoutHandle = TimeoutHandle(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackHandle(pub u64);

impl CallbackHandle {
    pub const NONE: CallbackHandle = CallbackHandle(0);
}

/// Callback contract the reconciler drives.
///
/// Build-phase methods (`root_context` through `should_set_text_content`)
/// may run speculatively and must not touch the container. The commit phase
/// (`prepare_commit`, `attach_to_container`, `complete_commit`) is the only
/// place the container changes, and `complete_commit` runs on every path out
/// of a prepared commit, aborts included.
pub trait HostAdapter {
    type Instance: Copy + std::fmt::Debug;
    type Context: Clone;

    fn root_context(&self, container: &Container) -> Self::Context;

    fn child_context(&self, parent: &Self::Context, tag: &str) -> Self::Context;

    /// Creates a non-leaf instance. Text leaves go through
    /// `create_text_instance`.
    fn create_instance(
        &mut self,
        tag: &str,
        props: &Props,
        context: &Self::Context,
    ) -> Result<Self::Instance>;

    fn create_text_instance(
        &mut self,
        content: &str,
        context: &Self::Context,
    ) -> Result<Self::Instance>;

    fn append_initial_child(&mut self, parent: Self::Instance, child: Self::Instance)
    -> Result<()>;

    /// Returns whether `after_mount` should run for this instance.
    fn finalize_children(
        &mut self,
        _instance: Self::Instance,
        _tag: &str,
        _props: &Props,
        _context: &Self::Context,
    ) -> bool {
        false
    }

    fn should_set_text_content(&self, _tag: &str, _props: &Props) -> bool {
        false
    }

    fn prepare_commit(&mut self, container: &mut Container) -> Result<()>;

    fn attach_to_container(
        &mut self,
        container: &mut Container,
        child: Self::Instance,
    ) -> Result<()>;

    fn complete_commit(&mut self, container: &mut Container) -> Result<()>;

    fn after_mount(&mut self, _instance: Self::Instance, _tag: &str, _props: &Props) {}

    /// Drops build work that will never be committed.
    fn reset_work(&mut self) {}

    // Scheduling and capability hooks. Part of the engine contract; the
    // mount-only driver reads `now` and the capability flags and never
    // schedules.

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn schedule_timeout(&mut self, _delay: Duration) -> TimeoutHandle {
        self.no_timeout()
    }

    fn cancel_timeout(&mut self, _handle: TimeoutHandle) {}

    fn no_timeout(&self) -> TimeoutHandle {
        TimeoutHandle::NONE
    }

    fn schedule_deferred_callback(&mut self) -> CallbackHandle {
        CallbackHandle::NONE
    }

    fn cancel_deferred_callback(&mut self, _handle: CallbackHandle) {}

    fn should_deprioritize_subtree(&self, _tag: &str, _props: &Props) -> bool {
        false
    }

    fn prepare_update(
        &self,
        _instance: Self::Instance,
        _tag: &str,
        _old_props: &Props,
        _new_props: &Props,
    ) -> bool {
        true
    }

    fn is_primary_renderer(&self) -> bool {
        false
    }

    fn supports_mutation(&self) -> bool {
        true
    }

    fn supports_persistence(&self) -> bool {
        false
    }

    fn supports_hydration(&self) -> bool {
        false
    }
}
