use crate::doc::Container;
use crate::error::Result;
use crate::host::HostAdapter;
use tracing::warn;

/// Open commit on a container. `complete_commit` runs exactly once, either
/// through `complete` or when the phase is dropped on an error path.
pub(crate) struct CommitPhase<'a, H: HostAdapter> {
    host: &'a mut H,
    container: &'a mut Container,
    open: bool,
}

impl<'a, H: HostAdapter> CommitPhase<'a, H> {
    pub(crate) fn begin(host: &'a mut H, container: &'a mut Container) -> Result<Self> {
        if let Err(err) = host.prepare_commit(container) {
            if let Err(cleanup) = host.complete_commit(container) {
                warn!(error = %cleanup, "commit cleanup after failed prepare");
            }
            return Err(err);
        }
        Ok(Self {
            host,
            container,
            open: true,
        })
    }

    pub(crate) fn attach(&mut self, child: H::Instance) -> Result<()> {
        self.host.attach_to_container(self.container, child)
    }

    pub(crate) fn complete(mut self) -> Result<()> {
        self.open = false;
        self.host.complete_commit(self.container)
    }
}

impl<H: HostAdapter> Drop for CommitPhase<'_, H> {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        match self.host.complete_commit(self.container) {
            Ok(()) => warn!("commit completed while unwinding"),
            Err(err) => warn!(error = %err, "commit rolled back"),
        }
    }
}
