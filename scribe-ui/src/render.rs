use crate::config::{ConfigError, ScribeConfig};
use crate::doc::{Container, SerializeOptions};
use crate::element::VNode;
use crate::error::Result;
use crate::host::DocumentHost;
use crate::reconciler::{AbortHandle, Reconciler, RootHandle};
use tracing::warn;

/// Renders `tree` into a fresh container with the default host.
pub fn render(tree: &VNode) -> Result<Container> {
    let mut root = RenderRoot::new();
    root.render(tree)?;
    Ok(root.into_container())
}

/// One container driven by one reconciler. Each `render` call replaces the
/// committed tree.
pub struct RenderRoot {
    reconciler: Reconciler<DocumentHost>,
    root: RootHandle,
    options: SerializeOptions,
}

impl RenderRoot {
    pub fn new() -> Self {
        Self::with_host(DocumentHost::default(), SerializeOptions::default())
    }

    pub fn with_config(config: &ScribeConfig) -> std::result::Result<Self, ConfigError> {
        let host = DocumentHost::new(config.factory()?, config.host.clone());
        Ok(Self::with_host(host, config.output.clone()))
    }

    pub fn with_host(host: DocumentHost, options: SerializeOptions) -> Self {
        let reconciler = Reconciler::new(host);
        let root = reconciler.create_container(Container::new());
        Self {
            reconciler,
            root,
            options,
        }
    }

    pub fn render(&mut self, tree: &VNode) -> Result<()> {
        self.reconciler
            .update_container(tree, &mut self.root)
            .inspect_err(|err| warn!(error = %err, "render failed"))
    }

    pub fn container(&self) -> &Container {
        self.root.container()
    }

    /// Committed document in the configured output format.
    pub fn serialize(&self) -> String {
        self.container().serialize_with(&self.options)
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.root.abort_handle()
    }

    pub fn host(&self) -> &DocumentHost {
        self.reconciler.host()
    }

    pub fn renders(&self) -> u64 {
        self.root.renders()
    }

    pub fn into_container(self) -> Container {
        self.root.into_container()
    }
}

impl Default for RenderRoot {
    fn default() -> Self {
        Self::new()
    }
}
