pub mod config;
pub mod doc;
pub mod element;
pub mod error;
pub mod factory;
pub mod host;
pub mod reconciler;
pub mod render;

// Re-export key types
pub use config::{ConfigError, ScribeConfig};
pub use doc::{Container, Document, OutputFormat, PropValue, Props, SerializeOptions};
pub use element::{VElement, VNode, element, fragment, text};
pub use error::{RenderError, Result};
pub use factory::ElementFactory;
pub use host::{DocumentHost, HostAdapter, HostContext, HostOptions};
pub use reconciler::{AbortHandle, Reconciler, RootHandle};
pub use render::{RenderRoot, render};
