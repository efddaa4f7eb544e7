mod context;
mod document;
#[cfg(test)]
pub mod test_utils;
mod traits;

pub use context::HostContext;
pub use document::{AUTOFOCUS_PROP, DocumentHost, HostOptions};
pub use traits::{CallbackHandle, HostAdapter, TimeoutHandle};

#[cfg(test)]
pub use test_utils::{HostCall, RecordingHost};
