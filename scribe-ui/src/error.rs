use crate::doc::{NodeId, NodeKind};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Unsupported element type `{tag}`")]
    UnsupportedElementType { tag: String },

    #[error("Cannot attach child to {kind} node {parent}")]
    InvalidParentKind { parent: NodeId, kind: NodeKind },

    #[error("Commit aborted: {reason}")]
    CommitAborted { reason: String },

    #[error("Node {child} is already attached to {parent}")]
    AlreadyAttached { child: NodeId, parent: NodeId },

    #[error("Attaching {child} under {parent} would create a cycle")]
    WouldCycle { child: NodeId, parent: NodeId },

    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    #[error("No commit in progress")]
    NoCommitInProgress,
}

impl RenderError {
    pub(crate) fn unsupported(tag: impl Into<String>) -> Self {
        Self::UnsupportedElementType { tag: tag.into() }
    }

    pub(crate) fn aborted(reason: impl Into<String>) -> Self {
        Self::CommitAborted {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
