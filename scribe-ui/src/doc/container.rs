use super::document::Document;
use super::serialize::SerializeOptions;
use crate::error::{RenderError, Result};

/// Render target. Holds the last committed document; a commit in progress
/// is staged separately and only becomes visible once it completes.
#[derive(Debug, Default)]
pub struct Container {
    committed: Document,
    staging: Option<Staging>,
    commits: u64,
}

#[derive(Debug, Default)]
struct Staging {
    document: Option<Document>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            committed: Document::new(),
            staging: None,
            commits: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.committed
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Number of completed commits.
    pub fn commits(&self) -> u64 {
        self.commits
    }

    pub fn is_committing(&self) -> bool {
        self.staging.is_some()
    }

    pub fn serialize(&self) -> String {
        self.committed.serialize()
    }

    pub fn serialize_with(&self, options: &SerializeOptions) -> String {
        self.committed.serialize_with(options)
    }

    /// Opens a commit. A commit that was left open is discarded.
    pub fn begin_commit(&mut self) {
        if self.staging.replace(Staging::default()).is_some() {
            tracing::warn!("discarding unfinished commit");
        }
    }

    /// Stages the built document. Runs once per commit.
    pub fn stage(&mut self, document: Document) -> Result<()> {
        let staging = self
            .staging
            .as_mut()
            .ok_or(RenderError::NoCommitInProgress)?;
        if staging.document.is_some() {
            return Err(RenderError::aborted("root already attached in this commit"));
        }
        staging.document = Some(document);
        Ok(())
    }

    /// Closes the open commit. Publishes the staged document, or discards the
    /// commit and reports `CommitAborted` when nothing was attached.
    pub fn finish_commit(&mut self) -> Result<()> {
        let staging = self.staging.take().ok_or(RenderError::NoCommitInProgress)?;
        match staging.document {
            Some(document) => {
                self.committed = document;
                self.commits += 1;
                Ok(())
            }
            None => Err(RenderError::aborted("no root attached before commit completed")),
        }
    }
}
