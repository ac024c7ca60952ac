//! Trait abstraction for draft persistence to enable mocking in tests

use super::patch::DraftPatch;
use crate::state::FormErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DraftStoreError {
    #[error("draft io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("draft encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed draft file: {0}")]
    Malformed(String),
}

/// Durable shadow copy of the in-progress form plus its current errors
#[cfg_attr(test, mockall::automock)]
pub trait DraftStore: Send {
    /// Read the saved draft, if any
    fn load(&self) -> Result<Option<DraftPatch>, DraftStoreError>;

    /// Combine the patch with the saved draft
    fn merge(&mut self, patch: &DraftPatch) -> Result<(), DraftStoreError>;

    /// Overwrite each key present in the patch
    fn replace(&mut self, patch: &DraftPatch) -> Result<(), DraftStoreError>;

    /// Publish validation errors for display (last write wins)
    fn set_errors(&mut self, errors: &FormErrors) -> Result<(), DraftStoreError>;
}

