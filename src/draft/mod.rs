//! Draft persistence for the in-progress form

mod file_store;
mod patch;
mod traits;

pub use file_store::JsonFileDraftStore;
pub use patch::{DraftPatch, DraftWrite};
pub use traits::DraftStore;

#[cfg(test)]
pub use traits::{DraftStoreError, MockDraftStore};
