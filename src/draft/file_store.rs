//! JSON file backed draft store
//!
//! The file holds two top-level keys: the in-progress draft and the
//! account record whose `errors` entry carries the current validation
//! errors.

use super::patch::{merge_value, replace_keys, DraftPatch};
use super::traits::{DraftStore, DraftStoreError};
use crate::state::FormErrors;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Key of the in-progress draft
pub const DRAFT_KEY: &str = "reimbursementAccountDraft";
/// Key of the account record holding validation errors
pub const ACCOUNT_KEY: &str = "reimbursementAccount";

pub struct JsonFileDraftStore {
    path: PathBuf,
}

impl JsonFileDraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, Value>, DraftStoreError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            other => Err(DraftStoreError::Malformed(format!(
                "expected an object at the top level, found {}",
                type_name(&other)
            ))),
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<(), DraftStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(document)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Apply `update` to the object stored under `key`
    fn update_entry(
        &self,
        key: &str,
        update: impl FnOnce(&mut Map<String, Value>),
    ) -> Result<(), DraftStoreError> {
        let mut document = self.read_document()?;
        let entry = document
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(map) = entry {
            update(map);
        }
        self.write_document(&document)
    }
}

fn patch_object(patch: &DraftPatch) -> Result<Map<String, Value>, DraftStoreError> {
    match serde_json::to_value(patch)? {
        Value::Object(map) => Ok(map),
        other => Err(DraftStoreError::Malformed(format!(
            "draft patch encoded as {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl DraftStore for JsonFileDraftStore {
    fn load(&self) -> Result<Option<DraftPatch>, DraftStoreError> {
        let mut document = self.read_document()?;
        match document.remove(DRAFT_KEY) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn merge(&mut self, patch: &DraftPatch) -> Result<(), DraftStoreError> {
        if patch.is_empty() {
            return Ok(());
        }
        let patch = Value::Object(patch_object(patch)?);
        self.update_entry(DRAFT_KEY, |draft| {
            let mut current = Value::Object(std::mem::take(draft));
            merge_value(&mut current, &patch);
            if let Value::Object(map) = current {
                *draft = map;
            }
        })
    }

    fn replace(&mut self, patch: &DraftPatch) -> Result<(), DraftStoreError> {
        let patch = patch_object(patch)?;
        self.update_entry(DRAFT_KEY, |draft| replace_keys(draft, &patch))
    }

    fn set_errors(&mut self, errors: &FormErrors) -> Result<(), DraftStoreError> {
        let errors = serde_json::to_value(errors)?;
        self.update_entry(ACCOUNT_KEY, |account| {
            account.insert("errors".to_string(), errors);
        })
    }
}
