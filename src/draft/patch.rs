//! Draft payloads and merge semantics

use crate::state::BeneficialOwner;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Partial view of the persisted draft. Absent keys are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owns_more_than_25_percent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_other_beneficial_owners: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_terms_and_conditions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certify_true_information: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficial_owners: Option<Vec<BeneficialOwner>>,
}

impl DraftPatch {
    pub fn is_empty(&self) -> bool {
        self.owns_more_than_25_percent.is_none()
            && self.has_other_beneficial_owners.is_none()
            && self.accept_terms_and_conditions.is_none()
            && self.certify_true_information.is_none()
            && self.beneficial_owners.is_none()
    }

    pub fn with_owners(owners: Vec<BeneficialOwner>) -> Self {
        Self {
            beneficial_owners: Some(owners),
            ..Default::default()
        }
    }
}

/// How a transition wants the draft updated
#[derive(Debug, Clone, Default)]
pub enum DraftWrite {
    #[default]
    None,
    /// Combine with the stored draft
    Merge(DraftPatch),
    /// Overwrite each key present in the patch
    Replace(DraftPatch),
}

/// Deep merge `patch` into `target`.
///
/// Objects merge key by key, arrays merge element-wise by index and a
/// `null` in the patch deletes the key. A shorter array therefore never
/// shrinks a stored one; use [`replace_keys`] for that.
pub fn merge_value(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => merge_object(target, patch),
        (Value::Array(target), Value::Array(patch)) => {
            for (i, item) in patch.iter().enumerate() {
                match target.get_mut(i) {
                    Some(slot) => merge_value(slot, item),
                    None => target.push(item.clone()),
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

fn merge_object(target: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, value) in patch {
        if value.is_null() {
            target.remove(key);
            continue;
        }
        match target.get_mut(key) {
            Some(slot) => merge_value(slot, value),
            None => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Overwrite every key of `patch` in `target` wholesale
pub fn replace_keys(target: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, value) in patch {
        if value.is_null() {
            target.remove(key);
        } else {
            target.insert(key.clone(), value.clone());
        }
    }
}
