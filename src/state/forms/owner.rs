//! Beneficial owner record

use super::field::{FieldValue, OwnerField};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of an owner entry for the lifetime of the screen.
/// Never persisted; entries restored from a draft get fresh ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(Uuid);

impl OwnerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An individual disclosed as owning 25% or more of the company.
/// Text fields are always written, so a cleared value overwrites the draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficialOwner {
    #[serde(skip)]
    pub id: OwnerId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub ssn_last4: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_address: Option<bool>,
}

impl BeneficialOwner {
    /// Create an empty record with a fresh id
    pub fn new() -> Self {
        Self::default()
    }

    /// Text value of a field (empty for the manual address toggle)
    pub fn text(&self, field: OwnerField) -> &str {
        match field {
            OwnerField::FirstName => &self.first_name,
            OwnerField::LastName => &self.last_name,
            OwnerField::Street => &self.street,
            OwnerField::City => &self.city,
            OwnerField::State => &self.state,
            OwnerField::ZipCode => &self.zip_code,
            OwnerField::Dob => &self.dob,
            OwnerField::SsnLast4 => &self.ssn_last4,
            OwnerField::ManualAddress => "",
        }
    }

    pub fn is_manual_address(&self) -> bool {
        self.manual_address.unwrap_or(false)
    }

    pub fn set(&mut self, field: OwnerField, value: FieldValue) {
        let slot = match field {
            OwnerField::ManualAddress => {
                self.manual_address = Some(value.as_toggle());
                return;
            }
            OwnerField::FirstName => &mut self.first_name,
            OwnerField::LastName => &mut self.last_name,
            OwnerField::Street => &mut self.street,
            OwnerField::City => &mut self.city,
            OwnerField::State => &mut self.state,
            OwnerField::ZipCode => &mut self.zip_code,
            OwnerField::Dob => &mut self.dob,
            OwnerField::SsnLast4 => &mut self.ssn_last4,
        };
        *slot = value.as_text().to_string();
    }

    /// Structural equality over the form values, ignoring identity
    pub fn same_values(&self, other: &Self) -> bool {
        OwnerField::TEXT_FIELDS
            .iter()
            .all(|f| self.text(*f) == other.text(*f))
            && self.manual_address == other.manual_address
    }

    pub fn is_blank(&self) -> bool {
        self.same_values(&BeneficialOwner::new())
    }
}
