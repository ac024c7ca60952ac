//! Validation error state and controller errors

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Field name to "is invalid" marker. An empty map means valid.
pub type ErrorMap = BTreeMap<String, bool>;

/// Key of the secondary date-of-birth error (minimum age)
pub const DOB_AGE_KEY: &str = "dobAge";

/// Errors raised by form operations that cannot be applied
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContractError {
    #[error("unknown beneficial owner field: {0}")]
    UnknownField(String),

    #[error("beneficial owner index {index} out of range (have {len})")]
    OwnerIndexOutOfRange { index: usize, len: usize },

    #[error("no more beneficial owners can be added")]
    OwnerLimitReached,

    #[error("beneficial owner not found")]
    OwnerNotFound,

    #[error("the form has already been submitted")]
    AlreadySubmitted,
}

/// Address of a single error marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorPath {
    /// Top-level form field such as `acceptTermsAndConditions`
    Field(String),
    /// Field of the beneficial owner at `index`
    Owner { index: usize, key: String },
}

impl ErrorPath {
    pub fn field(key: impl Into<String>) -> Self {
        ErrorPath::Field(key.into())
    }

    pub fn owner(index: usize, key: impl Into<String>) -> Self {
        ErrorPath::Owner {
            index,
            key: key.into(),
        }
    }
}

impl fmt::Display for ErrorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPath::Field(key) => write!(f, "{key}"),
            ErrorPath::Owner { index, key } => write!(f, "beneficialOwnersErrors[{index}].{key}"),
        }
    }
}

/// Derived validation state pushed to the error display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormErrors {
    #[serde(flatten)]
    pub fields: ErrorMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub beneficial_owners_errors: Vec<ErrorMap>,
}

impl FormErrors {
    /// True when no owner map and no top-level field carries an error
    pub fn is_valid(&self) -> bool {
        self.fields.is_empty() && self.beneficial_owners_errors.iter().all(ErrorMap::is_empty)
    }

    pub fn has(&self, path: &ErrorPath) -> bool {
        match path {
            ErrorPath::Field(key) => self.fields.get(key).copied().unwrap_or(false),
            ErrorPath::Owner { index, key } => self
                .beneficial_owners_errors
                .get(*index)
                .and_then(|m| m.get(key))
                .copied()
                .unwrap_or(false),
        }
    }

    /// Errors for the owner at `index`, if any were computed
    pub fn owner(&self, index: usize) -> Option<&ErrorMap> {
        self.beneficial_owners_errors.get(index)
    }

    /// Remove the marker at `path`. Returns whether anything was removed.
    pub fn clear(&mut self, path: &ErrorPath) -> bool {
        match path {
            ErrorPath::Field(key) => self.fields.remove(key).is_some(),
            ErrorPath::Owner { index, key } => self
                .beneficial_owners_errors
                .get_mut(*index)
                .is_some_and(|m| m.remove(key).is_some()),
        }
    }
}

/// English copy for an error key
pub fn error_text(key: &str) -> &'static str {
    match key {
        "acceptTermsAndConditions" => "You must accept the terms and conditions",
        "certifyTrueInformation" => "You must certify that the information is true and accurate",
        "firstName" => "Please enter a valid first name",
        "lastName" => "Please enter a valid last name",
        "street" => "Please enter a valid street address that is not a PO box",
        "city" => "Please enter a valid city",
        "state" => "Please select a valid state",
        "zipCode" => "Please enter a valid zip code using the format: 12345, 12345-1234, 12345 1234",
        "dob" => "Please select a valid date",
        DOB_AGE_KEY => "Must be over 18 years old",
        "ssnLast4" => "Please enter valid last 4 digits of SSN",
        _ => "This field is required",
    }
}
