//! Form domain layer
//!
//! Type-safe state for the beneficial owners step: owner records, the
//! bounded owner list, the top-level checkboxes and validation errors.

mod errors;
mod field;
mod form_state;
mod owner;
mod owner_list;

pub use errors::{error_text, ContractError, ErrorMap, ErrorPath, FormErrors, DOB_AGE_KEY};
pub use field::{FieldValue, OwnerField};
pub use form_state::{Checkbox, ContractForm, Transition};
pub use owner::{BeneficialOwner, OwnerId};

#[cfg(test)]
pub use owner_list::OwnerList;
