//! Controller for the beneficial owners step
//!
//! Owns the form snapshot for the lifetime of the screen, applies
//! transitions, and mirrors every mutation into the draft store.

use crate::draft::{DraftStore, DraftWrite};
use crate::state::{
    Checkbox, ContractError, ContractForm, ErrorPath, FieldValue, FormErrors, OwnerField, OwnerId,
    Transition, DOB_AGE_KEY,
};
use chrono::{Local, NaiveDate};

/// Lifecycle of the step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepPhase {
    #[default]
    Editing,
    Submitted,
}

pub struct ContractStep {
    pub(super) form: ContractForm,
    pub(super) errors: FormErrors,
    pub(super) phase: StepPhase,
    pub(super) store: Box<dyn DraftStore>,
    pub(super) today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl ContractStep {
    /// Start the step from whatever the draft store holds
    pub fn new(store: Box<dyn DraftStore>) -> Self {
        let draft = match store.load() {
            Ok(draft) => draft,
            Err(err) => {
                tracing::warn!("Ignoring unreadable draft: {err}");
                None
            }
        };
        Self {
            form: ContractForm::from_draft(draft.as_ref()),
            errors: FormErrors::default(),
            phase: StepPhase::Editing,
            store,
            today: local_today,
        }
    }

    /// Replace the date source used for age checks
    #[cfg(test)]
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn form(&self) -> &ContractForm {
        &self.form
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn phase(&self) -> StepPhase {
        self.phase
    }

    pub fn can_add_more_beneficial_owners(&self) -> bool {
        self.form.can_add_more_beneficial_owners()
    }

    pub fn toggle_checkbox(&mut self, checkbox: Checkbox) -> Result<(), ContractError> {
        self.ensure_editing()?;
        let transition = self.form.toggle_checkbox(checkbox);
        self.apply(transition);
        self.clear_error(&ErrorPath::field(checkbox.key()));
        Ok(())
    }

    pub fn toggle_has_other_owners(&mut self) -> Result<(), ContractError> {
        self.toggle_checkbox(Checkbox::HasOtherBeneficialOwners)
    }

    pub fn add_beneficial_owner(&mut self) -> Result<(), ContractError> {
        self.ensure_editing()?;
        let transition = self.form.add_beneficial_owner()?;
        self.apply(transition);
        Ok(())
    }

    /// Remove an owner by identity. All validation errors are cleared since
    /// owner error indexes no longer line up.
    pub fn remove_beneficial_owner(&mut self, id: OwnerId) -> Result<(), ContractError> {
        self.ensure_editing()?;
        let transition = self.form.remove_beneficial_owner(id)?;
        self.apply(transition);
        self.errors = FormErrors::default();
        self.publish_errors();
        Ok(())
    }

    /// Store a value reported by an identity input and clear its error
    pub fn clear_error_and_set_beneficial_owner_value(
        &mut self,
        index: usize,
        input_key: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), ContractError> {
        let field = OwnerField::from_input_key(input_key)?;
        self.set_beneficial_owner_field(index, field, value.into())
    }

    pub fn set_beneficial_owner_field(
        &mut self,
        index: usize,
        field: OwnerField,
        value: FieldValue,
    ) -> Result<(), ContractError> {
        self.ensure_editing()?;
        let transition = self.form.set_beneficial_owner_value(index, field, value)?;
        self.apply(transition);

        if field == OwnerField::Dob {
            self.clear_error(&ErrorPath::owner(index, DOB_AGE_KEY));
        }
        self.clear_error(&ErrorPath::owner(index, field.key()));
        Ok(())
    }

    /// Drop one error marker and republish if it was present
    pub fn clear_error(&mut self, path: &ErrorPath) {
        if self.errors.clear(path) {
            tracing::debug!(%path, "cleared error");
            self.publish_errors();
        }
    }

    fn ensure_editing(&self) -> Result<(), ContractError> {
        match self.phase {
            StepPhase::Editing => Ok(()),
            StepPhase::Submitted => Err(ContractError::AlreadySubmitted),
        }
    }

    /// Memory first, then the draft. Draft failures never roll back memory.
    fn apply(&mut self, transition: Transition) {
        let Transition { form, draft } = transition;
        self.form = form;

        let result = match &draft {
            DraftWrite::None => return,
            DraftWrite::Merge(patch) => self.store.merge(patch),
            DraftWrite::Replace(patch) => self.store.replace(patch),
        };
        match result {
            Ok(()) => tracing::debug!(?draft, "draft updated"),
            Err(err) => tracing::warn!("Failed to update draft: {err}"),
        }
    }

    pub(super) fn publish_errors(&mut self) {
        if let Err(err) = self.store.set_errors(&self.errors) {
            tracing::warn!("Failed to publish validation errors: {err}");
        }
    }
}
