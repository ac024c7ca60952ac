//! Contract form state and its transitions
//!
//! Every user action maps to a transition that takes the current snapshot
//! and yields the next one together with the draft write it requires. The
//! controller applies the snapshot first and the draft write second.

use super::errors::ContractError;
use super::field::{FieldValue, OwnerField};
use super::owner::{BeneficialOwner, OwnerId};
use super::owner_list::OwnerList;
use crate::draft::{DraftPatch, DraftWrite};
use serde::Serialize;

/// Top-level checkboxes of the contract step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Checkbox {
    OwnsMoreThan25Percent,
    HasOtherBeneficialOwners,
    AcceptTermsAndConditions,
    CertifyTrueInformation,
}

impl Checkbox {
    /// Checkboxes that must be ticked before submitting
    pub const REQUIRED: [Checkbox; 2] = [
        Checkbox::AcceptTermsAndConditions,
        Checkbox::CertifyTrueInformation,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Checkbox::OwnsMoreThan25Percent => "ownsMoreThan25Percent",
            Checkbox::HasOtherBeneficialOwners => "hasOtherBeneficialOwners",
            Checkbox::AcceptTermsAndConditions => "acceptTermsAndConditions",
            Checkbox::CertifyTrueInformation => "certifyTrueInformation",
        }
    }

    fn patch(&self, value: bool) -> DraftPatch {
        let mut patch = DraftPatch::default();
        let slot = match self {
            Checkbox::OwnsMoreThan25Percent => &mut patch.owns_more_than_25_percent,
            Checkbox::HasOtherBeneficialOwners => &mut patch.has_other_beneficial_owners,
            Checkbox::AcceptTermsAndConditions => &mut patch.accept_terms_and_conditions,
            Checkbox::CertifyTrueInformation => &mut patch.certify_true_information,
        };
        *slot = Some(value);
        patch
    }
}

/// Result of applying one action to a snapshot
#[derive(Debug, Clone)]
pub struct Transition {
    pub form: ContractForm,
    pub draft: DraftWrite,
}

/// In-memory state of the beneficial owners step
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractForm {
    pub owns_more_than_25_percent: bool,
    pub has_other_beneficial_owners: bool,
    pub accept_terms_and_conditions: bool,
    pub certify_true_information: bool,
    pub beneficial_owners: OwnerList,
}

impl ContractForm {
    /// Initial state, preferring values saved in the draft
    pub fn from_draft(draft: Option<&DraftPatch>) -> Self {
        let Some(draft) = draft else {
            return Self::default();
        };
        Self {
            owns_more_than_25_percent: draft.owns_more_than_25_percent.unwrap_or(false),
            has_other_beneficial_owners: draft.has_other_beneficial_owners.unwrap_or(false),
            accept_terms_and_conditions: draft.accept_terms_and_conditions.unwrap_or(false),
            certify_true_information: draft.certify_true_information.unwrap_or(false),
            beneficial_owners: OwnerList::from(
                draft.beneficial_owners.clone().unwrap_or_default(),
            ),
        }
    }

    pub fn checkbox(&self, checkbox: Checkbox) -> bool {
        match checkbox {
            Checkbox::OwnsMoreThan25Percent => self.owns_more_than_25_percent,
            Checkbox::HasOtherBeneficialOwners => self.has_other_beneficial_owners,
            Checkbox::AcceptTermsAndConditions => self.accept_terms_and_conditions,
            Checkbox::CertifyTrueInformation => self.certify_true_information,
        }
    }

    fn checkbox_mut(&mut self, checkbox: Checkbox) -> &mut bool {
        match checkbox {
            Checkbox::OwnsMoreThan25Percent => &mut self.owns_more_than_25_percent,
            Checkbox::HasOtherBeneficialOwners => &mut self.has_other_beneficial_owners,
            Checkbox::AcceptTermsAndConditions => &mut self.accept_terms_and_conditions,
            Checkbox::CertifyTrueInformation => &mut self.certify_true_information,
        }
    }

    pub fn can_add_more_beneficial_owners(&self) -> bool {
        self.beneficial_owners
            .can_add_more(self.owns_more_than_25_percent)
    }

    /// Flip a checkbox and persist its new value
    pub fn toggle_checkbox(&self, checkbox: Checkbox) -> Transition {
        if checkbox == Checkbox::HasOtherBeneficialOwners {
            return self.toggle_has_other_owners();
        }
        let mut form = self.clone();
        let value = !form.checkbox(checkbox);
        *form.checkbox_mut(checkbox) = value;
        Transition {
            form,
            draft: DraftWrite::Merge(checkbox.patch(value)),
        }
    }

    /// Flip "has other beneficial owners".
    ///
    /// Turning it on with no owners seeds one empty entry. Turning it off
    /// keeps the owners in memory so they come back if it is turned on again.
    pub fn toggle_has_other_owners(&self) -> Transition {
        let mut form = self.clone();
        form.has_other_beneficial_owners = !self.has_other_beneficial_owners;
        let mut patch = Checkbox::HasOtherBeneficialOwners.patch(form.has_other_beneficial_owners);

        if form.has_other_beneficial_owners && form.beneficial_owners.is_empty() {
            form.beneficial_owners = OwnerList::from(vec![BeneficialOwner::new()]);
            patch.beneficial_owners = Some(form.beneficial_owners.to_vec());
        }

        Transition {
            form,
            draft: DraftWrite::Merge(patch),
        }
    }

    /// Append an empty owner. Persisted with the first edit to it.
    pub fn add_beneficial_owner(&self) -> Result<Transition, ContractError> {
        let mut form = self.clone();
        form.beneficial_owners.add(self.owns_more_than_25_percent)?;
        Ok(Transition {
            form,
            draft: DraftWrite::None,
        })
    }

    /// Remove an owner and overwrite the stored list, which a merge could
    /// not shrink
    pub fn remove_beneficial_owner(&self, id: OwnerId) -> Result<Transition, ContractError> {
        let mut form = self.clone();
        form.beneficial_owners.remove(id)?;
        let patch = DraftPatch::with_owners(form.beneficial_owners.to_vec());
        Ok(Transition {
            form,
            draft: DraftWrite::Replace(patch),
        })
    }

    /// Set one owner field. The manual address toggle stays in memory only.
    pub fn set_beneficial_owner_value(
        &self,
        index: usize,
        field: OwnerField,
        value: FieldValue,
    ) -> Result<Transition, ContractError> {
        let mut form = self.clone();
        form.beneficial_owners.update_field(index, field, value)?;
        let draft = if field.is_persisted() {
            DraftWrite::Merge(DraftPatch::with_owners(form.beneficial_owners.to_vec()))
        } else {
            DraftWrite::None
        };
        Ok(Transition { form, draft })
    }

    /// Copy of the form as it must be sent: owners entered before the flag
    /// was turned off are dropped.
    pub fn finalized(&self) -> ContractForm {
        let mut form = self.clone();
        if !form.has_other_beneficial_owners {
            form.beneficial_owners = OwnerList::new();
        }
        form
    }
}
