//! Submission gate for the contract step

use super::contract_step::{ContractStep, StepPhase};
use crate::bank_accounts::{BankAccountsApi, WithdrawalAccountRequest};
use crate::state::ContractError;
use crate::validation::validate_form;
use anyhow::Result;

/// What a submit attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; errors were published and nothing was sent
    Invalid,
    /// The request was handed to the backend
    Submitted,
}

impl ContractStep {
    /// Recompute and publish all errors. True when the form can be sent.
    pub fn validate(&mut self) -> bool {
        self.errors = validate_form(&self.form, (self.today)());
        self.publish_errors();
        self.errors.is_valid()
    }

    /// Validate, then send the finalized form.
    ///
    /// Owners entered while "has other beneficial owners" was on and then
    /// switched off are not sent, but remain in memory.
    pub async fn submit<B>(&mut self, api: &mut B) -> Result<SubmitOutcome>
    where
        B: BankAccountsApi + ?Sized,
    {
        if self.phase == StepPhase::Submitted {
            return Err(ContractError::AlreadySubmitted.into());
        }
        if !self.validate() {
            tracing::info!(
                owner_errors = self.errors.beneficial_owners_errors.len(),
                "contract step has validation errors"
            );
            return Ok(SubmitOutcome::Invalid);
        }

        let request = WithdrawalAccountRequest::ach_contract(self.form.finalized());
        api.setup_withdrawal_account(&request).await?;
        self.phase = StepPhase::Submitted;
        tracing::info!("contract step submitted");
        Ok(SubmitOutcome::Submitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank_accounts::MockBankAccountsApi;
    use crate::draft::MockDraftStore;
    use crate::state::{Checkbox, OwnerField};
    use chrono::NaiveDate;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn permissive_store() -> MockDraftStore {
        let mut store = MockDraftStore::new();
        store.expect_load().returning(|| Ok(None));
        store.expect_merge().returning(|_| Ok(()));
        store.expect_replace().returning(|_| Ok(()));
        store.expect_set_errors().returning(|_| Ok(()));
        store
    }

    fn step() -> ContractStep {
        ContractStep::new(Box::new(permissive_store())).with_clock(fixed_today)
    }

    fn agree(step: &mut ContractStep) {
        step.toggle_checkbox(Checkbox::AcceptTermsAndConditions)
            .unwrap();
        step.toggle_checkbox(Checkbox::CertifyTrueInformation)
            .unwrap();
    }

    fn fill_owner(step: &mut ContractStep, index: usize) {
        let values = [
            ("firstName", "Grace"),
            ("lastName", "Hopper"),
            ("addressStreet", "123 Main Street"),
            ("addressCity", "Arlington"),
            ("addressState", "VA"),
            ("addressZipCode", "22201"),
            ("dob", "1980-12-09"),
            ("ssnLast4", "1234"),
        ];
        for (key, value) in values {
            step.clear_error_and_set_beneficial_owner_value(index, key, value)
                .unwrap();
        }
    }

    mod validate {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_requires_both_agreements() {
            let mut step = step();
            assert!(!step.validate());
            let keys: Vec<_> = step.errors().fields.keys().cloned().collect();
            assert_eq!(
                keys,
                vec![
                    "acceptTermsAndConditions".to_string(),
                    "certifyTrueInformation".to_string()
                ]
            );

            agree(&mut step);
            assert!(step.validate());
        }

        #[test]
        fn test_publishes_computed_errors() {
            let mut store = MockDraftStore::new();
            store.expect_load().returning(|| Ok(None));
            store
                .expect_set_errors()
                .withf(|e| e.fields.len() == 2 && e.beneficial_owners_errors.is_empty())
                .times(1)
                .returning(|_| Ok(()));
            let mut step = ContractStep::new(Box::new(store)).with_clock(fixed_today);
            assert!(!step.validate());
        }

        #[test]
        fn test_owner_errors_block_submission() {
            let mut step = step();
            agree(&mut step);
            step.toggle_has_other_owners().unwrap();
            assert!(!step.validate());
            assert_eq!(step.errors().beneficial_owners_errors.len(), 1);

            fill_owner(&mut step, 0);
            assert!(step.validate());
        }

        #[test]
        fn test_is_idempotent() {
            let mut step = step();
            step.toggle_has_other_owners().unwrap();
            step.validate();
            let first = step.errors().clone();
            step.validate();
            assert_eq!(step.errors(), &first);
        }

        #[test]
        fn test_editing_clears_single_owner_error() {
            let mut step = step();
            agree(&mut step);
            step.toggle_has_other_owners().unwrap();
            step.validate();
            assert!(step.errors().owner(0).unwrap().contains_key("city"));

            step.set_beneficial_owner_field(0, OwnerField::City, "Reno".into())
                .unwrap();
            assert!(!step.errors().owner(0).unwrap().contains_key("city"));
            assert!(step.errors().owner(0).unwrap().contains_key("street"));
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_invalid_form_is_not_sent() {
            let mut api = MockBankAccountsApi::new();
            api.expect_setup_withdrawal_account().never();

            let mut step = step();
            let outcome = step.submit(&mut api).await.unwrap();
            assert_eq!(outcome, SubmitOutcome::Invalid);
            assert_eq!(step.phase(), StepPhase::Editing);
        }

        #[tokio::test]
        async fn test_stale_owners_are_not_sent() {
            let mut api = MockBankAccountsApi::new();
            api.expect_setup_withdrawal_account()
                .withf(|r| {
                    !r.form.has_other_beneficial_owners && r.form.beneficial_owners.is_empty()
                })
                .times(1)
                .returning(|_| Ok(()));

            let mut step = step();
            agree(&mut step);
            step.toggle_has_other_owners().unwrap();
            step.clear_error_and_set_beneficial_owner_value(0, "firstName", "Ada")
                .unwrap();
            step.toggle_has_other_owners().unwrap();

            let outcome = step.submit(&mut api).await.unwrap();
            assert_eq!(outcome, SubmitOutcome::Submitted);
            assert_eq!(step.phase(), StepPhase::Submitted);
            assert_eq!(step.form().beneficial_owners.len(), 1);
            assert_eq!(step.form().beneficial_owners.get(0).unwrap().first_name, "Ada");
        }

        #[tokio::test]
        async fn test_valid_owners_are_sent() {
            let mut api = MockBankAccountsApi::new();
            api.expect_setup_withdrawal_account()
                .withf(|r| {
                    r.form.beneficial_owners.len() == 2
                        && r.form.beneficial_owners.get(1).unwrap().street == "123 Main Street"
                })
                .times(1)
                .returning(|_| Ok(()));

            let mut step = step();
            agree(&mut step);
            step.toggle_has_other_owners().unwrap();
            step.add_beneficial_owner().unwrap();
            fill_owner(&mut step, 0);
            fill_owner(&mut step, 1);

            assert_eq!(
                step.submit(&mut api).await.unwrap(),
                SubmitOutcome::Submitted
            );
        }

        #[tokio::test]
        async fn test_backend_error_keeps_editing() {
            let mut api = MockBankAccountsApi::new();
            api.expect_setup_withdrawal_account()
                .returning(|_| Err(anyhow::anyhow!("offline")));

            let mut step = step();
            agree(&mut step);
            assert!(step.submit(&mut api).await.is_err());
            assert_eq!(step.phase(), StepPhase::Editing);
        }

        #[test]
        fn test_second_submit_is_rejected() {
            let mut api = MockBankAccountsApi::new();
            api.expect_setup_withdrawal_account()
                .times(1)
                .returning(|_| Ok(()));

            let mut step = step();
            agree(&mut step);
            tokio_test::block_on(async {
                assert_eq!(
                    step.submit(&mut api).await.unwrap(),
                    SubmitOutcome::Submitted
                );
                let err = step.submit(&mut api).await.unwrap_err();
                assert_eq!(
                    err.downcast_ref::<ContractError>(),
                    Some(&ContractError::AlreadySubmitted)
                );
            });
        }
    }
}
