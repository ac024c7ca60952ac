//! Payload sent when the contract step is submitted

use crate::state::{BankAccountStep, ContractForm};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalAccountRequest {
    pub current_step: BankAccountStep,
    #[serde(flatten)]
    pub form: ContractForm,
}

impl WithdrawalAccountRequest {
    /// Build the request from an already finalized form
    pub fn ach_contract(form: ContractForm) -> Self {
        Self {
            current_step: BankAccountStep::AchContract,
            form,
        }
    }
}
