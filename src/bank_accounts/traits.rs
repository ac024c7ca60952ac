//! Trait abstraction for the bank account backend to enable mocking in tests

use super::request::WithdrawalAccountRequest;
use anyhow::Result;
use async_trait::async_trait;

/// Backend operations used by the contract step
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BankAccountsApi: Send + Sync {
    /// Hand the finalized step over to the backend. The caller does not
    /// interpret the response or retry.
    async fn setup_withdrawal_account(&mut self, request: &WithdrawalAccountRequest) -> Result<()>;
}
