//! Bank account setup backend

mod outbox;
mod request;
mod traits;

pub use outbox::OutboxClient;
pub use request::WithdrawalAccountRequest;
pub use traits::BankAccountsApi;

#[cfg(test)]
pub use traits::MockBankAccountsApi;
