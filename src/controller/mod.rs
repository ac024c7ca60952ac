//! Controllers that drive the contract step

mod contract_step;
mod submission;

pub use contract_step::{ContractStep, StepPhase};
pub use submission::SubmitOutcome;
