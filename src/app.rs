//! Application state and core logic

use crate::bank_accounts::BankAccountsApi;
use crate::controller::{ContractStep, StepPhase, SubmitOutcome};
use crate::platform::COMMAND_MODIFIER;
use crate::state::{
    focus_targets, AppState, BankAccountStep, Checkbox, ContractError, ExitReason, FocusTarget,
    OwnerField,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current UI state
    pub state: AppState,
    /// The beneficial owners step being edited
    pub contract: ContractStep,
    /// Backend receiving the finished step
    api: Box<dyn BankAccountsApi>,
    /// Company the filer is answering for
    pub company_name: String,
}

impl App {
    pub fn new(
        contract: ContractStep,
        api: Box<dyn BankAccountsApi>,
        company_name: impl Into<String>,
    ) -> Self {
        Self {
            state: AppState::default(),
            contract,
            api,
            company_name: company_name.into(),
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.state.exit.is_some()
    }

    pub fn exit_reason(&self) -> Option<ExitReason> {
        self.state.exit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Focusable elements for the current form
    pub fn focus_targets(&self) -> Vec<FocusTarget> {
        focus_targets(self.contract.form())
    }

    pub fn focused(&self) -> Option<FocusTarget> {
        self.state.focused(&self.focus_targets())
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        self.state.status_message = None;
        let targets = self.focus_targets();
        let focused = self.state.focused(&targets);
        let in_text_input = focused.is_some_and(|f| f.is_text_input());
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('s') if ctrl => self.submit().await,
            KeyCode::Enter if key.modifiers.contains(COMMAND_MODIFIER) => self.submit().await,
            KeyCode::Char('b') if ctrl => self.go_to_step(BankAccountStep::Requestor),
            KeyCode::Esc => {
                tracing::info!("closing the setup flow");
                self.state.exit = Some(ExitReason::DismissModal);
            }
            KeyCode::Tab | KeyCode::Down => self.state.focus_next(&targets),
            KeyCode::BackTab | KeyCode::Up => self.state.focus_prev(&targets),
            KeyCode::Enter if in_text_input => self.state.focus_next(&targets),
            KeyCode::Enter => {
                if let Some(target) = focused {
                    self.activate(target).await;
                }
            }
            KeyCode::Char(c) if in_text_input && !ctrl => {
                if let Some(FocusTarget::OwnerField { index, field }) = focused {
                    self.input_char(index, field, c);
                }
            }
            KeyCode::Char(' ') => {
                if let Some(target) = focused {
                    self.activate(target).await;
                }
            }
            KeyCode::Backspace => {
                if let Some(FocusTarget::OwnerField { index, field }) = focused {
                    self.backspace(index, field);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn go_to_step(&mut self, step: BankAccountStep) {
        tracing::info!(step = step.label(), "navigating to another step");
        self.state.exit = Some(ExitReason::GoToStep(step));
    }

    async fn activate(&mut self, target: FocusTarget) {
        match target {
            FocusTarget::Checkbox(Checkbox::HasOtherBeneficialOwners) => {
                let result = self.contract.toggle_has_other_owners();
                self.report(result);
            }
            FocusTarget::Checkbox(checkbox) => {
                let result = self.contract.toggle_checkbox(checkbox);
                self.report(result);
            }
            FocusTarget::OwnerField {
                index,
                field: OwnerField::ManualAddress,
            } => {
                let manual = self
                    .contract
                    .form()
                    .beneficial_owners
                    .get(index)
                    .is_some_and(|o| o.is_manual_address());
                let result = self.contract.clear_error_and_set_beneficial_owner_value(
                    index,
                    OwnerField::ManualAddress.input_key(),
                    !manual,
                );
                self.report(result);
            }
            FocusTarget::OwnerField { .. } => {}
            FocusTarget::RemoveOwner(index) => self.remove_owner(index),
            FocusTarget::AddOwner => self.add_owner(),
            FocusTarget::Submit => self.submit().await,
        }
    }

    fn add_owner(&mut self) {
        let result = self.contract.add_beneficial_owner();
        if result.is_ok() {
            let index = self.contract.form().beneficial_owners.len().saturating_sub(1);
            self.state.focus = Some(FocusTarget::OwnerField {
                index,
                field: OwnerField::FirstName,
            });
        }
        self.report(result);
    }

    fn remove_owner(&mut self, index: usize) {
        let owners = &self.contract.form().beneficial_owners;
        let Some(id) = owners.get(index).map(|o| o.id) else {
            let len = owners.len();
            self.report(Err(ContractError::OwnerIndexOutOfRange { index, len }));
            return;
        };
        let result = self.contract.remove_beneficial_owner(id);
        if result.is_ok() {
            self.state.status_message = Some("Owner removed".to_string());
        }
        self.report(result);
    }

    fn input_char(&mut self, index: usize, field: OwnerField, c: char) {
        let Some(owner) = self.contract.form().beneficial_owners.get(index) else {
            return;
        };
        let current = owner.text(field);
        if field
            .max_len()
            .is_some_and(|max| current.chars().count() >= max)
        {
            return;
        }
        let value = format!("{current}{c}");
        let result =
            self.contract
                .clear_error_and_set_beneficial_owner_value(index, field.input_key(), value);
        self.report(result);
    }

    fn backspace(&mut self, index: usize, field: OwnerField) {
        let Some(owner) = self.contract.form().beneficial_owners.get(index) else {
            return;
        };
        let mut value = owner.text(field).to_string();
        if value.pop().is_none() {
            return;
        }
        let result =
            self.contract
                .clear_error_and_set_beneficial_owner_value(index, field.input_key(), value);
        self.report(result);
    }

    async fn submit(&mut self) {
        if self.contract.phase() == StepPhase::Submitted {
            self.state.exit = Some(ExitReason::Submitted);
            return;
        }
        match self.contract.submit(self.api.as_mut()).await {
            Ok(SubmitOutcome::Submitted) => {
                self.state.exit = Some(ExitReason::Submitted);
            }
            Ok(SubmitOutcome::Invalid) => {
                self.state.status_message =
                    Some("Please fix the errors in the form before continuing".to_string());
            }
            Err(err) => {
                tracing::error!("Submission failed: {err:#}");
                self.push_error(format!("Failed to submit: {err:#}"));
            }
        }
    }

    fn report(&mut self, result: Result<(), ContractError>) {
        if let Err(err) = result {
            tracing::warn!("Rejected form action: {err}");
            self.push_error(err.to_string());
        }
    }
}
