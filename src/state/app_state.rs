//! Application state definitions

use super::forms::{Checkbox, ContractForm, OwnerField};
use serde::{Deserialize, Serialize};

/// Steps of the withdrawal account setup flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BankAccountStep {
    #[serde(rename = "BankAccountStep")]
    BankAccount,
    #[serde(rename = "CompanyStep")]
    Company,
    #[serde(rename = "RequestorStep")]
    Requestor,
    #[serde(rename = "ACHContractStep")]
    AchContract,
    #[serde(rename = "ValidationStep")]
    Validation,
}

impl BankAccountStep {
    pub const ALL: [BankAccountStep; 5] = [
        BankAccountStep::BankAccount,
        BankAccountStep::Company,
        BankAccountStep::Requestor,
        BankAccountStep::AchContract,
        BankAccountStep::Validation,
    ];

    /// 1-based position in the flow
    pub fn number(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0) + 1
    }

    pub fn total() -> usize {
        Self::ALL.len()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BankAccount => "Bank account",
            Self::Company => "Company information",
            Self::Requestor => "Personal information",
            Self::AchContract => "Additional information",
            Self::Validation => "Validation",
        }
    }
}

/// Why the app stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Close button: leave the whole setup flow
    DismissModal,
    /// Back button: return to another step
    GoToStep(BankAccountStep),
    /// The step was handed to the backend
    Submitted,
}

/// A focusable element of the contract form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Checkbox(Checkbox),
    OwnerField { index: usize, field: OwnerField },
    RemoveOwner(usize),
    AddOwner,
    Submit,
}

impl FocusTarget {
    pub fn is_text_input(&self) -> bool {
        matches!(self, FocusTarget::OwnerField { field, .. } if *field != OwnerField::ManualAddress)
    }
}

/// Every focusable element for the current form, in display order
pub fn focus_targets(form: &ContractForm) -> Vec<FocusTarget> {
    let mut targets = vec![
        FocusTarget::Checkbox(Checkbox::OwnsMoreThan25Percent),
        FocusTarget::Checkbox(Checkbox::HasOtherBeneficialOwners),
    ];

    if form.has_other_beneficial_owners {
        let can_remove = form.beneficial_owners.can_remove();
        for index in 0..form.beneficial_owners.len() {
            targets.extend(
                OwnerField::TEXT_FIELDS
                    .iter()
                    .map(|field| FocusTarget::OwnerField { index, field: *field }),
            );
            targets.push(FocusTarget::OwnerField {
                index,
                field: OwnerField::ManualAddress,
            });
            if can_remove {
                targets.push(FocusTarget::RemoveOwner(index));
            }
        }
        if form.can_add_more_beneficial_owners() {
            targets.push(FocusTarget::AddOwner);
        }
    }

    targets.push(FocusTarget::Checkbox(Checkbox::AcceptTermsAndConditions));
    targets.push(FocusTarget::Checkbox(Checkbox::CertifyTrueInformation));
    targets.push(FocusTarget::Submit);
    targets
}

/// UI state that lives beside the form
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Currently focused element
    pub focus: Option<FocusTarget>,
    /// First visible line of the form body
    pub scroll_offset: usize,
    /// Transient message shown in the status bar
    pub status_message: Option<String>,
    /// Errors waiting to be shown in the modal dialog
    pub error_queue: Vec<String>,
    /// Set once the app should stop
    pub exit: Option<ExitReason>,
}

impl AppState {
    /// Focused element, falling back to the first one when the previous
    /// focus no longer exists
    pub fn focused(&self, targets: &[FocusTarget]) -> Option<FocusTarget> {
        match self.focus {
            Some(focus) if targets.contains(&focus) => Some(focus),
            _ => targets.first().copied(),
        }
    }

    pub fn focus_next(&mut self, targets: &[FocusTarget]) {
        self.focus = self.step_focus(targets, 1);
    }

    pub fn focus_prev(&mut self, targets: &[FocusTarget]) {
        self.focus = self.step_focus(targets, targets.len().saturating_sub(1));
    }

    fn step_focus(&self, targets: &[FocusTarget], delta: usize) -> Option<FocusTarget> {
        if targets.is_empty() {
            return None;
        }
        let current = self
            .focused(targets)
            .and_then(|f| targets.iter().position(|t| *t == f))
            .unwrap_or(0);
        targets.get((current + delta) % targets.len()).copied()
    }

    /// Adjust the scroll offset so `line` sits inside a viewport of `height` rows
    pub fn scroll_into_view(&mut self, line: usize, height: usize) {
        if height == 0 {
            return;
        }
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + height {
            self.scroll_offset = line + 1 - height;
        }
    }

    pub fn push_error(&mut self, message: String) {
        self.error_queue.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.error_queue.len()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.first().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        if !self.error_queue.is_empty() {
            self.error_queue.remove(0);
        }
    }
}
