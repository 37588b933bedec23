//! Application state definitions

use super::field::IdentityForm;
use super::form_record::FormRecord;
use super::wizard::{Wizard, WizardPlan};

/// Main application state: the wizard engine, the record it fills,
/// and the transient per-screen input state.
pub struct AppState {
    /// The branching step machine
    pub wizard: Wizard,
    /// Answers collected so far
    pub record: FormRecord,
    /// Input state for the personal info step
    pub identity: IdentityForm,
    /// Highlighted option on two-choice steps (0 = first option)
    pub choice: usize,
    /// Acknowledgment shown on the thank-you step
    pub status_message: Option<String>,
    /// Modal error, dismissed with Enter/Esc
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new(plan: WizardPlan) -> Self {
        Self {
            wizard: Wizard::new(plan),
            record: FormRecord::default(),
            identity: IdentityForm::new(),
            choice: 0,
            status_message: None,
            error_message: None,
        }
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    /// Clear the per-visit input state after a full restart
    pub fn reset_inputs(&mut self) {
        self.identity = IdentityForm::new();
        self.choice = 0;
        self.status_message = None;
    }
}
