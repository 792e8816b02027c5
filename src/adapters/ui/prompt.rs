//! Implements ConfirmPort with inquire.

use crate::domain::DomainError;
use crate::ports::ConfirmPort;
use inquire::{Confirm, InquireError};

/// Interactive yes/no prompt, defaulting to "no".
pub struct InquireConfirm;

impl ConfirmPort for InquireConfirm {
    fn confirm(&self, message: &str) -> Result<bool, DomainError> {
        match Confirm::new(message).with_default(false).prompt() {
            Ok(answer) => Ok(answer),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(false),
            Err(e) => Err(DomainError::Prompt(e.to_string())),
        }
    }
}

/// Answers every prompt the same way. Used for scripted runs and tests.
pub struct FixedConfirm(pub bool);

impl ConfirmPort for FixedConfirm {
    fn confirm(&self, _message: &str) -> Result<bool, DomainError> {
        Ok(self.0)
    }
}
