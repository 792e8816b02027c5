//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the CLI front end runs one parsed command against the workspace.
pub trait InputPort {
    /// Execute the command. The caller persists the workspace only on `Ok`.
    fn run(&mut self) -> Result<(), DomainError>;
}
