//! Configuration errors and the raise-or-warn policy.

use muidom::{ElementId, HostError};
use thiserror::Error;

use crate::config::ErrorPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormsError {
    #[error("select {control} has no options to show")]
    NoOptions { control: ElementId },

    #[error(
        "select {control} was given a value without an on_change handler; \
         it will not reflect user selections"
    )]
    ControlledWithoutOnChange { control: ElementId },

    #[error(transparent)]
    Host(#[from] HostError),
}

/// How serious a reported problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Always logged, never returned.
    Warning,
    /// Returned under [`ErrorPolicy::Strict`], logged otherwise.
    Error,
}

/// Surface a configuration problem according to `policy`.
pub fn report(policy: ErrorPolicy, severity: Severity, err: FormsError) -> Result<(), FormsError> {
    match (severity, policy) {
        (Severity::Warning, _) => {
            log::warn!("MUI Warning: {}", err);
            Ok(())
        }
        (Severity::Error, ErrorPolicy::Permissive) => {
            log::error!("MUI: {}", err);
            Ok(())
        }
        (Severity::Error, ErrorPolicy::Strict) => Err(err),
    }
}
