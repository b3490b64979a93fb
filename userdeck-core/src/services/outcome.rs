//! Result of a controller action

use tracing::error;

use crate::domain::result::Error;

/// What happened to local state after an action
///
/// The controller has already logged failures by the time this is returned;
/// callers may surface, retry, or drop it.
#[derive(Debug)]
pub enum ActionOutcome {
    /// The remote call succeeded and local state was updated
    Applied,
    /// Nothing was sent (nothing to submit, or the form did not validate)
    Skipped(String),
    /// The remote call failed; local state is exactly as before
    Failed(Error),
}

impl ActionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ActionOutcome::Failed(_))
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            ActionOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Short human-readable description
    pub fn describe(&self) -> String {
        match self {
            ActionOutcome::Applied => "applied".to_string(),
            ActionOutcome::Skipped(reason) => format!("skipped: {}", reason),
            ActionOutcome::Failed(e) => format!("failed: {}", e),
        }
    }
}

/// Log a failed remote call and wrap it
pub(crate) fn failed(action: &str, err: Error) -> ActionOutcome {
    error!(action, error = %err, "remote call failed, local state unchanged");
    ActionOutcome::Failed(err)
}
