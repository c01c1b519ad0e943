//! Pane state types
//!
//! Everything the pane shows or submits lives here and is only mutated from the
//! session loop.

use std::fmt;

use super::editor::ActionEditor;
use crate::mail::EmailData;
use crate::sync::TaskAssignment;

/// A suspending operation the user can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Summarize,
    Sync,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Summarize => write!(f, "Summarize"),
            Self::Sync => write!(f, "Sync"),
        }
    }
}

/// At most one operation runs at a time. No cancellation, no queueing.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    current: Option<Operation>,
}

impl InFlight {
    /// Mark `op` as running, or report the operation already running
    pub fn try_begin(&mut self, op: Operation) -> Result<(), Operation> {
        match self.current {
            Some(running) => Err(running),
            None => {
                self.current = Some(op);
                Ok(())
            }
        }
    }

    pub fn finish(&mut self, op: Operation) {
        if self.current == Some(op) {
            self.current = None;
        } else {
            tracing::warn!("{} finished but {:?} was marked in flight", op, self.current);
        }
    }

    pub fn current(&self) -> Option<Operation> {
        self.current
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaneState {
    /// Extracted on the first summarize (or sync) of the session
    pub email: Option<EmailData>,
    pub editor: ActionEditor,
    pub in_flight: InFlight,
}

impl PaneState {
    /// Take a finished summarization pass: keep the email and rebuild every row
    pub fn apply_summary(&mut self, email: EmailData) {
        self.editor.populate(&email.actions, &email.recipients());
        self.email = Some(email);
    }

    /// Current rows, as they would be submitted
    pub fn tasks(&self) -> Vec<TaskAssignment> {
        self.editor.rows().to_vec()
    }
}
