//! Editable action rows
//!
//! The rows are the source of truth for what gets synced; rendering only
//! reflects them.

use thiserror::Error;

use crate::constants::NO_ASSIGNEE_LABEL;
use crate::sync::TaskAssignment;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("No action row {0}")]
    NoSuchRow(usize),
    #[error("{0} is not a recipient of this email")]
    UnknownRecipient(String),
}

/// One entry of a row's assignee selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default)]
pub struct ActionEditor {
    rows: Vec<TaskAssignment>,
    options: Vec<AssigneeOption>,
}

impl ActionEditor {
    /// Replace all rows with one unassigned row per action. Options are a blank entry
    /// followed by every recipient, in order, duplicates included.
    pub fn populate(&mut self, actions: &[String], recipients: &[String]) {
        self.rows.clear();
        self.rows.extend(actions.iter().map(TaskAssignment::new));

        self.options.clear();
        self.options.push(AssigneeOption {
            value: String::new(),
            label: NO_ASSIGNEE_LABEL.to_string(),
        });
        self.options.extend(recipients.iter().map(|r| AssigneeOption {
            value: r.clone(),
            label: r.clone(),
        }));
    }

    pub fn rows(&self) -> &[TaskAssignment] {
        &self.rows
    }

    pub fn options(&self) -> &[AssigneeOption] {
        &self.options
    }

    pub fn option_values(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.value.as_str()).collect()
    }

    /// The table is only shown when there is something in it
    pub fn is_visible(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn set_title(&mut self, row: usize, title: impl Into<String>) -> Result<(), EditorError> {
        let entry = self.rows.get_mut(row).ok_or(EditorError::NoSuchRow(row + 1))?;
        entry.title = title.into();
        Ok(())
    }

    /// Assign a row to one of the offered addresses; the empty string unassigns
    pub fn assign(&mut self, row: usize, address: &str) -> Result<(), EditorError> {
        if !self.option_values().contains(&address) {
            return Err(EditorError::UnknownRecipient(address.to_string()));
        }
        let entry = self.rows.get_mut(row).ok_or(EditorError::NoSuchRow(row + 1))?;
        entry.assigned_to = address.to_string();
        Ok(())
    }
}
