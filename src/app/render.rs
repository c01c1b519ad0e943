//! Plain-text rendering of the pane

use std::fmt::Write;

use super::state::PaneState;
use crate::command::CommandHelp;
use crate::mail::MailItem;

/// First lines shown when the pane opens: subject and creation date straight from the
/// item, before anything has been extracted
pub fn render_item_header<I: MailItem>(item: &I) -> String {
    let subject = item.subject().unwrap_or(crate::constants::NO_SUBJECT);
    match item.created() {
        Some(created) => format!("{} ({})", subject, created.format("%d-%m-%Y")),
        None => subject.to_string(),
    }
}

pub fn render_pane(state: &PaneState) -> String {
    let mut out = String::new();

    if let Some(ref email) = state.email {
        let _ = writeln!(out, "Subject: {}", email.subject);
        if let Some(date) = email.created_display() {
            let _ = writeln!(out, "Date:    {}", date);
        }
        let _ = writeln!(out, "From:    {}", email.from);
        let _ = writeln!(out, "To:      {}", email.to_display());
        if !email.cc.is_empty() {
            let _ = writeln!(out, "CC:      {}", email.cc_display());
        }
    } else {
        let _ = writeln!(out, "Nothing extracted yet. Run 'summarize'.");
    }

    if !state.editor.is_visible() {
        return out;
    }

    let _ = writeln!(out, "\nActions:");
    for (i, row) in state.editor.rows().iter().enumerate() {
        let assignee = if row.assigned_to.is_empty() {
            "-"
        } else {
            row.assigned_to.as_str()
        };
        let _ = writeln!(out, "  {:>2}. {}  [{}]", i + 1, row.title, assignee);
    }

    let options: Vec<&str> = state
        .editor
        .options()
        .iter()
        .map(|o| o.label.as_str())
        .collect();
    let _ = writeln!(out, "Assignees: {}", options.join(" | "));

    out
}

pub fn render_help(commands: &[CommandHelp]) -> String {
    let width = commands.iter().map(|c| c.name.len()).max().unwrap_or(0);
    commands
        .iter()
        .map(|c| format!("  {:<width$}  {}", c.name, c.description, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
