//! System prompts for AI features

/// Instruction for turning an email into a bare list of actions. The email text is
/// appended after a blank line.
pub const ACTION_ITEMS_SYSTEM: &str = r#"Summarize the following content into actionable tasks and don't get out of the given context. Don't show "Tasks" as a title at the beginning while summarizing the actions. Return only the list of actions directly :"#;

/// Build the single system message sent for one summarization
pub fn action_items_prompt(content: &str) -> String {
    format!("{}\n\n{}", ACTION_ITEMS_SYSTEM, content)
}
