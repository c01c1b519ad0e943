//! Pane command types and parsing

/// Result of command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Success(String),
    Error(String),
    ShowHelp(Vec<CommandHelp>),
}

/// Help information for a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandHelp {
    pub name: &'static str,
    pub description: &'static str,
}

/// Parsed command from user input. Row numbers are already zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Summarize,
    Sync,
    Show,
    Edit { row: usize, title: String },
    /// `None` clears the assignment
    Assign { row: usize, address: Option<String> },
    Help,
    Quit,
}

/// Parse a command string into a ParsedCommand
pub fn parse_command(input: &str) -> Option<ParsedCommand> {
    let trimmed = input.trim();
    let (name, rest) = trimmed
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((trimmed, ""));

    match name {
        "summarize" | "s" if rest.is_empty() => Some(ParsedCommand::Summarize),
        "sync" | "y" if rest.is_empty() => Some(ParsedCommand::Sync),
        "show" | "ls" if rest.is_empty() => Some(ParsedCommand::Show),
        "help" | "h" | "?" => Some(ParsedCommand::Help),
        "q" | "quit" => Some(ParsedCommand::Quit),
        "edit" | "e" => {
            let (row, title) = split_row(rest)?;
            if title.is_empty() {
                return None;
            }
            Some(ParsedCommand::Edit {
                row,
                title: title.to_string(),
            })
        }
        "assign" | "a" => {
            let (row, address) = split_row(rest)?;
            let address = match address {
                "" => return None,
                "-" => None,
                addr => Some(addr.to_string()),
            };
            Some(ParsedCommand::Assign { row, address })
        }
        _ => None,
    }
}

/// Split "<n> <rest>" where n is a 1-based row number
fn split_row(args: &str) -> Option<(usize, &str)> {
    let (num, rest) = args
        .split_once(char::is_whitespace)
        .unwrap_or((args, ""));
    let row: usize = num.parse().ok()?;
    Some((row.checked_sub(1)?, rest.trim()))
}

/// Get all available commands for help display
pub fn available_commands() -> Vec<CommandHelp> {
    vec![
        CommandHelp {
            name: "summarize",
            description: "Extract action items from the open email",
        },
        CommandHelp {
            name: "sync",
            description: "Send the email and its assigned actions to the task service",
        },
        CommandHelp {
            name: "show",
            description: "Show the email and the action table",
        },
        CommandHelp {
            name: "edit <n> <text>",
            description: "Change the text of action n",
        },
        CommandHelp {
            name: "assign <n> <address>",
            description: "Assign action n to a recipient ('-' clears)",
        },
        CommandHelp {
            name: "help",
            description: "Show this help message",
        },
        CommandHelp {
            name: "quit",
            description: "Close the pane",
        },
    ]
}
