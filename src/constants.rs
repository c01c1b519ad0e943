//! Application-wide constants
//!
//! Placeholder strings and user-facing messages live here so tests and the
//! pane agree on the exact text.

/// Subject used when the mail item has none.
pub const NO_SUBJECT: &str = "No Subject";

/// Sender used when the mail item has no sender address.
pub const NO_SENDER: &str = "No Sender";

/// Body stored when plain-text coercion of the mail body fails.
pub const BODY_ERROR_MARKER: &str = "Error retrieving body";

/// Single action produced when the summarization request fails.
pub const SUMMARY_ERROR_MARKER: &str = "Error summarizing content";

/// Label of the blank "no selection" assignee option.
pub const NO_ASSIGNEE_LABEL: &str = "Select recipient";

/// Separator used when recipient lists are shown or submitted as one string.
pub const RECIPIENT_SEPARATOR: &str = ", ";

/// Path of the sync endpoint, relative to the configured base URL.
pub const SYNC_PATH: &str = "/api/subjects";

/// Shown after the sync endpoint accepted the record.
pub const SYNC_SUCCESS_MESSAGE: &str = "Data synced successfully!";

/// Shown for any sync failure.
pub const SYNC_FAILURE_MESSAGE: &str = "Failed to sync data. Please try again later.";

/// Upper bound on generated tokens for one summarization.
pub const SUMMARY_MAX_TOKENS: u32 = 1000;

/// Decoding temperature for summarization; fixed so replies are deterministic.
pub const SUMMARY_TEMPERATURE: f32 = 0.0;

/// Width used when converting HTML-only bodies to text.
pub const HTML_TEXT_WIDTH: usize = 100;

/// Environment variable holding the optional bearer key for the summarization proxy.
pub const ENV_SUMMARIZER_KEY: &str = "MAILTASKS_SUMMARIZER_KEY";

/// Capacity of the channel carrying operation results back to the pane loop.
pub const EVENT_CHANNEL_CAPACITY: usize = 16;
