use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::item::BodyError;
use crate::constants::RECIPIENT_SEPARATOR;

/// Kind of item the host has open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Message,
    Appointment,
}

/// One sender or recipient entry as the host describes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAddressDetails {
    pub email_address: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Fields extracted from the open mail item for one summarize/sync cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailData {
    pub subject: String,
    pub from: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub body: String,
    /// Set when the body request failed and `body` holds the error marker
    pub body_failed: bool,
    /// Empty until a summarization pass has completed
    pub actions: Vec<String>,
    pub created: Option<DateTime<FixedOffset>>,
}

impl EmailData {
    pub fn to_display(&self) -> String {
        self.to.join(RECIPIENT_SEPARATOR)
    }

    pub fn cc_display(&self) -> String {
        self.cc.join(RECIPIENT_SEPARATOR)
    }

    /// To followed by CC, order kept, duplicates kept
    pub fn recipients(&self) -> Vec<String> {
        self.to.iter().chain(self.cc.iter()).cloned().collect()
    }

    /// Text handed to the summarizer. Without a body only the subject is sent.
    pub fn summary_input(&self) -> String {
        if self.body_failed {
            self.subject.clone()
        } else {
            format!("{} {}", self.subject, self.body)
        }
    }

    /// Creation date in the pane header format (dd-MM-yyyy)
    pub fn created_display(&self) -> Option<String> {
        self.created.map(|dt| dt.format("%d-%m-%Y").to_string())
    }
}

/// Body content as stored in a message
#[derive(Debug, Clone, Default)]
pub struct EmailBody {
    pub text: Option<String>,
    pub html: Option<String>,
}

impl EmailBody {
    /// Plain-text coercion: text part if present, otherwise the HTML part rendered as text
    pub fn plain_text(&self) -> Result<String, BodyError> {
        match (&self.text, &self.html) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(html)) => html_to_text(html),
            (None, None) => Err(BodyError::Unavailable),
        }
    }
}

/// Convert HTML to readable plain text
fn html_to_text(html: &str) -> Result<String, BodyError> {
    html2text::config::plain()
        .string_from_read(html.as_bytes(), crate::constants::HTML_TEXT_WIDTH)
        .map_err(|e| BodyError::Coercion(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EmailData {
        EmailData {
            subject: "Quarterly report".to_string(),
            from: "boss@x.com".to_string(),
            to: vec!["a@x.com".to_string(), "b@x.com".to_string()],
            cc: vec!["a@x.com".to_string()],
            body: "Please send it".to_string(),
            body_failed: false,
            actions: Vec::new(),
            created: DateTime::parse_from_rfc3339("2024-03-05T10:00:00+01:00").ok(),
        }
    }

    #[test]
    fn test_recipients_keep_order_and_duplicates() {
        assert_eq!(sample().recipients(), vec!["a@x.com", "b@x.com", "a@x.com"]);
    }

    #[test]
    fn test_display_joins_with_comma() {
        let email = sample();
        assert_eq!(email.to_display(), "a@x.com, b@x.com");
        assert_eq!(email.cc_display(), "a@x.com");
        assert_eq!(EmailData::default().cc_display(), "");
    }

    #[test]
    fn test_summary_input_is_subject_space_body() {
        assert_eq!(sample().summary_input(), "Quarterly report Please send it");
    }

    #[test]
    fn test_summary_input_without_body_is_subject_only() {
        let email = EmailData {
            body: "Error retrieving body".to_string(),
            body_failed: true,
            ..sample()
        };
        assert_eq!(email.summary_input(), "Quarterly report");
    }

    #[test]
    fn test_created_display_format() {
        assert_eq!(sample().created_display().as_deref(), Some("05-03-2024"));
    }

    #[test]
    fn test_plain_text_prefers_text_part() {
        let body = EmailBody {
            text: Some("plain".to_string()),
            html: Some("<p>html</p>".to_string()),
        };
        assert_eq!(body.plain_text().unwrap(), "plain");
    }

    #[test]
    fn test_plain_text_converts_html() {
        let body = EmailBody {
            text: None,
            html: Some("<p>Hello <b>world</b></p>".to_string()),
        };
        let text = body.plain_text().unwrap();
        assert!(text.contains("Hello"));
        assert!(!text.contains("<p>"));
    }

    #[test]
    fn test_plain_text_missing() {
        assert_eq!(EmailBody::default().plain_text(), Err(BodyError::Unavailable));
    }
}
