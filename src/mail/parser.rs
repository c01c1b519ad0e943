use chrono::{DateTime, FixedOffset};
use mail_parser::{Address, MessageParser, MimeHeaders, PartType};

use super::item::{BodyError, MailItem};
use super::types::{EmailAddressDetails, EmailBody, ItemType};

/// A raw RFC 822 message opened from disk. Always a message item.
#[derive(Debug, Clone)]
pub struct EmlMailItem {
    subject: Option<String>,
    from: Option<EmailAddressDetails>,
    to: Vec<EmailAddressDetails>,
    cc: Vec<EmailAddressDetails>,
    created: Option<DateTime<FixedOffset>>,
    body: EmailBody,
}

impl EmlMailItem {
    pub fn parse(raw: &[u8]) -> Option<Self> {
        let message = MessageParser::default().parse(raw)?;

        let from = message.from().and_then(|addrs| {
            let first = addrs.first()?;
            Some(EmailAddressDetails {
                email_address: first.address()?.to_string(),
                display_name: first.name().map(|s| s.to_string()),
            })
        });

        let created = message
            .date()
            .and_then(|date| DateTime::parse_from_rfc3339(&date.to_rfc3339()).ok());

        Some(Self {
            subject: message.subject().map(|s| s.to_string()),
            from,
            to: address_list(message.to()),
            cc: address_list(message.cc()),
            created,
            body: EmailBody {
                text: extract_text_body(&message),
                html: extract_html_body(&message),
            },
        })
    }
}

/// Addresses in header order; group syntax is flattened
fn address_list(addrs: Option<&Address<'_>>) -> Vec<EmailAddressDetails> {
    addrs
        .map(|addrs| {
            addrs
                .iter()
                .filter_map(|addr| {
                    Some(EmailAddressDetails {
                        email_address: addr.address()?.to_string(),
                        display_name: addr.name().map(|s| s.to_string()),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn extract_text_body(message: &mail_parser::Message) -> Option<String> {
    for part in message.text_bodies() {
        if let PartType::Text(text) = &part.body {
            return Some(text.to_string());
        }
    }

    // Fallback: any plain text part
    for part in message.parts.iter() {
        if let PartType::Text(text) = &part.body {
            let content_type = part.content_type();
            if content_type
                .map(|ct| ct.subtype() == Some("plain"))
                .unwrap_or(true)
            {
                return Some(text.to_string());
            }
        }
    }

    None
}

fn extract_html_body(message: &mail_parser::Message) -> Option<String> {
    for part in message.html_bodies() {
        if let PartType::Html(html) = &part.body {
            return Some(html.to_string());
        }
    }

    None
}

impl MailItem for EmlMailItem {
    fn item_type(&self) -> ItemType {
        ItemType::Message
    }

    fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    fn from(&self) -> Option<&EmailAddressDetails> {
        self.from.as_ref()
    }

    fn to(&self) -> &[EmailAddressDetails] {
        &self.to
    }

    fn cc(&self) -> &[EmailAddressDetails] {
        &self.cc
    }

    fn created(&self) -> Option<DateTime<FixedOffset>> {
        self.created
    }

    async fn body_text(&self) -> Result<String, BodyError> {
        self.body.plain_text()
    }
}
