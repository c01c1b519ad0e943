//! Host JSON item export
//!
//! Mirrors the shape of the mail item object the host hands to the pane:
//! camelCase keys, recipients as `{emailAddress}` entries, and a body that may be
//! plain text, HTML, or absent.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use super::item::{BodyError, MailItem};
use super::types::{EmailAddressDetails, EmailBody, ItemType};

#[derive(Debug, Clone, Default, Deserialize)]
struct BodyExport {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    html: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonMailItem {
    #[serde(default)]
    item_type: ItemType,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    date_time_created: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    from: Option<EmailAddressDetails>,
    #[serde(default)]
    to: Vec<EmailAddressDetails>,
    #[serde(default)]
    cc: Vec<EmailAddressDetails>,
    #[serde(default)]
    body: Option<BodyExport>,
}

impl JsonMailItem {
    pub fn from_slice(raw: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(raw)
    }
}

impl MailItem for JsonMailItem {
    fn item_type(&self) -> ItemType {
        self.item_type
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
        self.date_time_created
    }

    async fn body_text(&self) -> Result<String, BodyError> {
        let body = self.body.as_ref().ok_or(BodyError::Unavailable)?;
        EmailBody {
            text: body.text.clone(),
            html: body.html.clone(),
        }
        .plain_text()
    }
}
