use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::mail::EmailData;

/// One action row: its (edited) title and the recipient it is assigned to.
/// An empty `assigned_to` means unassigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskAssignment {
    pub title: String,
    pub assigned_to: String,
}

impl TaskAssignment {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            assigned_to: String::new(),
        }
    }
}

// Not produced yet: records always go out with an empty attachment list
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    #[serde(rename = "AttachmentName")]
    pub name: String,
    #[serde(rename = "Content", serialize_with = "serialize_base64")]
    pub content: Vec<u8>,
}

/// The record posted to the task service for one sync
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SyncRecord {
    pub title: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_on: DateTime<Utc>,
    pub from: String,
    pub to: String,
    #[serde(rename = "CC")]
    pub cc: String,
    pub body: String,
    pub tasks: Vec<TaskAssignment>,
    pub attachments: Vec<Attachment>,
}

impl SyncRecord {
    /// Assemble from the extracted email and the current rows. Pure: the same inputs
    /// always produce the same record.
    pub fn assemble(email: &EmailData, tasks: &[TaskAssignment], created_on: DateTime<Utc>) -> Self {
        Self {
            title: email.subject.clone(),
            created_on,
            from: email.from.clone(),
            to: email.to_display(),
            cc: email.cc_display(),
            body: email.body.clone(),
            tasks: tasks.to_vec(),
            attachments: Vec::new(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T08:00:00.000Z`
fn serialize_timestamp<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}
