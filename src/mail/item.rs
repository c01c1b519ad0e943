//! Host mail item abstraction
//!
//! The pane never talks to the mail client directly. It is handed something
//! implementing [`MailItem`], which exposes the item metadata synchronously and
//! the body through one suspending plain-text coercion call.

use std::future::Future;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use super::export::JsonMailItem;
use super::parser::EmlMailItem;
use super::types::{EmailAddressDetails, ItemType};

/// Why the body could not be coerced to plain text
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BodyError {
    #[error("mail item has no body")]
    Unavailable,
    #[error("body coercion failed: {0}")]
    Coercion(String),
}

/// The currently open item, as supplied by the host
pub trait MailItem: Send + Sync {
    fn item_type(&self) -> ItemType;
    fn subject(&self) -> Option<&str>;
    fn from(&self) -> Option<&EmailAddressDetails>;
    fn to(&self) -> &[EmailAddressDetails];
    fn cc(&self) -> &[EmailAddressDetails];

    fn created(&self) -> Option<DateTime<FixedOffset>> {
        None
    }

    /// Request the body as plain text
    fn body_text(&self) -> impl Future<Output = Result<String, BodyError>> + Send;
}

/// A mail item loaded from a file exported by the host
#[derive(Debug, Clone)]
pub enum HostItem {
    Eml(EmlMailItem),
    Json(JsonMailItem),
}

impl HostItem {
    /// Load an item from disk; `.json` files are host item exports, anything else is
    /// parsed as a raw RFC 822 message
    pub fn open(path: &Path) -> Result<Self> {
        let raw = std::fs::read(path)
            .with_context(|| format!("Failed to read mail item: {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            let item = JsonMailItem::from_slice(&raw)
                .with_context(|| format!("Failed to parse item export: {}", path.display()))?;
            Ok(Self::Json(item))
        } else {
            let item = EmlMailItem::parse(&raw)
                .with_context(|| format!("Failed to parse message: {}", path.display()))?;
            Ok(Self::Eml(item))
        }
    }
}

impl MailItem for HostItem {
    fn item_type(&self) -> ItemType {
        match self {
            Self::Eml(item) => item.item_type(),
            Self::Json(item) => item.item_type(),
        }
    }

    fn subject(&self) -> Option<&str> {
        match self {
            Self::Eml(item) => item.subject(),
            Self::Json(item) => item.subject(),
        }
    }

    fn from(&self) -> Option<&EmailAddressDetails> {
        match self {
            Self::Eml(item) => item.from(),
            Self::Json(item) => item.from(),
        }
    }

    fn to(&self) -> &[EmailAddressDetails] {
        match self {
            Self::Eml(item) => item.to(),
            Self::Json(item) => item.to(),
        }
    }

    fn cc(&self) -> &[EmailAddressDetails] {
        match self {
            Self::Eml(item) => item.cc(),
            Self::Json(item) => item.cc(),
        }
    }

    fn created(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Eml(item) => item.created(),
            Self::Json(item) => item.created(),
        }
    }

    async fn body_text(&self) -> Result<String, BodyError> {
        match self {
            Self::Eml(item) => item.body_text().await,
            Self::Json(item) => item.body_text().await,
        }
    }
}

/// In-memory item for exercising the pipeline without a host
#[cfg(test)]
pub mod fake {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn address(email: &str) -> EmailAddressDetails {
        EmailAddressDetails {
            email_address: email.to_string(),
            display_name: None,
        }
    }

    #[derive(Debug, Default)]
    pub struct FakeMailItem {
        pub item_type: ItemType,
        pub subject: Option<String>,
        pub from: Option<EmailAddressDetails>,
        pub to: Vec<EmailAddressDetails>,
        pub cc: Vec<EmailAddressDetails>,
        pub body: Option<Result<String, BodyError>>,
        pub body_requests: AtomicUsize,
    }

    impl FakeMailItem {
        pub fn message(to: &[&str], cc: &[&str], body: &str) -> Self {
            Self {
                item_type: ItemType::Message,
                subject: Some("Weekly sync".to_string()),
                from: Some(address("lead@x.com")),
                to: to.iter().map(|a| address(a)).collect(),
                cc: cc.iter().map(|a| address(a)).collect(),
                body: Some(Ok(body.to_string())),
                body_requests: AtomicUsize::new(0),
            }
        }

        pub fn body_requests(&self) -> usize {
            self.body_requests.load(Ordering::SeqCst)
        }
    }

    impl MailItem for FakeMailItem {
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

        async fn body_text(&self) -> Result<String, BodyError> {
            self.body_requests.fetch_add(1, Ordering::SeqCst);
            self.body.clone().unwrap_or(Err(BodyError::Unavailable))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn test_open_json_export() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"itemType":"message","subject":"Hi","to":[{{"emailAddress":"a@x.com"}}],"body":{{"text":"Hello world"}}}}"#
        )
        .unwrap();

        let item = HostItem::open(file.path()).unwrap();
        assert!(matches!(item, HostItem::Json(_)));
        assert_eq!(item.subject(), Some("Hi"));
        assert_eq!(item.body_text().await.unwrap(), "Hello world");
    }

    #[tokio::test]
    async fn test_open_eml_file() {
        let mut file = tempfile::Builder::new().suffix(".eml").tempfile().unwrap();
        file.write_all(
            b"From: sender@example.com\r\n\
              To: a@x.com\r\n\
              Subject: Test Email\r\n\
              \r\n\
              Hello world",
        )
        .unwrap();

        let item = HostItem::open(file.path()).unwrap();
        assert!(matches!(item, HostItem::Eml(_)));
        assert_eq!(item.item_type(), ItemType::Message);
        assert_eq!(item.to()[0].email_address, "a@x.com");
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(HostItem::open(&dir.path().join("nope.eml")).is_err());
    }
}
