use crate::constants::{BODY_ERROR_MARKER, NO_SENDER, NO_SUBJECT};

use super::item::MailItem;
use super::types::{EmailData, ItemType};

/// Extract the pane's view of the open item.
///
/// Returns `None` for anything that is not a mail message. Metadata is read
/// synchronously; the body is requested once and awaited. A failed body request
/// leaves a placeholder body so the cycle can continue on the subject alone.
pub async fn read_email<I: MailItem>(item: &I) -> Option<EmailData> {
    if item.item_type() != ItemType::Message {
        tracing::debug!("Item is not a message ({:?}), nothing to read", item.item_type());
        return None;
    }

    let subject = item
        .subject()
        .filter(|s| !s.is_empty())
        .unwrap_or(NO_SUBJECT)
        .to_string();

    let from = item
        .from()
        .map(|addr| addr.email_address.as_str())
        .filter(|addr| !addr.is_empty())
        .unwrap_or(NO_SENDER)
        .to_string();

    let to = item.to().iter().map(|r| r.email_address.clone()).collect();
    let cc = item.cc().iter().map(|r| r.email_address.clone()).collect();

    let (body, body_failed) = match item.body_text().await {
        Ok(text) => (text, false),
        Err(e) => {
            tracing::error!("Error getting item body: {}", e);
            (BODY_ERROR_MARKER.to_string(), true)
        }
    };

    Some(EmailData {
        subject,
        from,
        to,
        cc,
        body,
        body_failed,
        actions: Vec::new(),
        created: item.created(),
    })
}
