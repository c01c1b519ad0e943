//! Desktop notification of sync outcomes

use crate::config::Config;
use crate::constants::{SYNC_FAILURE_MESSAGE, SYNC_SUCCESS_MESSAGE};

/// Send a desktop notification with the outcome of a sync
pub fn notify_sync_result(config: &Config, subject: &str, success: bool) {
    let Some((summary, body)) = sync_notification(config, subject, success) else {
        return;
    };

    // Fire and forget, don't block on errors
    if let Err(e) = send_notification(summary, &body) {
        tracing::warn!("Failed to send desktop notification: {}", e);
    }
}

/// Summary and body of the notification to show, `None` when notifications are off
fn sync_notification(
    config: &Config,
    subject: &str,
    success: bool,
) -> Option<(&'static str, String)> {
    if !config.notifications.enabled {
        return None;
    }

    let summary = if success {
        SYNC_SUCCESS_MESSAGE
    } else {
        SYNC_FAILURE_MESSAGE
    };
    Some((summary, truncate_subject(subject)))
}

fn truncate_subject(subject: &str) -> String {
    if subject.chars().count() > 100 {
        let head: String = subject.chars().take(97).collect();
        format!("{}...", head)
    } else {
        subject.to_string()
    }
}

/// Low-level notification sending
fn send_notification(summary: &str, body: &str) -> Result<(), notify_rust::error::Error> {
    use notify_rust::Notification;

    Notification::new()
        .summary(summary)
        .body(body)
        .appname("mailtasks")
        .icon("mail-send")
        .timeout(notify_rust::Timeout::Milliseconds(5000))
        .show()?;
    Ok(())
}
