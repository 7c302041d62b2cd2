//! Copy-to-clipboard and the toast shown afterwards.
//!
//! The actual write happens in the browser; the [`Clipboard`] trait lets the
//! same notification logic run against the outcome the client reports or
//! against a test double.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::FunnelError;

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// Transient toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn copied() -> Self {
        Self {
            title: "Link copied!".to_string(),
            description: "Your referral link has been copied to clipboard.".to_string(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn copy_failed() -> Self {
        Self {
            title: "Failed to copy".to_string(),
            description: "Please copy the link manually.".to_string(),
            variant: NotificationVariant::Destructive,
        }
    }
}

/// Somewhere text can be written to.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), FunnelError>;
}

/// Outcome of a clipboard write performed by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportedCopy {
    pub written: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

#[async_trait]
impl Clipboard for ReportedCopy {
    async fn write_text(&self, _text: &str) -> Result<(), FunnelError> {
        if self.written {
            Ok(())
        } else {
            Err(FunnelError::ClipboardWriteFailure {
                reason: self
                    .reason
                    .clone()
                    .unwrap_or_else(|| "permission denied".to_string()),
            })
        }
    }
}

/// Copy the referral link and pick the notification to show.
///
/// Failures are never dropped: they map to the destructive toast telling the
/// user to copy by hand.
pub async fn copy_referral_link(clipboard: &dyn Clipboard, referral_link: &str) -> Notification {
    match clipboard.write_text(referral_link).await {
        Ok(()) => {
            info!("Referral link copied");
            Notification::copied()
        }
        Err(e) => {
            warn!(error = %e, "Referral link copy failed");
            Notification::copy_failed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryClipboard {
        contents: Mutex<Option<String>>,
    }

    #[async_trait]
    impl Clipboard for MemoryClipboard {
        async fn write_text(&self, text: &str) -> Result<(), FunnelError> {
            *self.contents.lock().unwrap() = Some(text.to_string());
            Ok(())
        }
    }

    struct DeniedClipboard;

    #[async_trait]
    impl Clipboard for DeniedClipboard {
        async fn write_text(&self, _text: &str) -> Result<(), FunnelError> {
            Err(FunnelError::ClipboardWriteFailure {
                reason: "NotAllowedError".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn successful_copy_writes_link() {
        let clipboard = MemoryClipboard::default();
        let note = copy_referral_link(&clipboard, "https://x.test?ref=abc").await;

        assert_eq!(note, Notification::copied());
        assert_eq!(
            clipboard.contents.lock().unwrap().as_deref(),
            Some("https://x.test?ref=abc")
        );
    }

    #[tokio::test]
    async fn denied_copy_reports_failure() {
        let note = copy_referral_link(&DeniedClipboard, "https://x.test?ref=abc").await;
        assert_eq!(note.variant, NotificationVariant::Destructive);
        assert_eq!(note.title, "Failed to copy");
    }

    #[tokio::test]
    async fn reported_copy_outcomes() {
        let ok = ReportedCopy { written: true, reason: None };
        assert_eq!(copy_referral_link(&ok, "l").await, Notification::copied());

        let failed: ReportedCopy = serde_json::from_str(r#"{"written": false}"#).unwrap();
        match failed.write_text("l").await {
            Err(FunnelError::ClipboardWriteFailure { reason }) => assert_eq!(reason, "permission denied"),
            other => panic!("expected ClipboardWriteFailure, got {other:?}"),
        }
        assert_eq!(copy_referral_link(&failed, "l").await, Notification::copy_failed());
    }
}
