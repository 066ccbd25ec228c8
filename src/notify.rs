//! Delivery of the run summary as a desktop notification.

use std::{io, process::ExitStatus};

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

pub const NOTIFY_SEND: &str = "notify-send";

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("failed to send notification: {source}. Make sure '{program}' is installed")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("'{program}' exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

/// Sink for the summary. Delivery failures are reported to the caller, who treats them as
/// non-fatal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, summary: &str, body: &str) -> Result<(), NotificationError>;
}

/// Sends notifications through an external `notify-send` compatible program.
pub struct DesktopNotifier {
    program: String,
}

impl DesktopNotifier {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new(NOTIFY_SEND)
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, summary: &str, body: &str) -> Result<(), NotificationError> {
        debug!("Sending notification through {}", self.program);
        let status = Command::new(&self.program)
            .arg(summary)
            .arg(body)
            .status()
            .await
            .map_err(|source| NotificationError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(NotificationError::Failed {
                program: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}

/// Used when notifications are turned off.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, summary: &str, _body: &str) -> Result<(), NotificationError> {
        debug!("Notifications disabled, skipping {summary:?}");
        Ok(())
    }
}
