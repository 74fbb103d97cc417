//! Best-effort, fire-and-forget notifications.
//!
//! Every send runs in its own detached task with its own timeout, after the state change
//! it describes has been committed. Failures are logged here and go no further.

pub mod templates;
#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn, Instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    Customer { email: String },
    Barber { barber_id: String, email: Option<String> },
    Operator { channel: String },
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer { email } => write!(f, "customer:{email}"),
            Self::Barber { barber_id, .. } => write!(f, "barber:{barber_id}"),
            Self::Operator { channel } => write!(f, "operator:{channel}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub recipient: Recipient,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotificationError {
    #[error("Notification channel unavailable: {0}")]
    ChannelUnavailable(String),
    #[error("Notification rejected: {0}")]
    Rejected(String),
}

/// The outbound send primitive.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError>;
}

/// Writes notifications to the log. Used when no delivery channel is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        info!(
            recipient = %notification.recipient,
            subject = %notification.subject,
            body = %notification.body,
            "Notification"
        );
        Ok(())
    }
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
    timeout: Duration,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, timeout: Duration) -> Self {
        Self { notifier, timeout }
    }

    /// Send in a detached task. The returned handle is only useful to tests; production
    /// callers drop it.
    pub fn dispatch(&self, notification: Notification) -> JoinHandle<()> {
        let notifier = Arc::clone(&self.notifier);
        let timeout = self.timeout;
        let span = tracing::info_span!("notification", recipient = %notification.recipient);

        tokio::spawn(
            async move {
                match tokio::time::timeout(timeout, notifier.send(&notification)).await {
                    Ok(Ok(())) => debug!(subject = %notification.subject, "Notification sent"),
                    Ok(Err(e)) => {
                        warn!(error = %e, subject = %notification.subject, "Notification failed")
                    }
                    Err(_) => warn!(
                        timeout_ms = timeout.as_millis() as u64,
                        subject = %notification.subject,
                        "Notification timed out"
                    ),
                }
            }
            .instrument(span),
        )
    }

    /// Each notification gets its own task, so one failing send cannot hold up another.
    pub fn dispatch_all(&self, notifications: Vec<Notification>) -> Vec<JoinHandle<()>> {
        notifications.into_iter().map(|n| self.dispatch(n)).collect()
    }
}
