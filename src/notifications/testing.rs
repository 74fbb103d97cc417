//! Notifier doubles for tests.

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::mpsc;

use super::{Notification, NotificationError, Notifier};

/// Forwards every notification to a channel the test reads from.
pub struct RecordingNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl RecordingNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        self.sender
            .send(notification.clone())
            .map_err(|e| NotificationError::ChannelUnavailable(e.to_string()))
    }
}

/// Always fails.
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _notification: &Notification) -> Result<(), NotificationError> {
        Err(NotificationError::ChannelUnavailable("smtp down".to_string()))
    }
}

/// Never answers within any reasonable timeout.
pub struct SlowNotifier(pub Duration);

#[async_trait]
impl Notifier for SlowNotifier {
    async fn send(&self, _notification: &Notification) -> Result<(), NotificationError> {
        tokio::time::sleep(self.0).await;
        Ok(())
    }
}
