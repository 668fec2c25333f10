//! Notifier - User-Facing Error Reporting
//!
//! The accumulator reports fetch failures through this trait; how they are
//! shown (toast, banner, log line) is up to the implementation.

use crossbeam_channel::Sender;

use super::app_event::AppEvent;

/// Sink for user-visible error messages
pub trait Notifier: Send + Sync {
    fn notify_error(&self, message: &str);

    /// Forward a non-error event; ignored by sinks that only show errors
    fn publish(&self, _event: AppEvent) {}
}

/// Sends notices over a channel drained by the UI loop
#[derive(Clone, Debug)]
pub struct ChannelNotifier {
    tx: Sender<AppEvent>,
}

impl ChannelNotifier {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify_error(&self, message: &str) {
        // A closed receiver means the view is gone; nothing left to tell
        let _ = self.tx.send(AppEvent::error(message));
    }

    fn publish(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }
}

/// Writes notices to the log only
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_error(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn publish(&self, event: AppEvent) {
        tracing::debug!("{:?}", event);
    }
}
