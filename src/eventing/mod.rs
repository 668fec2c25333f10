//! Eventing - View-to-UI Events and Error Notification

mod app_event;
mod notifier;

pub use app_event::*;
pub use notifier::*;
