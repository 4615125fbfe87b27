//! Notification sink used by the editor to report validation and I/O outcomes

use tracing::{error, info, warn};

use crate::types::Severity;

/// Fire-and-forget user notification
pub trait Notifier {
    fn notify(&mut self, message: &str, severity: Severity);
}

/// Log a notification at the level matching its severity
pub fn log_notification(message: &str, severity: Severity) {
    match severity {
        Severity::Info | Severity::Success => info!(severity = ?severity, "{message}"),
        Severity::Warning => warn!("{message}"),
        Severity::Error => error!("{message}"),
    }
}

/// Sink for headless use: notifications only reach the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        log_notification(message, severity);
    }
}

/// Keeps every notification for later inspection
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub messages: Vec<(String, Severity)>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn count(&self, severity: Severity) -> usize {
        self.messages.iter().filter(|(_, s)| *s == severity).count()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        self.messages.push((message.to_string(), severity));
    }
}
