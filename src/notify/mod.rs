//! User-facing notifications.
//!
//! The default hooks report outcomes through a [`Notifier`]: the empty-form
//! message, the success message and the error message. In a browser this is a
//! blocking alert; headless hosts log or collect the messages instead.

use std::cell::RefCell;
use std::rc::Rc;

/// Blocking notification collaborator.
pub trait Notifier {
    /// Shows `message` to the user.
    fn alert(&mut self, message: &str);
}

/// Notifier that emits each alert as an `info` tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&mut self, message: &str) {
        tracing::info!(message = %message, "alert");
    }
}

/// Notifier that keeps every alert in memory.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    alerts: Rc<RefCell<Vec<String>>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages shown so far, oldest first.
    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.alerts.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_clones_share_log() {
        let notifier = RecordingNotifier::new();
        let mut handle = notifier.clone();
        handle.alert("first");
        handle.alert("second");
        assert_eq!(notifier.alerts(), vec!["first", "second"]);
        assert_eq!(notifier.last().as_deref(), Some("second"));
    }
}
