use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The maximum number of undelivered notices kept.
const MAX_NOTICES: usize = 50;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// A transient message for the user, like a toast.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Queue of notices waiting to be shown. The oldest are dropped when full.
#[derive(Clone, Default)]
pub struct Notifier {
    queue: Arc<Mutex<VecDeque<Notice>>>,
}

impl Notifier {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: NoticeLevel, message: impl Into<String>) {
        let notice = Notice {
            level,
            message: message.into(),
            created_at: Utc::now(),
        };
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        if queue.len() == MAX_NOTICES {
            queue.pop_front();
        }
        queue.push_back(notice);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    /// Removes and returns every pending notice, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        queue.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_in_order_and_empties() {
        let notifier = Notifier::new();
        notifier.success("one");
        notifier.error("two");

        let notices = notifier.drain();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].level, NoticeLevel::Success);
        assert_eq!(notices[1].message, "two");
        assert!(notifier.drain().is_empty());
    }

    #[test]
    fn queue_is_bounded() {
        let notifier = Notifier::new();
        for i in 0..(MAX_NOTICES + 5) {
            notifier.info(format!("n{}", i));
        }
        let notices = notifier.drain();
        assert_eq!(notices.len(), MAX_NOTICES);
        assert_eq!(notices[0].message, "n5");
    }
}
