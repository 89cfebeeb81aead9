use std::time::{Duration, Instant};

const INFO_DURATION: Duration = Duration::from_secs(3);
const ERROR_DURATION: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct NotificationState {
    current: Option<Notification>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.set(message.into(), NotificationLevel::Info, now + INFO_DURATION);
    }

    pub fn show_error(&mut self, message: impl Into<String>, now: Instant) {
        self.set(message.into(), NotificationLevel::Error, now + ERROR_DURATION);
    }

    fn set(&mut self, message: String, level: NotificationLevel, expires_at: Instant) {
        self.current = Some(Notification {
            message,
            level,
            expires_at,
        });
    }

    /// Drop the message once it has expired. Returns true if one was dropped.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(notification) if now >= notification.expires_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
