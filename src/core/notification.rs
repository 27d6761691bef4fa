//! Transient alerts shown above the grid

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub raised_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Holds at most one alert; a new alert replaces the current one
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    ttl: Duration,
    current: Option<Notification>,
}

impl NotificationCenter {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::seconds(3)),
            current: None,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn raise(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> &Notification {
        self.current.insert(Notification {
            kind,
            title: title.into(),
            message: message.into(),
            raised_at: now,
            expires_at: now + self.ttl,
        })
    }

    /// The alert still on screen at `now`
    pub fn active(&self, now: DateTime<Utc>) -> Option<&Notification> {
        self.current.as_ref().filter(|n| n.is_active_at(now))
    }

    /// Drop the alert once its interval has elapsed; returns whether one was cleared
    pub fn dismiss_expired(&mut self, now: DateTime<Utc>) -> bool {
        if self.current.as_ref().is_some_and(|n| !n.is_active_at(now)) {
            self.current = None;
            return true;
        }
        false
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
