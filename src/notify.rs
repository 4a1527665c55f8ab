//! Login notifications handed to the surrounding notification panel.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeZone};
use tracing::info;

/// `notify_login(message, time)` capability supplied by the parent.
pub type NotifyLogin = Arc<dyn Fn(&str, &str) + Send + Sync>;

/// One entry in the notification panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub time: String,
}

/// Human-readable local timestamp, e.g. `Fri Oct 16 2026 09:41:07 GMT+0200`.
pub fn login_timestamp() -> String {
    format_timestamp(&Local::now())
}

pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%a %b %d %Y %H:%M:%S GMT%z").to_string()
}

/// Collects notifications in arrival order.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, message: &str, time: &str) {
        info!(notification = message, time, "login notification");
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(Notification {
                message: message.to_string(),
                time: time.to_string(),
            });
        }
    }

    pub fn entries(&self) -> Vec<Notification> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Callback suitable for `FormDeps::notify_login`.
    pub fn callback(&self) -> NotifyLogin {
        let center = self.clone();
        Arc::new(move |message: &str, time: &str| center.push(message, time))
    }
}
