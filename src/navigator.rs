//! Navigation side effect produced after a successful verification.

use std::sync::Mutex;

use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;

/// Replaces the current location. The OTP step is not kept in history, so
/// the user cannot navigate back into it.
pub trait Navigator: Send + Sync {
    fn replace(&self, path: &str);
}

/// Hands the destination to the app loop, which leaves the OTP screen.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: UnboundedSender<Action>,
}

impl ChannelNavigator {
    pub fn new(tx: UnboundedSender<Action>) -> Self {
        Self { tx }
    }
}

impl Navigator for ChannelNavigator {
    fn replace(&self, path: &str) {
        let _ = self.tx.send(Action::Navigate(path.to_string()));
    }
}

/// Keeps every destination it was asked to replace with.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.visited.lock().ok()?.last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, path: &str) {
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(path.to_string());
        }
    }
}
