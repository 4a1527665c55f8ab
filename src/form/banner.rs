/// A self-expiring status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub is_error: bool,
    /// Identifies the expiry timer started for this message.
    pub generation: u64,
}

impl Banner {
    /// Heading shown above the message.
    pub fn title(&self) -> &'static str {
        if self.is_error {
            "Error Occurred!"
        } else {
            "Heads-Up!"
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.is_error { "⚠" } else { "🚀" }
    }
}
