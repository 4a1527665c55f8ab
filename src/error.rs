//! Error types for verification and configuration.

/// Why a verification attempt did not succeed.
///
/// Every variant is terminal for the attempt; the user resubmits manually.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// Non-2xx response carrying a JSON `message`.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Non-2xx response whose body is not JSON or has no `message` string.
    #[error("Verification failed (HTTP {status})")]
    InvalidResponse { status: u16, message: String },

    /// The request never produced a response (connect error, timeout, ...).
    #[error("Unable to reach verification server")]
    Transport { message: String },
}

impl VerifyError {
    /// Text shown in the banner for this failure.
    pub fn banner_text(&self) -> String {
        self.to_string()
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } | Self::InvalidResponse { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {field}: {value:?} ({reason})")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
