pub mod action;
#[cfg(feature = "tui")]
pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod form;
pub mod headless;
pub mod logging;
pub mod navigator;
pub mod notify;
#[cfg(feature = "tui")]
pub mod panes;
pub mod session;
pub mod theme;
#[cfg(feature = "tui")]
pub mod tui;
pub mod verifier;

pub use form::{FormDeps, FormOptions, FormView, OtpEntryForm, SubmitOutcome};
pub use session::{SessionStore, SESSION_TOKEN_KEY};
pub use verifier::{HttpVerifier, OtpVerifier, VerifyRequest};
