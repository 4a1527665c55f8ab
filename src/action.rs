use strum::Display;

use crate::error::VerifyError;

/// Actions that drive the application, inspired by openapi-tui.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Quit,
    Error(String),
    /// Submit the current code
    Submit,
    /// The verification request finished
    VerifyCompleted(Result<(), VerifyError>),
    /// The post-success delay elapsed; perform the redirect
    RedirectDue,
    /// The banner with this generation reached the end of its lifetime
    BannerExpired(u64),
    /// Leave the OTP step for the given path
    Navigate(String),
}
