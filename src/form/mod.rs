//! OTP entry state machine.
//!
//! [`OtpEntryForm`] owns the typed code, the transient banner and the
//! submitting flag. Everything that suspends (the verification request, the
//! redirect delay and banner expiry) runs in a spawned task that reports back
//! by sending an [`Action`] on the app channel; the owner feeds those actions
//! into [`OtpEntryForm::update`].

mod banner;
mod code;

pub use banner::Banner;
pub use code::{OTP_LENGTH, OtpCode};

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::config::Config;
use crate::navigator::Navigator;
use crate::notify::{NotifyLogin, login_timestamp};
use crate::session::SessionStore;
use crate::verifier::{OtpVerifier, VerifyRequest};

pub const INCOMPLETE_MESSAGE: &str = "Complete OTP";
pub const REDIRECT_MESSAGE: &str = "Redirecting to Dashboard";
pub const LOGIN_NOTIFICATION: &str = "Successful Login Using OTP";

/// Collaborators the form calls out to.
#[derive(Clone)]
pub struct FormDeps {
    pub verifier: Arc<dyn OtpVerifier>,
    pub session: Arc<dyn SessionStore>,
    pub navigator: Arc<dyn Navigator>,
    pub notify_login: NotifyLogin,
}

/// Timing and routing knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOptions {
    pub banner_ttl: Duration,
    pub redirect_delay: Duration,
    pub dashboard_path: String,
    /// Drop back to the form after a failed attempt. Off by default: the
    /// loading placeholder stays up after a rejection, as it always has.
    pub release_on_failure: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            banner_ttl: Duration::from_secs(5),
            redirect_delay: Duration::from_secs(5),
            dashboard_path: "/dashboard".to_string(),
            release_on_failure: false,
        }
    }
}

impl FormOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            banner_ttl: config.banner_ttl(),
            redirect_delay: config.redirect_delay(),
            dashboard_path: config.dashboard_path.clone(),
            release_on_failure: config.release_on_failure,
        }
    }
}

/// Which of the two mutually exclusive main views is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormView {
    Loading,
    Entry,
}

/// Result of [`OtpEntryForm::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Code shorter than [`OTP_LENGTH`]; nothing was sent.
    Incomplete,
    /// A submission is already in flight or awaiting redirect.
    Busy,
    /// The verification request was dispatched.
    Sent,
    Unmounted,
}

pub struct OtpEntryForm {
    code: OtpCode,
    banner: Option<Banner>,
    is_submitting: bool,
    redirect_pending: bool,
    mounted: bool,
    generation: u64,
    banner_timer: Option<JoinHandle<()>>,
    cancel: CancellationToken,
    deps: FormDeps,
    options: FormOptions,
    action_tx: UnboundedSender<Action>,
}

impl OtpEntryForm {
    pub fn new(deps: FormDeps, options: FormOptions, action_tx: UnboundedSender<Action>) -> Self {
        Self {
            code: OtpCode::new(),
            banner: None,
            is_submitting: false,
            redirect_pending: false,
            mounted: true,
            generation: 0,
            banner_timer: None,
            cancel: CancellationToken::new(),
            deps,
            options,
            action_tx,
        }
    }

    pub fn code(&self) -> &OtpCode {
        &self.code
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn view(&self) -> FormView {
        if self.is_submitting {
            FormView::Loading
        } else {
            FormView::Entry
        }
    }

    /// Offer a new value for the code field.
    ///
    /// The candidate is taken only when it is all digits and at most
    /// [`OTP_LENGTH`] long; otherwise the current value stays. Returns whether
    /// the value was replaced.
    pub fn input(&mut self, candidate: &str) -> bool {
        if !self.mounted || self.is_submitting {
            return false;
        }
        self.code.accept(candidate)
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if !self.mounted {
            return SubmitOutcome::Unmounted;
        }
        if self.is_submitting {
            return SubmitOutcome::Busy;
        }
        if !self.code.is_complete() {
            debug!(len = self.code.len(), "incomplete code");
            self.show_banner(INCOMPLETE_MESSAGE, true);
            return SubmitOutcome::Incomplete;
        }

        let request = VerifyRequest {
            otp: self.code.to_string(),
            session_token: self.deps.session.session_token(),
        };
        info!(has_session = request.session_token.is_some(), "submitting otp");
        self.is_submitting = true;

        let verifier = Arc::clone(&self.deps.verifier);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = verifier.verify(request).await;
            let _ = tx.send(Action::VerifyCompleted(result));
        });

        SubmitOutcome::Sent
    }

    /// Apply an action produced by one of the form's tasks.
    pub fn update(&mut self, action: &Action) {
        if !self.mounted {
            return;
        }
        match action {
            Action::Submit => {
                self.submit();
            }
            Action::VerifyCompleted(Ok(())) => {
                info!(delay = ?self.options.redirect_delay, "otp accepted, redirect scheduled");
                self.show_banner(REDIRECT_MESSAGE, false);
                self.redirect_pending = true;
                self.spawn_delayed(self.options.redirect_delay, Action::RedirectDue);
            }
            Action::VerifyCompleted(Err(e)) => {
                warn!(status = ?e.status(), error = ?e, "otp rejected");
                self.show_banner(&e.banner_text(), true);
                if self.options.release_on_failure {
                    self.is_submitting = false;
                }
            }
            Action::RedirectDue => self.redirect(),
            Action::BannerExpired(generation) => {
                if self.banner.as_ref().is_some_and(|b| b.generation == *generation) {
                    debug!(generation, "banner expired");
                    self.banner = None;
                    self.banner_timer = None;
                }
            }
            _ => {}
        }
    }

    /// Stop all timers. Later actions are ignored.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.cancel.cancel();
        if let Some(timer) = self.banner_timer.take() {
            timer.abort();
        }
    }

    fn redirect(&mut self) {
        if !self.redirect_pending {
            return;
        }
        self.redirect_pending = false;
        info!(path = %self.options.dashboard_path, "redirecting");
        self.deps.navigator.replace(&self.options.dashboard_path);
        (self.deps.notify_login)(LOGIN_NOTIFICATION, &login_timestamp());
        self.is_submitting = false;
    }

    /// Show `message`, restarting the expiry timer when the text changes.
    fn show_banner(&mut self, message: &str, is_error: bool) {
        if let Some(banner) = self.banner.as_mut() {
            if banner.message == message {
                banner.is_error = is_error;
                return;
            }
        }

        if let Some(timer) = self.banner_timer.take() {
            timer.abort();
        }
        self.generation += 1;
        self.banner = Some(Banner {
            message: message.to_string(),
            is_error,
            generation: self.generation,
        });
        let timer = self.spawn_delayed(self.options.banner_ttl, Action::BannerExpired(self.generation));
        self.banner_timer = Some(timer);
    }

    fn spawn_delayed(&self, delay: Duration, action: Action) -> JoinHandle<()> {
        let tx = self.action_tx.clone();
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(action);
                }
            }
        })
    }
}

impl Drop for OtpEntryForm {
    fn drop(&mut self) {
        self.unmount();
    }
}
