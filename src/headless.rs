//! Non-interactive verification: runs a single code through the same form
//! state machine the terminal UI uses and reports how it ended.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::debug;

use crate::action::Action;
use crate::config::Config;
use crate::form::{FormDeps, FormOptions, OtpEntryForm, SubmitOutcome};
use crate::navigator::ChannelNavigator;
use crate::notify::{Notification, NotificationCenter};
use crate::session::SessionStore;
use crate::theme;
use crate::verifier::{HttpVerifier, OtpVerifier};

/// Reported when the code is refused by the input mask.
pub const INVALID_INPUT_MESSAGE: &str = "OTP must be up to 6 digits (0-9)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessOutcome {
    Redirected {
        destination: String,
        notifications: Vec<Notification>,
    },
    Failed {
        message: String,
    },
}

impl HeadlessOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Redirected { .. } => 0,
            Self::Failed { .. } => 1,
        }
    }
}

/// Verify `code` against the endpoint configured in `config`.
pub async fn verify(
    config: &Config,
    session: Arc<dyn SessionStore>,
    code: &str,
) -> Result<HeadlessOutcome> {
    let verifier = HttpVerifier::new(config.verify_url(), config.request_timeout())?;
    verify_with(config, session, Arc::new(verifier), code).await
}

/// Same as [`verify`] with an explicit verifier.
pub async fn verify_with(
    config: &Config,
    session: Arc<dyn SessionStore>,
    verifier: Arc<dyn OtpVerifier>,
    code: &str,
) -> Result<HeadlessOutcome> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();
    let notifications = NotificationCenter::new();
    let deps = FormDeps {
        verifier,
        session,
        navigator: Arc::new(ChannelNavigator::new(action_tx.clone())),
        notify_login: notifications.callback(),
    };
    let mut form = OtpEntryForm::new(deps, FormOptions::from_config(config), action_tx);

    if !form.input(code) {
        return Ok(HeadlessOutcome::Failed {
            message: INVALID_INPUT_MESSAGE.to_string(),
        });
    }
    if form.submit() != SubmitOutcome::Sent {
        return Ok(failed(&form));
    }

    let spinner = theme::spinner("Verifying OTP…");
    while let Some(action) = action_rx.recv().await {
        debug!(%action, "headless dispatch");
        match &action {
            Action::Navigate(path) => {
                spinner.finish_and_clear();
                return Ok(HeadlessOutcome::Redirected {
                    destination: config.destination(path),
                    notifications: notifications.entries(),
                });
            }
            Action::VerifyCompleted(result) => {
                form.update(&action);
                match result {
                    Ok(()) => spinner.set_message(
                        form.banner()
                            .map(|b| b.message.clone())
                            .unwrap_or_default(),
                    ),
                    Err(_) => {
                        spinner.finish_and_clear();
                        return Ok(failed(&form));
                    }
                }
            }
            _ => form.update(&action),
        }
    }

    spinner.finish_and_clear();
    Ok(HeadlessOutcome::Failed {
        message: "verification ended unexpectedly".to_string(),
    })
}

fn failed(form: &OtpEntryForm) -> HeadlessOutcome {
    HeadlessOutcome::Failed {
        message: form
            .banner()
            .map(|b| b.message.clone())
            .unwrap_or_else(|| "verification failed".to_string()),
    }
}

/// Print the outcome the way the rest of the CLI prints results.
pub fn report(outcome: &HeadlessOutcome) {
    match outcome {
        HeadlessOutcome::Redirected {
            destination,
            notifications,
        } => {
            println!("{}", theme::icon_ok("OTP verified"));
            println!("{}", theme::label_value("Destination", destination));
            for n in notifications {
                println!("{}", theme::label_value(&n.time, &n.message));
            }
        }
        HeadlessOutcome::Failed { message } => {
            eprintln!("{}", theme::icon_fail(message));
        }
    }
}
