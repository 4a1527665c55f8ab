//! Shared fixtures: a scripted verifier and a form wired to recording
//! collaborators.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use otpgate::action::Action;
use otpgate::error::VerifyError;
use otpgate::navigator::RecordingNavigator;
use otpgate::notify::NotificationCenter;
use otpgate::session::MemorySessionStore;
use otpgate::{FormDeps, FormOptions, OtpEntryForm, OtpVerifier, VerifyRequest};

/// Answers every request with the same result and remembers what it saw.
pub struct ScriptedVerifier {
    response: Result<(), VerifyError>,
    calls: Mutex<Vec<VerifyRequest>>,
}

impl ScriptedVerifier {
    pub fn accepting() -> Self {
        Self::new(Ok(()))
    }

    pub fn rejecting(status: u16, message: &str) -> Self {
        Self::new(Err(VerifyError::Rejected {
            status,
            message: message.to_string(),
        }))
    }

    pub fn new(response: Result<(), VerifyError>) -> Self {
        Self {
            response,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<VerifyRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OtpVerifier for ScriptedVerifier {
    async fn verify(&self, request: VerifyRequest) -> Result<(), VerifyError> {
        self.calls.lock().unwrap().push(request);
        self.response.clone()
    }
}

pub struct Harness {
    pub form: OtpEntryForm,
    pub rx: UnboundedReceiver<Action>,
    pub verifier: Arc<ScriptedVerifier>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifications: NotificationCenter,
    pub session: Arc<MemorySessionStore>,
}

impl Harness {
    pub fn new(verifier: ScriptedVerifier) -> Self {
        Self::with_options(verifier, FormOptions::default())
    }

    pub fn with_options(verifier: ScriptedVerifier, options: FormOptions) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let verifier = Arc::new(verifier);
        let navigator = Arc::new(RecordingNavigator::new());
        let notifications = NotificationCenter::new();
        let session = Arc::new(MemorySessionStore::with_token(Some("session-abc".to_string())));

        let deps = FormDeps {
            verifier: verifier.clone(),
            session: session.clone(),
            navigator: navigator.clone(),
            notify_login: notifications.callback(),
        };
        Self {
            form: OtpEntryForm::new(deps, options, tx),
            rx,
            verifier,
            navigator,
            notifications,
            session,
        }
    }

    /// Receive the next action and feed it back into the form.
    pub async fn step(&mut self) -> Action {
        let action = self.rx.recv().await.expect("action channel closed");
        self.form.update(&action);
        action
    }

    /// Like [`Harness::step`], but gives up after `limit`.
    pub async fn step_within(&mut self, limit: Duration) -> Option<Action> {
        let action = tokio::time::timeout(limit, self.rx.recv()).await.ok()??;
        self.form.update(&action);
        Some(action)
    }
}
