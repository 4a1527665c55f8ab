use std::sync::Arc;

use anyhow::Result;
use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::action::Action;
use crate::config::Config;
use crate::form::{FormDeps, FormOptions, OtpEntryForm};
use crate::navigator::ChannelNavigator;
use crate::notify::{Notification, NotificationCenter};
use crate::panes::banner::draw_banner;
use crate::panes::otp_entry::OtpEntryPane;
use crate::panes::{Pane, PaneState};
use crate::session::SessionStore;
use crate::tui::{Event, EventResponse, Frame, Tui};
use crate::verifier::HttpVerifier;

/// How the interactive screen ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppExit {
    /// Where the user was sent, if verification succeeded.
    pub destination: Option<String>,
    pub notifications: Vec<Notification>,
}

pub struct App {
    config: Config,
    form: OtpEntryForm,
    pane: OtpEntryPane,
    notifications: NotificationCenter,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    should_quit: bool,
    destination: Option<String>,
}

impl App {
    pub fn new(config: Config, session: Arc<dyn SessionStore>) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let verifier = HttpVerifier::new(config.verify_url(), config.request_timeout())?;
        let notifications = NotificationCenter::new();

        let deps = FormDeps {
            verifier: Arc::new(verifier),
            session,
            navigator: Arc::new(ChannelNavigator::new(action_tx.clone())),
            notify_login: notifications.callback(),
        };
        let form = OtpEntryForm::new(deps, FormOptions::from_config(&config), action_tx.clone());

        Ok(Self {
            config,
            form,
            pane: OtpEntryPane::new(),
            notifications,
            action_tx,
            action_rx,
            should_quit: false,
            destination: None,
        })
    }

    pub async fn run(&mut self) -> Result<AppExit> {
        let mut tui = Tui::new()?.tick_rate(4.0).frame_rate(30.0);
        tui.enter()?;
        info!(url = %self.config.verify_url(), "otp screen started");

        loop {
            if let Some(event) = tui.next().await {
                let action = match &event {
                    Event::Render => Some(Action::Render),
                    Event::Tick => Some(Action::Tick),
                    Event::Resize(w, h) => Some(Action::Resize(*w, *h)),
                    Event::Error => Some(Action::Error("terminal event error".to_string())),
                    _ => {
                        let mut ps = PaneState {
                            form: &mut self.form,
                        };
                        match self.pane.handle_events(event.clone(), &mut ps)? {
                            Some(EventResponse::Stop(a)) | Some(EventResponse::Continue(a)) => {
                                Some(a)
                            }
                            None => None,
                        }
                    }
                };
                if let Some(action) = action {
                    let _ = self.action_tx.send(action);
                }
            }

            while let Ok(action) = self.action_rx.try_recv() {
                if !matches!(action, Action::Tick | Action::Render) {
                    debug!(%action, "dispatch");
                }
                match &action {
                    Action::Tick => {}
                    Action::Render => self.render(&mut tui)?,
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        self.render(&mut tui)?;
                    }
                    Action::Quit => self.should_quit = true,
                    Action::Navigate(path) => {
                        let destination = self.config.destination(path);
                        info!(%destination, "leaving otp screen");
                        self.destination = Some(destination);
                        self.should_quit = true;
                    }
                    Action::Error(msg) => error!(%msg, "app error"),
                    _ => {
                        self.form.update(&action);
                        self.render(&mut tui)?;
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        self.form.unmount();
        tui.exit().await?;

        Ok(AppExit {
            destination: self.destination.take(),
            notifications: self.notifications.entries(),
        })
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        let pane = &mut self.pane;
        let ps = PaneState {
            form: &mut self.form,
        };
        let mut result = Ok(());
        tui.draw(|f| result = draw(f, pane, &ps))?;
        result
    }
}

/// Main view plus the banner overlay. Pure: reads state, never dispatches.
pub fn draw(f: &mut Frame<'_>, pane: &mut OtpEntryPane, state: &PaneState<'_>) -> Result<()> {
    let area = f.area();
    pane.draw(f, area, state)?;
    if let Some(banner) = state.form.banner() {
        draw_banner(f, area, banner);
    }
    Ok(())
}
