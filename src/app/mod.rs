mod app;

pub use app::{App, AppExit, draw};

use std::sync::Arc;

use crate::config::Config;
use crate::session::SessionStore;
use anyhow::Result;

pub fn create_app(config: Config, session: Arc<dyn SessionStore>) -> Result<App> {
    App::new(config, session)
}
