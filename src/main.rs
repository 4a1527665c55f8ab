use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use otpgate::args::{Cli, Command, CommonArgs};
use otpgate::config::Config;
use otpgate::logging::{self, LogConfig};
use otpgate::session::{FileSessionStore, MemorySessionStore, SessionStore};
use otpgate::{headless, theme};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    theme::init_color(cli.common.no_color);

    let mut config = Config::load(cli.common.config.clone())?;
    cli.common.apply_to(&mut config);
    config.validate()?;

    let session = session_store(&cli.common, &config);

    match cli.command.unwrap_or(Command::Tui) {
        Command::Verify { code } => {
            logging::init(LogConfig::from_env());
            let outcome = headless::verify(&config, session, &code).await?;
            headless::report(&outcome);
            std::process::exit(outcome.exit_code());
        }
        Command::Tui => run_tui(config, session).await,
        Command::Init { force } => init_config(&config, cli.common.config, force),
    }
}

fn init_config(config: &Config, path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path.unwrap_or_else(Config::default_path);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to replace it)", path.display());
    }
    config.save(Some(path.clone()))?;
    println!("{}", theme::icon_ok("Configuration written"));
    println!("{}", theme::label_value("Path", &path.display().to_string()));
    Ok(())
}

fn session_store(args: &CommonArgs, config: &Config) -> Arc<dyn SessionStore> {
    if let Some(token) = &args.session_token {
        return Arc::new(MemorySessionStore::with_token(Some(token.clone())));
    }
    match &config.session_file {
        Some(path) => Arc::new(FileSessionStore::new(path)),
        None => Arc::new(MemorySessionStore::new()),
    }
}

#[cfg(feature = "tui")]
async fn run_tui(config: Config, session: Arc<dyn SessionStore>) -> Result<()> {
    logging::init(LogConfig::from_env().file(config.log_file.clone()));

    let mut app = otpgate::app::create_app(config, session)?;
    let exit = app.run().await?;

    match exit.destination {
        Some(destination) => {
            println!("{}", theme::icon_ok("OTP verified"));
            println!("{}", theme::label_value("Destination", &destination));
            for n in &exit.notifications {
                println!("{}", theme::label_value(&n.time, &n.message));
            }
        }
        None => println!("{}", theme::muted("OTP entry cancelled.")),
    }
    Ok(())
}

#[cfg(not(feature = "tui"))]
async fn run_tui(_config: Config, _session: Arc<dyn SessionStore>) -> Result<()> {
    anyhow::bail!("built without the `tui` feature; use `otpgate verify --code <CODE>`")
}
