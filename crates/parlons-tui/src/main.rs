use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use parlons_core::{
    Catalog, ChatMode, Config, HttpAnswerClient, Language, ModeSetup, OptionSelector,
};
use tracing::{error, info};

mod app;
mod handler;
mod logging;
mod tui;
mod ui;

use app::App;
use tui::EventHandler;

#[derive(Parser)]
#[command(name = "parlons")]
#[command(version, about = "Terminal chat client for company-name checks and suggestions")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Display language: fr or en
    #[arg(long)]
    lang: Option<String>,
    /// Endpoint of the name-check service
    #[arg(long)]
    check_endpoint: Option<String>,
    /// Endpoint of the suggestion service
    #[arg(long)]
    suggest_endpoint: Option<String>,
    /// Session identifier sent with every prompt
    #[arg(long)]
    session_id: Option<String>,
    /// Ask the service for short answers
    #[arg(long)]
    short: bool,
    /// Where to write diagnostics
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = match cli.log_file.clone() {
        Some(path) => path,
        None => logging::default_log_path()?,
    };
    logging::init(&log_path)?;

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => Config::get_config_path()?,
    };
    let mut config = Config::load_or_default(&config_path);
    apply_overrides(&mut config, &cli);

    let language = config.language();
    let selector = build_selector(&config, language);
    info!(
        check = %config.endpoint(ChatMode::Check),
        suggest = %config.endpoint(ChatMode::Suggest),
        language = language.code(),
        "starting"
    );

    let mut app = App::new(selector, language, Some(config_path));

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app).await;
    tui::restore()?;

    if let Err(e) = &result {
        error!("exited with error: {e:#}");
    }
    result
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(lang) = cli.lang.as_deref().and_then(Language::from_code) {
        config.language = Some(lang.code().to_string());
    }
    if let Some(endpoint) = &cli.check_endpoint {
        config.set_endpoint(ChatMode::Check, endpoint);
    }
    if let Some(endpoint) = &cli.suggest_endpoint {
        config.set_endpoint(ChatMode::Suggest, endpoint);
    }
    if let Some(session_id) = &cli.session_id {
        config.session_id = Some(session_id.clone());
    }
    if cli.short {
        config.short_response = Some(true);
    }
}

fn build_selector(config: &Config, language: Language) -> OptionSelector {
    let setup = |mode: ChatMode| {
        ModeSetup::new(
            Arc::new(HttpAnswerClient::new(&config.endpoint(mode))),
            config.ask_options(mode),
        )
    };
    OptionSelector::new(
        Arc::new(Catalog::new(language)),
        setup(ChatMode::Check),
        setup(ChatMode::Suggest),
    )
}

async fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    let mut events = EventHandler::new();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event).await?,
            None => break,
        }
    }

    Ok(())
}
