mod action;
mod app;
mod browser;
mod client;
mod config;
mod error;
mod event;
mod github;
mod layout;
mod query;
mod request;
#[cfg(test)]
mod test_support;
mod tui;
mod types;
mod ui;

use std::panic;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::app::App;
use crate::client::SearchClient;
use crate::config::Config;
use crate::event::Event;
use crate::github::GitHub;
use crate::request::MAX_PER_PAGE;
use crate::tui::EventHandler;

/// Search GitHub from the terminal
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file (default: ~/.config/ghs/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Results per page
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=MAX_PER_PAGE as i64))]
    per_page: Option<u8>,

    /// API base URL, e.g. https://ghe.example.com/api/v3
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::load(cli.config.as_deref());
    if let Some(per_page) = cli.per_page {
        config.search.per_page = per_page;
    }
    if let Some(api_url) = cli.api_url {
        config.github.api_url = Some(api_url);
    }

    let client = GitHub::new(config.github.api_url.as_deref(), config.github.token())?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let result = run(Arc::new(client), config).await;

    // Restore terminal
    tui::restore()?;

    result
}

async fn run(
    client: Arc<dyn SearchClient>,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = tui::init()?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let mut app = App::new(client, action_tx.clone(), config.search);

    let size = terminal.size()?;
    app.update(Action::Resize(size.width, size.height));

    let tick_rate = Duration::from_millis(100);
    let render_rate = Duration::from_millis(16); // ~60fps
    let mut events = EventHandler::new(tick_rate, render_rate);

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
