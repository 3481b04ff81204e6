mod action;
mod app;
mod auth;
mod classify;
mod config;
mod error;
mod event;
mod fetch;
mod github;
mod logging;
mod markdown;
mod profile_view;
mod repo_list;
mod runtime;
mod source;
mod tabs;
mod theme;
mod tui;
mod types;
mod ui;

use std::future::Future;
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::action::{Action, Effect};
use crate::app::App;
use crate::config::Config;
use crate::event::Event;
use crate::github::GitHub;
use crate::markdown::MarkdownRenderer;
use crate::runtime::Runtime;
use crate::source::ProfileSource;
use crate::theme::Theme;
use crate::tui::EventHandler;
use crate::types::Profile;

/// Browse a GitHub user's public profile in the terminal.
#[derive(Debug, Parser)]
#[command(name = "gh-portrait", version, about)]
struct Args {
    /// GitHub login to display
    login: String,

    /// Config file (defaults to <config dir>/gh-portrait/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init();

    let config = Config::load(args.config.as_deref());

    // Everything that can fail for ordinary reasons happens before raw mode.
    let (source, profile) = match bootstrap(&config, &args.login).await {
        Ok(loaded) => loaded,
        Err(e) => {
            error!(login = %args.login, error = %e, "startup failed");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let result = run(source, profile, config.ui.browser).await;

    if let Err(e) = tui::restore() {
        error!(error = %e, "could not restore terminal");
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn bootstrap(config: &Config, login: &str) -> error::Result<(Arc<dyn ProfileSource>, Profile)> {
    let token = auth::load_token(&config.auth)?;
    let source: Arc<dyn ProfileSource> = Arc::new(GitHub::new(token)?);
    let profile = source.fetch_profile(login).await?;
    info!(login = %profile.login, "profile loaded");
    Ok((source, profile))
}

async fn run(
    source: Arc<dyn ProfileSource>,
    profile: Profile,
    browser: Option<String>,
) -> error::Result<()> {
    let mut terminal = tui::init()?;
    let theme = Theme::default();

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let runtime = Runtime::new(source, action_tx, browser);

    let mut app = App::new(profile, Arc::new(MarkdownRenderer));
    let mut events = EventHandler::new();

    terminal.draw(|frame| ui::render(frame, &app, &theme))?;

    loop {
        let Some(effects) = next_effects(&mut app, events.next(), &mut action_rx).await else {
            break;
        };

        for effect in effects {
            runtime.execute(effect);
        }

        if app.should_quit {
            break;
        }

        terminal.draw(|frame| ui::render(frame, &app, &theme))?;
    }

    Ok(())
}

/// Applies whichever comes first, input or a completion. `None` once the
/// input stream has ended.
async fn next_effects(
    app: &mut App,
    event: impl Future<Output = Option<Event>>,
    action_rx: &mut mpsc::UnboundedReceiver<Action>,
) -> Option<Vec<Effect>> {
    tokio::select! {
        event = event => event.map(|event| app.dispatch(event)),
        Some(action) = action_rx.recv() => Some(app.update(action)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn app() -> App {
        let profile = Profile {
            login: "octocat".to_string(),
            ..Default::default()
        };
        App::new(profile, Arc::new(MarkdownRenderer))
    }

    #[tokio::test]
    async fn closed_input_ends_the_loop_while_senders_live() {
        let mut app = app();
        let (_action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        let step = next_effects(&mut app, std::future::ready(None), &mut action_rx).await;
        assert!(step.is_none());
    }

    #[tokio::test]
    async fn input_is_dispatched() {
        let mut app = app();
        let (_action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
        app.dispatch(Event::Resize(80, 24));

        let right = Event::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE));
        let effects = next_effects(&mut app, std::future::ready(Some(right)), &mut action_rx)
            .await
            .unwrap();
        assert!(matches!(effects.as_slice(), [Effect::Fetch(_)]));
    }

    #[tokio::test]
    async fn completion_is_applied() {
        let mut app = app();
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
        action_tx.send(Action::Quit).unwrap();

        let effects = next_effects(&mut app, std::future::pending(), &mut action_rx)
            .await
            .unwrap();
        assert!(effects.is_empty());
        assert!(app.should_quit);
    }
}
