//! Terminal front end

pub mod conversation;

use crate::client::AskClient;
use crate::config::Config;
use crate::events::{AppEvent, TuiEvent};
use crate::logo::Logo;
use anyhow::{Context, Result};
use conversation::{ConversationAction, ConversationManager};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Restores the terminal when dropped, including on early return
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .context("Failed to enter alternate screen")?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .context("Failed to create terminal")?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        );
        let _ = self.terminal.show_cursor();
    }
}

/// Run the chat window until the user quits
pub async fn run(config: Config, logo: Option<Logo>) -> Result<()> {
    let client = AskClient::new(&config).context("Failed to create HTTP client")?;
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    let mut manager = ConversationManager::new(&config, client, tx.clone());
    if let Some(logo) = logo {
        manager.set_logo(logo);
    }

    spawn_input_reader(tx.clone());
    spawn_ticker(tx);

    let mut guard = TerminalGuard::enter()?;
    info!(base_url = %config.base_url, "chat window opened");

    loop {
        guard
            .terminal
            .draw(|frame| manager.render(frame))
            .context("Failed to draw frame")?;

        let Some(event) = rx.recv().await else {
            break;
        };

        if manager.handle_event(event) == ConversationAction::Exit {
            break;
        }
    }

    info!(messages = manager.conversation().messages().len(), "chat window closed");
    Ok(())
}

fn spawn_input_reader(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut events = EventStream::new();
        while let Some(event) = events.next().await {
            match event {
                Ok(event) => {
                    if let Some(event) = TuiEvent::from_crossterm(event) {
                        if tx.send(AppEvent::Terminal(event)).is_err() {
                            break;
                        }
                    }
                }
                Err(err) => {
                    debug!(error = %err, "terminal input error");
                    break;
                }
            }
        }
    });
}

fn spawn_ticker(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_RATE);
        loop {
            interval.tick().await;
            if tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });
}
