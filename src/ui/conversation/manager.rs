use crate::client::AskClient;
use crate::config::Config;
use crate::conversation::{Conversation, ConversationController};
use crate::events::{AppEvent, ChatMessage, TuiEvent};
use crate::logo::Logo;
use crate::ui::conversation::{
    get_help_text, ChatHeader, ComposerResult, ConversationComposer, ConversationHistory,
    HistoryScroll, ParsedCommand, SendButton, SlashCommand, StatusLine,
};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Lines moved per PageUp / PageDown
const SCROLL_STEP: usize = 5;

/// Actions that can be requested by the conversation manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationAction {
    None,
    Exit,
}

/// Ties the conversation controller to the terminal widgets
pub struct ConversationManager {
    controller: ConversationController<AskClient>,
    composer: ConversationComposer,
    scroll: HistoryScroll,
    title: String,
    notice: Option<String>,
    events: mpsc::UnboundedSender<AppEvent>,
    frame: u64,
}

impl ConversationManager {
    pub fn new(config: &Config, client: AskClient, events: mpsc::UnboundedSender<AppEvent>) -> Self {
        let mut controller = ConversationController::new(client);

        // Auto-scroll whenever the thread grows
        let growth = events.clone();
        controller
            .conversation_mut()
            .subscribe(move |_message: &ChatMessage, len: usize| {
                let _ = growth.send(AppEvent::HistoryGrew(len));
            });

        Self {
            controller,
            composer: ConversationComposer::new(config.ui.placeholder.clone()),
            scroll: HistoryScroll::default(),
            title: config.ui.title.clone(),
            notice: None,
            events,
            frame: 0,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        self.controller.conversation()
    }

    pub fn composer(&self) -> &ConversationComposer {
        &self.composer
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn scroll(&self) -> HistoryScroll {
        self.scroll
    }

    pub fn set_logo(&mut self, logo: Logo) {
        info!(logo = %logo.label(), "logo set");
        self.controller.set_logo(logo);
    }

    pub fn handle_event(&mut self, event: AppEvent) -> ConversationAction {
        match event {
            AppEvent::Terminal(TuiEvent::Key(key)) => return self.handle_key(key),
            AppEvent::Terminal(TuiEvent::Paste(text)) => {
                self.composer.paste(&text);
                self.sync_draft();
            }
            AppEvent::Terminal(TuiEvent::Resize(_, _)) => {}
            AppEvent::AskFinished { ticket, outcome } => {
                if let Err(err) = self.controller.finish(ticket, outcome) {
                    warn!(%ticket, error = %err, "dropping unexpected answer");
                }
                self.composer.set_enabled(!self.conversation().is_in_flight());
            }
            AppEvent::HistoryGrew(_) => self.scroll.scroll_to_bottom(),
            AppEvent::Tick => self.frame = self.frame.wrapping_add(1),
        }
        ConversationAction::None
    }

    /// Handle key input
    fn handle_key(&mut self, key: KeyEvent) -> ConversationAction {
        if key.kind != KeyEventKind::Press {
            return ConversationAction::None;
        }

        match key.code {
            KeyCode::Esc => return ConversationAction::Exit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return ConversationAction::Exit;
            }
            KeyCode::PageUp => {
                self.scroll.scroll_up(SCROLL_STEP);
                return ConversationAction::None;
            }
            KeyCode::PageDown => {
                self.scroll.scroll_down(SCROLL_STEP);
                return ConversationAction::None;
            }
            _ => {}
        }

        match self.composer.handle_key(key) {
            ComposerResult::Submitted(text) => {
                self.submit(text);
                ConversationAction::None
            }
            ComposerResult::Command(command) => self.handle_slash_command(command),
            ComposerResult::None => {
                self.sync_draft();
                ConversationAction::None
            }
        }
    }

    fn sync_draft(&mut self) {
        let draft = self.composer.content().to_string();
        self.controller.conversation_mut().set_draft(draft);
    }

    fn submit(&mut self, text: String) {
        self.controller.conversation_mut().set_draft(text);
        if self.controller.submit_in_background(self.events.clone()) {
            self.composer.set_enabled(false);
            self.notice = None;
        }
    }

    /// Handle slash commands
    fn handle_slash_command(&mut self, command: ParsedCommand) -> ConversationAction {
        self.sync_draft();
        match command.command {
            SlashCommand::Logo => {
                let Some(path) = command.logo_path() else {
                    self.notice = Some("Usage: /logo <path to image>".to_string());
                    return ConversationAction::None;
                };
                match Logo::from_file(&path) {
                    Ok(logo) => {
                        self.notice = Some(format!("Logo loaded: {}", logo.label()));
                        self.set_logo(logo);
                    }
                    Err(err) => {
                        warn!(error = %err, "could not load logo");
                        self.notice = Some(format!("{:#}", err));
                    }
                }
                ConversationAction::None
            }
            SlashCommand::Help => {
                self.notice = Some(get_help_text());
                ConversationAction::None
            }
            SlashCommand::Bye => ConversationAction::Exit,
        }
    }

    /// Draw the whole chat window
    pub fn render(&self, frame: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(5),    // History
                Constraint::Length(3), // Composer
                Constraint::Length(1), // Status
            ])
            .split(frame.size());

        let conversation = self.conversation();

        frame.render_widget(ChatHeader::new(&self.title, conversation.logo()), chunks[0]);
        frame.render_widget(
            ConversationHistory::new(conversation.messages(), self.scroll),
            chunks[1],
        );

        let footer = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(16)])
            .split(chunks[2]);

        frame.render_widget(&self.composer, footer[0]);
        frame.render_widget(
            SendButton::new(conversation.phase(), conversation.can_submit(), self.frame),
            footer[1],
        );
        frame.render_widget(StatusLine::new(self.notice()), chunks[3]);

        if self.composer.is_enabled() && footer[0].width > 2 && footer[0].height > 2 {
            let inner_width = footer[0].width - 2;
            frame.set_cursor(
                footer[0].x + 1 + self.composer.cursor_column(inner_width),
                footer[0].y + 1,
            );
        }
    }
}
