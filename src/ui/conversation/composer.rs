use crate::ui::conversation::commands::{parse_slash_command, ParsedCommand};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Result returned when the user interacts with the composer
#[derive(Debug, PartialEq)]
pub enum ComposerResult {
    Submitted(String),
    Command(ParsedCommand),
    None,
}

/// State for the single-line input.
/// `cursor` counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct TextAreaState {
    pub content: String,
    pub cursor: usize,
}

impl TextAreaState {
    fn byte_index(&self) -> usize {
        self.content
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// Input area at the bottom of the chat
#[derive(Clone)]
pub struct ConversationComposer {
    state: TextAreaState,
    placeholder: String,
    enabled: bool,
}

impl ConversationComposer {
    pub fn new(placeholder: String) -> Self {
        Self {
            state: TextAreaState::default(),
            placeholder,
            enabled: true,
        }
    }

    /// Handle key input. Ignored entirely while disabled.
    pub fn handle_key(&mut self, key: KeyEvent) -> ComposerResult {
        if key.kind != KeyEventKind::Press || !self.enabled {
            return ComposerResult::None;
        }

        match key.code {
            KeyCode::Enter => {
                if self.state.content.trim().is_empty() {
                    return ComposerResult::None;
                }
                let content = std::mem::take(&mut self.state.content);
                self.state.cursor = 0;
                return match parse_slash_command(&content) {
                    Some(command) => ComposerResult::Command(command),
                    None => ComposerResult::Submitted(content),
                };
            }
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => {
                if self.state.cursor > 0 {
                    self.state.cursor -= 1;
                    let at = self.state.byte_index();
                    self.state.content.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.state.cursor < self.state.char_len() {
                    let at = self.state.byte_index();
                    self.state.content.remove(at);
                }
            }
            KeyCode::Left => {
                self.state.cursor = self.state.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.state.cursor < self.state.char_len() {
                    self.state.cursor += 1;
                }
            }
            KeyCode::Home => {
                self.state.cursor = 0;
            }
            KeyCode::End => {
                self.state.cursor = self.state.char_len();
            }
            _ => {}
        }

        ComposerResult::None
    }

    /// Insert pasted text; line breaks become spaces
    pub fn paste(&mut self, text: &str) {
        if !self.enabled {
            return;
        }
        for c in text.chars() {
            self.insert_char(if c == '\n' || c == '\r' { ' ' } else { c });
        }
    }

    fn insert_char(&mut self, c: char) {
        let at = self.state.byte_index();
        self.state.content.insert(at, c);
        self.state.cursor += 1;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn content(&self) -> &str {
        &self.state.content
    }

    /// Characters scrolled off the left edge so the cursor stays visible
    fn horizontal_skip(&self, width: usize) -> usize {
        (self.state.cursor + 1).saturating_sub(width)
    }

    /// Cursor column relative to an inner area of `width` columns
    pub fn cursor_column(&self, width: u16) -> u16 {
        self.state.cursor.saturating_sub(self.horizontal_skip(width as usize)) as u16
    }
}

impl Widget for &ConversationComposer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .style(if self.enabled {
                Style::default().fg(Color::Blue)
            } else {
                Style::default().fg(Color::DarkGray)
            });

        let inner_area = block.inner(area);
        block.render(area, buf);
        if inner_area.is_empty() {
            return;
        }

        let line = if self.state.content.is_empty() {
            Line::from(vec![Span::styled(
                self.placeholder.as_str(),
                Style::default().fg(Color::DarkGray),
            )])
        } else {
            let skip = self.horizontal_skip(inner_area.width as usize);
            let visible: String = self.state.content.chars().skip(skip).collect();
            Line::from(vec![Span::styled(visible, Style::default().fg(Color::White))])
        };

        buf.set_line(inner_area.x, inner_area.y, &line, inner_area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::conversation::commands::SlashCommand;
    use crossterm::event::KeyModifiers;

    fn press(composer: &mut ConversationComposer, code: KeyCode) -> ComposerResult {
        composer.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(composer: &mut ConversationComposer, text: &str) {
        for c in text.chars() {
            press(composer, KeyCode::Char(c));
        }
    }

    #[test]
    fn enter_submits_and_clears() {
        let mut composer = ConversationComposer::new("Type your message...".into());
        type_str(&mut composer, "hello");
        assert_eq!(press(&mut composer, KeyCode::Enter), ComposerResult::Submitted("hello".into()));
        assert_eq!(composer.content(), "");
    }

    #[test]
    fn blank_enter_does_nothing() {
        let mut composer = ConversationComposer::new(String::new());
        type_str(&mut composer, "   ");
        assert_eq!(press(&mut composer, KeyCode::Enter), ComposerResult::None);
        assert_eq!(composer.content(), "   ");
    }

    #[test]
    fn slash_input_becomes_command() {
        let mut composer = ConversationComposer::new(String::new());
        type_str(&mut composer, "/help");
        match press(&mut composer, KeyCode::Enter) {
            ComposerResult::Command(parsed) => assert_eq!(parsed.command, SlashCommand::Help),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn editing_handles_multibyte_chars() {
        let mut composer = ConversationComposer::new(String::new());
        type_str(&mut composer, "café");
        press(&mut composer, KeyCode::Left);
        press(&mut composer, KeyCode::Backspace);
        assert_eq!(composer.content(), "caé");
        press(&mut composer, KeyCode::Home);
        press(&mut composer, KeyCode::Delete);
        assert_eq!(composer.content(), "aé");
        press(&mut composer, KeyCode::End);
        type_str(&mut composer, "!");
        assert_eq!(composer.content(), "aé!");
    }

    #[test]
    fn disabled_composer_ignores_input() {
        let mut composer = ConversationComposer::new(String::new());
        type_str(&mut composer, "draft");
        composer.set_enabled(false);
        type_str(&mut composer, "more");
        composer.paste("pasted");
        assert_eq!(press(&mut composer, KeyCode::Enter), ComposerResult::None);
        assert_eq!(composer.content(), "draft");
    }

    #[test]
    fn cursor_column_scrolls_with_long_input() {
        let mut composer = ConversationComposer::new(String::new());
        type_str(&mut composer, "abcdefghij");
        assert_eq!(composer.cursor_column(20), 10);
        assert_eq!(composer.cursor_column(5), 4);
        assert_eq!(composer.cursor_column(1), 0);
        assert_eq!(composer.cursor_column(0), 0);
    }

    #[test]
    fn renders_into_areas_without_room_for_text() {
        let mut composer = ConversationComposer::new("Type your message...".into());
        type_str(&mut composer, "hello");

        for area in [Rect::new(0, 0, 10, 2), Rect::new(0, 0, 2, 3), Rect::new(0, 3, 10, 0)] {
            let mut buf = Buffer::empty(Rect::new(0, 0, 10, 3));
            (&composer).render(area, &mut buf);
        }

        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        (&composer).render(area, &mut buf);
        let middle: String = (0..area.width).map(|x| buf.get(x, 1).symbol().to_string()).collect();
        assert!(middle.contains("hello"));
    }

    #[test]
    fn paste_flattens_newlines() {
        let mut composer = ConversationComposer::new(String::new());
        composer.paste("one\ntwo");
        assert_eq!(composer.content(), "one two");
    }
}
