//! Conversation history display component

use crate::events::ChatMessage;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Scroll position of the history, counted in lines from the bottom
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryScroll {
    offset_from_bottom: usize,
}

impl HistoryScroll {
    pub fn scroll_up(&mut self, lines: usize) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_sub(lines);
    }

    /// Jump to the newest message
    pub fn scroll_to_bottom(&mut self) {
        self.offset_from_bottom = 0;
    }

    pub fn is_at_bottom(&self) -> bool {
        self.offset_from_bottom == 0
    }

    pub fn offset(&self) -> usize {
        self.offset_from_bottom
    }
}

/// Renders the message thread as chat bubbles: user messages on the right,
/// bot messages on the left, each followed by its send time.
pub struct ConversationHistory<'a> {
    messages: &'a [ChatMessage],
    scroll: HistoryScroll,
}

impl<'a> ConversationHistory<'a> {
    pub fn new(messages: &'a [ChatMessage], scroll: HistoryScroll) -> Self {
        Self { messages, scroll }
    }

    /// All lines of the thread for a given inner width
    fn build_lines(&self, width: u16) -> Vec<Line<'a>> {
        let mut lines = Vec::new();
        for message in self.messages {
            lines.extend(render_bubble(message, width));
            lines.push(Line::from(""));
        }
        lines
    }
}

impl Widget for ConversationHistory<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::LEFT | Borders::RIGHT);
        let inner_area = block.inner(area);
        block.render(area, buf);
        if inner_area.is_empty() {
            return;
        }

        if self.messages.is_empty() {
            if inner_area.width < 2 {
                return;
            }
            let hint = Line::from(vec![Span::styled(
                "Ask a question below to start the conversation.",
                Style::default().fg(Color::DarkGray),
            )]);
            buf.set_line(inner_area.x + 1, inner_area.y, &hint, inner_area.width.saturating_sub(1));
            return;
        }

        let all_lines = self.build_lines(inner_area.width);
        let height = inner_area.height as usize;
        let visible = visible_window(all_lines.len(), height, self.scroll.offset());

        for (i, line) in all_lines[visible].iter().enumerate() {
            buf.set_line(inner_area.x, inner_area.y + i as u16, line, inner_area.width);
        }
    }
}

/// Range of lines to show for a viewport of `height` lines scrolled
/// `offset` lines up from the bottom
pub fn visible_window(total: usize, height: usize, offset: usize) -> std::ops::Range<usize> {
    let max_offset = total.saturating_sub(height);
    let offset = offset.min(max_offset);
    let end = total - offset;
    let start = end.saturating_sub(height);
    start..end
}

fn render_bubble<'a>(message: &ChatMessage, width: u16) -> Vec<Line<'a>> {
    let width = width as usize;
    // Bubbles take at most three quarters of the row
    let bubble_width = (width * 3 / 4).max(8).min(width);
    let text_width = bubble_width.saturating_sub(2).max(1);

    let (text_style, time_style) = if message.is_user() {
        (
            Style::default().fg(Color::White).bg(Color::Blue),
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        )
    } else {
        (
            Style::default().fg(Color::Black).bg(Color::Gray),
            Style::default().fg(Color::DarkGray),
        )
    };

    let wrapped = wrap_text(&message.text, text_width);
    let inner = wrapped.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut lines = Vec::new();
    for text in wrapped {
        let padded = format!(" {:<inner$} ", text, inner = inner);
        lines.push(align(vec![Span::styled(padded, text_style)], inner + 2, width, message.is_user()));
    }

    let time = message.time_label();
    let time_len = time.chars().count();
    lines.push(align(
        vec![Span::styled(time, time_style)],
        time_len,
        width,
        message.is_user(),
    ));

    lines
}

fn align<'a>(mut spans: Vec<Span<'a>>, content_width: usize, width: usize, right: bool) -> Line<'a> {
    if right {
        let pad = width.saturating_sub(content_width);
        spans.insert(0, Span::raw(" ".repeat(pad)));
    }
    Line::from(spans)
}

/// Wrap text to fit within the given width, splitting words that are
/// longer than a whole line. Explicit line breaks are kept.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current_line));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            if current_len > 0 && current_len + 1 + word.len() > width {
                lines.push(std::mem::take(&mut current_line));
                current_len = 0;
            }
            if current_len > 0 {
                current_line.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current_line.extend(word);
        }

        if current_len > 0 || lines.is_empty() || paragraph.trim().is_empty() {
            lines.push(current_line);
        }
    }

    lines
}
