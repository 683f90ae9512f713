use crate::conversation::Phase;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Send button next to the composer. Reads "Send" when idle and an
/// animated "Sending..." while a request is in flight.
pub struct SendButton {
    phase: Phase,
    can_send: bool,
    frame: u64,
}

impl SendButton {
    pub fn new(phase: Phase, can_send: bool, frame: u64) -> Self {
        Self {
            phase,
            can_send,
            frame,
        }
    }

    pub fn label(&self) -> String {
        match self.phase {
            Phase::Idle => "Send".to_string(),
            Phase::Sending => {
                let dots = match self.frame % 4 {
                    0 => "   ",
                    1 => ".  ",
                    2 => ".. ",
                    _ => "...",
                };
                format!("Sending{}", dots)
            }
        }
    }

    fn style(&self) -> Style {
        match (self.phase, self.can_send) {
            (Phase::Sending, _) => Style::default().fg(Color::White).bg(Color::LightBlue),
            (Phase::Idle, true) => Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            (Phase::Idle, false) => Style::default().fg(Color::Gray).bg(Color::DarkGray),
        }
    }
}

impl Widget for SendButton {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let label = format!(" {} ", self.label());
        let pad = (area.width as usize).saturating_sub(label.chars().count()) / 2;
        let y = area.y + area.height / 2;

        buf.set_style(Rect::new(area.x, y, area.width, 1), self.style());
        let line = Line::from(vec![Span::styled(label, self.style())]);
        buf.set_line(area.x + pad as u16, y, &line, area.width.saturating_sub(pad as u16));
    }
}

/// One-line notice under the composer (help text, command errors)
pub struct StatusLine<'a> {
    notice: Option<&'a str>,
}

impl<'a> StatusLine<'a> {
    pub fn new(notice: Option<&'a str>) -> Self {
        Self { notice }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let text = self.notice.unwrap_or("Enter to send · /help for commands · Esc to quit");
        let line = Line::from(vec![Span::styled(text, Style::default().fg(Color::DarkGray))]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
