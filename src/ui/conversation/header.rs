use crate::logo::Logo;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Top bar: the logo slot followed by the chat title
pub struct ChatHeader<'a> {
    title: &'a str,
    logo: Option<&'a Logo>,
}

impl<'a> ChatHeader<'a> {
    pub fn new(title: &'a str, logo: Option<&'a Logo>) -> Self {
        Self { title, logo }
    }

    fn logo_line(&self) -> Line<'static> {
        match self.logo {
            Some(logo) => Line::from(vec![
                Span::styled("■ ", Style::default().fg(Color::Cyan)),
                Span::styled(logo.label(), Style::default().fg(Color::Gray)),
            ]),
            None => Line::from(vec![Span::styled(
                "[ Logo ]",
                Style::default().fg(Color::DarkGray),
            )]),
        }
    }
}

impl Widget for ChatHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Blue));
        let inner_area = block.inner(area);
        block.render(area, buf);
        if inner_area.is_empty() {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(inner_area);

        if !chunks[0].is_empty() {
            buf.set_line(chunks[0].x, chunks[0].y, &self.logo_line(), chunks[0].width);
        }

        let title = Line::from(vec![Span::styled(
            self.title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )]);
        if !chunks[1].is_empty() {
            buf.set_line(chunks[1].x, chunks[1].y, &title, chunks[1].width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf.get(x, y).symbol().to_string()).collect()
    }

    #[test]
    fn placeholder_without_logo() {
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        ChatHeader::new("Company Chatbot", None).render(area, &mut buf);

        let line = row(&buf, 1);
        assert!(line.contains("[ Logo ]"));
        assert!(line.contains("Company Chatbot"));
    }

    #[test]
    fn shows_logo_label() {
        let logo = Logo::from_bytes(vec![0; 10], "image/png");
        let area = Rect::new(0, 0, 80, 3);
        let mut buf = Buffer::empty(area);
        ChatHeader::new("Acme", Some(&logo)).render(area, &mut buf);

        assert!(row(&buf, 1).contains("image/png (10 B)"));
    }

    #[test]
    fn too_short_for_a_title_row() {
        let buf_area = Rect::new(0, 0, 30, 2);
        for area in [buf_area, Rect::new(0, 2, 30, 0), Rect::new(0, 0, 3, 2)] {
            let mut buf = Buffer::empty(buf_area);
            ChatHeader::new("Company Chatbot", None).render(area, &mut buf);
            assert!(!row(&buf, 0).contains("Company"));
        }
    }
}
