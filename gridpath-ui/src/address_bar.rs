//! Single-line path entry, opened with Ctrl-L.

use crossterm::event::{KeyCode, KeyModifiers};
use navi_nexus::Event;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressBarOutcome {
    /// Still editing.
    Pending,
    /// The user asked to open this path.
    Submit(String),
    Cancel,
}

#[derive(Debug, Default)]
pub struct AddressBar {
    input: String,
    open: bool,
}

impl AddressBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Open pre-filled with the current path.
    pub fn open(&mut self, current: &str) {
        self.input = current.to_string();
        self.open = true;
    }

    pub fn handle_event(&mut self, event: &Event) -> AddressBarOutcome {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                    AddressBarOutcome::Pending
                }
                KeyCode::Char(c) => {
                    self.input.push(c);
                    AddressBarOutcome::Pending
                }
                KeyCode::Backspace => {
                    self.input.pop();
                    AddressBarOutcome::Pending
                }
                KeyCode::Enter => {
                    self.open = false;
                    let mut path = std::mem::take(&mut self.input).trim().to_string();
                    if !path.starts_with('/') {
                        path.insert(0, '/');
                    }
                    AddressBarOutcome::Submit(path)
                }
                KeyCode::Esc => {
                    self.open = false;
                    self.input.clear();
                    AddressBarOutcome::Cancel
                }
                _ => AddressBarOutcome::Pending,
            },
            Event::Paste(text) => {
                self.input.push_str(text.trim_end_matches(['\r', '\n']));
                AddressBarOutcome::Pending
            }
            _ => AddressBarOutcome::Pending,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" Go to: ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" "),
            Span::raw(self.input()),
            Span::styled("█", Style::default().fg(Color::Cyan)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
