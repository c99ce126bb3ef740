use crossterm::event::KeyCode;
use navi_nexus::{Action, Component, Context, Event, EventContext};
use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Shown when no route matches the requested path.
#[derive(Default)]
pub struct NotFoundPage {
    path: String,
}

impl NotFoundPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, path: &str) {
        self.path = path.to_string();
    }
}

impl Component for NotFoundPage {
    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>) {
        let lines = vec![
            Line::from(""),
            Line::styled(format!("No route matches '{}'", self.path), Style::default().fg(Color::Red)),
            Line::from(""),
            Line::styled("Enter Home │ Esc Back │ Q Quit", Style::default().fg(Color::DarkGray)),
        ];
        let body = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .title(" Not Found ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Red)),
        );
        frame.render_widget(body, cx.area);
    }

    fn handle_event(&mut self, event: Event, _cx: &mut EventContext<Self>) -> Option<Action> {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Enter | KeyCode::Char('h') => Some(Action::Navigate("/".to_string())),
                KeyCode::Esc => Some(Action::Back),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}
