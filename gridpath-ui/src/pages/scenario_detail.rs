//! Scenario detail view, activated by `/scenario/:id`.
//!
//! The bound `id` arrives as-is. Whether it names a real scenario is not
//! checked here.

use crossterm::event::KeyCode;
use navi_nexus::{Action, Component, Context, Event, EventContext};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::routes::SCENARIOS_PATH;

#[derive(Default)]
pub struct ScenarioDetailPage {
    id: Option<String>,
    visits: u32,
}

impl ScenarioDetailPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the route parameter of the navigation that activated this view.
    pub fn show(&mut self, id: Option<&str>) {
        self.id = id.map(str::to_string);
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Component for ScenarioDetailPage {
    fn on_enter(&mut self, _cx: &mut Context<Self>) {
        self.visits += 1;
        tracing::debug!(id = ?self.id, visits = self.visits, "scenario detail entered");
    }

    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(cx.area);

        let id = self.id().unwrap_or("<none>");
        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(" Scenario ", Style::default().fg(Color::DarkGray)),
                Span::styled(id, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(""),
            Line::styled(
                format!(" Route parameter id = {id:?}"),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        let body = Paragraph::new(lines).block(
            Block::default()
                .title(" Scenario ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(body, layout[0]);

        let hints = Paragraph::new(" L List │ Esc Back │ Q Quit ").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hints, layout[1]);
    }

    fn handle_event(&mut self, event: Event, _cx: &mut EventContext<Self>) -> Option<Action> {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Char('l') => Some(Action::Navigate(SCENARIOS_PATH.to_string())),
                KeyCode::Esc => Some(Action::Back),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}
