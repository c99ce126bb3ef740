//! New scenario view: a single name field.

use crossterm::event::{KeyCode, KeyModifiers};
use navi_nexus::{Action, Component, Context, Event, EventContext};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::routes::{scenario_path, RESERVED_ID_CHARS};

#[derive(Default)]
pub struct NewScenarioPage {
    name: String,
}

impl NewScenarioPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Component for NewScenarioPage {
    fn on_exit(&mut self, _cx: &mut Context<Self>) {
        self.name.clear();
    }

    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
            .split(cx.area);

        let field = Paragraph::new(Line::from(vec![
            Span::raw(self.name()),
            Span::styled("█", Style::default().fg(Color::Cyan)),
        ]))
        .block(
            Block::default()
                .title(" New Scenario Name ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(field, layout[0]);

        let hints = Paragraph::new(" Type a name │ Enter Open │ Esc Back ")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hints, layout[2]);
    }

    fn handle_event(&mut self, event: Event, _cx: &mut EventContext<Self>) -> Option<Action> {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                    None
                }
                KeyCode::Char(c) => {
                    if !RESERVED_ID_CHARS.contains(&c) {
                        self.name.push(c);
                    }
                    None
                }
                KeyCode::Backspace => {
                    self.name.pop();
                    None
                }
                KeyCode::Enter => {
                    let name = self.name.trim();
                    if name.is_empty() {
                        None
                    } else {
                        Some(Action::Navigate(scenario_path(name)))
                    }
                }
                KeyCode::Esc => Some(Action::Back),
                _ => None,
            },
            Event::Paste(text) => {
                self.name.extend(
                    text.trim_end_matches(['\r', '\n'])
                        .chars()
                        .filter(|c| !RESERVED_ID_CHARS.contains(c)),
                );
                None
            }
            _ => None,
        }
    }
}
