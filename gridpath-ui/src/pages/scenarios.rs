//! Scenario list: the landing view.

use crossterm::event::KeyCode;
use navi_nexus::{Action, Component, Context, Event, EventContext};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::routes::{scenario_path, SCENARIO_NEW_PATH, SETTINGS_PATH};

pub struct ScenariosPage {
    scenarios: Vec<String>,
    selected: usize,
}

impl ScenariosPage {
    pub fn new(scenarios: Vec<String>) -> Self {
        Self {
            scenarios,
            selected: 0,
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.scenarios.get(self.selected).map(String::as_str)
    }
}

impl Component for ScenariosPage {
    fn on_enter(&mut self, _cx: &mut Context<Self>) {
        if self.selected >= self.scenarios.len() {
            self.selected = 0;
        }
    }

    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(cx.area);

        let block = Block::default()
            .title(format!(" Scenarios ({}) ", self.scenarios.len()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan));

        if self.scenarios.is_empty() {
            let empty = Paragraph::new("No scenarios configured. Press N to start a new one.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, layout[0]);
        } else {
            let items: Vec<ListItem> = self
                .scenarios
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let is_selected = i == self.selected;
                    let prefix = if is_selected { "> " } else { "  " };
                    let style = if is_selected {
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(prefix, style),
                        Span::styled(name.as_str(), style),
                    ]))
                })
                .collect();
            frame.render_widget(List::new(items).block(block), layout[0]);
        }

        let hints = Paragraph::new(" ↑/↓ Select │ Enter Open │ N New │ S Settings │ Q Quit ")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hints, layout[1]);
    }

    fn handle_event(&mut self, event: Event, _cx: &mut EventContext<Self>) -> Option<Action> {
        let Event::Key(key) = event else {
            return None;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if !self.scenarios.is_empty() {
                    self.selected = self.selected.checked_sub(1).unwrap_or(self.scenarios.len() - 1);
                }
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.scenarios.is_empty() {
                    self.selected = (self.selected + 1) % self.scenarios.len();
                }
                None
            }
            KeyCode::Enter => self
                .selected()
                .map(|name| Action::Navigate(scenario_path(name))),
            KeyCode::Char('n') => Some(Action::Navigate(SCENARIO_NEW_PATH.to_string())),
            KeyCode::Char('s') => Some(Action::Navigate(SETTINGS_PATH.to_string())),
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }
}
