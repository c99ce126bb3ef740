//! Settings view: effective configuration and the registered routes.

use crossterm::event::KeyCode;
use navi_nexus::{Action, Component, Context, Event, EventContext};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::config::LoadedConfig;

pub struct SettingsPage {
    entries: Vec<(&'static str, String)>,
    routes: Vec<String>,
}

impl SettingsPage {
    pub fn new(loaded: &LoadedConfig, routes: Vec<String>) -> Self {
        let config = &loaded.config;
        let log_file = config
            .log_file()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "(discarded)".to_string());

        let entries = vec![
            ("Config source", loaded.source.to_string()),
            ("Navigation tracing", on_off(config.navigation.tracing).to_string()),
            ("Start path", config.navigation.start_path.clone()),
            ("Max history", config.navigation.max_history.to_string()),
            ("Max redirects", config.navigation.max_redirects.to_string()),
            ("Log level", config.logging.level.clone()),
            ("Log file", log_file),
        ];
        Self { entries, routes }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

impl Component for SettingsPage {
    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.entries.len() as u16 + 2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(cx.area);

        let entries: Vec<Line> = self
            .entries
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!(" {label:<20}"), Style::default().fg(Color::DarkGray)),
                    Span::raw(value.as_str()),
                ])
            })
            .collect();
        let settings = Paragraph::new(entries).block(
            Block::default()
                .title(" Settings ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(settings, layout[0]);

        let routes: Vec<ListItem> = self
            .routes
            .iter()
            .map(|route| ListItem::new(format!(" {route}")))
            .collect();
        let routes = List::new(routes).block(
            Block::default()
                .title(" Routes ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(routes, layout[1]);

        let hints = Paragraph::new(" Esc Back │ Q Quit ").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hints, layout[2]);
    }

    fn handle_event(&mut self, event: Event, _cx: &mut EventContext<Self>) -> Option<Action> {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Esc => Some(Action::Back),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}
