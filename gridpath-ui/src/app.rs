use anyhow::Context as _;
use crossterm::event::{KeyCode, KeyModifiers};
use navi_nexus::{Action, Component, Context, Event, EventContext, Navigation, RouterHandle};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::address_bar::{AddressBar, AddressBarOutcome};
use crate::config::LoadedConfig;
use crate::pages::{NewScenarioPage, NotFoundPage, ScenarioDetailPage, ScenariosPage, SettingsPage};
use crate::routes::{View, SCENARIO_ID_PARAM};

/// Which page instance the current navigation maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActivePage {
    Scenarios,
    Detail,
    New,
    Settings,
    NotFound,
    Blank,
}

impl ActivePage {
    fn of(navigation: Option<&Navigation<View>>) -> Self {
        match navigation {
            Some(Navigation::Active { handler, .. }) => match handler {
                View::ScenarioList => ActivePage::Scenarios,
                View::ScenarioDetail => ActivePage::Detail,
                View::ScenarioNew => ActivePage::New,
                View::Settings => ActivePage::Settings,
            },
            Some(Navigation::NotFound { .. }) => ActivePage::NotFound,
            None => ActivePage::Blank,
        }
    }
}

/// Shell component: owns the router and dispatches to the active page.
pub struct Root {
    router: RouterHandle<View>,
    address_bar: AddressBar,
    scenarios: ScenariosPage,
    detail: ScenarioDetailPage,
    new_scenario: NewScenarioPage,
    settings: SettingsPage,
    not_found: NotFoundPage,
}

impl Root {
    /// Build the shell and open the configured start path.
    pub fn new(mut router: RouterHandle<View>, loaded: &LoadedConfig) -> anyhow::Result<Self> {
        let start = &loaded.config.navigation.start_path;
        router
            .navigate(start)
            .with_context(|| format!("Failed to open start path '{start}'"))?;

        let routes = router.table().routes().iter().map(ToString::to_string).collect();
        let mut root = Self {
            router,
            address_bar: AddressBar::new(),
            scenarios: ScenariosPage::new(loaded.config.scenarios.clone()),
            detail: ScenarioDetailPage::new(),
            new_scenario: NewScenarioPage::new(),
            settings: SettingsPage::new(loaded, routes),
            not_found: NotFoundPage::new(),
        };
        root.sync_pages();
        Ok(root)
    }

    pub fn current_path(&self) -> &str {
        self.router.current().map(Navigation::path).unwrap_or_default()
    }

    fn active_page(&self) -> ActivePage {
        ActivePage::of(self.router.current())
    }

    /// Hand the committed navigation's data to the page that shows it.
    fn sync_pages(&mut self) {
        match self.router.current() {
            Some(Navigation::Active {
                handler: View::ScenarioDetail,
                params,
                ..
            }) => self.detail.show(params.get(SCENARIO_ID_PARAM)),
            Some(Navigation::NotFound { path }) => self.not_found.show(path),
            _ => {}
        }
    }

    fn enter_page(&mut self, page: ActivePage, cx: &Context<Self>) {
        match page {
            ActivePage::Scenarios => self.scenarios.on_enter(&mut cx.cast()),
            ActivePage::Detail => self.detail.on_enter(&mut cx.cast()),
            ActivePage::New => self.new_scenario.on_enter(&mut cx.cast()),
            ActivePage::Settings => self.settings.on_enter(&mut cx.cast()),
            ActivePage::NotFound => self.not_found.on_enter(&mut cx.cast()),
            ActivePage::Blank => {}
        }
    }

    fn exit_page(&mut self, page: ActivePage, cx: &Context<Self>) {
        match page {
            ActivePage::Scenarios => self.scenarios.on_exit(&mut cx.cast()),
            ActivePage::Detail => self.detail.on_exit(&mut cx.cast()),
            ActivePage::New => self.new_scenario.on_exit(&mut cx.cast()),
            ActivePage::Settings => self.settings.on_exit(&mut cx.cast()),
            ActivePage::NotFound => self.not_found.on_exit(&mut cx.cast()),
            ActivePage::Blank => {}
        }
    }

    /// Run one router step and, if the committed path changed, the page
    /// lifecycle around it.
    fn transition<F>(&mut self, cx: &Context<Self>, step: F)
    where
        F: FnOnce(&mut RouterHandle<View>) -> navi_nexus::Result<()>,
    {
        let previous_page = self.active_page();
        let previous_path = self.current_path().to_string();

        if let Err(err) = step(&mut self.router) {
            tracing::warn!(error = %err, from = %previous_path, "navigation failed");
            return;
        }
        if self.current_path() == previous_path {
            return;
        }

        tracing::debug!(from = %previous_path, to = self.current_path(), "view changed");
        self.exit_page(previous_page, cx);
        self.sync_pages();
        let next_page = self.active_page();
        self.enter_page(next_page, cx);
        cx.notify();
    }

    fn apply(&mut self, action: Action, cx: &Context<Self>) -> Option<Action> {
        match action {
            Action::Navigate(path) => self.transition(cx, |router| router.navigate(&path).map(|_| ())),
            Action::Back => self.transition(cx, |router| router.back().map(|_| ())),
            Action::Forward => self.transition(cx, |router| router.forward().map(|_| ())),
            Action::Quit => return Some(Action::Quit),
            Action::Noop => {}
        }
        None
    }

    fn title(&self) -> String {
        match self.router.current() {
            Some(Navigation::Active { handler, .. }) => handler.to_string(),
            Some(Navigation::NotFound { .. }) => "Not Found".to_string(),
            None => String::new(),
        }
    }
}

impl Component for Root {
    fn on_init(&mut self, cx: &mut Context<Self>) {
        tracing::info!(path = self.current_path(), "shell ready");
        let page = self.active_page();
        self.enter_page(page, cx);
    }

    fn on_shutdown(&mut self, cx: &mut Context<Self>) {
        let page = self.active_page();
        self.exit_page(page, cx);
        tracing::info!(path = self.current_path(), "shell closing");
    }

    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
            .split(cx.area);

        if self.address_bar.is_open() {
            self.address_bar.render(frame, layout[0]);
        } else {
            let header = Line::from(vec![
                Span::styled(" GridPath ", Style::default().fg(Color::Black).bg(Color::Cyan)),
                Span::styled(format!(" {} ", self.title()), Style::default().fg(Color::Cyan)),
                Span::styled(self.current_path(), Style::default().fg(Color::White)),
            ]);
            frame.render_widget(Paragraph::new(header), layout[0]);
        }

        let body = layout[1];
        match self.active_page() {
            ActivePage::Scenarios => self.scenarios.render(frame, &mut cx.cast_with_area(body)),
            ActivePage::Detail => self.detail.render(frame, &mut cx.cast_with_area(body)),
            ActivePage::New => self.new_scenario.render(frame, &mut cx.cast_with_area(body)),
            ActivePage::Settings => self.settings.render(frame, &mut cx.cast_with_area(body)),
            ActivePage::NotFound => self.not_found.render(frame, &mut cx.cast_with_area(body)),
            ActivePage::Blank => {}
        }

        let mut footer = vec![Span::raw(" Ctrl-L Go to │ Alt-←/→ Back/Forward │ Ctrl-C Quit ")];
        if self.router.options().tracing {
            footer.push(Span::styled(" TRACE ", Style::default().fg(Color::Black).bg(Color::Yellow)));
        }
        frame.render_widget(
            Paragraph::new(Line::from(footer)).style(Style::default().fg(Color::DarkGray)),
            layout[2],
        );
    }

    fn handle_event(&mut self, event: Event, cx: &mut EventContext<Self>) -> Option<Action> {
        if let Event::Key(key) = &event {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Some(Action::Quit);
            }
        }

        if self.address_bar.is_open() {
            return match self.address_bar.handle_event(&event) {
                AddressBarOutcome::Submit(path) => self.apply(Action::Navigate(path), cx),
                AddressBarOutcome::Pending | AddressBarOutcome::Cancel => None,
            };
        }

        if let Event::Key(key) = &event {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            let alt = key.modifiers.contains(KeyModifiers::ALT);
            match key.code {
                KeyCode::Char('l') if ctrl => {
                    let current = self.current_path().to_string();
                    self.address_bar.open(&current);
                    return None;
                }
                KeyCode::Left if alt => return self.apply(Action::Back, cx),
                KeyCode::Right if alt => return self.apply(Action::Forward, cx),
                _ => {}
            }
        }

        let action = match self.active_page() {
            ActivePage::Scenarios => self.scenarios.handle_event(event, &mut cx.cast()),
            ActivePage::Detail => self.detail.handle_event(event, &mut cx.cast()),
            ActivePage::New => self.new_scenario.handle_event(event, &mut cx.cast()),
            ActivePage::Settings => self.settings.handle_event(event, &mut cx.cast()),
            ActivePage::NotFound => self.not_found.handle_event(event, &mut cx.cast()),
            ActivePage::Blank => None,
        };
        action.and_then(|action| self.apply(action, cx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigSource, UiConfig};
    use crate::pages::test_support::{cx, key};
    use crate::routes::route_table;
    use crossterm::event::KeyEvent;
    use navi_nexus::register_routes;
    use ratatui::{backend::TestBackend, Terminal};

    fn root_with(configure: impl FnOnce(&mut UiConfig)) -> Root {
        let mut config = UiConfig::default();
        config.scenarios = vec!["base".to_string(), "high_load".to_string()];
        configure(&mut config);
        let loaded = LoadedConfig {
            config,
            source: ConfigSource::Defaults,
        };
        let router = register_routes(route_table().unwrap(), loaded.config.router_options());
        Root::new(router, &loaded).unwrap()
    }

    fn chord(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn screen(root: &mut Root) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut cx = cx::<Root>();
        terminal.draw(|frame| root.render(frame, &mut cx)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_start_path_redirects_to_listing() {
        let root = root_with(|_| {});
        assert_eq!(root.current_path(), "/scenarios");
        assert_eq!(root.active_page(), ActivePage::Scenarios);
        assert!(!root.router.can_go_back());
    }

    #[test]
    fn test_list_selection_opens_detail_with_id() {
        let mut root = root_with(|_| {});
        let mut cx = cx();

        root.handle_event(key(KeyCode::Down), &mut cx);
        assert_eq!(root.handle_event(key(KeyCode::Enter), &mut cx), None);

        assert_eq!(root.current_path(), "/scenario/high_load");
        assert_eq!(root.active_page(), ActivePage::Detail);
        assert_eq!(root.detail.id(), Some("high_load"));
    }

    #[test]
    fn test_back_and_forward_chords() {
        let mut root = root_with(|_| {});
        let mut cx = cx();

        root.handle_event(key(KeyCode::Char('s')), &mut cx);
        assert_eq!(root.current_path(), "/settings");

        root.handle_event(chord(KeyCode::Left, KeyModifiers::ALT), &mut cx);
        assert_eq!(root.current_path(), "/scenarios");

        root.handle_event(chord(KeyCode::Right, KeyModifiers::ALT), &mut cx);
        assert_eq!(root.current_path(), "/settings");

        root.handle_event(key(KeyCode::Esc), &mut cx);
        assert_eq!(root.current_path(), "/scenarios");
    }

    #[test]
    fn test_address_bar_reaches_not_found_and_home() {
        let mut root = root_with(|_| {});
        let mut cx = cx();

        root.handle_event(chord(KeyCode::Char('l'), KeyModifiers::CONTROL), &mut cx);
        assert!(root.address_bar.is_open());
        root.handle_event(Event::Paste("x".to_string()), &mut cx);
        root.handle_event(key(KeyCode::Enter), &mut cx);

        assert_eq!(root.current_path(), "/scenariosx");
        assert_eq!(root.active_page(), ActivePage::NotFound);

        root.handle_event(key(KeyCode::Enter), &mut cx);
        assert_eq!(root.current_path(), "/scenarios");
    }

    #[test]
    fn test_new_scenario_form_opens_typed_id() {
        let mut root = root_with(|config| config.navigation.start_path = "/scenario-new".to_string());
        let mut cx = cx();
        assert_eq!(root.active_page(), ActivePage::New);

        for c in "q2".chars() {
            root.handle_event(key(KeyCode::Char(c)), &mut cx);
        }
        root.handle_event(key(KeyCode::Enter), &mut cx);

        assert_eq!(root.current_path(), "/scenario/q2");
        assert_eq!(root.detail.id(), Some("q2"));
        assert_eq!(root.new_scenario.name(), "");
    }

    #[test]
    fn test_quit_is_passed_up() {
        let mut root = root_with(|_| {});
        let mut cx = cx();
        assert_eq!(
            root.handle_event(chord(KeyCode::Char('c'), KeyModifiers::CONTROL), &mut cx),
            Some(Action::Quit)
        );
        assert_eq!(root.handle_event(key(KeyCode::Char('q')), &mut cx), Some(Action::Quit));
    }

    #[test]
    fn test_ctrl_c_quits_while_address_bar_is_open() {
        let mut root = root_with(|_| {});
        let mut cx = cx();
        root.handle_event(chord(KeyCode::Char('l'), KeyModifiers::CONTROL), &mut cx);
        assert!(root.address_bar.is_open());

        assert_eq!(
            root.handle_event(chord(KeyCode::Char('c'), KeyModifiers::CONTROL), &mut cx),
            Some(Action::Quit)
        );
        assert_eq!(root.address_bar.input(), "/scenarios");
    }

    #[test]
    fn test_same_path_in_another_spelling_keeps_the_view() {
        let mut root = root_with(|config| config.navigation.start_path = "/scenario-new".to_string());
        let mut cx = cx();
        for c in "q2".chars() {
            root.handle_event(key(KeyCode::Char(c)), &mut cx);
        }

        root.handle_event(chord(KeyCode::Char('l'), KeyModifiers::CONTROL), &mut cx);
        root.handle_event(Event::Paste("/?draft=1".to_string()), &mut cx);
        root.handle_event(key(KeyCode::Enter), &mut cx);

        assert_eq!(root.current_path(), "/scenario-new");
        assert_eq!(root.new_scenario.name(), "q2");
        assert!(!root.router.can_go_back());
    }

    #[test]
    fn test_render_shows_path_and_trace_indicator() {
        let mut root = root_with(|config| config.navigation.tracing = true);
        let text = screen(&mut root);
        assert!(text.contains("/scenarios"));
        assert!(text.contains("base"));
        assert!(text.contains("TRACE"));

        let mut quiet = root_with(|_| {});
        assert!(!screen(&mut quiet).contains("TRACE"));
    }
}
