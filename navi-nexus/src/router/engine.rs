//! Navigation engine.
//!
//! [`register_routes`] takes ownership of an immutable [`RouteTable`] and
//! returns a [`RouterHandle`] that turns navigation requests into committed
//! [`Navigation`] states. The handle follows redirects, keeps back/forward
//! history and, when [`RouterOptions::tracing`] is set, reports every step of
//! every navigation on the [`NAVIGATION_TARGET`] tracing target.

use std::fmt;

use super::pattern::{canonical_path, Params};
use super::table::{Resolution, RouteTable};
use crate::error::{RedirectLoopSnafu, Result};

/// Tracing target used for per-navigation diagnostics.
pub const NAVIGATION_TARGET: &str = "navi_nexus::navigation";

/// Options accepted by [`register_routes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterOptions {
    /// Emit verbose diagnostics for every navigation.
    pub tracing: bool,
    /// Maximum back-history entries; 0 disables history.
    pub max_history: usize,
    /// Redirects followed before a navigation is abandoned.
    pub max_redirects: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            tracing: false,
            max_history: 50,
            max_redirects: 8,
        }
    }
}

/// What started a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTrigger {
    /// An explicit request: a link, a typed path, a page action.
    Imperative,
    /// A history move, back or forward.
    PopState,
}

impl fmt::Display for NavigationTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationTrigger::Imperative => f.write_str("imperative"),
            NavigationTrigger::PopState => f.write_str("popstate"),
        }
    }
}

/// Committed result of a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation<H> {
    /// A route matched and its handler is active.
    Active { path: String, handler: H, params: Params },
    /// Nothing in the table matched `path`.
    NotFound { path: String },
}

impl<H> Navigation<H> {
    /// The path that was finally committed, after redirects.
    pub fn path(&self) -> &str {
        match self {
            Navigation::Active { path, .. } | Navigation::NotFound { path } => path,
        }
    }

    pub fn handler(&self) -> Option<&H> {
        match self {
            Navigation::Active { handler, .. } => Some(handler),
            Navigation::NotFound { .. } => None,
        }
    }

    pub fn params(&self) -> Option<&Params> {
        match self {
            Navigation::Active { params, .. } => Some(params),
            Navigation::NotFound { .. } => None,
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params().and_then(|params| params.get(name))
    }
}

/// Hand the table to the navigation engine.
pub fn register_routes<H>(table: RouteTable<H>, options: RouterOptions) -> RouterHandle<H>
where
    H: Clone + fmt::Debug,
{
    tracing::debug!(
        routes = table.len(),
        tracing = options.tracing,
        max_history = options.max_history,
        "routes registered"
    );
    RouterHandle {
        table,
        options,
        current: None,
        back: Vec::new(),
        forward: Vec::new(),
        next_id: 1,
    }
}

/// Navigation state over one registered route table.
#[derive(Debug)]
pub struct RouterHandle<H> {
    table: RouteTable<H>,
    options: RouterOptions,
    current: Option<Navigation<H>>,
    back: Vec<String>,
    forward: Vec<String>,
    next_id: u64,
}

impl<H> RouterHandle<H>
where
    H: Clone + fmt::Debug,
{
    /// Navigate to `path`. The current path is pushed onto the back history
    /// when the committed path differs from it.
    pub fn navigate(&mut self, path: &str) -> Result<&Navigation<H>> {
        let id = self.begin(path, NavigationTrigger::Imperative);
        let next = self.resolve(id, path)?;

        let changed = self
            .current
            .as_ref()
            .is_some_and(|current| current.path() != next.path());
        if changed {
            if let Some(previous) = self.current.as_ref().map(|c| c.path().to_string()) {
                self.push_back(previous);
            }
            self.forward.clear();
        }

        Ok(self.commit(id, next))
    }

    /// Go one step back. Returns `Ok(None)` when there is no history.
    pub fn back(&mut self) -> Result<Option<&Navigation<H>>> {
        let Some(path) = self.back.pop() else {
            return Ok(None);
        };
        let id = self.begin(&path, NavigationTrigger::PopState);
        let next = match self.resolve(id, &path) {
            Ok(next) => next,
            Err(err) => {
                self.back.push(path);
                return Err(err);
            }
        };
        if let Some(current) = self.current.as_ref() {
            self.forward.push(current.path().to_string());
        }
        Ok(Some(self.commit(id, next)))
    }

    /// Go one step forward. Returns `Ok(None)` when nothing was undone.
    pub fn forward(&mut self) -> Result<Option<&Navigation<H>>> {
        let Some(path) = self.forward.pop() else {
            return Ok(None);
        };
        let id = self.begin(&path, NavigationTrigger::PopState);
        let next = match self.resolve(id, &path) {
            Ok(next) => next,
            Err(err) => {
                self.forward.push(path);
                return Err(err);
            }
        };
        if let Some(current) = self.current.as_ref().map(|c| c.path().to_string()) {
            self.push_back(current);
        }
        Ok(Some(self.commit(id, next)))
    }

    fn begin(&mut self, path: &str, trigger: NavigationTrigger) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.options.tracing {
            tracing::info!(target: NAVIGATION_TARGET, id, %path, %trigger, "navigation start");
        }
        id
    }

    fn resolve(&self, id: u64, path: &str) -> Result<Navigation<H>> {
        let mut target = canonical_path(path);

        for _ in 0..=self.options.max_redirects {
            match self.table.resolve(&target) {
                Resolution::Activate { handler, params } => {
                    if self.options.tracing {
                        tracing::info!(
                            target: NAVIGATION_TARGET,
                            id,
                            path = %target,
                            handler = ?handler,
                            params = %params,
                            "route recognized"
                        );
                    }
                    return Ok(Navigation::Active {
                        path: target,
                        handler: handler.clone(),
                        params,
                    });
                }
                Resolution::Redirect { to } => {
                    if self.options.tracing {
                        tracing::info!(target: NAVIGATION_TARGET, id, from = %target, %to, "redirect");
                    }
                    target = canonical_path(to);
                }
                Resolution::NoMatch => {
                    if self.options.tracing {
                        tracing::info!(target: NAVIGATION_TARGET, id, path = %target, "no route matched");
                    }
                    return Ok(Navigation::NotFound { path: target });
                }
            }
        }

        tracing::warn!(%path, limit = self.options.max_redirects, "navigation abandoned: redirect loop");
        let err = RedirectLoopSnafu {
            path,
            limit: self.options.max_redirects,
        }
        .build();
        if self.options.tracing {
            tracing::info!(target: NAVIGATION_TARGET, id, %path, found = false, error = %err, "navigation end");
        }
        Err(err)
    }

    fn commit(&mut self, id: u64, next: Navigation<H>) -> &Navigation<H> {
        if self.options.tracing {
            tracing::info!(
                target: NAVIGATION_TARGET,
                id,
                path = next.path(),
                found = next.handler().is_some(),
                "navigation end"
            );
        }
        self.current.insert(next)
    }

    fn push_back(&mut self, path: String) {
        if self.options.max_history == 0 {
            return;
        }
        self.back.push(path);
        if self.back.len() > self.options.max_history {
            let excess = self.back.len() - self.options.max_history;
            self.back.drain(..excess);
        }
    }
}

impl<H> RouterHandle<H> {
    pub fn current(&self) -> Option<&Navigation<H>> {
        self.current.as_ref()
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.back.len()
    }

    pub fn table(&self) -> &RouteTable<H> {
        &self.table
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context as LayerContext, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Collects the messages of events on the navigation target.
    #[derive(Clone, Default)]
    struct CapturedEvents(Arc<Mutex<Vec<String>>>);

    impl CapturedEvents {
        fn messages(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for CapturedEvents {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: LayerContext<'_, S>) {
            if event.metadata().target() != NAVIGATION_TARGET {
                return;
            }
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.0.lock().unwrap().push(visitor.0);
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestView {
        Home,
        Settings,
        Profile,
    }

    fn router(options: RouterOptions) -> RouterHandle<TestView> {
        let table = RouteTable::builder()
            .route("home", TestView::Home)
            .route("settings", TestView::Settings)
            .route("profile/:id", TestView::Profile)
            .redirect("", "/home")
            .build()
            .unwrap();
        register_routes(table, options)
    }

    #[test]
    fn test_router_navigation() {
        let mut router = router(RouterOptions::default());
        assert!(router.current().is_none());

        router.navigate("/home").unwrap();
        assert!(!router.can_go_back());

        router.navigate("/settings").unwrap();
        assert_eq!(router.current().unwrap().handler(), Some(&TestView::Settings));
        assert!(router.can_go_back());

        let nav = router.navigate("/profile/7").unwrap();
        assert_eq!(nav.param("id"), Some("7"));
        assert_eq!(router.history_len(), 2);

        let nav = router.back().unwrap().unwrap();
        assert_eq!(nav.path(), "/settings");
        assert!(router.can_go_forward());

        router.back().unwrap();
        assert_eq!(router.current().unwrap().path(), "/home");
        assert!(router.back().unwrap().is_none());

        let nav = router.forward().unwrap().unwrap();
        assert_eq!(nav.path(), "/settings");
        let nav = router.forward().unwrap().unwrap();
        assert_eq!(nav.param("id"), Some("7"));
        assert!(router.forward().unwrap().is_none());
    }

    #[test]
    fn test_redirect_is_followed() {
        let mut router = router(RouterOptions::default());
        let nav = router.navigate("/").unwrap();
        assert_eq!(nav.path(), "/home");
        assert_eq!(nav.handler(), Some(&TestView::Home));
    }

    #[test]
    fn test_unknown_path_commits_not_found() {
        let mut router = router(RouterOptions::default());
        router.navigate("/home").unwrap();
        let nav = router.navigate("/missing").unwrap();
        assert_eq!(
            nav,
            &Navigation::NotFound {
                path: "/missing".to_string()
            }
        );
        assert!(router.can_go_back());
    }

    #[test]
    fn test_equivalent_spellings_are_one_path() {
        let mut router = router(RouterOptions::default());
        router.navigate("/settings").unwrap();
        router.navigate("/settings/").unwrap();
        router.navigate("/settings?tab=2").unwrap();
        router.navigate("settings#top").unwrap();

        assert_eq!(router.history_len(), 0);
        assert_eq!(router.current().unwrap().path(), "/settings");

        let nav = router.navigate("/profile/7/").unwrap();
        assert_eq!(nav.path(), "/profile/7");
        assert_eq!(router.back().unwrap().unwrap().path(), "/settings");
    }

    #[test]
    fn test_router_no_duplicate_navigation() {
        let mut router = router(RouterOptions::default());
        router.navigate("/home").unwrap();
        router.navigate("/home").unwrap();
        router.navigate("/").unwrap();
        assert_eq!(router.history_len(), 0);
    }

    #[test]
    fn test_new_navigation_clears_forward_history() {
        let mut router = router(RouterOptions::default());
        router.navigate("/home").unwrap();
        router.navigate("/settings").unwrap();
        router.back().unwrap();
        assert!(router.can_go_forward());

        router.navigate("/profile/1").unwrap();
        assert!(!router.can_go_forward());
    }

    #[test]
    fn test_history_is_capped() {
        let mut router = router(RouterOptions {
            max_history: 2,
            ..RouterOptions::default()
        });
        for path in ["/home", "/settings", "/profile/1", "/profile/2", "/profile/3"] {
            router.navigate(path).unwrap();
        }
        assert_eq!(router.history_len(), 2);
        assert_eq!(router.back().unwrap().unwrap().path(), "/profile/2");
        assert_eq!(router.back().unwrap().unwrap().path(), "/profile/1");
        assert!(router.back().unwrap().is_none());
    }

    #[test]
    fn test_zero_history_disables_back() {
        let mut router = router(RouterOptions {
            max_history: 0,
            ..RouterOptions::default()
        });
        router.navigate("/home").unwrap();
        router.navigate("/settings").unwrap();
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_redirect_loop_leaves_state_untouched() {
        let table = RouteTable::builder()
            .route("home", TestView::Home)
            .redirect("", "/")
            .build()
            .unwrap();
        let mut router = register_routes(table, RouterOptions::default());
        router.navigate("/home").unwrap();

        let err = router.navigate("/").unwrap_err();
        assert!(matches!(err, Error::RedirectLoop { limit: 8, .. }));
        assert_eq!(router.current().unwrap().path(), "/home");
        assert_eq!(router.history_len(), 0);
    }

    fn captured_events(options: RouterOptions, paths: &[&str]) -> Vec<String> {
        let events = CapturedEvents::default();
        let subscriber = tracing_subscriber::registry().with(events.clone());
        tracing::subscriber::with_default(subscriber, || {
            let mut router = router(options);
            for path in paths {
                let _ = router.navigate(path);
            }
        });
        events.messages()
    }

    #[test]
    fn test_tracing_reports_every_navigation_step() {
        let traced = RouterOptions {
            tracing: true,
            ..RouterOptions::default()
        };
        assert_eq!(
            captured_events(traced.clone(), &["/"]),
            vec!["navigation start", "redirect", "route recognized", "navigation end"]
        );
        assert_eq!(
            captured_events(traced, &["/nope"]),
            vec!["navigation start", "no route matched", "navigation end"]
        );
    }

    #[test]
    fn test_tracing_off_emits_no_navigation_events() {
        let events = captured_events(RouterOptions::default(), &["/", "/profile/3", "/nope"]);
        assert!(events.is_empty(), "unexpected events: {events:?}");
    }

    #[test]
    fn test_failed_navigation_still_ends_its_trace() {
        let table = RouteTable::builder()
            .route("home", TestView::Home)
            .redirect("", "/")
            .build()
            .unwrap();
        let events = CapturedEvents::default();
        let subscriber = tracing_subscriber::registry().with(events.clone());
        tracing::subscriber::with_default(subscriber, || {
            let mut router = register_routes(
                table,
                RouterOptions {
                    tracing: true,
                    max_redirects: 2,
                    ..RouterOptions::default()
                },
            );
            assert!(router.navigate("/").is_err());
        });

        assert_eq!(
            events.messages(),
            vec!["navigation start", "redirect", "redirect", "redirect", "navigation end"]
        );
    }

    #[test]
    fn test_tracing_option_does_not_change_resolution() {
        let mut quiet = router(RouterOptions::default());
        let mut verbose = router(RouterOptions {
            tracing: true,
            ..RouterOptions::default()
        });
        assert!(verbose.options().tracing);

        for path in ["/", "/profile/9", "/nope"] {
            let a = quiet.navigate(path).unwrap().clone();
            let b = verbose.navigate(path).unwrap().clone();
            assert_eq!(a, b);
        }
    }
}
