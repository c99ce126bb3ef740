//! Ordered route table.
//!
//! The table is built once, checked, and then only read. Resolution is a
//! linear scan in declaration order and the first structural match wins, so
//! specific routes must be declared before anything that could shadow them.
//!
//! A table must end with exactly one default rule: a redirect on the empty
//! path. Being last, it can never shadow a real route.

use std::fmt;

use snafu::ensure;

use super::pattern::{split_path, Params, PathMatch, PathPattern};
use crate::error::{
    DefaultRuleNotLastSnafu, DefaultRuleNotRedirectSnafu, DuplicateDefaultRuleSnafu,
    InvalidPatternSnafu, InvalidRedirectSnafu, MissingDefaultRuleSnafu, Result,
};

/// What a matched route does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget<H> {
    /// Activate the handler identified by `H`.
    Handler(H),
    /// Ask the engine to navigate to another absolute path instead.
    Redirect(String),
}

/// One entry of a [`RouteTable`].
#[derive(Debug, Clone)]
pub struct Route<H> {
    pattern: PathPattern,
    target: RouteTarget<H>,
    path_match: PathMatch,
}

impl<H> Route<H> {
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn target(&self) -> &RouteTarget<H> {
        &self.target
    }

    pub fn path_match(&self) -> PathMatch {
        self.path_match
    }

    /// The empty-path entry that every table ends with.
    pub fn is_default_rule(&self) -> bool {
        self.pattern.is_empty()
    }
}

impl<H: fmt::Debug> fmt::Display for Route<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)?;
        if self.path_match == PathMatch::Prefix {
            f.write_str("/**")?;
        }
        match &self.target {
            RouteTarget::Handler(handler) => write!(f, " -> {handler:?}"),
            RouteTarget::Redirect(to) => write!(f, " => redirect {to}"),
        }
    }
}

/// Outcome of resolving one path against the table.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<'a, H> {
    Activate { handler: &'a H, params: Params },
    Redirect { to: &'a str },
    NoMatch,
}

/// Immutable, ordered collection of routes.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
}

impl<H> RouteTable<H> {
    pub fn builder() -> RouteTableBuilder<H> {
        RouteTableBuilder::new()
    }

    /// Resolve a request path. Pure: the same path always resolves the same way.
    pub fn resolve(&self, path: &str) -> Resolution<'_, H> {
        let segments = split_path(path);
        for route in &self.routes {
            if let Some(params) = route.pattern.matches(&segments, route.path_match) {
                return match &route.target {
                    RouteTarget::Handler(handler) => Resolution::Activate { handler, params },
                    RouteTarget::Redirect(to) => Resolution::Redirect { to },
                };
            }
        }
        Resolution::NoMatch
    }

    pub fn routes(&self) -> &[Route<H>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Collects route declarations and validates them in [`build`](Self::build).
#[derive(Debug)]
pub struct RouteTableBuilder<H> {
    entries: Vec<(String, RouteTarget<H>, PathMatch)>,
}

impl<H> RouteTableBuilder<H> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add a route that activates `handler` when the whole path matches.
    pub fn route(mut self, pattern: impl Into<String>, handler: H) -> Self {
        self.entries
            .push((pattern.into(), RouteTarget::Handler(handler), PathMatch::Full));
        self
    }

    /// Add a route that activates `handler` for the pattern and anything below it.
    pub fn route_prefix(mut self, pattern: impl Into<String>, handler: H) -> Self {
        self.entries
            .push((pattern.into(), RouteTarget::Handler(handler), PathMatch::Prefix));
        self
    }

    /// Add a redirect. With an empty pattern this is the default rule.
    pub fn redirect(mut self, pattern: impl Into<String>, to: impl Into<String>) -> Self {
        self.entries
            .push((pattern.into(), RouteTarget::Redirect(to.into()), PathMatch::Full));
        self
    }

    pub fn build(self) -> Result<RouteTable<H>> {
        let total = self.entries.len();
        let mut routes = Vec::with_capacity(total);

        for (raw, target, path_match) in self.entries {
            let pattern = PathPattern::parse(&raw)?;
            ensure!(
                !(pattern.is_empty() && path_match == PathMatch::Prefix),
                InvalidPatternSnafu {
                    pattern: raw.as_str(),
                    reason: "the empty pattern must match the full path",
                }
            );
            if let RouteTarget::Redirect(to) = &target {
                ensure!(to.starts_with('/'), InvalidRedirectSnafu { target: to.as_str() });
            }
            routes.push(Route {
                pattern,
                target,
                path_match,
            });
        }

        let defaults: Vec<usize> = routes
            .iter()
            .enumerate()
            .filter(|(_, route)| route.is_default_rule())
            .map(|(index, _)| index)
            .collect();

        match defaults.as_slice() {
            [] => return MissingDefaultRuleSnafu.fail(),
            [position] => {
                ensure!(
                    *position + 1 == total,
                    DefaultRuleNotLastSnafu {
                        position: *position + 1,
                        total,
                    }
                );
                ensure!(
                    matches!(routes[*position].target, RouteTarget::Redirect(_)),
                    DefaultRuleNotRedirectSnafu
                );
            }
            many => {
                return DuplicateDefaultRuleSnafu { count: many.len() }.fail();
            }
        }

        Ok(RouteTable { routes })
    }
}

impl<H> Default for RouteTableBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}
