use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to lock mutex: poisoned"))]
    LockPoisoned,

    #[snafu(display("Invalid route pattern '{pattern}': {reason}"))]
    InvalidPattern { pattern: String, reason: String },

    #[snafu(display("Invalid redirect target '{target}': must be an absolute path"))]
    InvalidRedirect { target: String },

    #[snafu(display("Route table has no default rule (a redirect on the empty path)"))]
    MissingDefaultRule,

    #[snafu(display("Route table has {count} default rules, expected exactly one"))]
    DuplicateDefaultRule { count: usize },

    #[snafu(display("Default rule must be the last route, found at position {position} of {total}"))]
    DefaultRuleNotLast { position: usize, total: usize },

    #[snafu(display("Default rule must redirect instead of activating a handler"))]
    DefaultRuleNotRedirect,

    #[snafu(display("Navigation to '{path}' exceeded {limit} redirects"))]
    RedirectLoop { path: String, limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
