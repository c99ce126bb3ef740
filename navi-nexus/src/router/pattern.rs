//! Path patterns and request path splitting.
//!
//! A pattern is a `/`-separated list of segments. A segment written as
//! `:name` binds whatever single, non-empty segment sits at that position of
//! the request path; every other segment must match literally.
//!
//! Leading and trailing slashes are insignificant on both sides, so the
//! patterns `scenarios` and `/scenarios/` are the same, and `/`, the empty
//! string and `/?tab=1` are all the empty path.

use std::fmt;

use snafu::ensure;

use crate::error::{InvalidPatternSnafu, Result};

/// How much of a request path a pattern has to consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathMatch {
    /// Every segment of the path must be matched.
    #[default]
    Full,
    /// The pattern must match the leading segments; the rest is ignored.
    Prefix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern such as `scenario/:id`.
    pub fn parse(pattern: &str) -> Result<Self> {
        let source = pattern.trim_matches('/');
        let mut segments: Vec<Segment> = Vec::new();

        if !source.is_empty() {
            for raw in source.split('/') {
                ensure!(
                    !raw.is_empty(),
                    InvalidPatternSnafu { pattern, reason: "empty segment" }
                );

                match raw.strip_prefix(':') {
                    Some(name) => {
                        ensure!(
                            !name.is_empty(),
                            InvalidPatternSnafu { pattern, reason: "parameter without a name" }
                        );
                        let duplicate = segments
                            .iter()
                            .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                        ensure!(
                            !duplicate,
                            InvalidPatternSnafu {
                                pattern,
                                reason: format!("parameter ':{name}' appears twice"),
                            }
                        );
                        segments.push(Segment::Param(name.to_string()));
                    }
                    None => segments.push(Segment::Literal(raw.to_string())),
                }
            }
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The pattern as written, without surrounding slashes.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True for the empty pattern, which only the default rule uses.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Names of the parameters this pattern binds, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match already split path segments, binding parameters on success.
    pub fn matches(&self, segments: &[&str], mode: PathMatch) -> Option<Params> {
        let fits = match mode {
            PathMatch::Full => segments.len() == self.segments.len(),
            PathMatch::Prefix => segments.len() >= self.segments.len(),
        };
        if !fits {
            return None;
        }

        let mut params = Params::default();
        for (segment, part) in self.segments.iter().zip(segments) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Param(name) if !part.is_empty() => params.push(name, part),
                _ => return None,
            }
        }
        Some(params)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.source)
    }
}

/// Split a request path into segments.
///
/// Query string and fragment are dropped. Interior empty segments are kept
/// so that `/scenario//x` cannot match `scenario/:id`.
pub fn split_path(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

/// The spelling a path is committed under: one leading slash, no trailing
/// slash, no query string or fragment.
pub fn canonical_path(path: &str) -> String {
    format!("/{}", split_path(path).join("/"))
}

/// Parameters bound by a matched pattern.
///
/// Values are the raw path segments: nothing is percent-decoded or
/// validated, so `/scenario/a%20b` binds `a%20b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    fn push(&mut self, name: &str, value: &str) {
        self.0.push((name.to_string(), value.to_string()));
    }

    /// Value bound to `name`, if the pattern has such a parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_split_path_normalizes_slashes_query_and_fragment() {
        assert!(split_path("").is_empty());
        assert!(split_path("/").is_empty());
        assert!(split_path("/?tab=1").is_empty());
        assert_eq!(split_path("/scenarios/"), vec!["scenarios"]);
        assert_eq!(split_path("scenario/7#top"), vec!["scenario", "7"]);
        assert_eq!(split_path("/scenario//x"), vec!["scenario", "", "x"]);
    }

    #[test]
    fn test_canonical_path() {
        assert_eq!(canonical_path(""), "/");
        assert_eq!(canonical_path("/?tab=1"), "/");
        assert_eq!(canonical_path("scenarios/"), "/scenarios");
        assert_eq!(canonical_path("/scenarios?x=1#top"), "/scenarios");
        assert_eq!(canonical_path("/scenario//x/"), "/scenario//x");
    }

    #[test]
    fn test_literal_pattern_matches_exactly() {
        let pattern = PathPattern::parse("/settings").unwrap();
        assert_eq!(pattern.as_str(), "settings");

        let params = pattern.matches(&["settings"], PathMatch::Full).unwrap();
        assert!(params.is_empty());

        assert!(pattern.matches(&["settings", "extra"], PathMatch::Full).is_none());
        assert!(pattern.matches(&["setting"], PathMatch::Full).is_none());
        assert!(pattern.matches(&[], PathMatch::Full).is_none());
    }

    #[test]
    fn test_param_pattern_binds_single_segment() {
        let pattern = PathPattern::parse("scenario/:id").unwrap();
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["id"]);

        let params = pattern.matches(&["scenario", "42"], PathMatch::Full).unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.len(), 1);
        assert_eq!(params.to_string(), "id=42");

        assert!(pattern.matches(&["scenario"], PathMatch::Full).is_none());
        assert!(pattern.matches(&["scenario", ""], PathMatch::Full).is_none());
        assert!(pattern.matches(&["scenario", "1", "2"], PathMatch::Full).is_none());
        assert!(pattern.matches(&["scenario-new"], PathMatch::Full).is_none());
    }

    #[test]
    fn test_prefix_mode_ignores_trailing_segments() {
        let pattern = PathPattern::parse("docs").unwrap();
        assert!(pattern.matches(&["docs", "guide", "intro"], PathMatch::Prefix).is_some());
        assert!(pattern.matches(&["doc"], PathMatch::Prefix).is_none());
    }

    #[test]
    fn test_empty_pattern_matches_only_empty_path_in_full_mode() {
        let pattern = PathPattern::parse("").unwrap();
        assert!(pattern.is_empty());
        assert_eq!(pattern.to_string(), "/");
        assert!(pattern.matches(&[], PathMatch::Full).is_some());
        assert!(pattern.matches(&["scenarios"], PathMatch::Full).is_none());
    }

    #[test]
    fn test_rejects_malformed_patterns() {
        for bad in ["a//b", "scenario/:", "pair/:id/:id"] {
            match PathPattern::parse(bad) {
                Err(Error::InvalidPattern { pattern, .. }) => assert_eq!(pattern, bad),
                other => panic!("expected InvalidPattern for {bad:?}, got {other:?}"),
            }
        }
    }
}
