//! Route strings in path-converter syntax.
//!
//! A route is literal text interleaved with placeholders:
//!
//! - `<name>` captures with the `str` converter
//! - `<converter:name>` captures with the named [`Converter`]
//!
//! ```text
//! <int:year>/<int:month>/<int:day>/<int:pk>-<slug:slug>/
//! ```
//!
//! Routes never start with `/`; the resolver strips the leading slash of the
//! request path before matching.

use std::collections::HashSet;
use std::fmt;

use regex::{Regex, RegexBuilder};

use super::converter::{Converter, PathKwargs};
use super::error::PatternError;

/// Maximum allowed length for a route string in bytes.
const MAX_ROUTE_LENGTH: usize = 1024;

/// Maximum allowed size for a compiled route regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// One piece of a parsed route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param { name: String, converter: Converter },
}

/// A compiled route.
///
/// Endpoint patterns must consume the whole path. Prefix patterns, used for
/// included route tables, match the beginning of a path and hand back the
/// rest.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    route: String,
    regex: Regex,
    segments: Vec<Segment>,
    endpoint: bool,
}

impl RoutePattern {
    /// Parses and compiles a route string.
    ///
    /// # Errors
    ///
    /// - [`PatternError::TooLong`] if the route exceeds 1024 bytes
    /// - [`PatternError::UnbalancedBracket`] for a stray `<` or `>`
    /// - [`PatternError::UnknownConverter`] for a converter name other than
    ///   `int`, `str`, `slug`, `uuid` or `path`
    /// - [`PatternError::InvalidParameterName`] if a name is not an identifier
    /// - [`PatternError::DuplicateParameter`] if a name appears twice
    pub fn parse(route: &str, endpoint: bool) -> Result<Self, PatternError> {
        if route.len() > MAX_ROUTE_LENGTH {
            return Err(PatternError::TooLong {
                len: route.len(),
                max: MAX_ROUTE_LENGTH,
            });
        }

        let segments = parse_segments(route)?;

        let mut regex_str = String::from("^");
        for segment in &segments {
            match segment {
                Segment::Literal(text) => regex_str.push_str(&regex::escape(text)),
                Segment::Param { name, converter } => {
                    regex_str.push_str(&format!("(?P<{}>{})", name, converter.regex()));
                }
            }
        }
        if endpoint {
            regex_str.push_str(r"\z");
        }

        let regex = RegexBuilder::new(&regex_str)
            .size_limit(MAX_REGEX_SIZE)
            .build()
            .map_err(|e| PatternError::Regex {
                route: route.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            route: route.to_string(),
            regex,
            segments,
            endpoint,
        })
    }

    /// Compiles `self.route() + route` as a new pattern.
    ///
    /// Used to build the full route of an entry nested under include prefixes.
    pub fn join(&self, route: &str, endpoint: bool) -> Result<Self, PatternError> {
        Self::parse(&format!("{}{}", self.route, route), endpoint)
    }

    /// Returns the original route string.
    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_endpoint(&self) -> bool {
        self.endpoint
    }

    /// Parameter names with their converters, in route order.
    pub fn params(&self) -> impl Iterator<Item = (&str, Converter)> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param { name, converter } => Some((name.as_str(), *converter)),
            Segment::Literal(_) => None,
        })
    }

    /// Matches `path` (without its leading `/`).
    ///
    /// Returns the unconsumed remainder (always empty for endpoint patterns)
    /// and the converted arguments. A capture its converter rejects makes the
    /// whole pattern not match.
    pub fn match_path<'p>(&self, path: &'p str) -> Option<(&'p str, PathKwargs)> {
        let caps = self.regex.captures(path)?;

        let mut kwargs = PathKwargs::new();
        for (name, converter) in self.params() {
            let raw = caps.name(name)?.as_str();
            match converter.to_value(raw) {
                Ok(value) => {
                    kwargs.insert(name.to_string(), value);
                }
                Err(e) => {
                    tracing::debug!(route = %self.route, param = name, "Capture rejected: {}", e);
                    return None;
                }
            }
        }

        let end = caps.get(0)?.end();
        Some((&path[end..], kwargs))
    }

    /// Returns true if the pattern matches the whole of `path`.
    pub fn is_match(&self, path: &str) -> bool {
        self.match_path(path)
            .is_some_and(|(remaining, _)| remaining.is_empty())
    }

    /// Builds a path (without leading `/`) from arguments.
    ///
    /// Returns `None` unless `kwargs` names exactly this pattern's parameters
    /// and the rendered candidate is matched by the pattern again.
    pub fn reverse(&self, kwargs: &PathKwargs) -> Option<String> {
        if kwargs.len() != self.params().count() {
            return None;
        }

        let mut candidate = String::with_capacity(self.route.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => candidate.push_str(text),
                Segment::Param { name, converter } => {
                    let value = kwargs.get(name)?;
                    candidate.push_str(&converter.to_url(value));
                }
            }
        }

        self.is_match(&candidate).then_some(candidate)
    }
}

impl PartialEq for RoutePattern {
    fn eq(&self, other: &Self) -> bool {
        self.route == other.route && self.endpoint == other.endpoint
    }
}

impl Eq for RoutePattern {}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.route)
    }
}

fn parse_segments(route: &str) -> Result<Vec<Segment>, PatternError> {
    let unbalanced = || PatternError::UnbalancedBracket {
        route: route.to_string(),
    };

    let mut segments = Vec::new();
    let mut seen = HashSet::new();
    let mut rest = route;

    while !rest.is_empty() {
        let Some(open) = rest.find(['<', '>']) else {
            segments.push(Segment::Literal(rest.to_string()));
            break;
        };
        if rest.as_bytes()[open] == b'>' {
            return Err(unbalanced());
        }
        if open > 0 {
            segments.push(Segment::Literal(rest[..open].to_string()));
        }

        let after = &rest[open + 1..];
        let close = after.find('>').ok_or_else(unbalanced)?;
        let body = &after[..close];
        if body.contains('<') {
            return Err(unbalanced());
        }

        let (converter_name, name) = body.split_once(':').unwrap_or(("str", body));
        let converter =
            Converter::from_name(converter_name).ok_or_else(|| PatternError::UnknownConverter {
                route: route.to_string(),
                converter: converter_name.to_string(),
            })?;
        if !is_identifier(name) {
            return Err(PatternError::InvalidParameterName {
                route: route.to_string(),
                name: name.to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(PatternError::DuplicateParameter {
                route: route.to_string(),
                name: name.to_string(),
            });
        }

        segments.push(Segment::Param {
            name: name.to_string(),
            converter,
        });
        rest = &after[close + 1..];
    }

    Ok(segments)
}

/// ASCII identifier: a letter or `_`, then letters, digits or `_`.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::converter::PathValue;

    const ENTRY_ROUTE: &str = "<int:year>/<int:month>/<int:day>/<int:pk>-<slug:slug>/";

    fn kwargs(pairs: &[(&str, PathValue)]) -> PathKwargs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_parse_segments_of_entry_route() {
        let pattern = RoutePattern::parse(ENTRY_ROUTE, true).unwrap();
        let params: Vec<_> = pattern.params().collect();

        assert_eq!(
            params,
            vec![
                ("year", Converter::Int),
                ("month", Converter::Int),
                ("day", Converter::Int),
                ("pk", Converter::Int),
                ("slug", Converter::Slug),
            ]
        );
        assert_eq!(pattern.segments().len(), 10);
        assert_eq!(pattern.route(), ENTRY_ROUTE);
    }

    #[test]
    fn test_default_converter_is_str() {
        let pattern = RoutePattern::parse("tags/<tag>/", true).unwrap();
        assert_eq!(pattern.params().collect::<Vec<_>>(), vec![("tag", Converter::Str)]);
    }

    #[test]
    fn test_match_entry_route() {
        let pattern = RoutePattern::parse(ENTRY_ROUTE, true).unwrap();
        let (remaining, kw) = pattern.match_path("2024/3/15/42-hello-world/").unwrap();

        assert_eq!(remaining, "");
        assert_eq!(kw["year"], PathValue::Int(2024));
        assert_eq!(kw["month"], PathValue::Int(3));
        assert_eq!(kw["day"], PathValue::Int(15));
        assert_eq!(kw["pk"], PathValue::Int(42));
        assert_eq!(kw["slug"], PathValue::from("hello-world"));
    }

    #[test]
    fn test_pk_slug_split_at_first_hyphen() {
        let pattern = RoutePattern::parse(ENTRY_ROUTE, true).unwrap();
        let (_, kw) = pattern.match_path("2024/1/1/12-3-part-two/").unwrap();

        assert_eq!(kw["pk"], PathValue::Int(12));
        assert_eq!(kw["slug"], PathValue::from("3-part-two"));
    }

    #[test]
    fn test_entry_route_rejects_malformed_paths() {
        let pattern = RoutePattern::parse(ENTRY_ROUTE, true).unwrap();

        for path in [
            "2024/3/15/42-hello-world",
            "2024/3/15/hello-world/",
            "2024/3/42-hello-world/",
            "twenty/3/15/42-hello-world/",
            "2024/march/15/42-hello-world/",
            "2024/3/fifteen/42-hello-world/",
            "2024/3/15/x42-hello-world/",
            "2024/3/15/42-/",
            "2024/3/15/42-hello world/",
            "2024/3/15/42-hello-world/extra/",
            "-2024/3/15/42-hello-world/",
            "",
        ] {
            assert!(pattern.match_path(path).is_none(), "{path} should not match");
        }
    }

    #[test]
    fn test_int_overflow_does_not_match() {
        let pattern = RoutePattern::parse("<int:pk>/", true).unwrap();
        assert!(pattern.match_path("123456789012345678901234567890/").is_none());
    }

    #[test]
    fn test_prefix_pattern_returns_remainder() {
        let pattern = RoutePattern::parse("blog/", false).unwrap();
        let (remaining, kw) = pattern.match_path("blog/2024/1/1/1-a/").unwrap();

        assert_eq!(remaining, "2024/1/1/1-a/");
        assert!(kw.is_empty());
        assert!(pattern.match_path("news/2024/").is_none());
    }

    #[test]
    fn test_literal_regex_chars_are_escaped() {
        let pattern = RoutePattern::parse("v1.0/feed+rss/", true).unwrap();
        assert!(pattern.is_match("v1.0/feed+rss/"));
        assert!(!pattern.is_match("v1x0/feed+rss/"));
        assert!(!pattern.is_match("v1.0/feeddrss/"));
    }

    #[test]
    fn test_path_converter_spans_slashes() {
        let pattern = RoutePattern::parse("files/<path:rest>", true).unwrap();
        let (_, kw) = pattern.match_path("files/a/b/c.txt").unwrap();
        assert_eq!(kw["rest"], PathValue::from("a/b/c.txt"));
    }

    #[test]
    fn test_reverse_entry_route() {
        let pattern = RoutePattern::parse(ENTRY_ROUTE, true).unwrap();
        let kw = kwargs(&[
            ("year", 2024u64.into()),
            ("month", 3u64.into()),
            ("day", 15u64.into()),
            ("pk", 42u64.into()),
            ("slug", "hello-world".into()),
        ]);

        assert_eq!(
            pattern.reverse(&kw),
            Some("2024/3/15/42-hello-world/".to_string())
        );
    }

    #[test]
    fn test_reverse_accepts_numeric_text_for_int() {
        let pattern = RoutePattern::parse("<int:pk>/", true).unwrap();
        assert_eq!(
            pattern.reverse(&kwargs(&[("pk", "17".into())])),
            Some("17/".to_string())
        );
    }

    #[test]
    fn test_reverse_rejects_value_outside_converter() {
        let pattern = RoutePattern::parse("<int:pk>-<slug:slug>/", true).unwrap();

        let bad_int = kwargs(&[("pk", "abc".into()), ("slug", "ok".into())]);
        assert_eq!(pattern.reverse(&bad_int), None);

        let bad_slug = kwargs(&[("pk", 1u64.into()), ("slug", "not a slug".into())]);
        assert_eq!(pattern.reverse(&bad_slug), None);
    }

    #[test]
    fn test_reverse_requires_exact_parameter_set() {
        let pattern = RoutePattern::parse("<int:pk>/", true).unwrap();

        assert_eq!(pattern.reverse(&PathKwargs::new()), None);
        assert_eq!(
            pattern.reverse(&kwargs(&[("pk", 1u64.into()), ("extra", "x".into())])),
            None
        );
        assert_eq!(pattern.reverse(&kwargs(&[("id", 1u64.into())])), None);
    }

    #[test]
    fn test_join_builds_full_route() {
        let prefix = RoutePattern::parse("blog/", false).unwrap();
        let full = prefix.join(ENTRY_ROUTE, true).unwrap();

        assert_eq!(full.route(), format!("blog/{ENTRY_ROUTE}"));
        assert!(full.is_endpoint());
        assert!(full.is_match("blog/2024/3/15/42-hello-world/"));
    }

    #[test]
    fn test_unknown_converter_is_rejected() {
        let err = RoutePattern::parse("<float:score>/", true).unwrap_err();
        assert_eq!(
            err,
            PatternError::UnknownConverter {
                route: "<float:score>/".to_string(),
                converter: "float".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_parameter_names_are_rejected() {
        for route in ["<int:2pk>/", "<int:>/", "<int:my-id>/", "<int:a b>/"] {
            let err = RoutePattern::parse(route, true).unwrap_err();
            assert!(
                matches!(err, PatternError::InvalidParameterName { .. }),
                "{route}: {err:?}"
            );
        }
    }

    #[test]
    fn test_duplicate_parameter_is_rejected() {
        let err = RoutePattern::parse("<int:id>/<slug:id>/", true).unwrap_err();
        assert!(matches!(err, PatternError::DuplicateParameter { .. }));
    }

    #[test]
    fn test_unbalanced_brackets_are_rejected() {
        for route in ["<int:pk/", "pk>/", "<<int:pk>/", "a<b<c>>/"] {
            let err = RoutePattern::parse(route, true).unwrap_err();
            assert!(
                matches!(err, PatternError::UnbalancedBracket { .. }),
                "{route}: {err:?}"
            );
        }
    }

    #[test]
    fn test_route_length_limit() {
        let long_route = "a".repeat(MAX_ROUTE_LENGTH + 1);
        let err = RoutePattern::parse(&long_route, true).unwrap_err();
        assert!(matches!(err, PatternError::TooLong { .. }));
    }

    #[test]
    fn test_pattern_display_and_equality() {
        let p1 = RoutePattern::parse("<int:pk>/", true).unwrap();
        let p2 = RoutePattern::parse("<int:pk>/", true).unwrap();
        let p3 = RoutePattern::parse("<int:pk>/", false).unwrap();

        assert_eq!(format!("{p1}"), "<int:pk>/");
        assert_eq!(p1, p2);
        assert_ne!(p1, p3);
    }
}
