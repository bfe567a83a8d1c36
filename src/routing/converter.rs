//! Typed path converters.
//!
//! A converter decides which text a route placeholder matches, how the
//! captured text is parsed into a [`PathValue`], and how a value is rendered
//! back into a path when reversing.
//!
//! | Name   | Matches                                  | Parses to        |
//! |--------|------------------------------------------|------------------|
//! | `int`  | `[0-9]+`                                 | `PathValue::Int` |
//! | `str`  | any non-empty segment without `/`        | `PathValue::Str` |
//! | `slug` | ASCII letters, digits, `-` and `_`       | `PathValue::Str` |
//! | `uuid` | lowercase hyphenated UUID                | `PathValue::Uuid`|
//! | `path` | any non-empty string, `/` included       | `PathValue::Str` |

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::error::ConverterError;

/// Captured arguments of a matched route, keyed by parameter name.
pub type PathKwargs = BTreeMap<String, PathValue>;

/// Kind of a route placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Converter {
    Int,
    Str,
    Slug,
    Uuid,
    Path,
}

impl Converter {
    /// Looks up a converter by the name used in route strings.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(Self::Int),
            "str" => Some(Self::Str),
            "slug" => Some(Self::Slug),
            "uuid" => Some(Self::Uuid),
            "path" => Some(Self::Path),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Str => "str",
            Self::Slug => "slug",
            Self::Uuid => "uuid",
            Self::Path => "path",
        }
    }

    /// Regex fragment (unanchored, without groups) matched by this converter.
    pub fn regex(&self) -> &'static str {
        match self {
            Self::Int => "[0-9]+",
            Self::Str => "[^/]+",
            Self::Slug => "[-a-zA-Z0-9_]+",
            Self::Uuid => "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}",
            Self::Path => ".+",
        }
    }

    /// Parses text already matched by [`Converter::regex`].
    ///
    /// # Errors
    ///
    /// Returns [`ConverterError::IntOutOfRange`] when an `int` capture does not
    /// fit in `u64`, and [`ConverterError::InvalidUuid`] when a `uuid` capture
    /// is rejected by the UUID parser.
    pub fn to_value(&self, raw: &str) -> Result<PathValue, ConverterError> {
        match self {
            Self::Int => raw
                .parse::<u64>()
                .map(PathValue::Int)
                .map_err(|_| ConverterError::IntOutOfRange(raw.to_string())),
            Self::Uuid => Uuid::parse_str(raw)
                .map(PathValue::Uuid)
                .map_err(|_| ConverterError::InvalidUuid(raw.to_string())),
            Self::Str | Self::Slug | Self::Path => Ok(PathValue::Str(raw.to_string())),
        }
    }

    /// Renders a value for use in a reversed path.
    ///
    /// The result is not checked here; the pattern verifies that the
    /// rendered candidate still matches before handing it out.
    pub fn to_url(&self, value: &PathValue) -> String {
        value.to_string()
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed value captured from, or substituted into, a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathValue {
    Int(u64),
    Str(String),
    Uuid(Uuid),
}

impl PathValue {
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Self::Uuid(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for PathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::Uuid(v) => write!(f, "{}", v.hyphenated()),
        }
    }
}

impl From<u64> for PathValue {
    fn from(v: u64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for PathValue {
    fn from(v: u32) -> Self {
        Self::Int(u64::from(v))
    }
}

impl From<&str> for PathValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for PathValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Uuid> for PathValue {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}
