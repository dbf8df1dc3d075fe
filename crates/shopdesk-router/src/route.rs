//! Route patterns and the ordered route registry.

use std::fmt;

use serde::Serialize;

/// Errors raised while parsing a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("route pattern must start with '/': {0}")]
    MissingLeadingSlash(String),

    #[error("parameter segment without a name in {0}")]
    EmptyParam(String),

    #[error("catch-all must be the last segment in {0}")]
    CatchAllNotLast(String),
}

/// Result type for route operations.
pub type RouteResult<T> = Result<T, RouteError>;

/// One segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, compared case-sensitively.
    Static(String),
    /// `:name`, captures exactly one segment.
    Param(String),
    /// `*name` (or bare `*`), captures the remaining segments, possibly none.
    CatchAll(String),
}

/// Default capture name for a bare `*`.
pub const CATCH_ALL_PARAM: &str = "pathMatch";

/// A parsed route pattern such as `/dashboard/users/edit/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern.
    pub fn parse(pattern: &str) -> RouteResult<Self> {
        if !pattern.starts_with('/') {
            return Err(RouteError::MissingLeadingSlash(pattern.to_string()));
        }

        let parts: Vec<&str> = split_path(pattern).collect();
        let mut segments = Vec::with_capacity(parts.len());
        for (index, part) in parts.iter().enumerate() {
            let segment = if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(RouteError::EmptyParam(pattern.to_string()));
                }
                Segment::Param(name.to_string())
            } else if let Some(name) = part.strip_prefix('*') {
                if index + 1 != parts.len() {
                    return Err(RouteError::CatchAllNotLast(pattern.to_string()));
                }
                let name = if name.is_empty() { CATCH_ALL_PARAM } else { name };
                Segment::CatchAll(name.to_string())
            } else {
                Segment::Static(part.to_string())
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether this pattern ends in a catch-all.
    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::CatchAll(_)))
    }

    /// Match a concrete path, returning captured parameters on success.
    ///
    /// Query strings, fragments, empty segments and trailing slashes in
    /// `path` are ignored.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let parts: Vec<&str> = split_path(strip_suffixes(path)).collect();
        let mut params = RouteParams::default();

        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::CatchAll(name) => {
                    params.insert(name, parts.get(index..).unwrap_or_default().join("/"));
                    return Some(params);
                }
                Segment::Static(text) => {
                    if parts.get(index) != Some(&text.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = parts.get(index)?;
                    params.insert(name, (*value).to_string());
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(params)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn strip_suffixes(path: &str) -> &str {
    let end = path.find(&['?', '#'][..]).unwrap_or(path.len());
    &path[..end]
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Parameters captured from a path, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteParams(Vec<(String, String)>);

impl RouteParams {
    fn insert(&mut self, name: &str, value: String) {
        self.0.push((name.to_string(), value));
    }

    /// Value captured for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Route metadata for a registered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteMeta {
    /// Pattern the page was registered under.
    pub path: &'static str,
    /// Human-readable page name.
    pub name: &'static str,
}

/// A pattern bound to a page value.
#[derive(Debug, Clone)]
pub struct RouteEntry<P> {
    pub pattern: RoutePattern,
    pub page: P,
}

/// Result of resolving a path.
#[derive(Debug)]
pub struct RouteMatch<'a, P> {
    pub entry: &'a RouteEntry<P>,
    pub params: RouteParams,
}

impl<'a, P> RouteMatch<'a, P> {
    /// The matched page.
    pub fn page(&self) -> &'a P {
        &self.entry.page
    }
}

/// Ordered list of routes; the first match wins.
#[derive(Debug, Clone)]
pub struct RouteRegistry<P> {
    entries: Vec<RouteEntry<P>>,
}

impl<P> Default for RouteRegistry<P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<P> RouteRegistry<P> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. Routes registered earlier take precedence.
    pub fn register(&mut self, pattern: &str, page: P) -> RouteResult<&mut Self> {
        let pattern = RoutePattern::parse(pattern)?;
        tracing::trace!(pattern = %pattern, "registered route");
        self.entries.push(RouteEntry { pattern, page });
        Ok(self)
    }

    /// Find the first route matching `path`.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_, P>> {
        self.entries.iter().find_map(|entry| {
            entry
                .pattern
                .matches(path)
                .map(|params| RouteMatch { entry, params })
        })
    }

    /// Registered routes in precedence order.
    pub fn entries(&self) -> &[RouteEntry<P>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
