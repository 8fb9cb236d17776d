use std::collections::BTreeMap;
use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use thiserror::Error;

/// Parameters captured while matching a path against a [`PathPattern`].
pub type Params = BTreeMap<String, String>;

/// Characters escaped when a parameter value is written back into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PatternError {
    #[error("path pattern must start with '/': {0:?}")]
    MissingLeadingSlash(String),

    #[error("path pattern contains an empty segment: {0:?}")]
    EmptySegment(String),

    #[error("parameter name cannot be empty in {0:?}")]
    EmptyParamName(String),

    #[error("parameter `{name}` appears more than once in {pattern:?}")]
    DuplicateParam { pattern: String, name: String },

    #[error("catch-all segment must be the last segment in {0:?}")]
    CatchAllNotLast(String),
}

//
// ─── PATTERN ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Literal(String),
    Param(String),
    CatchAll(String),
}

/// A route path such as `/`, `/auth`, `/files/:id` or `/docs/*rest`.
///
/// A single trailing slash is not significant: `/auth/` and `/auth` are the
/// same pattern and match the same paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parses a pattern.
    ///
    /// # Errors
    ///
    /// Returns `PatternError` when the pattern does not start with `/`, has an
    /// empty inner segment, an unnamed or repeated parameter, or a catch-all
    /// that is not the final segment.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let Some(rest) = raw.strip_prefix('/') else {
            return Err(PatternError::MissingLeadingSlash(raw.to_string()));
        };
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let mut segments = Vec::new();
        if !rest.is_empty() {
            let parts: Vec<&str> = rest.split('/').collect();
            let last = parts.len() - 1;
            for (idx, part) in parts.into_iter().enumerate() {
                let segment = if let Some(name) = part.strip_prefix(':') {
                    Segment::Param(param_name(raw, name)?)
                } else if let Some(name) = part.strip_prefix('*') {
                    if idx != last {
                        return Err(PatternError::CatchAllNotLast(raw.to_string()));
                    }
                    Segment::CatchAll(param_name(raw, name)?)
                } else if part.is_empty() {
                    return Err(PatternError::EmptySegment(raw.to_string()));
                } else {
                    Segment::Literal(part.to_string())
                };

                if let Some(name) = segment.param() {
                    if segments.iter().any(|s: &Segment| s.param() == Some(name)) {
                        return Err(PatternError::DuplicateParam {
                            pattern: raw.to_string(),
                            name: name.to_string(),
                        });
                    }
                }
                segments.push(segment);
            }
        }

        let canonical = if rest.is_empty() {
            "/".to_string()
        } else {
            format!("/{rest}")
        };
        Ok(Self {
            raw: canonical,
            segments,
        })
    }

    /// The canonical pattern text (no trailing slash, except for the root).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Names of the parameters this pattern captures, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::param)
    }

    /// Matches an app-relative path (no query, no fragment).
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts = split_path(path)?;
        let mut params = Params::new();

        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(literal) => {
                    let part = parts.get(idx)?;
                    if decode(part) != *literal {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let part = parts.get(idx).filter(|part| !part.is_empty())?;
                    params.insert(name.clone(), decode(part));
                }
                Segment::CatchAll(name) => {
                    let rest = parts
                        .get(idx..)
                        .unwrap_or_default()
                        .iter()
                        .map(|part| decode(part))
                        .collect::<Vec<_>>()
                        .join("/");
                    params.insert(name.clone(), rest);
                    return Some(params);
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(params)
    }

    /// Builds a concrete path from this pattern.
    ///
    /// # Errors
    ///
    /// Returns the name of the first parameter missing from `params`.
    pub fn format(&self, params: &Params) -> Result<String, String> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => {
                    path.push('/');
                    path.push_str(literal);
                }
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .filter(|value| !value.is_empty())
                        .ok_or_else(|| name.clone())?;
                    path.push('/');
                    path.extend(utf8_percent_encode(value, SEGMENT));
                }
                Segment::CatchAll(name) => {
                    let value = params.get(name).ok_or_else(|| name.clone())?;
                    for part in value.split('/').filter(|part| !part.is_empty()) {
                        path.push('/');
                        path.extend(utf8_percent_encode(part, SEGMENT));
                    }
                }
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Segment {
    fn param(&self) -> Option<&str> {
        match self {
            Segment::Param(name) | Segment::CatchAll(name) => Some(name),
            Segment::Literal(_) => None,
        }
    }
}

fn param_name(raw: &str, name: &str) -> Result<String, PatternError> {
    if name.is_empty() {
        return Err(PatternError::EmptyParamName(raw.to_string()));
    }
    Ok(name.to_string())
}

/// Segments of `path`, or `None` when it contains an empty segment.
///
/// One trailing slash is dropped unless it is all that is left, so `/auth/`
/// gives `["auth"]` while `//` and `/a//b` are rejected.
fn split_path(path: &str) -> Option<Vec<&str>> {
    let rest = path.strip_prefix('/').unwrap_or(path);
    if rest.is_empty() {
        return Some(Vec::new());
    }
    let rest = match rest.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => rest,
    };
    let parts: Vec<&str> = rest.split('/').collect();
    if parts.iter().any(|part| part.is_empty()) {
        return None;
    }
    Some(parts)
}

fn decode(part: &str) -> String {
    percent_decode_str(part).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_segments_never_match() {
        let root = PathPattern::parse("/").unwrap();
        assert_eq!(root.matches("//"), None);

        let docs = PathPattern::parse("/docs/*rest").unwrap();
        assert_eq!(docs.matches("/docs//a"), None);
        assert_eq!(docs.matches("/docs/a/"), Some(params(&[("rest", "a")])));

        let nested = PathPattern::parse("/a/b").unwrap();
        assert_eq!(nested.matches("/a//b"), None);
        assert_eq!(nested.matches("/a/b//"), None);
    }

    #[test]
    fn root_matches_only_root() {
        let root = PathPattern::parse("/").unwrap();
        assert_eq!(root.matches("/"), Some(Params::new()));
        assert_eq!(root.matches(""), Some(Params::new()));
        assert_eq!(root.matches("/login"), None);
    }

    #[test]
    fn literal_ignores_trailing_slash() {
        let auth = PathPattern::parse("/auth/").unwrap();
        assert_eq!(auth.as_str(), "/auth");
        assert!(auth.matches("/auth").is_some());
        assert!(auth.matches("/auth/").is_some());
        assert!(auth.matches("/Auth").is_none());
        assert!(auth.matches("/auth/extra").is_none());
    }

    #[test]
    fn param_captures_and_decodes_segment() {
        let file = PathPattern::parse("/files/:id").unwrap();
        assert_eq!(
            file.matches("/files/my%20notes"),
            Some(params(&[("id", "my notes")]))
        );
        assert_eq!(file.matches("/files"), None);
        assert_eq!(file.matches("/files//"), None);
    }

    #[test]
    fn catch_all_takes_remaining_segments() {
        let docs = PathPattern::parse("/docs/*rest").unwrap();
        assert_eq!(
            docs.matches("/docs/a/b/c"),
            Some(params(&[("rest", "a/b/c")]))
        );
        assert_eq!(docs.matches("/docs"), Some(params(&[("rest", "")])));
    }

    #[test]
    fn parse_rejects_malformed_patterns() {
        assert_eq!(
            PathPattern::parse("auth").unwrap_err(),
            PatternError::MissingLeadingSlash("auth".into())
        );
        assert_eq!(
            PathPattern::parse("/a//b").unwrap_err(),
            PatternError::EmptySegment("/a//b".into())
        );
        assert_eq!(
            PathPattern::parse("/files/:").unwrap_err(),
            PatternError::EmptyParamName("/files/:".into())
        );
        assert_eq!(
            PathPattern::parse("/*rest/tail").unwrap_err(),
            PatternError::CatchAllNotLast("/*rest/tail".into())
        );
        assert!(matches!(
            PathPattern::parse("/:id/:id").unwrap_err(),
            PatternError::DuplicateParam { .. }
        ));
    }

    #[test]
    fn format_fills_params_and_reports_missing() {
        let file = PathPattern::parse("/users/:user/files/:id").unwrap();
        let path = file
            .format(&params(&[("user", "ann"), ("id", "a b")]))
            .unwrap();
        assert_eq!(path, "/users/ann/files/a%20b");
        assert_eq!(file.format(&params(&[("user", "ann")])), Err("id".into()));

        let root = PathPattern::parse("/").unwrap();
        assert_eq!(root.format(&Params::new()).unwrap(), "/");
    }

    #[test]
    fn formatted_path_matches_its_pattern() {
        let pattern = PathPattern::parse("/share/:token/*rest").unwrap();
        let values = params(&[("token", "x/y?z"), ("rest", "deep/inside")]);
        let path = pattern.format(&values).unwrap();
        assert_eq!(pattern.matches(&path), Some(values));
    }
}
