use std::fmt;

/// Deployment prefix the application is served under, e.g. `/portal`.
///
/// The root deployment is stored as an empty prefix so joining never
/// produces a double slash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    /// Normalises `raw`: surrounding whitespace and slashes are dropped and a
    /// single leading slash is added back. `""` and `"/"` mean the root.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            Self(String::new())
        } else {
            Self(format!("/{trimmed}"))
        }
    }

    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The prefix as written in URLs; `/` for the root deployment.
    #[must_use]
    pub fn as_str(&self) -> &str {
        if self.0.is_empty() { "/" } else { self.0.as_str() }
    }

    /// Prepends the prefix to an app-relative URL.
    #[must_use]
    pub fn join(&self, app_url: &str) -> String {
        if app_url.starts_with('/') {
            format!("{}{app_url}", self.0)
        } else {
            format!("{}/{app_url}", self.0)
        }
    }

    /// Removes the prefix from a full URL. `None` when the URL lies outside it.
    #[must_use]
    pub fn strip(&self, url: &str) -> Option<String> {
        if self.0.is_empty() {
            return Some(if url.starts_with('/') {
                url.to_string()
            } else {
                format!("/{url}")
            });
        }

        let rest = url.strip_prefix(&self.0)?;
        if rest.starts_with('/') {
            Some(rest.to_string())
        } else if rest.is_empty() || rest.starts_with('?') || rest.starts_with('#') {
            Some(format!("/{rest}"))
        } else {
            // `/portalx` is not under `/portal`.
            None
        }
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An app-relative URL split into path, query and fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Location {
    #[must_use]
    pub fn parse(url: &str) -> Self {
        let (rest, fragment) = match url.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (url, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        Self {
            path,
            query,
            fragment,
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}
