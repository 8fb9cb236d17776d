use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::route::pattern::{Params, PathPattern, PatternError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Configuration errors raised while building a [`RouteTable`].
///
/// All of these are fatal: the application must not mount with a broken table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RouteTableError {
    #[error("route `{route}` has an invalid path: {source}")]
    InvalidPattern {
        route: String,
        #[source]
        source: PatternError,
    },

    #[error("route bound to {path:?} has an empty name")]
    EmptyName { path: String },

    #[error("route name `{0}` is declared more than once")]
    DuplicateName(String),

    #[error("path {path:?} is declared by both `{first}` and `{second}`")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    #[error("route `{route}` refers to view `{view}` which cannot be resolved")]
    UnresolvedView { route: String, view: ViewId },
}

//
// ─── VIEWS ─────────────────────────────────────────────────────────────────────
//

/// Opaque reference to a renderable view. The router never looks inside it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(&'static str);

impl ViewId {
    #[must_use]
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewId({})", self.0)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Answers whether a [`ViewId`] refers to a view that can actually be loaded.
pub trait ViewResolver {
    fn has_view(&self, view: ViewId) -> bool;
}

//
// ─── ENTRIES ───────────────────────────────────────────────────────────────────
//

/// Declarative input for one route, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    pub path: &'static str,
    pub name: &'static str,
    pub view: ViewId,
}

impl RouteDef {
    #[must_use]
    pub const fn new(path: &'static str, name: &'static str, view: ViewId) -> Self {
        Self { path, name, view }
    }
}

/// A validated binding from a path pattern to a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    path: PathPattern,
    name: String,
    view: ViewId,
}

impl RouteEntry {
    #[must_use]
    pub fn path(&self) -> &PathPattern {
        &self.path
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn view(&self) -> ViewId {
        self.view
    }
}

/// A route entry together with the parameters captured from the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    entry: RouteEntry,
    params: Params,
}

impl RouteMatch {
    #[must_use]
    pub fn entry(&self) -> &RouteEntry {
        &self.entry
    }

    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }
}

/// Outcome of matching a path. `NotFound` is a normal value, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(RouteMatch),
    NotFound,
}

impl Resolution {
    #[must_use]
    pub fn entry(&self) -> Option<&RouteEntry> {
        match self {
            Resolution::Matched(found) => Some(found.entry()),
            Resolution::NotFound => None,
        }
    }

    #[must_use]
    pub fn route_name(&self) -> Option<&str> {
        self.entry().map(RouteEntry::name)
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolution::NotFound)
    }
}

//
// ─── TABLE ─────────────────────────────────────────────────────────────────────
//

/// The fixed, ordered set of navigable locations. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Arc<[RouteEntry]>,
}

impl RouteTable {
    /// Validates `defs` and freezes them into a table, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `RouteTableError` on a malformed path, an empty or repeated
    /// name, a repeated path, or a view that `views` cannot resolve.
    pub fn new(
        defs: impl IntoIterator<Item = RouteDef>,
        views: &dyn ViewResolver,
    ) -> Result<Self, RouteTableError> {
        let mut entries: Vec<RouteEntry> = Vec::new();
        let mut names = HashSet::new();

        for def in defs {
            if def.name.trim().is_empty() {
                return Err(RouteTableError::EmptyName {
                    path: def.path.to_string(),
                });
            }
            let path =
                PathPattern::parse(def.path).map_err(|source| RouteTableError::InvalidPattern {
                    route: def.name.to_string(),
                    source,
                })?;
            if !names.insert(def.name) {
                return Err(RouteTableError::DuplicateName(def.name.to_string()));
            }
            if let Some(first) = entries.iter().find(|entry| entry.path == path) {
                return Err(RouteTableError::DuplicatePath {
                    path: path.to_string(),
                    first: first.name.clone(),
                    second: def.name.to_string(),
                });
            }
            if !views.has_view(def.view) {
                return Err(RouteTableError::UnresolvedView {
                    route: def.name.to_string(),
                    view: def.view,
                });
            }

            entries.push(RouteEntry {
                path,
                name: def.name.to_string(),
                view: def.view,
            });
        }

        Ok(Self {
            entries: entries.into(),
        })
    }

    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// First entry, in table order, whose pattern matches `path`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Resolution {
        self.entries
            .iter()
            .find_map(|entry| {
                entry.path.matches(path).map(|params| {
                    Resolution::Matched(RouteMatch {
                        entry: entry.clone(),
                        params,
                    })
                })
            })
            .unwrap_or(Resolution::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: ViewId = ViewId::new("home");
    const FILE: ViewId = ViewId::new("file");

    struct AnyView;

    impl ViewResolver for AnyView {
        fn has_view(&self, _view: ViewId) -> bool {
            true
        }
    }

    struct OnlyHome;

    impl ViewResolver for OnlyHome {
        fn has_view(&self, view: ViewId) -> bool {
            view == HOME
        }
    }

    #[test]
    fn table_keeps_declaration_order() {
        let table = RouteTable::new(
            [
                RouteDef::new("/", "Home", HOME),
                RouteDef::new("/files/:id", "File", FILE),
            ],
            &AnyView,
        )
        .unwrap();
        let names: Vec<_> = table.entries().iter().map(RouteEntry::name).collect();
        assert_eq!(names, ["Home", "File"]);
        assert_eq!(table.by_name("File").unwrap().path().as_str(), "/files/:id");
        assert!(table.by_name("Missing").is_none());
    }

    #[test]
    fn resolve_prefers_earlier_entry_on_overlap() {
        let table = RouteTable::new(
            [
                RouteDef::new("/files/new", "NewFile", HOME),
                RouteDef::new("/files/:id", "File", FILE),
            ],
            &AnyView,
        )
        .unwrap();
        assert_eq!(table.resolve("/files/new").route_name(), Some("NewFile"));

        let Resolution::Matched(found) = table.resolve("/files/42") else {
            panic!("expected a match");
        };
        assert_eq!(found.entry().name(), "File");
        assert_eq!(found.params().get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let err = RouteTable::new(
            [
                RouteDef::new("/", "Home", HOME),
                RouteDef::new("/home", "Home", HOME),
            ],
            &AnyView,
        )
        .unwrap_err();
        assert_eq!(err, RouteTableError::DuplicateName("Home".into()));
    }

    #[test]
    fn duplicate_path_is_rejected_even_with_trailing_slash() {
        let err = RouteTable::new(
            [
                RouteDef::new("/auth", "Auth", HOME),
                RouteDef::new("/auth/", "AuthAgain", HOME),
            ],
            &AnyView,
        )
        .unwrap_err();
        assert_eq!(
            err,
            RouteTableError::DuplicatePath {
                path: "/auth".into(),
                first: "Auth".into(),
                second: "AuthAgain".into(),
            }
        );
    }

    #[test]
    fn unresolved_view_is_rejected() {
        let err = RouteTable::new(
            [
                RouteDef::new("/", "Home", HOME),
                RouteDef::new("/file", "File", FILE),
            ],
            &OnlyHome,
        )
        .unwrap_err();
        assert_eq!(
            err,
            RouteTableError::UnresolvedView {
                route: "File".into(),
                view: FILE,
            }
        );
    }

    #[test]
    fn malformed_path_and_empty_name_are_rejected() {
        let err = RouteTable::new([RouteDef::new("login", "Login", HOME)], &AnyView).unwrap_err();
        assert!(matches!(err, RouteTableError::InvalidPattern { ref route, .. } if route == "Login"));

        let err = RouteTable::new([RouteDef::new("/x", " ", HOME)], &AnyView).unwrap_err();
        assert_eq!(err, RouteTableError::EmptyName { path: "/x".into() });
    }
}
