use portal_core::{RouteDef, RouteTable, RouteTableError};

use crate::views::{AUTH, FILE_UPLOAD, HOME, LOGIN, ViewCatalog};

pub const LOGIN_ROUTE: &str = "Login";
pub const HOME_ROUTE: &str = "Home";
pub const AUTH_ROUTE: &str = "Auth";
pub const FILE_UPLOAD_ROUTE: &str = "FileUpload";

#[rustfmt::skip]
pub const ROUTES: [RouteDef; 4] = [
    RouteDef::new("/login",      LOGIN_ROUTE,       LOGIN),
    RouteDef::new("/",           HOME_ROUTE,        HOME),
    RouteDef::new("/auth",       AUTH_ROUTE,        AUTH),
    RouteDef::new("/fileupload", FILE_UPLOAD_ROUTE, FILE_UPLOAD),
];

/// The application's route table, checked against the view catalog.
///
/// # Errors
///
/// Returns `RouteTableError` if any route is malformed or names a view the
/// catalog does not contain.
pub fn build() -> Result<RouteTable, RouteTableError> {
    RouteTable::new(ROUTES, &ViewCatalog)
}

#[cfg(test)]
mod tests {
    use portal_core::{BasePath, HistoryMode, NavigationController};

    use super::*;

    #[test]
    fn table_builds_with_every_route_resolvable() {
        let table = build().unwrap();
        assert_eq!(table.len(), 4);
        for def in ROUTES {
            assert_eq!(table.resolve(def.path).route_name(), Some(def.name));
        }
    }

    #[test]
    fn route_surface_scenario() {
        let nav =
            NavigationController::create(build().unwrap(), HistoryMode::Memory, BasePath::root());
        assert_eq!(nav.resolve("/").route_name(), Some(HOME_ROUTE));
        assert!(nav.resolve("/unknown").is_not_found());

        nav.navigate(LOGIN_ROUTE).unwrap();
        assert_eq!(nav.state().path(), "/login");
    }
}
