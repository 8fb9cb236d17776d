use std::sync::Arc;

use dioxus::prelude::*;
use portal_core::{
    BasePath, Dependencies, HistoryMode, HostDocument, MountedApp, NavigationController, Shell,
};
use thiserror::Error;

use crate::outlet::{AddressBar, NavLink, RouterOutlet};
use crate::routes::{self, AUTH_ROUTE, FILE_UPLOAD_ROUTE, HOME_ROUTE, LOGIN_ROUTE};
use crate::toolkit::UiToolkit;

/// The root view type handed to the shell.
pub type RootComponent = fn() -> Element;

/// The single element the application is mounted on.
pub const MOUNT_POINT: &str = "#app";

/// Failures raised while rendering, shown by the frame's error boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UiError {
    #[error("no UI toolkit was injected into the shell")]
    MissingToolkit,
}

/// Builds the route table and navigation controller, then starts the shell
/// with the UI toolkit as the shared dependency.
///
/// # Errors
///
/// A broken route table or an already-used mount point; either way the
/// application must not be launched.
pub fn start(
    mode: HistoryMode,
    base_path: BasePath,
    host: &HostDocument,
) -> Result<MountedApp<RootComponent>, portal_core::Error> {
    let table = routes::build()?;
    let router = NavigationController::create(table, mode, base_path);
    let deps = Dependencies {
        ui: Arc::new(UiToolkit::new()),
    };
    let root: RootComponent = App;
    Ok(Shell::start(root, deps, router, host.target(MOUNT_POINT))?)
}

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Portal" }
        AppFrame {}
    }
}

/// Everything below the document head: navigation bar and routed content.
#[component]
pub fn AppFrame() -> Element {
    let mounted = use_context::<MountedApp<RootComponent>>();
    let router = mounted.router().clone();
    use_context_provider(move || router);

    rsx! {
        div { id: "app", class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Chrome {}
            }
        }
    }
}

/// Navigation bar and outlet. Needs the injected toolkit.
#[component]
fn Chrome() -> Element {
    let mounted = use_context::<MountedApp<RootComponent>>();
    let toolkit = use_hook(move || mounted.inject::<UiToolkit>().map(provide_context));
    if toolkit.is_none() {
        return Err(UiError::MissingToolkit.into());
    }

    rsx! {
        nav { class: "navbar",
            NavLink { to: HOME_ROUTE, "Home" }
            NavLink { to: FILE_UPLOAD_ROUTE, "Upload" }
            NavLink { to: AUTH_ROUTE, "Register" }
            NavLink { to: LOGIN_ROUTE, "Log in" }
        }
        AddressBar {}
        main { class: "content",
            RouterOutlet {}
        }
    }
}
