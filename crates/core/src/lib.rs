#![forbid(unsafe_code)]

pub mod error;
pub mod history;
pub mod inject;
pub mod location;
pub mod navigation;
pub mod route;
pub mod shell;

pub use error::Error;
pub use history::{DocumentLocation, HistoryMode, MemoryHistory, SessionDocument};
pub use inject::Injector;
pub use location::{BasePath, Location};
pub use navigation::{NavTarget, NavigateError, NavigationController, NavigationState, Subscription};
pub use route::{
    Params, PathPattern, PatternError, Resolution, RouteDef, RouteEntry, RouteMatch, RouteTable,
    RouteTableError, ViewId, ViewResolver,
};
pub use shell::{Dependencies, HostDocument, MountTarget, MountedApp, Shell, ShellError, ShellStep};
