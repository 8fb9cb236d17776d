pub mod app;
pub mod outlet;
pub mod routes;
pub mod toolkit;
pub mod views;

pub use app::{App, MOUNT_POINT, RootComponent, UiError, start};
pub use toolkit::UiToolkit;
