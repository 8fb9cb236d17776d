use std::any::Any;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tracing::info;

use crate::inject::Injector;
use crate::navigation::NavigationController;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShellError {
    #[error("an application is already mounted on {selector:?}")]
    AlreadyMounted { selector: String },

    #[error("dependency `{type_name}` is provided more than once")]
    DuplicateDependency { type_name: &'static str },
}

/// Dependencies registered for injection when the shell starts.
#[derive(Debug)]
pub struct Dependencies<U> {
    pub ui: Arc<U>,
}

/// The page hosting the application. Tracks which mount points are taken.
#[derive(Debug, Clone, Default)]
pub struct HostDocument {
    mounted: Arc<Mutex<HashSet<String>>>,
}

impl HostDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn target(&self, selector: impl Into<String>) -> MountTarget {
        MountTarget {
            selector: selector.into(),
            host: self.clone(),
        }
    }

    #[must_use]
    pub fn is_mounted(&self, selector: &str) -> bool {
        self.mounted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(selector)
    }
}

/// One element of a [`HostDocument`], e.g. `#app`.
#[derive(Debug, Clone)]
pub struct MountTarget {
    selector: String,
    host: HostDocument,
}

impl MountTarget {
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    fn claim(&self) -> Result<(), ShellError> {
        let fresh = self
            .host
            .mounted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(self.selector.clone());
        if fresh {
            Ok(())
        } else {
            Err(ShellError::AlreadyMounted {
                selector: self.selector.clone(),
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellStep {
    ConstructTree,
    RegisterDependencies,
    AttachRouter,
    Mount,
}

/// A started application: root view, injector and router, live on its
/// mount target.
#[derive(Debug, Clone)]
pub struct MountedApp<V> {
    root: V,
    injector: Injector,
    router: NavigationController,
    selector: String,
    steps: Vec<ShellStep>,
}

impl<V> MountedApp<V> {
    #[must_use]
    pub fn root(&self) -> &V {
        &self.root
    }

    #[must_use]
    pub fn inject<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.injector.get::<T>()
    }

    #[must_use]
    pub fn router(&self) -> &NavigationController {
        &self.router
    }

    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// The startup steps in the order they ran.
    #[must_use]
    pub fn steps(&self) -> &[ShellStep] {
        &self.steps
    }
}

/// Composition root. There is exactly one application per mount target.
pub struct Shell;

impl Shell {
    /// Builds the tree, registers `deps`, attaches `router` and mounts on
    /// `target`, in that order.
    ///
    /// The router is also registered in the injector so any view can issue
    /// navigation requests.
    ///
    /// # Errors
    ///
    /// `ShellError::AlreadyMounted` when `target` already hosts an
    /// application. Nothing becomes visible in that case.
    pub fn start<V, U>(
        root: V,
        deps: Dependencies<U>,
        router: NavigationController,
        target: MountTarget,
    ) -> Result<MountedApp<V>, ShellError>
    where
        U: Any + Send + Sync,
    {
        if target.host.is_mounted(target.selector()) {
            return Err(ShellError::AlreadyMounted {
                selector: target.selector,
            });
        }

        let mut steps = vec![ShellStep::ConstructTree];
        info!(selector = target.selector(), "constructing application tree");
        let mut injector = Injector::new();

        injector.provide(deps.ui)?;
        steps.push(ShellStep::RegisterDependencies);
        info!(provided = injector.len(), "registered shared dependencies");

        injector.provide(Arc::new(router.clone()))?;
        steps.push(ShellStep::AttachRouter);
        info!(router = ?router, "attached navigation controller");

        target.claim()?;
        steps.push(ShellStep::Mount);
        info!(selector = target.selector(), "application mounted");

        Ok(MountedApp {
            root,
            injector,
            router,
            selector: target.selector,
            steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryMode;
    use crate::location::BasePath;
    use crate::route::{RouteDef, RouteTable, ViewId, ViewResolver};

    struct AnyView;

    impl ViewResolver for AnyView {
        fn has_view(&self, _view: ViewId) -> bool {
            true
        }
    }

    struct Toolkit;

    fn router() -> NavigationController {
        let table = RouteTable::new([RouteDef::new("/", "Home", ViewId::new("home"))], &AnyView)
            .unwrap();
        NavigationController::create(table, HistoryMode::Memory, BasePath::root())
    }

    #[test]
    fn start_runs_steps_in_order_and_injects_dependencies() {
        let host = HostDocument::new();
        let app = Shell::start(
            "root",
            Dependencies {
                ui: Arc::new(Toolkit),
            },
            router(),
            host.target("#app"),
        )
        .unwrap();

        assert_eq!(
            app.steps(),
            [
                ShellStep::ConstructTree,
                ShellStep::RegisterDependencies,
                ShellStep::AttachRouter,
                ShellStep::Mount,
            ]
        );
        assert!(app.inject::<Toolkit>().is_some());
        assert!(app.inject::<NavigationController>().is_some());
        assert_eq!(*app.root(), "root");
        assert!(host.is_mounted("#app"));
    }

    #[test]
    fn second_start_on_same_target_is_rejected() {
        let host = HostDocument::new();
        let deps = || Dependencies {
            ui: Arc::new(Toolkit),
        };
        Shell::start((), deps(), router(), host.target("#app")).unwrap();

        let err = Shell::start((), deps(), router(), host.target("#app")).unwrap_err();
        assert_eq!(
            err,
            ShellError::AlreadyMounted {
                selector: "#app".into()
            }
        );

        // A different element on the same page is a separate mount point.
        assert!(Shell::start((), deps(), router(), host.target("#other")).is_ok());
    }

    #[test]
    fn router_cannot_double_as_ui_dependency() {
        let host = HostDocument::new();
        let err = Shell::start(
            (),
            Dependencies {
                ui: Arc::new(router()),
            },
            router(),
            host.target("#app"),
        )
        .unwrap_err();
        assert!(matches!(err, ShellError::DuplicateDependency { .. }));
        assert!(!host.is_mounted("#app"));
    }
}
