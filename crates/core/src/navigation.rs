use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::history::{History, HistoryMode};
use crate::location::{BasePath, Location};
use crate::route::{Params, Resolution, RouteEntry, RouteTable};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// A navigation request the controller refused. State is left unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NavigateError {
    #[error("no route is named `{0}`")]
    UnknownRoute(String),

    #[error("route `{route}` needs parameter `{param}`")]
    MissingParam { route: String, param: String },
}

//
// ─── TARGETS & STATE ───────────────────────────────────────────────────────────
//

/// Where a navigation request points: a literal path or a route name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    Path(String),
    Name(String),
}

impl From<&str> for NavTarget {
    /// A leading `/` means a path; anything else is a route name.
    fn from(target: &str) -> Self {
        if target.starts_with('/') {
            NavTarget::Path(target.to_string())
        } else {
            NavTarget::Name(target.to_string())
        }
    }
}

impl From<String> for NavTarget {
    fn from(target: String) -> Self {
        if target.starts_with('/') {
            NavTarget::Path(target)
        } else {
            NavTarget::Name(target)
        }
    }
}

impl From<&String> for NavTarget {
    fn from(target: &String) -> Self {
        NavTarget::from(target.as_str())
    }
}

/// The committed location and what it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    location: Location,
    resolution: Resolution,
}

impl NavigationState {
    /// App-relative location (base path removed).
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[must_use]
    pub fn path(&self) -> &str {
        self.location.path()
    }

    #[must_use]
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    #[must_use]
    pub fn entry(&self) -> Option<&RouteEntry> {
        self.resolution.entry()
    }

    #[must_use]
    pub fn route_name(&self) -> Option<&str> {
        self.resolution.route_name()
    }

    /// A named parameter captured from the path, if the route has one.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        match &self.resolution {
            Resolution::Matched(found) => found.params().get(name).map(String::as_str),
            Resolution::NotFound => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.resolution.is_not_found()
    }
}

type Callback = Arc<dyn Fn(&NavigationState) + Send + Sync>;

enum Request {
    Push(String),
    Replace(String),
    Go(isize),
    Sync,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

struct Committed {
    history: History,
    url: String,
    state: NavigationState,
}

struct Inner {
    table: RouteTable,
    base: BasePath,
    mode: &'static str,
    committed: Mutex<Committed>,
    subscribers: Mutex<Vec<(u64, Callback)>>,
    next_subscriber: AtomicU64,
    queue: Mutex<VecDeque<Request>>,
    delivering: AtomicBool,
}

/// Owns the navigation state and the history it is synchronised with.
///
/// Requests are applied one at a time in arrival order. A request made from
/// inside a subscriber callback is queued and applied once the current
/// delivery round has finished, so every subscriber sees every transition in
/// commit order.
///
/// Handles are cheap to clone and all refer to the same controller.
#[derive(Clone)]
pub struct NavigationController {
    inner: Arc<Inner>,
}

impl NavigationController {
    /// Builds a controller and resolves the initial location.
    ///
    /// In `Memory` mode the session starts at the root of `base_path`; in
    /// `Browser` mode it starts wherever the document currently is.
    #[must_use]
    pub fn create(table: RouteTable, mode: HistoryMode, base_path: BasePath) -> Self {
        let label = mode.label();
        let initial = match &mode {
            HistoryMode::Memory => base_path.join("/"),
            HistoryMode::Browser(document) => document.current(),
        };
        let history = History::new(mode, initial.clone());
        let state = resolve_url(&table, &base_path, &initial);

        info!(
            mode = label,
            base = %base_path,
            routes = table.len(),
            initial = %state.location,
            route = state.route_name().unwrap_or("<not found>"),
            "navigation ready"
        );

        Self {
            inner: Arc::new(Inner {
                table,
                base: base_path,
                mode: label,
                committed: Mutex::new(Committed {
                    history,
                    url: initial,
                    state,
                }),
                subscribers: Mutex::new(Vec::new()),
                next_subscriber: AtomicU64::new(1),
                queue: Mutex::new(VecDeque::new()),
                delivering: AtomicBool::new(false),
            }),
        }
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.inner.table
    }

    #[must_use]
    pub fn base_path(&self) -> &BasePath {
        &self.inner.base
    }

    /// Snapshot of the committed state.
    #[must_use]
    pub fn state(&self) -> NavigationState {
        lock(&self.inner.committed).state.clone()
    }

    /// Matches an app-relative path against the table. Never fails.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Resolution {
        self.inner.table.resolve(Location::parse(path).path())
    }

    /// Full URL (base path included) for a target, for use in links.
    ///
    /// # Errors
    ///
    /// `UnknownRoute` for a name not in the table, `MissingParam` when a
    /// named route needs a parameter that `params` lacks.
    pub fn href(
        &self,
        target: impl Into<NavTarget>,
        params: &Params,
    ) -> Result<String, NavigateError> {
        let app_url = match target.into() {
            NavTarget::Path(path) => path,
            NavTarget::Name(name) => {
                let entry = self
                    .inner
                    .table
                    .by_name(&name)
                    .ok_or_else(|| NavigateError::UnknownRoute(name.clone()))?;
                entry
                    .path()
                    .format(params)
                    .map_err(|param| NavigateError::MissingParam { route: name, param })?
            }
        };
        Ok(self.inner.base.join(&app_url))
    }

    /// Pushes a new history entry for `target`.
    ///
    /// # Errors
    ///
    /// See [`NavigationController::href`]. Unmatched paths are not errors;
    /// they commit a `NotFound` state.
    pub fn navigate(&self, target: impl Into<NavTarget>) -> Result<(), NavigateError> {
        self.navigate_with(target, &Params::new())
    }

    /// [`navigate`](Self::navigate) with parameters for a named route.
    ///
    /// # Errors
    ///
    /// See [`NavigationController::href`].
    pub fn navigate_with(
        &self,
        target: impl Into<NavTarget>,
        params: &Params,
    ) -> Result<(), NavigateError> {
        let url = self.checked_href(target, params)?;
        self.submit(Request::Push(url));
        Ok(())
    }

    /// Replaces the current history entry with `target`.
    ///
    /// # Errors
    ///
    /// See [`NavigationController::href`].
    pub fn replace(&self, target: impl Into<NavTarget>) -> Result<(), NavigateError> {
        self.replace_with(target, &Params::new())
    }

    /// [`replace`](Self::replace) with parameters for a named route.
    ///
    /// # Errors
    ///
    /// See [`NavigationController::href`].
    pub fn replace_with(
        &self,
        target: impl Into<NavTarget>,
        params: &Params,
    ) -> Result<(), NavigateError> {
        let url = self.checked_href(target, params)?;
        self.submit(Request::Replace(url));
        Ok(())
    }

    pub fn back(&self) {
        self.go(-1);
    }

    pub fn forward(&self) {
        self.go(1);
    }

    /// Moves through history. Moving past either end changes nothing and
    /// notifies no one.
    pub fn go(&self, delta: isize) {
        self.submit(Request::Go(delta));
    }

    /// Re-reads the history location after the host changed it (e.g. a
    /// browser `popstate`). No-op when it matches the committed location.
    pub fn sync_with_location(&self) {
        self.submit(Request::Sync);
    }

    /// Registers `callback` for every committed transition.
    ///
    /// The callback runs after the new state is committed and is never
    /// called for the state current at subscription time.
    pub fn subscribe(
        &self,
        callback: impl Fn(&NavigationState) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.inner.next_subscriber.fetch_add(1, Ordering::Relaxed);
        lock(&self.inner.subscribers).push((id, Arc::new(callback)));
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn checked_href(
        &self,
        target: impl Into<NavTarget>,
        params: &Params,
    ) -> Result<String, NavigateError> {
        self.href(target, params).inspect_err(|err| {
            warn!(%err, "navigation request rejected");
        })
    }

    fn submit(&self, request: Request) {
        lock(&self.inner.queue).push_back(request);
        self.drain();
    }

    fn drain(&self) {
        loop {
            if self.inner.delivering.swap(true, Ordering::AcqRel) {
                // Whoever is delivering will pick the request up.
                return;
            }

            {
                // Released on unwind too, so a panicking subscriber cannot wedge delivery.
                let _delivering = DeliveryGuard(&self.inner.delivering);
                loop {
                    let next = lock(&self.inner.queue).pop_front();
                    let Some(request) = next else {
                        break;
                    };
                    if let Some(state) = self.apply(request) {
                        self.notify(&state);
                    }
                }
            }

            if lock(&self.inner.queue).is_empty() {
                return;
            }
        }
    }

    fn apply(&self, request: Request) -> Option<NavigationState> {
        let mut committed = lock(&self.inner.committed);
        let url = match request {
            Request::Push(url) => {
                committed.history.push(&url);
                url
            }
            Request::Replace(url) => {
                committed.history.replace(&url);
                url
            }
            Request::Go(delta) => {
                if !committed.history.go(delta) {
                    debug!(delta, "history move had no effect");
                    return None;
                }
                committed.history.current()
            }
            Request::Sync => {
                let url = committed.history.current();
                if url == committed.url {
                    return None;
                }
                url
            }
        };

        let state = resolve_url(&self.inner.table, &self.inner.base, &url);
        if state.is_not_found() {
            warn!(url = %url, "no route matches location");
        } else {
            debug!(
                url = %url,
                route = state.route_name().unwrap_or_default(),
                "navigation committed"
            );
        }
        committed.url = url;
        committed.state = state.clone();
        Some(state)
    }

    fn notify(&self, state: &NavigationState) {
        let callbacks: Vec<Callback> = lock(&self.inner.subscribers)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(state);
        }
    }
}

impl fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationController")
            .field("mode", &self.inner.mode)
            .field("base", &self.inner.base)
            .field("routes", &self.inner.table.len())
            .finish_non_exhaustive()
    }
}

/// Handle returned by [`NavigationController::subscribe`].
///
/// Dropping it keeps the subscription alive; call
/// [`unsubscribe`](Self::unsubscribe) to stop receiving transitions.
#[derive(Debug)]
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct Subscription {
    id: u64,
    inner: Weak<Inner>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner.subscribers).retain(|(id, _)| *id != self.id);
        }
    }
}

fn resolve_url(table: &RouteTable, base: &BasePath, url: &str) -> NavigationState {
    match base.strip(url) {
        Some(app_url) => {
            let location = Location::parse(&app_url);
            let resolution = table.resolve(location.path());
            NavigationState {
                location,
                resolution,
            }
        }
        None => NavigationState {
            location: Location::parse(url),
            resolution: Resolution::NotFound,
        },
    }
}

/// Clears the delivery flag when dropped.
struct DeliveryGuard<'a>(&'a AtomicBool);

impl Drop for DeliveryGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
