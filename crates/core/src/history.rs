//! History backends the navigation controller can sit on.
//!
//! `Memory` keeps the stack in-process. `Browser` mirrors every change into a
//! host document through [`DocumentLocation`]; the host reports external
//! moves (back/forward buttons) by calling
//! [`NavigationController::sync_with_location`](crate::NavigationController::sync_with_location).

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The host document's address bar and session history.
pub trait DocumentLocation: Send {
    /// Current URL as the host reports it, base path included.
    fn current(&self) -> String;

    /// Adds a new session-history entry.
    fn push_state(&mut self, url: &str);

    /// Rewrites the current session-history entry.
    fn replace_state(&mut self, url: &str);

    /// Moves `delta` entries through session history.
    ///
    /// Returns `true` when the move was applied before returning. Real
    /// browsers apply it asynchronously and fire `popstate` later; such hosts
    /// return `false` and call `sync_with_location` once the location changed.
    fn go(&mut self, delta: isize) -> bool;
}

/// Where navigation state is kept.
pub enum HistoryMode {
    /// Synchronised with the host document location.
    Browser(Box<dyn DocumentLocation>),
    /// Held only in-process; the document location is never touched.
    Memory,
}

impl HistoryMode {
    #[must_use]
    pub fn browser(document: impl DocumentLocation + 'static) -> Self {
        Self::Browser(Box::new(document))
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            HistoryMode::Browser(_) => "browser",
            HistoryMode::Memory => "memory",
        }
    }
}

impl fmt::Debug for HistoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An in-process session history: a stack of URLs plus a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    #[must_use]
    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    /// Pushes `url`, discarding any entries ahead of the cursor.
    pub fn push(&mut self, url: impl Into<String>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url.into());
        self.index = self.entries.len() - 1;
    }

    pub fn replace(&mut self, url: impl Into<String>) {
        self.entries[self.index] = url.into();
    }

    /// Moves the cursor. Returns `false`, leaving it in place, when the
    /// target is outside the stack.
    pub fn go(&mut self, delta: isize) -> bool {
        match self.index.checked_add_signed(delta) {
            Some(target) if delta != 0 && target < self.entries.len() => {
                self.index = target;
                true
            }
            _ => false,
        }
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
    pub fn position(&self) -> usize {
        self.index
    }
}

/// A synchronous stand-in for a browser document.
///
/// Used by hosts without a real address bar (the desktop shell) and by
/// tests that need to simulate the user pressing back or forward. Clones
/// share the same session history.
#[derive(Debug, Clone)]
pub struct SessionDocument {
    history: Arc<Mutex<MemoryHistory>>,
}

impl SessionDocument {
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            history: Arc::new(Mutex::new(MemoryHistory::new(initial))),
        }
    }

    /// What the user would do with the browser back button.
    pub fn press_back(&self) -> bool {
        self.lock().go(-1)
    }

    pub fn press_forward(&self) -> bool {
        self.lock().go(1)
    }

    #[must_use]
    pub fn entries(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryHistory> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentLocation for SessionDocument {
    fn current(&self) -> String {
        self.lock().current().to_string()
    }

    fn push_state(&mut self, url: &str) {
        self.lock().push(url);
    }

    fn replace_state(&mut self, url: &str) {
        self.lock().replace(url);
    }

    fn go(&mut self, delta: isize) -> bool {
        self.lock().go(delta)
    }
}

/// The backend a controller actually drives.
pub(crate) enum History {
    Memory(MemoryHistory),
    Browser(Box<dyn DocumentLocation>),
}

impl History {
    pub(crate) fn new(mode: HistoryMode, initial: String) -> Self {
        match mode {
            HistoryMode::Memory => History::Memory(MemoryHistory::new(initial)),
            HistoryMode::Browser(document) => History::Browser(document),
        }
    }

    pub(crate) fn current(&self) -> String {
        match self {
            History::Memory(memory) => memory.current().to_string(),
            History::Browser(document) => document.current(),
        }
    }

    pub(crate) fn push(&mut self, url: &str) {
        match self {
            History::Memory(memory) => memory.push(url),
            History::Browser(document) => document.push_state(url),
        }
    }

    pub(crate) fn replace(&mut self, url: &str) {
        match self {
            History::Memory(memory) => memory.replace(url),
            History::Browser(document) => document.replace_state(url),
        }
    }

    /// Whether the current entry moved.
    pub(crate) fn go(&mut self, delta: isize) -> bool {
        match self {
            History::Memory(memory) => memory.go(delta),
            History::Browser(document) => document.go(delta),
        }
    }
}
