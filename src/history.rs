//! Bridge to the host's session history.

use std::sync::Arc;

use spin::Mutex;

/// The data stored with every history entry the router creates.
///
/// Tagging entries with their path lets a later back/forward navigation
/// recover where to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub path: String,
}

impl HistoryEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Callback invoked with the entry navigated to by a back/forward event.
pub type NavigationListener = Box<dyn Fn(HistoryEntry) + Send + Sync>;

/// Host session history, e.g. a browser's `window.history`.
#[cfg_attr(test, mockall::automock)]
pub trait History: Send + Sync {
    /// The current location as a path, query and fragment included.
    fn current_path(&self) -> String;

    /// Create a new entry and make it current.
    fn push_entry(&self, entry: HistoryEntry);

    /// Overwrite the current entry.
    fn replace_entry(&self, entry: HistoryEntry);

    /// Install the back/forward listener, replacing any previous one.
    fn listen(&self, listener: NavigationListener);
}

/// The router's view of the history backend.
///
/// Every operation is a no-op when the host has no history.
#[derive(Clone, Default)]
pub(crate) struct HistoryBridge {
    backend: Option<Arc<dyn History>>,
}

impl HistoryBridge {
    pub(crate) fn new(backend: Option<Arc<dyn History>>) -> Self {
        Self { backend }
    }

    /// The startup path, `/` without a backend.
    pub(crate) fn current_path(&self) -> String {
        self.backend
            .as_ref()
            .map_or_else(|| "/".to_string(), |history| history.current_path())
    }

    pub(crate) fn push(&self, path: &str) {
        match &self.backend {
            Some(history) => {
                debug_log!("pushing history entry for '{}'", path);
                history.push_entry(HistoryEntry::new(path));
            }
            None => {
                trace_log!("no history backend, not pushing '{}'", path);
            }
        }
    }

    pub(crate) fn replace(&self, path: &str) {
        if let Some(history) = &self.backend {
            debug_log!("tagging current history entry with '{}'", path);
            history.replace_entry(HistoryEntry::new(path));
        }
    }

    pub(crate) fn listen(&self, listener: NavigationListener) {
        if let Some(history) = &self.backend {
            history.listen(listener);
        }
    }
}

struct MemoryHistoryInner {
    entries: Vec<HistoryEntry>,
    index: usize,
    listener: Option<Arc<dyn Fn(HistoryEntry) + Send + Sync>>,
}

/// An in-memory session history.
///
/// Behaves like a browser history stack: pushing drops every entry after the
/// current one, and [`back`](Self::back) / [`forward`](Self::forward) move
/// through the stack and notify the listener with the entry they land on.
/// Clones share the same stack.
///
/// ```
/// use pyramid_mvu::{History, HistoryEntry, MemoryHistory};
///
/// let history = MemoryHistory::new("/");
/// history.push_entry(HistoryEntry::new("/a"));
/// history.push_entry(HistoryEntry::new("/b"));
///
/// assert_eq!(history.back().map(|entry| entry.path), Some("/a".to_string()));
/// assert_eq!(history.current_path(), "/a");
/// ```
#[derive(Clone)]
pub struct MemoryHistory {
    inner: Arc<Mutex<MemoryHistoryInner>>,
}

impl MemoryHistory {
    /// Create a history whose only entry is `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryHistoryInner {
                entries: vec![HistoryEntry::new(path)],
                index: 0,
                listener: None,
            })),
        }
    }

    /// Go back one entry, notifying the listener.
    ///
    /// Returns `None` at the start of the stack.
    pub fn back(&self) -> Option<HistoryEntry> {
        self.go(-1)
    }

    /// Go forward one entry, notifying the listener.
    ///
    /// Returns `None` at the end of the stack.
    pub fn forward(&self) -> Option<HistoryEntry> {
        self.go(1)
    }

    /// Every entry, oldest first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.inner.lock().entries.clone()
    }

    /// Position of the current entry.
    pub fn index(&self) -> usize {
        self.inner.lock().index
    }

    fn go(&self, delta: isize) -> Option<HistoryEntry> {
        let (entry, listener) = {
            let mut inner = self.inner.lock();
            let index = inner.index.checked_add_signed(delta)?;
            let entry = inner.entries.get(index)?.clone();
            inner.index = index;
            (entry, inner.listener.clone())
        };

        // Called without the lock held: listeners may read the history.
        if let Some(listener) = listener {
            listener(entry.clone());
        }
        Some(entry)
    }
}

impl History for MemoryHistory {
    fn current_path(&self) -> String {
        let inner = self.inner.lock();
        inner.entries[inner.index].path.clone()
    }

    fn push_entry(&self, entry: HistoryEntry) {
        let mut inner = self.inner.lock();
        let next = inner.index + 1;
        inner.entries.truncate(next);
        inner.entries.push(entry);
        inner.index = next;
    }

    fn replace_entry(&self, entry: HistoryEntry) {
        let mut inner = self.inner.lock();
        let index = inner.index;
        inner.entries[index] = entry;
    }

    fn listen(&self, listener: NavigationListener) {
        self.inner.lock().listener = Some(Arc::from(listener));
    }
}
