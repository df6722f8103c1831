//! Page URL and session history, the medium the query-param store syncs
//! through.

use std::sync::mpsc;

use url::Url;

/// Read/write access to the current page URL.
///
/// `replace` swaps the current entry and `push` adds one, both without
/// notifying subscribers, like `history.replaceState` / `pushState`.
/// Back/forward traversal notifies every subscriber with the URL it landed
/// on, like `popstate`.
pub trait History: Send {
    fn current(&self) -> &Url;
    fn replace(&mut self, url: Url);
    fn push(&mut self, url: Url);
    fn subscribe(&mut self, listener: mpsc::Sender<Url>);
}

/// In-memory session history.
#[derive(Debug)]
pub struct MemoryHistory {
    entries: Vec<Url>,
    index: usize,
    version: u64,
    listeners: Vec<mpsc::Sender<Url>>,
}

impl MemoryHistory {
    pub fn new(initial: Url) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            version: 0,
            listeners: Vec::new(),
        }
    }

    /// Bumped on every change of the current URL.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.traversed();
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        self.traversed();
        true
    }

    fn traversed(&mut self) {
        self.version += 1;
        let url = self.entries[self.index].clone();
        self.listeners
            .retain(|listener| listener.send(url.clone()).is_ok());
    }
}

impl History for MemoryHistory {
    fn current(&self) -> &Url {
        &self.entries[self.index]
    }

    fn replace(&mut self, url: Url) {
        self.entries[self.index] = url;
        self.version += 1;
    }

    /// Drops any forward entries.
    fn push(&mut self, url: Url) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url);
        self.index = self.entries.len() - 1;
        self.version += 1;
    }

    fn subscribe(&mut self, listener: mpsc::Sender<Url>) {
        self.listeners.push(listener);
    }
}
