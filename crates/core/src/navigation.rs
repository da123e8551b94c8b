//! Navigation capability.
//!
//! Anything that needs to change the current location (query-state setters,
//! the REST client redirecting to login) receives a [`Navigator`] at
//! construction time. There is no process-wide navigator.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// How a navigation affects history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateMode {
    /// Add a new history entry.
    Push,
    /// Overwrite the current history entry.
    Replace,
}

/// A path plus its query string (without the leading `?`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: String,
}

impl Location {
    /// Parse an href such as `/projects?page=2#top`. The fragment is dropped.
    pub fn parse(href: &str) -> Self {
        let href = href.split('#').next().unwrap_or_default();
        match href.split_once('?') {
            Some((path, query)) => Self {
                path: path.to_string(),
                query: query.to_string(),
            },
            None => Self {
                path: href.to_string(),
                query: String::new(),
            },
        }
    }

    /// Resolve `target` against this location. A target starting with `?`
    /// keeps the current path; an empty path does too.
    pub fn resolve(&self, target: &str) -> Self {
        let mut next = Location::parse(target);
        if next.path.is_empty() {
            next.path = self.path.clone();
        }
        next
    }

    pub fn href(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

/// Reads and changes the current location.
pub trait Navigator: Send + Sync {
    fn location(&self) -> Location;

    fn navigate(&self, target: &str, mode: NavigateMode);

    /// Rewrite only the query string of the current location, without adding
    /// a history entry.
    fn replace_query(&self, query: &str) {
        let target = Location {
            path: self.location().path,
            query: query.to_string(),
        };
        self.navigate(&target.href(), NavigateMode::Replace);
    }
}

#[derive(Debug)]
struct History {
    entries: Vec<Location>,
    cursor: usize,
}

/// In-memory history stack.
#[derive(Debug)]
pub struct MemoryNavigator {
    history: Mutex<History>,
}

impl MemoryNavigator {
    pub fn new(initial: &str) -> Self {
        Self {
            history: Mutex::new(History {
                entries: vec![Location::parse(initial)],
                cursor: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of history entries.
    pub fn history_len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Step back one entry. Returns `false` at the start of history.
    pub fn back(&self) -> bool {
        let mut history = self.lock();
        if history.cursor == 0 {
            return false;
        }
        history.cursor -= 1;
        true
    }

    /// Step forward one entry. Returns `false` at the end of history.
    pub fn forward(&self) -> bool {
        let mut history = self.lock();
        if history.cursor + 1 >= history.entries.len() {
            return false;
        }
        history.cursor += 1;
        true
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryNavigator {
    fn location(&self) -> Location {
        let history = self.lock();
        history.entries[history.cursor].clone()
    }

    fn navigate(&self, target: &str, mode: NavigateMode) {
        let mut history = self.lock();
        let cursor = history.cursor;
        let next = history.entries[cursor].resolve(target);
        tracing::trace!(href = %next.href(), ?mode, "Navigate");
        match mode {
            NavigateMode::Replace => history.entries[cursor] = next,
            NavigateMode::Push => {
                history.entries.truncate(cursor + 1);
                history.entries.push(next);
                history.cursor = cursor + 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_query_and_drops_fragment() {
        let loc = Location::parse("/projects?page=2&size=10#list");
        assert_eq!(loc.path, "/projects");
        assert_eq!(loc.query, "page=2&size=10");
        assert_eq!(loc.href(), "/projects?page=2&size=10");
    }

    #[test]
    fn query_only_target_keeps_path() {
        let current = Location::parse("/admin/projects?page=3");
        let next = current.resolve("?page=1");
        assert_eq!(next.href(), "/admin/projects?page=1");
    }

    #[test]
    fn push_grows_history_and_replace_does_not() {
        let nav = MemoryNavigator::new("/projects");
        nav.navigate("/projects/7", NavigateMode::Push);
        assert_eq!(nav.history_len(), 2);

        nav.replace_query("tab=rewards");
        assert_eq!(nav.history_len(), 2);
        assert_eq!(nav.location().href(), "/projects/7?tab=rewards");

        assert!(nav.back());
        assert_eq!(nav.location().href(), "/projects");
        assert!(!nav.back());
    }

    #[test]
    fn push_after_back_discards_forward_entries() {
        let nav = MemoryNavigator::new("/a");
        nav.navigate("/b", NavigateMode::Push);
        nav.navigate("/c", NavigateMode::Push);
        assert!(nav.back());
        nav.navigate("/d", NavigateMode::Push);
        assert_eq!(nav.history_len(), 3);
        assert!(!nav.forward());
        assert_eq!(nav.location().path, "/d");
    }

    #[test]
    fn empty_query_drops_question_mark() {
        let nav = MemoryNavigator::new("/search?keyword=mug");
        nav.replace_query("");
        assert_eq!(nav.location().href(), "/search");
    }
}
