use parking_lot::Mutex;

use super::{History, PopHook};
use crate::query::split_url;

#[derive(Debug)]
struct MemoryState {
    entries: Vec<String>,
    index: usize,
}

/// In-process history stack with the same push/replace/back/forward
/// behaviour as a browser session history.
pub struct MemoryHistory {
    state: Mutex<MemoryState>,
    hook: Mutex<Option<PopHook>>,
}

impl std::fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryHistory")
            .field("state", &*self.state.lock())
            .field("hooked", &self.hook.lock().is_some())
            .finish()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryHistory {
    pub fn new(initial_url: &str) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                entries: vec![initial_url.to_string()],
                index: 0,
            }),
            hook: Mutex::new(None),
        }
    }

    pub fn current_url(&self) -> String {
        let state = self.state.lock();
        state.entries[state.index].clone()
    }

    pub fn entries(&self) -> Vec<String> {
        self.state.lock().entries.clone()
    }

    pub fn index(&self) -> usize {
        self.state.lock().index
    }

    pub fn back(&self) -> bool {
        self.go(-1)
    }

    pub fn forward(&self) -> bool {
        self.go(1)
    }

    /// Moves `delta` entries and fires the pop hook. Out-of-range moves are ignored.
    pub fn go(&self, delta: isize) -> bool {
        {
            let mut state = self.state.lock();
            let Some(target) = state.index.checked_add_signed(delta) else {
                return false;
            };
            if delta == 0 || target >= state.entries.len() {
                return false;
            }
            state.index = target;
        }

        let hook = self.hook.lock().clone();
        if let Some(hook) = hook {
            hook();
        }
        true
    }
}

impl History for MemoryHistory {
    fn pathname(&self) -> String {
        let url = self.current_url();
        split_url(&url).0.to_string()
    }

    fn search(&self) -> String {
        let url = self.current_url();
        split_url(&url).1.to_string()
    }

    fn push_state(&self, url: &str) {
        let mut state = self.state.lock();
        let keep = state.index + 1;
        state.entries.truncate(keep);
        state.entries.push(url.to_string());
        state.index = keep;
    }

    fn replace_state(&self, url: &str) {
        let mut state = self.state.lock();
        let index = state.index;
        state.entries[index] = url.to_string();
    }

    fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    fn swap_pop_hook(&self, hook: Option<PopHook>) -> Option<PopHook> {
        std::mem::replace(&mut *self.hook.lock(), hook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn push_discards_forward_entries() {
        let history = MemoryHistory::new("/a");
        history.push_state("/b");
        history.push_state("/c");
        assert!(history.back());
        assert!(history.back());
        history.push_state("/d");

        assert_eq!(history.entries(), vec!["/a".to_string(), "/d".to_string()]);
        assert!(!history.forward());
    }

    #[test]
    fn replace_keeps_length() {
        let history = MemoryHistory::new("/a");
        history.replace_state("/b?x=1");

        assert_eq!(history.len(), 1);
        assert_eq!(history.pathname(), "/b");
        assert_eq!(history.search(), "?x=1");
    }

    #[test]
    fn moving_fires_the_pop_hook() {
        let history = MemoryHistory::new("/a");
        history.push_state("/b");
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        history.swap_pop_hook(Some(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })));

        assert!(history.back());
        assert!(!history.back());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(history.pathname(), "/a");
    }
}
