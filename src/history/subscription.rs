use std::sync::Arc;

use super::{History, PopHook};

/// Owns the history pop slot while alive.
///
/// Installation chains any hook that was already present; dropping the
/// subscription puts that hook back exactly.
#[must_use = "dropping the subscription uninstalls the hook"]
pub struct HistorySubscription {
    history: Arc<dyn History>,
    previous: Option<PopHook>,
    installed: PopHook,
}

impl std::fmt::Debug for HistorySubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistorySubscription")
            .field("chained", &self.previous.is_some())
            .finish()
    }
}

impl HistorySubscription {
    pub fn install(history: Arc<dyn History>, on_pop: PopHook) -> Self {
        let previous = history.swap_pop_hook(None);
        let chained = previous.clone();
        let installed: PopHook = Arc::new(move || {
            if let Some(prev) = &chained {
                prev();
            }
            on_pop();
        });

        history.swap_pop_hook(Some(installed.clone()));
        tracing::debug!(chained = previous.is_some(), "history hook installed");

        Self {
            history,
            previous,
            installed,
        }
    }
}

impl Drop for HistorySubscription {
    fn drop(&mut self) {
        let displaced = self.history.swap_pop_hook(self.previous.take());
        let ours = Arc::as_ptr(&self.installed) as *const ();
        if displaced.is_none_or(|hook| Arc::as_ptr(&hook) as *const () != ours) {
            tracing::warn!("history hook was replaced while the router was mounted");
        }
    }
}
