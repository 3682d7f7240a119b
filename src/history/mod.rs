//! The browser location/history resource, seen from the router.
//!
//! Only the navigator mutates it. Back/forward notifications arrive through a
//! single hook slot that [`HistorySubscription`] owns for as long as it lives.

mod memory;
mod subscription;

pub use memory::MemoryHistory;
pub use subscription::HistorySubscription;

use std::sync::Arc;

/// Callback fired after the user moves through history (back/forward).
pub type PopHook = Arc<dyn Fn() + Send + Sync>;

/// The session history of one window: the current URL plus the entries the
/// user can move through.
///
/// Implementations only record state; they never call back into the router
/// except through the pop hook.
pub trait History: Send + Sync {
    /// Path component of the current entry, without the query.
    fn pathname(&self) -> String;

    /// The query component including its leading `?`, or empty.
    fn search(&self) -> String;

    /// Adds a new entry after the current one, discarding forward entries.
    fn push_state(&self, url: &str);

    /// Overwrites the current entry.
    fn replace_state(&self, url: &str);

    /// Number of addressable entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Installs `hook` in the pop slot and returns whatever was there before.
    fn swap_pop_hook(&self, hook: Option<PopHook>) -> Option<PopHook>;
}
