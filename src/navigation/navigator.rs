use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use super::{Location, NavigateOptions, NavigationRequest};
use crate::errors::RouterResult;
use crate::history::{History, HistorySubscription};
use crate::pattern::CompiledPattern;
use crate::query::{FormUrlEncoded, QueryCodec};
use crate::types::{ListenerId, QueryMap, RouteParams};

pub type Listener = Arc<dyn Fn(&Location) + Send + Sync>;

#[derive(Debug)]
struct NavigatorState {
    location: Location,
    revision: u64,
    rendering: usize,
    pending: Vec<NavigationRequest>,
}

struct NavigatorInner {
    history: Arc<dyn History>,
    codec: Arc<dyn QueryCodec>,
    state: RwLock<NavigatorState>,
    listeners: Mutex<Vec<(ListenerId, Listener)>>,
    next_listener: AtomicU64,
}

/// Single owner of the current URL.
///
/// Cloning yields another handle to the same controller.
#[derive(Clone)]
pub struct Navigator {
    inner: Arc<NavigatorInner>,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("state", &*self.inner.state.read())
            .field("listeners", &self.inner.listeners.lock().len())
            .finish()
    }
}

impl Navigator {
    pub fn new(history: Arc<dyn History>) -> Self {
        Self::with_codec(history, Arc::new(FormUrlEncoded))
    }

    pub fn with_codec(history: Arc<dyn History>, codec: Arc<dyn QueryCodec>) -> Self {
        let location = Location::new(&history.pathname(), &history.search(), codec.as_ref());

        Self {
            inner: Arc::new(NavigatorInner {
                history,
                codec,
                state: RwLock::new(NavigatorState {
                    location,
                    revision: 0,
                    rendering: 0,
                    pending: Vec::new(),
                }),
                listeners: Mutex::new(Vec::new()),
                next_listener: AtomicU64::new(1),
            }),
        }
    }

    pub fn location(&self) -> Location {
        self.inner.state.read().location.clone()
    }

    /// Incremented on every observed location change.
    pub fn revision(&self) -> u64 {
        self.inner.state.read().revision
    }

    pub fn history(&self) -> &Arc<dyn History> {
        &self.inner.history
    }

    pub fn codec(&self) -> &dyn QueryCodec {
        self.inner.codec.as_ref()
    }

    pub fn navigate(&self, path: &str, query: Option<&QueryMap>, options: NavigateOptions) {
        self.request(NavigationRequest {
            path: path.to_string(),
            query: query.cloned(),
            options,
        });
    }

    /// Applies `request` now, or queues it until the running render pass ends.
    pub fn request(&self, request: NavigationRequest) {
        {
            let mut state = self.inner.state.write();
            if state.rendering > 0 {
                tracing::trace!(path = %request.path, "navigation deferred until render completes");
                state.pending.push(request);
                return;
            }
        }
        self.apply(request);
    }

    /// Rebuilds the path for `template` with `new_params` layered over
    /// `route_params`; keys the template does not bind become query
    /// parameters merged over `query`.
    pub fn navigate_params(
        &self,
        template: &CompiledPattern,
        route_params: &RouteParams,
        query: &QueryMap,
        new_params: &RouteParams,
    ) -> RouterResult<()> {
        let mut path_params = route_params.clone();
        let mut next_query = query.clone();
        for (key, value) in new_params {
            if route_params.contains_key(key) {
                path_params.insert(key.clone(), value.clone());
            } else {
                next_query.insert(key.clone(), value.clone());
            }
        }

        let path = template.reverse(&path_params)?;
        self.navigate(&path, Some(&next_query), NavigateOptions::default());
        Ok(())
    }

    /// Re-reads the history resource and publishes the change, if any.
    pub fn sync(&self) {
        let history = &self.inner.history;
        let location = Location::new(&history.pathname(), &history.search(), self.codec());
        if location == self.inner.state.read().location {
            return;
        }
        tracing::debug!(path = %location.path, "popstate");
        self.publish(location);
    }

    pub fn subscribe(&self, listener: Listener) -> ListenerId {
        let id = self.inner.next_listener.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().push((id, listener));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Listens for back/forward navigation until the returned guard drops.
    pub fn mount(&self) -> HistorySubscription {
        let weak: Weak<NavigatorInner> = Arc::downgrade(&self.inner);
        HistorySubscription::install(
            self.inner.history.clone(),
            Arc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    Navigator { inner }.sync();
                }
            }),
        )
    }

    /// Marks a render pass as running; navigation requested meanwhile is
    /// applied when the guard finishes.
    pub fn begin_render(&self) -> RenderGuard {
        self.inner.state.write().rendering += 1;
        RenderGuard {
            navigator: self.clone(),
            finished: false,
        }
    }

    pub fn is_rendering(&self) -> bool {
        self.inner.state.read().rendering > 0
    }

    fn end_render(&self) -> usize {
        let pending = {
            let mut state = self.inner.state.write();
            state.rendering = state.rendering.saturating_sub(1);
            if state.rendering > 0 {
                return 0;
            }
            std::mem::take(&mut state.pending)
        };

        let applied = pending.len();
        for request in pending {
            self.apply(request);
        }
        applied
    }

    fn apply(&self, request: NavigationRequest) {
        let url = request.url(self.codec());
        if request.options.replace {
            tracing::debug!(url = %url, "replace");
            self.inner.history.replace_state(&url);
        } else {
            tracing::debug!(url = %url, "navigate");
            self.inner.history.push_state(&url);
        }
        self.publish(Location::from_url(&url, self.codec()));
    }

    fn publish(&self, location: Location) {
        {
            let mut state = self.inner.state.write();
            state.location = location.clone();
            state.revision += 1;
        }

        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&location);
        }
    }
}

/// Open render pass. Finishing (or dropping) it runs deferred navigation.
#[must_use = "dropping the guard ends the render pass immediately"]
#[derive(Debug)]
pub struct RenderGuard {
    navigator: Navigator,
    finished: bool,
}

impl RenderGuard {
    /// Ends the pass and returns how many deferred navigations were applied.
    pub fn finish(mut self) -> usize {
        self.finished = true;
        self.navigator.end_render()
    }
}

impl Drop for RenderGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.navigator.end_render();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;

    fn navigator_at(url: &str) -> (Arc<MemoryHistory>, Navigator) {
        let history = Arc::new(MemoryHistory::new(url));
        let navigator = Navigator::new(history.clone());
        (history, navigator)
    }

    #[test]
    fn initial_location_comes_from_history() {
        let (_, navigator) = navigator_at("/start?x=1");
        let location = navigator.location();
        assert_eq!(location.path, "/start");
        assert_eq!(location.query.get("x").map(String::as_str), Some("1"));
    }

    #[test]
    fn navigation_during_render_waits_for_finish() {
        let (history, navigator) = navigator_at("/");
        let guard = navigator.begin_render();
        navigator.navigate("/a", None, NavigateOptions::default());
        navigator.navigate("/b", None, NavigateOptions::default());

        assert_eq!(navigator.location().path, "/");
        assert_eq!(history.len(), 1);

        assert_eq!(guard.finish(), 2);
        assert_eq!(navigator.location().path, "/b");
        assert_eq!(navigator.revision(), 2);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let (_, navigator) = navigator_at("/");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let id = navigator.subscribe(Arc::new(move |location: &Location| {
            sink.lock().push(location.path.clone());
        }));

        navigator.navigate("/one", None, NavigateOptions::default());
        assert!(navigator.unsubscribe(id));
        navigator.navigate("/two", None, NavigateOptions::default());

        assert_eq!(*seen.lock(), vec!["/one".to_string()]);
    }

    #[test]
    fn sync_ignores_unchanged_location() {
        let (_, navigator) = navigator_at("/same");
        navigator.sync();
        assert_eq!(navigator.revision(), 0);
    }
}
