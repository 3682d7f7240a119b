use std::sync::Arc;

use crate::context::MatchContext;
use crate::navigation::NavigationRequest;
use crate::route::Route;

pub type ContentFn<V> = Arc<dyn Fn(&MatchContext) -> V + Send + Sync>;

pub enum Element<V> {
    Route { route: Route, children: Vec<Element<V>> },
    Content(ContentFn<V>),
    /// Children render only while the tree is not found.
    NotFound(Vec<Element<V>>),
    Redirect(NavigationRequest),
    Fragment(Vec<Element<V>>),
}

impl<V> Element<V> {
    pub fn route(route: Route, children: Vec<Element<V>>) -> Self {
        Self::Route { route, children }
    }

    pub fn content<F>(render: F) -> Self
    where
        F: Fn(&MatchContext) -> V + Send + Sync + 'static,
    {
        Self::Content(Arc::new(render))
    }

    pub fn not_found(children: Vec<Element<V>>) -> Self {
        Self::NotFound(children)
    }

    /// Replaces the current history entry with `to`.
    pub fn redirect<S: Into<String>>(to: S) -> Self {
        Self::Redirect(NavigationRequest::new(to).replace(true))
    }

    pub fn fragment(children: Vec<Element<V>>) -> Self {
        Self::Fragment(children)
    }
}

impl<V> std::fmt::Debug for Element<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Route { route, children } => f
                .debug_struct("Route")
                .field("route", route)
                .field("children", children)
                .finish(),
            Self::Content(_) => f.write_str("Content"),
            Self::NotFound(children) => f.debug_tuple("NotFound").field(children).finish(),
            Self::Redirect(request) => f.debug_tuple("Redirect").field(request).finish(),
            Self::Fragment(children) => f.debug_tuple("Fragment").field(children).finish(),
        }
    }
}
