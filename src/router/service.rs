use std::sync::Arc;

use crate::context::MatchContext;
use crate::errors::RouterResult;
use crate::history::{History, HistorySubscription};
use crate::navigation::Navigator;
use crate::pattern::{CompiledPattern, PatternCache};
use crate::query::QueryCodec;
use crate::router::RouterOptions;
use crate::subroute::{SubrouteData, SubrouteTree};
use crate::types::RouteParams;

/// State every match context of one router points back to.
#[derive(Debug)]
pub(crate) struct RouterShared {
    pub(crate) navigator: Navigator,
    pub(crate) patterns: PatternCache,
    pub(crate) options: RouterOptions,
    pub(crate) tree: SubrouteTree,
}

impl RouterShared {
    pub(crate) fn compile(&self, template: &str, exact: bool) -> RouterResult<Arc<CompiledPattern>> {
        Ok(self
            .patterns
            .get_or_compile(template, self.options.compile_options(exact))?)
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    shared: Arc<RouterShared>,
}

impl Router {
    pub fn new(history: Arc<dyn History>, options: Option<RouterOptions>) -> Self {
        Self::from_navigator(Navigator::new(history), options)
    }

    pub fn with_codec(
        history: Arc<dyn History>,
        codec: Arc<dyn QueryCodec>,
        options: Option<RouterOptions>,
    ) -> Self {
        Self::from_navigator(Navigator::with_codec(history, codec), options)
    }

    fn from_navigator(navigator: Navigator, options: Option<RouterOptions>) -> Self {
        let options = options.unwrap_or_default();
        Self {
            shared: Arc::new(RouterShared {
                navigator,
                patterns: PatternCache::new(options.pattern_cache_capacity),
                tree: SubrouteTree::new(options.root_route.clone()),
                options,
            }),
        }
    }

    pub fn options(&self) -> &RouterOptions {
        &self.shared.options
    }

    pub fn navigator(&self) -> &Navigator {
        &self.shared.navigator
    }

    pub fn patterns(&self) -> &PatternCache {
        &self.shared.patterns
    }

    /// Starts listening for back/forward navigation; stops when dropped.
    pub fn mount(&self) -> HistorySubscription {
        self.shared.navigator.mount()
    }

    /// Context for the outermost routes, built from the current location.
    pub fn root_context(&self) -> MatchContext {
        MatchContext::root(self.shared.clone())
    }

    pub fn subroutes(&self) -> SubrouteData {
        self.shared.tree.snapshot()
    }

    pub fn is_not_found(&self) -> bool {
        self.shared.tree.is_not_found()
    }

    pub fn compile(&self, template: &str, exact: bool) -> RouterResult<Arc<CompiledPattern>> {
        self.shared.compile(template, exact)
    }

    pub fn reverse(&self, template: &str, params: &RouteParams) -> RouterResult<String> {
        Ok(self.compile(template, false)?.reverse(params)?)
    }
}
