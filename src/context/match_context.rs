use std::sync::Arc;

use crate::errors::RouterResult;
use crate::navigation::{NavigateOptions, Navigator};
use crate::router::RouterShared;
use crate::subroute::{SubrouteData, SubrouteScope};
use crate::types::{QueryMap, RouteParams};

/// One captured token, in root-to-leaf order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedMatch {
    pub name: String,
    /// `None` for an optional token that was absent.
    pub value: Option<String>,
}

/// What a route and everything below it knows about the current URL.
///
/// Each nesting level derives a new value from its parent; nothing is
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct MatchContext {
    full_path: String,
    query: QueryMap,
    matches: Vec<NamedMatch>,
    route_params: RouteParams,
    params: RouteParams,
    unmatched: String,
    full_matched_route: String,
    shared: Arc<RouterShared>,
    scope: SubrouteScope,
}

impl MatchContext {
    pub(crate) fn root(shared: Arc<RouterShared>) -> Self {
        let location = shared.navigator.location();
        let scope = shared.tree.root_scope();

        Self {
            params: location.query.clone(),
            unmatched: location.path.clone(),
            full_path: location.path,
            query: location.query,
            matches: Vec::new(),
            route_params: RouteParams::new(),
            full_matched_route: String::new(),
            shared,
            scope,
        }
    }

    /// Context for the subtree of a route with `template` that consumed
    /// `consumed` bytes of `self.unmatched`.
    pub(crate) fn descend(
        &self,
        template: &str,
        named: Vec<NamedMatch>,
        consumed: usize,
        scope: SubrouteScope,
    ) -> Self {
        let mut matches = self.matches.clone();
        matches.extend(named);

        let mut route_params = RouteParams::new();
        for matched in &matches {
            if let Some(value) = &matched.value {
                route_params.insert(matched.name.clone(), value.clone());
            }
        }

        let mut params = self.query.clone();
        params.extend(route_params.iter().map(|(k, v)| (k.clone(), v.clone())));

        let rest = &self.unmatched[consumed..];
        let unmatched = if rest.is_empty() { "/" } else { rest };

        Self {
            full_path: self.full_path.clone(),
            query: self.query.clone(),
            matches,
            route_params,
            params,
            unmatched: unmatched.to_string(),
            full_matched_route: join_templates(&self.full_matched_route, template),
            shared: self.shared.clone(),
            scope,
        }
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn query(&self) -> &QueryMap {
        &self.query
    }

    pub fn matches(&self) -> &[NamedMatch] {
        &self.matches
    }

    /// Parameters captured from the path only.
    pub fn route_params(&self) -> &RouteParams {
        &self.route_params
    }

    /// Path parameters merged over the query; the path wins on collisions.
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn unmatched(&self) -> &str {
        &self.unmatched
    }

    pub fn full_matched_route(&self) -> &str {
        &self.full_matched_route
    }

    pub fn navigator(&self) -> &Navigator {
        &self.shared.navigator
    }

    pub fn scope(&self) -> &SubrouteScope {
        &self.scope
    }

    pub(crate) fn shared(&self) -> &Arc<RouterShared> {
        &self.shared
    }

    pub fn navigate(&self, path: &str, query: Option<&QueryMap>, options: NavigateOptions) {
        self.shared.navigator.navigate(path, query, options);
    }

    /// Navigates to the same route chain with some parameters changed.
    ///
    /// Keys bound by the matched templates rewrite the path; any other key
    /// lands in the query string.
    pub fn navigate_params(&self, new_params: &RouteParams) -> RouterResult<()> {
        let template = self.shared.compile(&self.full_matched_route, false)?;
        self.shared.navigator.navigate_params(
            &template,
            &self.route_params,
            &self.query,
            new_params,
        )
    }

    /// Flags the nearest route's branch as not found.
    pub fn not_found(&self) {
        self.scope.mark_not_found();
    }

    /// Snapshot of the whole tree, from the root.
    pub fn subroutes(&self) -> SubrouteData {
        self.shared.tree.snapshot()
    }

    pub fn is_not_found(&self) -> bool {
        self.shared.tree.is_not_found()
    }
}

fn join_templates(parent: &str, template: &str) -> String {
    match (parent.strip_suffix('/'), template.starts_with('/')) {
        (Some(trimmed), true) => format!("{trimmed}{template}"),
        _ => format!("{parent}{template}"),
    }
}
