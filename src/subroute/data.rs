use serde::{Deserialize, Serialize};

pub const DEFAULT_ROOT_ROUTE: &str = "ROOT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubrouteData {
    pub route: String,
    pub subroutes: Vec<SubrouteData>,
    /// `None` until something has been reported.
    pub matched: Option<bool>,
    pub not_found: bool,
    /// Pinned to a non-match by its own route; nested routes render nothing.
    #[serde(default)]
    pub declined: bool,
}

impl SubrouteData {
    pub fn new<S: Into<String>>(route: S) -> Self {
        Self {
            route: route.into(),
            subroutes: Vec::new(),
            matched: None,
            not_found: false,
            declined: false,
        }
    }

    pub fn leaf<S: Into<String>>(route: S, matched: bool) -> Self {
        Self {
            matched: Some(matched),
            ..Self::new(route)
        }
    }

    pub fn child(&self, route: &str) -> Option<&SubrouteData> {
        self.subroutes.iter().find(|sr| sr.route == route)
    }

    /// Follows `path` (route keys below this node) down the tree.
    pub fn find(&self, path: &[String]) -> Option<&SubrouteData> {
        match path.split_first() {
            None => Some(self),
            Some((head, rest)) => self.child(head)?.find(rest),
        }
    }

    /// With children, `matched` is true iff any child matched; a childless
    /// or declined node keeps what it had.
    pub fn recompute_matched(&mut self) {
        if !self.declined && !self.subroutes.is_empty() {
            self.matched = Some(self.subroutes.iter().any(|sr| sr.matched == Some(true)));
        }
    }

    pub(crate) fn remove_child(&mut self, route: &str) -> bool {
        let before = self.subroutes.len();
        self.subroutes.retain(|sr| sr.route != route);
        self.subroutes.len() != before
    }
}

/// Folds a child's report into `state`: same-keyed children are replaced in
/// place, new ones appended, then `matched` is recomputed.
pub fn reduce(state: &SubrouteData, action: SubrouteData) -> SubrouteData {
    let mut next = state.clone();
    match next.subroutes.iter_mut().find(|sr| sr.route == action.route) {
        Some(existing) => *existing = action,
        None => next.subroutes.push(action),
    }
    next.recompute_matched();
    next
}

pub fn any_not_found(state: &SubrouteData) -> bool {
    state.not_found || state.subroutes.iter().any(any_not_found)
}

/// The whole tree counts as not found when any branch declared itself not
/// found or the root is known not to match.
pub fn is_not_found(root: &SubrouteData) -> bool {
    any_not_found(root) || root.matched == Some(false)
}
