use parking_lot::RwLock;
use std::sync::Arc;

use super::data::{SubrouteData, is_not_found, reduce};

/// Shared, mutable SubrouteData tree for one mounted router.
#[derive(Debug, Clone)]
pub struct SubrouteTree {
    root: Arc<RwLock<SubrouteData>>,
}

impl SubrouteTree {
    pub fn new<S: Into<String>>(root_route: S) -> Self {
        Self::from_data(SubrouteData::new(root_route))
    }

    /// Starts from an existing state, e.g. one inherited from an outer router.
    pub fn from_data(root: SubrouteData) -> Self {
        Self {
            root: Arc::new(RwLock::new(root)),
        }
    }

    /// Drops every reported node and returns the root to its unknown state.
    ///
    /// Run at the start of a render pass so routes that are no longer reached
    /// leave no stale state behind.
    pub fn reset(&self) {
        let mut root = self.root.write();
        tracing::trace!(root = %root.route, "subroute tree reset");
        *root = SubrouteData::new(root.route.clone());
    }

    pub fn snapshot(&self) -> SubrouteData {
        self.root.read().clone()
    }

    pub fn is_not_found(&self) -> bool {
        is_not_found(&self.root.read())
    }

    pub fn root_scope(&self) -> SubrouteScope {
        SubrouteScope {
            tree: self.clone(),
            path: Vec::new(),
        }
    }

    fn node(&self, path: &[String]) -> Option<SubrouteData> {
        self.root.read().find(path).cloned()
    }

    /// Applies `update` to the node at `path` (created if missing) and
    /// re-reduces every ancestor up to the root.
    fn update(&self, path: &[String], update: impl FnOnce(&mut SubrouteData)) {
        let mut root = self.root.write();
        let Some((own, parents)) = path.split_last() else {
            update(&mut root);
            return;
        };

        let mut node = root
            .find(path)
            .cloned()
            .unwrap_or_else(|| SubrouteData::new(own.clone()));
        update(&mut node);
        *root = report_at(&root, parents, node);
    }

    fn remove(&self, path: &[String]) -> bool {
        let mut root = self.root.write();
        let Some((own, parents)) = path.split_last() else {
            return false;
        };

        let Some(mut parent) = root.find(parents).cloned() else {
            return false;
        };
        if !parent.remove_child(own) {
            return false;
        }
        parent.recompute_matched();

        match parents.split_last() {
            None => *root = parent,
            Some((_, above)) => *root = report_at(&root, above, parent),
        }
        true
    }
}

fn report_at(node: &SubrouteData, path: &[String], child: SubrouteData) -> SubrouteData {
    match path.split_first() {
        None => reduce(node, child),
        Some((head, rest)) => {
            let current = node
                .child(head)
                .cloned()
                .unwrap_or_else(|| SubrouteData::new(head.clone()));
            reduce(node, report_at(&current, rest, child))
        }
    }
}

/// One route's position in a [`SubrouteTree`].
#[derive(Debug, Clone)]
pub struct SubrouteScope {
    tree: SubrouteTree,
    path: Vec<String>,
}

impl SubrouteScope {
    pub fn tree(&self) -> &SubrouteTree {
        &self.tree
    }

    /// Route keys from below the root down to this node.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    pub fn child(&self, route: &str) -> SubrouteScope {
        let mut path = self.path.clone();
        path.push(route.to_string());
        SubrouteScope {
            tree: self.tree.clone(),
            path,
        }
    }

    pub fn node(&self) -> Option<SubrouteData> {
        self.tree.node(&self.path)
    }

    /// Records this route's own match outcome and clears its not-found flag,
    /// which descendants may raise again during the same pass.
    ///
    /// A miss drops the node's children since they are no longer rendered.
    pub fn report(&self, matched: bool) {
        tracing::trace!(path = ?self.path, matched, "subroute report");
        self.tree.update(&self.path, |node| {
            node.not_found = false;
            node.declined = false;
            if matched {
                if node.subroutes.is_empty() {
                    node.matched = Some(true);
                } else {
                    node.recompute_matched();
                }
            } else {
                node.subroutes.clear();
                node.matched = Some(false);
            }
        });
    }

    /// Marks this branch as semantically missing without touching siblings.
    pub fn mark_not_found(&self) {
        tracing::trace!(path = ?self.path, "subroute not found");
        self.tree.update(&self.path, |node| node.not_found = true);
    }

    /// Pins this node to an explicit non-match so nested routes decline.
    /// Holds until the owning route reports again.
    pub fn decline(&self) {
        tracing::trace!(path = ?self.path, "subroute declined");
        self.tree.update(&self.path, |node| {
            node.subroutes.clear();
            node.matched = Some(false);
            node.declined = true;
        });
    }

    pub fn is_declined(&self) -> bool {
        self.node().is_some_and(|node| node.declined)
    }

    /// Removes this node, as when its route leaves the tree.
    pub fn unmount(&self) -> bool {
        self.tree.remove(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_propagates_to_root() {
        let tree = SubrouteTree::new("ROOT");
        let root = tree.root_scope();
        let outer = root.child("/a");
        outer.report(true);
        outer.child("/b").report(false);

        let snapshot = tree.snapshot();
        assert_eq!(snapshot.matched, Some(false));
        assert_eq!(snapshot.child("/a").and_then(|a| a.matched), Some(false));

        outer.child("/c").report(true);
        assert_eq!(tree.snapshot().matched, Some(true));
    }

    #[test]
    fn miss_clears_children() {
        let tree = SubrouteTree::new("ROOT");
        let outer = tree.root_scope().child("/a");
        outer.report(true);
        outer.child("/b").report(true);
        outer.report(false);

        let node = outer.node().expect("node should exist");
        assert!(node.subroutes.is_empty());
        assert_eq!(node.matched, Some(false));
    }

    #[test]
    fn unmount_recomputes_parent() {
        let tree = SubrouteTree::new("ROOT");
        let root = tree.root_scope();
        root.child("/a").report(false);
        root.child("/b").report(true);
        assert_eq!(tree.snapshot().matched, Some(true));

        assert!(root.child("/b").unmount());
        assert_eq!(tree.snapshot().matched, Some(false));
        assert!(!root.child("/b").unmount());
    }

    #[test]
    fn decline_is_explicit_but_aggregate_false_is_not() {
        let tree = SubrouteTree::new("ROOT");
        let outer = tree.root_scope().child("/a");
        outer.report(true);
        outer.child("/x").report(false);
        assert!(!outer.is_declined());

        outer.decline();
        assert!(outer.is_declined());
        assert_eq!(outer.node().and_then(|node| node.matched), Some(false));

        outer.report(true);
        assert!(!outer.is_declined());
    }

    #[test]
    fn declined_node_ignores_children_when_recomputing() {
        let tree = SubrouteTree::new("ROOT");
        let outer = tree.root_scope().child("/a");
        outer.report(true);
        outer.decline();
        outer.child("/b").report(true);

        assert!(outer.is_declined());
        assert_eq!(outer.node().and_then(|node| node.matched), Some(false));
    }

    #[test]
    fn reset_forgets_every_report() {
        let tree = SubrouteTree::new("APP");
        let outer = tree.root_scope().child("/a");
        outer.report(true);
        outer.mark_not_found();
        assert!(tree.is_not_found());

        tree.reset();
        let snapshot = tree.snapshot();
        assert_eq!(snapshot, SubrouteData::new("APP"));
        assert!(!tree.is_not_found());
    }
}
