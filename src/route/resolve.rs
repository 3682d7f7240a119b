use super::RouteFlags;
use crate::context::{MatchContext, NamedMatch};
use crate::errors::RouterResult;

/// A nested route declaration: a template plus matching flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    template: String,
    flags: RouteFlags,
}

impl Route {
    pub fn new<S: Into<String>>(template: S) -> Self {
        Self {
            template: template.into(),
            flags: RouteFlags::empty(),
        }
    }

    pub fn exact(mut self, value: bool) -> Self {
        self.flags.set(RouteFlags::EXACT, value);
        self
    }

    pub fn not_matching(mut self, value: bool) -> Self {
        self.flags.set(RouteFlags::NOT_MATCHING, value);
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn flags(&self) -> RouteFlags {
        self.flags
    }

    pub fn is_exact(&self) -> bool {
        self.flags.contains(RouteFlags::EXACT)
    }

    pub fn is_not_matching(&self) -> bool {
        self.flags.contains(RouteFlags::NOT_MATCHING)
    }

    /// Matches this route against `parent.unmatched()`.
    ///
    /// Returns the context its children should see, or `None` when nothing
    /// below it renders. Under a declined parent nothing renders and nothing
    /// is reported. A `not_matching` route hands back `parent` unchanged on a
    /// miss and takes no part in subroute reporting.
    #[tracing::instrument(
        level = "trace",
        skip(self, parent),
        fields(template = %self.template, unmatched = %parent.unmatched())
    )]
    pub fn resolve(&self, parent: &MatchContext) -> RouterResult<Option<MatchContext>> {
        let pattern = parent.shared().compile(&self.template, self.is_exact())?;

        if parent.scope().is_declined() {
            tracing::trace!(template = %self.template, "declined by enclosing route");
            return Ok(None);
        }

        let found = pattern.match_path(parent.unmatched());

        if self.is_not_matching() {
            return Ok(match found {
                Some(_) => None,
                None => Some(parent.clone()),
            });
        }

        let scope = parent.scope().child(&self.template);
        let Some(found) = found else {
            scope.report(false);
            return Ok(None);
        };
        scope.report(true);

        let named = pattern
            .keys()
            .iter()
            .zip(found.captures)
            .map(|(key, value)| NamedMatch {
                name: key.name.clone(),
                value,
            })
            .collect();

        Ok(Some(parent.descend(&self.template, named, found.consumed, scope)))
    }
}
