use crate::context::MatchContext;
use crate::navigation::{NavigateOptions, Navigator};

pub const DEFAULT_CURRENT_CLASS: &str = "active";

/// Resolves `./` and `../` hrefs against `base`; anything else is returned as-is.
pub fn resolve_href(base: &str, href: &str) -> String {
    if let Some(rest) = href.strip_prefix("./") {
        join(base, rest)
    } else if let Some(rest) = href.strip_prefix("../") {
        let parent = match base.rfind('/') {
            Some(pos) if pos + 1 < base.len() => &base[..pos],
            _ => base,
        };
        if rest.starts_with("../") {
            resolve_href(parent, rest)
        } else {
            join(parent, rest)
        }
    } else {
        href.to_string()
    }
}

fn join(base: &str, part: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        part.strip_prefix('/').unwrap_or(part)
    )
}

/// Anchor description that knows whether it points at the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    href: String,
    exact: bool,
    class_name: Option<String>,
    current_class_name: String,
}

impl Link {
    pub fn new<S: Into<String>>(href: S) -> Self {
        Self {
            href: href.into(),
            exact: false,
            class_name: None,
            current_class_name: DEFAULT_CURRENT_CLASS.to_string(),
        }
    }

    /// Only count as current on an exact path match rather than a prefix.
    pub fn exact(mut self, value: bool) -> Self {
        self.exact = value;
        self
    }

    pub fn class_name<S: Into<String>>(mut self, value: S) -> Self {
        self.class_name = Some(value.into());
        self
    }

    pub fn current_class_name<S: Into<String>>(mut self, value: S) -> Self {
        self.current_class_name = value.into();
        self
    }

    pub fn resolve(&self, context: &MatchContext) -> ResolvedLink {
        let full_path = context.full_path();
        let url = resolve_href(full_path, &self.href);
        let current = if self.exact {
            full_path == url
        } else {
            full_path.starts_with(&url)
        };

        let class = [
            current.then_some(self.current_class_name.as_str()),
            self.class_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        ResolvedLink {
            url,
            current,
            class,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub url: String,
    pub current: bool,
    pub class: String,
}

impl ResolvedLink {
    pub fn click(&self, navigator: &Navigator) {
        navigator.navigate(&self.url, None, NavigateOptions::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_href_is_untouched() {
        assert_eq!(resolve_href("/a/b", "/c"), "/c");
    }

    #[test]
    fn dot_slash_appends_to_base() {
        assert_eq!(resolve_href("/a/b", "./c"), "/a/b/c");
        assert_eq!(resolve_href("/", "./c"), "/c");
    }

    #[test]
    fn dot_dot_climbs_one_segment_each() {
        assert_eq!(resolve_href("/a/b", "../c"), "/a/c");
        assert_eq!(resolve_href("/a/b/c", "../../d"), "/a/d");
    }
}
