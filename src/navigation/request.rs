use serde::{Deserialize, Serialize};

use crate::query::{QueryCodec, split_url};
use crate::types::QueryMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigateOptions {
    /// Overwrite the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigateOptions {
    pub fn replace() -> Self {
        Self { replace: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub path: String,
    pub query: Option<QueryMap>,
    pub options: NavigateOptions,
}

impl NavigationRequest {
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self {
            path: path.into(),
            query: None,
            options: NavigateOptions::default(),
        }
    }

    pub fn with_query(mut self, query: QueryMap) -> Self {
        self.query = Some(query);
        self
    }

    pub fn replace(mut self, value: bool) -> Self {
        self.options.replace = value;
        self
    }

    /// `path`, followed by `?` and the encoded query when it is non-empty.
    pub fn url(&self, codec: &dyn QueryCodec) -> String {
        let encoded = self
            .query
            .as_ref()
            .map(|query| codec.stringify(query))
            .unwrap_or_default();

        if encoded.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, encoded)
        }
    }
}

/// Snapshot of the current URL as the router sees it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    /// Raw query component including its `?`, or empty.
    pub search: String,
    pub query: QueryMap,
}

impl Location {
    pub fn new(path: &str, search: &str, codec: &dyn QueryCodec) -> Self {
        Self {
            path: path.to_string(),
            search: search.to_string(),
            query: codec.parse(search),
        }
    }

    pub fn from_url(url: &str, codec: &dyn QueryCodec) -> Self {
        let (path, search) = split_url(url);
        Self::new(path, search, codec)
    }

    pub fn href(&self) -> String {
        format!("{}{}", self.path, self.search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FormUrlEncoded;

    #[test]
    fn url_omits_empty_query() {
        let request = NavigationRequest::new("/a").with_query(QueryMap::new());
        assert_eq!(request.url(&FormUrlEncoded), "/a");
    }

    #[test]
    fn url_appends_encoded_query() {
        let mut query = QueryMap::new();
        query.insert("tab".to_string(), "two words".to_string());
        let request = NavigationRequest::new("/a").with_query(query);
        assert_eq!(request.url(&FormUrlEncoded), "/a?tab=two+words");
    }

    #[test]
    fn location_parses_query_from_url() {
        let location = Location::from_url("/list?page=3", &FormUrlEncoded);
        assert_eq!(location.path, "/list");
        assert_eq!(location.query.get("page").map(String::as_str), Some("3"));
        assert_eq!(location.href(), "/list?page=3");
    }
}
