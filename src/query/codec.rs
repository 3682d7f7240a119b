use memchr::memchr;
use url::form_urlencoded;

use crate::types::QueryMap;

/// The `parse`/`stringify` pair used to move between a query mapping and
/// the `search` component of a URL.
pub trait QueryCodec: Send + Sync {
    /// Parses `search`, with or without its leading `?`.
    fn parse(&self, search: &str) -> QueryMap;

    /// Serializes `query` without a leading `?`.
    fn stringify(&self, query: &QueryMap) -> String;
}

/// `application/x-www-form-urlencoded` codec. Later duplicates of a key win.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormUrlEncoded;

impl QueryCodec for FormUrlEncoded {
    fn parse(&self, search: &str) -> QueryMap {
        let raw = search.strip_prefix('?').unwrap_or(search);
        form_urlencoded::parse(raw.as_bytes())
            .into_owned()
            .filter(|(key, _)| !key.is_empty())
            .collect()
    }

    fn stringify(&self, query: &QueryMap) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query.iter())
            .finish()
    }
}

/// Splits `url` into its path and its `?`-prefixed search component.
pub fn split_url(url: &str) -> (&str, &str) {
    match memchr(b'?', url.as_bytes()) {
        Some(pos) => (&url[..pos], &url[pos..]),
        None => (url, ""),
    }
}
