use std::collections::BTreeMap;

pub type QueryMap = BTreeMap<String, String>;
pub type RouteParams = BTreeMap<String, String>;
pub type ListenerId = u64;
