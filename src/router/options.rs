use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pattern::{CompileOptions, DEFAULT_CACHE_CAPACITY};
use crate::subroute::DEFAULT_ROOT_ROUTE;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouterOptions {
    pub case_sensitive: bool,
    /// When false, a trailing `/` on the path is optional.
    pub strict: bool,
    pub pattern_cache_capacity: usize,
    pub root_route: String,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            strict: false,
            pattern_cache_capacity: DEFAULT_CACHE_CAPACITY,
            root_route: DEFAULT_ROOT_ROUTE.to_string(),
        }
    }
}

impl RouterOptions {
    pub fn builder() -> RouterOptionsBuilder {
        RouterOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), RouterOptionsError> {
        if self.pattern_cache_capacity == 0 {
            return Err(RouterOptionsError::CacheCapacityInvalid { provided: 0 });
        }
        if self.root_route.trim().is_empty() {
            return Err(RouterOptionsError::EmptyRootRoute);
        }
        Ok(())
    }

    pub fn compile_options(&self, exact: bool) -> CompileOptions {
        CompileOptions {
            exact,
            strict: self.strict,
            case_sensitive: self.case_sensitive,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct RouterOptionsBuilder {
    options: RouterOptions,
}

impl RouterOptionsBuilder {
    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.options.case_sensitive = value;
        self
    }

    pub fn strict(mut self, value: bool) -> Self {
        self.options.strict = value;
        self
    }

    pub fn pattern_cache_capacity(mut self, value: usize) -> Self {
        self.options.pattern_cache_capacity = value;
        self
    }

    pub fn root_route<S: Into<String>>(mut self, value: S) -> Self {
        self.options.root_route = value.into();
        self
    }

    pub fn build(self) -> Result<RouterOptions, RouterOptionsError> {
        let options = self.options;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterOptionsError {
    #[error("pattern_cache_capacity must be at least 1 (got {provided})")]
    CacheCapacityInvalid { provided: usize },
    #[error("root_route must not be empty")]
    EmptyRootRoute,
}
