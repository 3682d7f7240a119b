mod ast;
mod cache;
mod compiled;
mod error;
mod parser;

pub use ast::{
    ParamKind, ParameterConstraint, ParameterNode, PatternAst, PatternNode, Quantifier,
};
pub use cache::{CacheStats, DEFAULT_CACHE_CAPACITY, PatternCache, PatternCacheKey};
pub use compiled::{
    CaptureList, CompileOptions, CompiledPattern, PathMatch, PatternKey, compile_pattern,
    compile_pattern_ast,
};
pub use error::{PatternError, PatternResult, ReverseError};
pub use parser::{DEFAULT_PARAM_PATTERN, WILDCARD_PATTERN, parse_pattern};

use crate::errors::RouterResult;
use crate::types::RouteParams;

/// Builds a concrete path from `template` using default compile options.
pub fn reverse(template: &str, params: &RouteParams) -> RouterResult<String> {
    let compiled = compile_pattern(template, CompileOptions::default())?;
    Ok(compiled.reverse(params)?)
}
