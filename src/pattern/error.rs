use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("parameter at byte {index} of '{pattern}' is missing a name")]
    ParameterMissingName { pattern: String, index: usize },
    #[error(
        "parameter name '{name}' in '{pattern}' must start with an alphabetic character or underscore (found '{found}')"
    )]
    ParameterInvalidStart {
        pattern: String,
        name: String,
        found: char,
    },
    #[error("unexpected ')' at byte {index} of '{pattern}'")]
    UnexpectedClosingParenthesis { pattern: String, index: usize },
    #[error("group starting at byte {start} of '{pattern}' is never closed")]
    UnterminatedGroup { pattern: String, start: usize },
    #[error("group starting at byte {start} of '{pattern}' is empty")]
    EmptyGroup { pattern: String, start: usize },
    #[error("modifier '{modifier}' at byte {index} of '{pattern}' does not follow a parameter")]
    DanglingQuantifier {
        pattern: String,
        index: usize,
        modifier: char,
    },
    #[error("wildcard at byte {index} of '{pattern}' cannot take modifier '{modifier}'")]
    WildcardQuantifierUnsupported {
        pattern: String,
        index: usize,
        modifier: char,
    },
    #[error("escape character at byte {index} of '{pattern}' has nothing to escape")]
    LoneEscapeCharacter { pattern: String, index: usize },
    #[error("constraint for parameter '{name}' in '{pattern}' is not a valid regex: {error}")]
    RegexConstraintInvalid {
        pattern: String,
        name: String,
        error: String,
    },
    #[error("template '{pattern}' could not be compiled: {error}")]
    RegexBuild { pattern: String, error: String },
}

pub type PatternResult<T> = Result<T, PatternError>;

/// Raised when a template cannot be turned back into a concrete path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReverseError {
    #[error("template '{template}' requires a value for parameter '{name}'")]
    MissingParameter { template: String, name: String },
    #[error("value '{value}' for parameter '{name}' does not match '{constraint}'")]
    ParameterMismatch {
        name: String,
        value: String,
        constraint: String,
    },
}
