use regex::{Regex, RegexBuilder};
use smallvec::SmallVec;

use super::ast::{ParameterNode, PatternAst, PatternNode};
use super::parser::{DEFAULT_PARAM_PATTERN, parse_pattern};
use super::{PatternError, PatternResult, ReverseError};
use crate::types::RouteParams;

const NEXT_SEGMENT_GROUP: &str = "__next";

pub type CaptureList = SmallVec<[Option<String>; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CompileOptions {
    /// Require the whole input to be consumed.
    pub exact: bool,
    /// Treat a trailing `/` as significant.
    pub strict: bool,
    pub case_sensitive: bool,
}

/// A named capture token of a template.
#[derive(Debug, Clone)]
pub struct PatternKey {
    pub name: String,
    pub prefix: String,
    pub optional: bool,
    pub repeat: bool,
    pub pattern: String,
    validator: Regex,
}

impl PatternKey {
    fn accepts(&self, value: &str) -> bool {
        self.validator.is_match(value)
    }
}

impl PartialEq for PatternKey {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.prefix == other.prefix
            && self.optional == other.optional
            && self.repeat == other.repeat
            && self.pattern == other.pattern
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Literal(String),
    Key(usize),
}

/// Outcome of running a compiled template against a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    /// Byte length of the consumed prefix.
    pub consumed: usize,
    /// One entry per key, `None` for an absent optional token.
    pub captures: CaptureList,
}

#[derive(Debug, Clone)]
pub struct CompiledPattern {
    template: String,
    options: CompileOptions,
    keys: Vec<PatternKey>,
    tokens: Vec<Token>,
    regex: Regex,
    group_names: Vec<String>,
}

impl CompiledPattern {
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn options(&self) -> CompileOptions {
        self.options
    }

    pub fn keys(&self) -> &[PatternKey] {
        &self.keys
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    #[tracing::instrument(level = "trace", skip(self), fields(template = %self.template))]
    pub fn match_path(&self, input: &str) -> Option<PathMatch> {
        let caps = self.regex.captures(input)?;
        let whole = caps.get(0)?;
        let consumed = caps
            .name(NEXT_SEGMENT_GROUP)
            .map(|next| next.start())
            .unwrap_or_else(|| whole.end());

        let captures = self
            .group_names
            .iter()
            .map(|group| caps.name(group).map(|m| m.as_str().to_string()))
            .collect();

        Some(PathMatch { consumed, captures })
    }

    /// Substitutes every token with its value from `params`.
    pub fn reverse(&self, params: &RouteParams) -> Result<String, ReverseError> {
        let mut path = String::with_capacity(self.template.len());

        for token in &self.tokens {
            let key = match token {
                Token::Literal(text) => {
                    path.push_str(text);
                    continue;
                }
                Token::Key(index) => &self.keys[*index],
            };

            let value = match params.get(&key.name) {
                Some(value) if !value.is_empty() => value,
                _ if key.optional => continue,
                _ => {
                    return Err(ReverseError::MissingParameter {
                        template: self.template.clone(),
                        name: key.name.clone(),
                    });
                }
            };

            if key.repeat {
                for (position, segment) in value.split('/').enumerate() {
                    check_value(key, segment)?;
                    path.push_str(if position == 0 { &key.prefix } else { "/" });
                    path.push_str(segment);
                }
            } else {
                check_value(key, value)?;
                path.push_str(&key.prefix);
                path.push_str(value);
            }
        }

        Ok(path)
    }
}

fn check_value(key: &PatternKey, value: &str) -> Result<(), ReverseError> {
    if key.accepts(value) {
        Ok(())
    } else {
        Err(ReverseError::ParameterMismatch {
            name: key.name.clone(),
            value: value.to_string(),
            constraint: key.pattern.clone(),
        })
    }
}

pub fn compile_pattern(template: &str, options: CompileOptions) -> PatternResult<CompiledPattern> {
    let ast = parse_pattern(template)?;
    compile_pattern_ast(template, &ast, options)
}

#[tracing::instrument(level = "trace", skip(ast), fields(template = %template))]
pub fn compile_pattern_ast(
    template: &str,
    ast: &PatternAst,
    options: CompileOptions,
) -> PatternResult<CompiledPattern> {
    let mut keys = Vec::new();
    let mut tokens = Vec::with_capacity(ast.nodes.len());
    let mut group_names = Vec::new();
    let mut source = String::from("^(?:");

    let ends_with_delimiter = ast.ends_with_delimiter();
    let last = ast.nodes.len().saturating_sub(1);

    for (position, node) in ast.nodes.iter().enumerate() {
        match node {
            PatternNode::Literal(text) => {
                tokens.push(Token::Literal(text.clone()));
                let body = if position == last && ends_with_delimiter && !options.strict {
                    &text[..text.len() - 1]
                } else {
                    text.as_str()
                };
                source.push_str(&regex::escape(body));
            }
            PatternNode::Parameter(param) => {
                let group = format!("__t{}", keys.len());
                source.push_str(&token_source(param, &group));
                tokens.push(Token::Key(keys.len()));
                keys.push(compile_key(template, param, options)?);
                group_names.push(group);
            }
        }
    }
    source.push(')');

    match (options.exact, options.strict) {
        (true, false) => source.push_str("/?$"),
        (true, true) => source.push('$'),
        (false, false) => source.push_str(&format!("(?:/?$|(?P<{NEXT_SEGMENT_GROUP}>/))")),
        (false, true) if ends_with_delimiter => {}
        (false, true) => source.push_str(&format!("(?:$|(?P<{NEXT_SEGMENT_GROUP}>/))")),
    }

    let regex = build_regex(&source, options.case_sensitive).map_err(|err| {
        PatternError::RegexBuild {
            pattern: template.to_string(),
            error: err.to_string(),
        }
    })?;

    Ok(CompiledPattern {
        template: template.to_string(),
        options,
        keys,
        tokens,
        regex,
        group_names,
    })
}

fn token_source(param: &ParameterNode, group: &str) -> String {
    let pattern = param_pattern(param);
    let prefix = regex::escape(&param.prefix);
    let capture = if param.quantifier.is_repeating() {
        format!("(?:{pattern})(?:{prefix}(?:{pattern}))*")
    } else {
        pattern.to_string()
    };

    if param.quantifier.is_optional() {
        if prefix.is_empty() {
            format!("(?P<{group}>{capture})?")
        } else {
            format!("(?:{prefix}(?P<{group}>{capture}))?")
        }
    } else {
        format!("{prefix}(?P<{group}>{capture})")
    }
}

fn param_pattern(param: &ParameterNode) -> &str {
    param
        .constraint
        .as_ref()
        .map(|constraint| constraint.raw.as_str())
        .unwrap_or(DEFAULT_PARAM_PATTERN)
}

fn compile_key(
    template: &str,
    param: &ParameterNode,
    options: CompileOptions,
) -> PatternResult<PatternKey> {
    let pattern = param_pattern(param).to_string();
    let validator = build_regex(&format!("^(?:{pattern})$"), options.case_sensitive).map_err(
        |err| PatternError::RegexConstraintInvalid {
            pattern: template.to_string(),
            name: param.name.clone(),
            error: err.to_string(),
        },
    )?;

    Ok(PatternKey {
        name: param.name.clone(),
        prefix: param.prefix.clone(),
        optional: param.quantifier.is_optional(),
        repeat: param.quantifier.is_repeating(),
        pattern,
        validator,
    })
}

fn build_regex(source: &str, case_sensitive: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source)
        .case_insensitive(!case_sensitive)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix_options() -> CompileOptions {
        CompileOptions::default()
    }

    #[test]
    fn prefix_match_stops_before_next_segment() {
        let pattern = compile_pattern("/a/:x", prefix_options()).unwrap();
        let matched = pattern.match_path("/a/1/b/2").unwrap();
        assert_eq!(matched.consumed, 4);
        assert_eq!(matched.captures.as_slice(), &[Some("1".to_string())]);
    }

    #[test]
    fn prefix_match_requires_segment_boundary() {
        let pattern = compile_pattern("/hello", prefix_options()).unwrap();
        assert!(pattern.match_path("/helloworld").is_none());
        assert!(pattern.match_path("/hello/world").is_some());
    }

    #[test]
    fn root_template_consumes_nothing_when_not_exact() {
        let pattern = compile_pattern("/", prefix_options()).unwrap();
        let matched = pattern.match_path("/a/1").unwrap();
        assert_eq!(matched.consumed, 0);
        assert_eq!(pattern.match_path("/").unwrap().consumed, 1);
    }

    #[test]
    fn exact_match_allows_trailing_slash_unless_strict() {
        let loose = compile_pattern(
            "/a",
            CompileOptions {
                exact: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(loose.match_path("/a/").is_some());
        assert!(loose.match_path("/a/b").is_none());

        let strict = compile_pattern(
            "/a",
            CompileOptions {
                exact: true,
                strict: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(strict.match_path("/a/").is_none());
    }

    #[test]
    fn optional_parameter_may_be_absent() {
        let pattern = compile_pattern(
            "/posts/:page?",
            CompileOptions {
                exact: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(pattern.match_path("/posts").unwrap().captures.as_slice(), &[None]);
        assert_eq!(
            pattern.match_path("/posts/3").unwrap().captures.as_slice(),
            &[Some("3".to_string())]
        );
    }

    #[test]
    fn repeating_parameter_spans_segments() {
        let pattern = compile_pattern(
            "/files/:path+",
            CompileOptions {
                exact: true,
                ..Default::default()
            },
        )
        .unwrap();
        let matched = pattern.match_path("/files/a/b/c").unwrap();
        assert_eq!(matched.captures.as_slice(), &[Some("a/b/c".to_string())]);
        assert!(pattern.match_path("/files").is_none());
    }

    #[test]
    fn constraint_groups_do_not_shift_captures() {
        let pattern = compile_pattern("/:id((a|b)\\d)/:rest", prefix_options()).unwrap();
        let matched = pattern.match_path("/a1/x").unwrap();
        assert_eq!(
            matched.captures.as_slice(),
            &[Some("a1".to_string()), Some("x".to_string())]
        );
    }

    #[test]
    fn matching_is_case_insensitive_by_default() {
        let pattern = compile_pattern("/About", prefix_options()).unwrap();
        assert!(pattern.match_path("/about").is_some());

        let sensitive = compile_pattern(
            "/About",
            CompileOptions {
                case_sensitive: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(sensitive.match_path("/about").is_none());
    }

    #[test]
    fn reverse_skips_absent_optional_with_its_prefix() {
        let pattern = compile_pattern("/posts/:page?", prefix_options()).unwrap();
        assert_eq!(pattern.reverse(&RouteParams::new()).unwrap(), "/posts");
    }

    #[test]
    fn reverse_rejects_value_that_would_not_match() {
        let pattern = compile_pattern("/users/:id(\\d+)", prefix_options()).unwrap();
        let mut params = RouteParams::new();
        params.insert("id".to_string(), "abc".to_string());
        match pattern.reverse(&params) {
            Err(ReverseError::ParameterMismatch { name, .. }) => assert_eq!(name, "id"),
            other => panic!("expected mismatch, got {other:?}"),
        }
    }
}
