use regex::Regex;

use crate::pattern::ast::{
    ParamKind, ParameterConstraint, ParameterNode, PatternAst, PatternNode, Quantifier,
};
use crate::pattern::{PatternError, PatternResult};

pub const DEFAULT_PARAM_PATTERN: &str = "[^/]+?";
pub const WILDCARD_PATTERN: &str = ".*";

#[tracing::instrument(level = "trace", fields(pattern = %pattern))]
pub fn parse_pattern(pattern: &str) -> PatternResult<PatternAst> {
    let mut parser = PatternParser::new(pattern);
    let nodes = parser.parse_sequence()?;

    let ast = PatternAst::new(nodes);
    validate_constraints(&ast, pattern)?;
    Ok(ast)
}

struct PatternParser<'a> {
    pattern: &'a str,
    chars: Vec<(usize, char)>,
    index: usize,
    positional: usize,
}

impl<'a> PatternParser<'a> {
    fn new(pattern: &'a str) -> Self {
        let chars: Vec<(usize, char)> = pattern.char_indices().collect();
        Self {
            pattern,
            chars,
            index: 0,
            positional: 0,
        }
    }

    fn parse_sequence(&mut self) -> PatternResult<Vec<PatternNode>> {
        let mut nodes = Vec::new();
        while let Some(ch) = self.peek() {
            match ch {
                ')' => {
                    return Err(PatternError::UnexpectedClosingParenthesis {
                        pattern: self.pattern.to_string(),
                        index: self.current_byte_index(),
                    });
                }
                '?' | '+' => {
                    return Err(PatternError::DanglingQuantifier {
                        pattern: self.pattern.to_string(),
                        index: self.current_byte_index(),
                        modifier: ch,
                    });
                }
                ':' => {
                    let prefix = take_prefix(&mut nodes);
                    nodes.push(self.parse_named_parameter(prefix)?);
                }
                '(' => {
                    let prefix = take_prefix(&mut nodes);
                    nodes.push(self.parse_positional_parameter(prefix)?);
                }
                '*' => {
                    let prefix = take_prefix(&mut nodes);
                    nodes.push(self.parse_wildcard(prefix)?);
                }
                _ => {
                    let literal = self.parse_literal()?;
                    match nodes.last_mut() {
                        Some(PatternNode::Literal(existing)) => existing.push_str(&literal),
                        _ => nodes.push(PatternNode::Literal(literal)),
                    }
                }
            }
        }

        Ok(nodes)
    }

    fn parse_literal(&mut self) -> PatternResult<String> {
        let mut literal = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                ':' | '(' | ')' | '*' | '?' | '+' => {
                    break;
                }
                _ => {
                    if self.is_escape_char(ch) {
                        literal.push(self.consume_escape_char()?);
                    } else {
                        literal.push(ch);
                        self.next();
                    }
                }
            }
        }
        Ok(literal)
    }

    fn parse_named_parameter(&mut self, prefix: String) -> PatternResult<PatternNode> {
        let name_start_byte = self.current_byte_index();
        self.expect(':');
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                name.push(ch);
                self.next();
            } else {
                break;
            }
        }

        if name.is_empty() {
            return Err(PatternError::ParameterMissingName {
                pattern: self.pattern.to_string(),
                index: name_start_byte,
            });
        }

        let first = name.as_bytes()[0];
        if !(first.is_ascii_alphabetic() || first == b'_') {
            return Err(PatternError::ParameterInvalidStart {
                pattern: self.pattern.to_string(),
                name: name.clone(),
                found: first as char,
            });
        }

        let constraint = if self.peek() == Some('(') {
            Some(ParameterConstraint::new(self.parse_inline_constraint()?))
        } else {
            None
        };

        let quantifier = self.parse_quantifier();

        Ok(PatternNode::Parameter(ParameterNode::new(
            name,
            prefix,
            constraint,
            quantifier,
            ParamKind::Named,
        )))
    }

    fn parse_positional_parameter(&mut self, prefix: String) -> PatternResult<PatternNode> {
        let constraint = self.parse_inline_constraint()?;
        let quantifier = self.parse_quantifier();
        let name = self.positional.to_string();
        self.positional += 1;

        Ok(PatternNode::Parameter(ParameterNode::new(
            name,
            prefix,
            Some(ParameterConstraint::new(constraint)),
            quantifier,
            ParamKind::Positional,
        )))
    }

    fn parse_wildcard(&mut self, prefix: String) -> PatternResult<PatternNode> {
        let index = self.current_byte_index();
        self.expect('*');
        if let Some(modifier @ ('?' | '*' | '+')) = self.peek() {
            return Err(PatternError::WildcardQuantifierUnsupported {
                pattern: self.pattern.to_string(),
                index,
                modifier,
            });
        }
        let name = self.positional.to_string();
        self.positional += 1;

        Ok(PatternNode::Parameter(ParameterNode::new(
            name,
            prefix,
            Some(ParameterConstraint::new(WILDCARD_PATTERN.to_string())),
            Quantifier::One,
            ParamKind::Wildcard,
        )))
    }

    fn parse_inline_constraint(&mut self) -> PatternResult<String> {
        let start_byte = self.current_byte_index();
        self.expect('(');
        let mut depth = 1usize;
        let mut constraint = String::new();
        while let Some(ch) = self.peek() {
            if self.is_escape_char(ch) {
                let escaped = self.consume_escape_char()?;
                constraint.push('\\');
                constraint.push(escaped);
                continue;
            }
            match ch {
                '(' => {
                    depth += 1;
                    constraint.push(ch);
                    self.next();
                }
                ')' => {
                    depth -= 1;
                    self.next();
                    if depth == 0 {
                        if constraint.is_empty() {
                            return Err(PatternError::EmptyGroup {
                                pattern: self.pattern.to_string(),
                                start: start_byte,
                            });
                        }
                        return Ok(constraint);
                    }
                    constraint.push(')');
                }
                _ => {
                    constraint.push(ch);
                    self.next();
                }
            }
        }

        Err(PatternError::UnterminatedGroup {
            pattern: self.pattern.to_string(),
            start: start_byte,
        })
    }

    fn parse_quantifier(&mut self) -> Quantifier {
        match Quantifier::from_modifier(self.peek()) {
            Some(quantifier) => {
                self.next();
                quantifier
            }
            None => Quantifier::One,
        }
    }

    fn expect(&mut self, expected: char) {
        let actual = self.next();
        debug_assert_eq!(Some(expected), actual);
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).map(|(_, ch)| *ch)
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.index += 1;
        }
        ch
    }

    fn current_byte_index(&self) -> usize {
        self.chars
            .get(self.index)
            .map(|(idx, _)| *idx)
            .unwrap_or_else(|| self.pattern.len())
    }

    fn is_escape_char(&self, ch: char) -> bool {
        ch == '\\'
    }

    fn consume_escape_char(&mut self) -> PatternResult<char> {
        let escape_index = self.current_byte_index();
        self.next();
        match self.next() {
            Some(ch) => Ok(ch),
            None => Err(PatternError::LoneEscapeCharacter {
                pattern: self.pattern.to_string(),
                index: escape_index,
            }),
        }
    }
}

/// Moves a trailing `/` or `.` off the preceding literal so it belongs to the
/// parameter that follows.
fn take_prefix(nodes: &mut Vec<PatternNode>) -> String {
    let Some(PatternNode::Literal(text)) = nodes.last_mut() else {
        return String::new();
    };

    let prefix = match text.chars().last() {
        Some(ch @ ('/' | '.')) => {
            text.pop();
            ch.to_string()
        }
        _ => return String::new(),
    };

    if text.is_empty() {
        nodes.pop();
    }
    prefix
}

fn validate_constraints(ast: &PatternAst, pattern: &str) -> PatternResult<()> {
    for param in ast.parameters() {
        if let Some(constraint) = &param.constraint {
            let source = format!("^(?:{})$", constraint.raw);
            if let Err(err) = Regex::new(&source) {
                return Err(PatternError::RegexConstraintInvalid {
                    pattern: pattern.to_string(),
                    name: param.name.clone(),
                    error: err.to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_moves_onto_parameter() {
        let ast = parse_pattern("/users/:id").unwrap();
        assert_eq!(ast.nodes.len(), 2);
        assert_eq!(ast.nodes[0], PatternNode::Literal("/users".to_string()));
        match &ast.nodes[1] {
            PatternNode::Parameter(param) => {
                assert_eq!(param.name, "id");
                assert_eq!(param.prefix, "/");
            }
            other => panic!("expected parameter, got {other:?}"),
        }
    }

    #[test]
    fn positional_groups_are_numbered() {
        let ast = parse_pattern("/(\\d+)/*").unwrap();
        let names: Vec<_> = ast.parameters().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["0", "1"]);
        assert!(ast.nodes.iter().all(|n| matches!(n, PatternNode::Parameter(_))));
    }

    #[test]
    fn escaped_colon_stays_literal() {
        let ast = parse_pattern("/files/\\:id").unwrap();
        assert_eq!(ast.nodes, vec![PatternNode::Literal("/files/:id".to_string())]);
    }

    #[test]
    fn ends_with_delimiter_only_for_literal_slash() {
        assert!(parse_pattern("/").unwrap().ends_with_delimiter());
        assert!(parse_pattern("/a/").unwrap().ends_with_delimiter());
        assert!(!parse_pattern("/a/:b").unwrap().ends_with_delimiter());
    }
}
