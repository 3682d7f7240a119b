#[derive(Debug, Clone, PartialEq)]
pub struct PatternAst {
    pub nodes: Vec<PatternNode>,
}

impl PatternAst {
    pub fn new(nodes: Vec<PatternNode>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parameters(&self) -> impl Iterator<Item = &ParameterNode> {
        self.nodes.iter().filter_map(|node| match node {
            PatternNode::Parameter(param) => Some(param),
            PatternNode::Literal(_) => None,
        })
    }

    /// True when the template text ends with a `/` literal.
    pub fn ends_with_delimiter(&self) -> bool {
        matches!(self.nodes.last(), Some(PatternNode::Literal(text)) if text.ends_with('/'))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatternNode {
    Literal(String),
    Parameter(ParameterNode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// `:name`
    Named,
    /// `(re)`, named by position
    Positional,
    /// bare `*`
    Wildcard,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterNode {
    pub name: String,
    pub prefix: String,
    pub constraint: Option<ParameterConstraint>,
    pub quantifier: Quantifier,
    pub kind: ParamKind,
}

impl ParameterNode {
    pub fn new(
        name: String,
        prefix: String,
        constraint: Option<ParameterConstraint>,
        quantifier: Quantifier,
        kind: ParamKind,
    ) -> Self {
        Self {
            name,
            prefix,
            constraint,
            quantifier,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterConstraint {
    pub raw: String,
}

impl ParameterConstraint {
    pub fn new(raw: String) -> Self {
        Self { raw }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    One,
    ZeroOrOne,
    ZeroOrMore,
    OneOrMore,
}

impl Quantifier {
    pub fn from_modifier(ch: Option<char>) -> Option<Self> {
        match ch {
            Some('?') => Some(Self::ZeroOrOne),
            Some('*') => Some(Self::ZeroOrMore),
            Some('+') => Some(Self::OneOrMore),
            _ => None,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::ZeroOrOne | Self::ZeroOrMore)
    }

    pub fn is_repeating(&self) -> bool {
        matches!(self, Self::ZeroOrMore | Self::OneOrMore)
    }
}
