//! Query language vocabulary.
//!
//! Fixed tables mapping keywords, operators and scalar functions to the
//! literal tokens the query engine expects. Pure lookup, no state.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const SELECT: &str = "SELECT";
pub const FROM: &str = "FROM";
pub const DIGITAL_TWINS: &str = "DIGITALTWINS";
pub const RELATIONSHIPS: &str = "RELATIONSHIPS";
pub const JOIN: &str = "JOIN";
pub const RELATED: &str = "RELATED";
pub const WHERE: &str = "WHERE";
pub const TOP: &str = "TOP";
pub const COUNT: &str = "COUNT()";
pub const AND: &str = "AND";
pub const OR: &str = "OR";
pub const NOT: &str = "NOT";
pub const IN: &str = "IN";
pub const NOT_IN: &str = "NIN";
pub const IS_OF_MODEL: &str = "IS_OF_MODEL";

/// Words the engine reserves; none of them may be used as an alias.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "ALL",
    "AND",
    "AS",
    "ASC",
    "AVG",
    "BY",
    "COUNT",
    "DESC",
    "DEVICES",
    "DIGITALTWINS",
    "DISTINCT",
    "EDGES",
    "EVERY",
    "FALSE",
    "FETCH",
    "FIRST",
    "FROM",
    "GROUP",
    "IN",
    "INNER",
    "IS_BOOL",
    "IS_DEFINED",
    "IS_NULL",
    "IS_NUMBER",
    "IS_OBJECT",
    "IS_OF_MODEL",
    "IS_PRIMITIVE",
    "IS_STRING",
    "JOIN",
    "LAST",
    "LEFT",
    "LIMIT",
    "MATCH",
    "MAX",
    "MIN",
    "NIN",
    "NOT",
    "NULL",
    "OFFSET",
    "ON",
    "OR",
    "ORDER",
    "OUTER",
    "RELATED",
    "RELATIONSHIPS",
    "RIGHT",
    "SELECT",
    "SOME",
    "SUM",
    "TOP",
    "TRUE",
    "UNDEFINED",
    "WHERE",
];

/// Case-insensitive lookup in [`RESERVED_KEYWORDS`].
pub fn is_reserved(word: &str) -> bool {
    RESERVED_KEYWORDS
        .iter()
        .any(|kw| kw.eq_ignore_ascii_case(word))
}

/// Binary comparison operators usable in a WHERE predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
}

impl ComparisonOperator {
    pub fn token(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Set membership test: `IN` or its negation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipKind {
    In,
    NotIn,
}

impl MembershipKind {
    pub fn token(self) -> &'static str {
        match self {
            Self::In => IN,
            Self::NotIn => NOT_IN,
        }
    }
}

impl fmt::Display for MembershipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Logical connective joining the children of a compound condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    pub fn token(self) -> &'static str {
        match self {
            Self::And => AND,
            Self::Or => OR,
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Number of operands a scalar function takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// `FN(alias.column)`
    Unary,
    /// `FN(alias.column, 'value')`
    Binary,
}

/// Scalar functions the engine evaluates against a single property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarFunction {
    IsBool,
    IsDefined,
    IsNull,
    IsNumber,
    IsObject,
    IsPrimitive,
    IsString,
    StartsWith,
    EndsWith,
    Contains,
}

impl ScalarFunction {
    pub fn name(self) -> &'static str {
        match self {
            Self::IsBool => "IS_BOOL",
            Self::IsDefined => "IS_DEFINED",
            Self::IsNull => "IS_NULL",
            Self::IsNumber => "IS_NUMBER",
            Self::IsObject => "IS_OBJECT",
            Self::IsPrimitive => "IS_PRIMITIVE",
            Self::IsString => "IS_STRING",
            Self::StartsWith => "STARTSWITH",
            Self::EndsWith => "ENDSWITH",
            Self::Contains => "CONTAINS",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Self::StartsWith | Self::EndsWith | Self::Contains => Arity::Binary,
            _ => Arity::Unary,
        }
    }

    pub fn is_binary(self) -> bool {
        self.arity() == Arity::Binary
    }
}

impl fmt::Display for ScalarFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ComparisonOperator::Equal, "=")]
    #[test_case(ComparisonOperator::NotEqual, "!=")]
    #[test_case(ComparisonOperator::GreaterThan, ">")]
    #[test_case(ComparisonOperator::GreaterOrEqual, ">=")]
    #[test_case(ComparisonOperator::LessThan, "<")]
    #[test_case(ComparisonOperator::LessOrEqual, "<=")]
    fn test_comparison_tokens(op: ComparisonOperator, expected: &str) {
        assert_eq!(op.to_string(), expected);
    }

    #[test_case(ScalarFunction::IsDefined, "IS_DEFINED", Arity::Unary)]
    #[test_case(ScalarFunction::IsString, "IS_STRING", Arity::Unary)]
    #[test_case(ScalarFunction::StartsWith, "STARTSWITH", Arity::Binary)]
    #[test_case(ScalarFunction::EndsWith, "ENDSWITH", Arity::Binary)]
    #[test_case(ScalarFunction::Contains, "CONTAINS", Arity::Binary)]
    fn test_scalar_function_table(function: ScalarFunction, name: &str, arity: Arity) {
        assert_eq!(function.name(), name);
        assert_eq!(function.arity(), arity);
    }

    #[test]
    fn test_membership_tokens() {
        assert_eq!(MembershipKind::In.to_string(), "IN");
        assert_eq!(MembershipKind::NotIn.to_string(), "NIN");
    }

    #[test]
    fn test_reserved_is_case_insensitive() {
        assert!(is_reserved("select"));
        assert!(is_reserved("Join"));
        assert!(!is_reserved("twin"));
    }

    #[test]
    fn test_operator_from_config_name() {
        let op: ComparisonOperator = serde_json::from_str("\"greater_or_equal\"").unwrap();
        assert_eq!(op, ComparisonOperator::GreaterOrEqual);

        let function: ScalarFunction = serde_json::from_str("\"starts_with\"").unwrap();
        assert!(function.is_binary());
    }
}
