//! WHERE condition tree.
//!
//! A closed set of predicate and combinator nodes. Nodes are plain values
//! with no knowledge of alias scope; the builder checks references when a
//! condition is attached with `where_`.
//!
//! ```
//! use twinql_query::{ComparisonOperator, Condition};
//!
//! let floor = Condition::compare("twin", "floor", ComparisonOperator::Equal, 3)?;
//! let name = Condition::compare("twin", "name", ComparisonOperator::NotEqual, "lobby")?;
//!
//! assert_eq!(
//!     floor.and(name).to_string(),
//!     "(twin.floor = 3 AND twin.name != 'lobby')"
//! );
//! # Ok::<(), twinql_query::QueryError>(())
//! ```

use std::fmt;
use std::ops;
use twinql_core::error::require_non_blank;
use twinql_core::format::{escape, qualify, quote_list};
use twinql_core::{
    terms, ComparisonOperator, Connective, Literal, MembershipKind, QueryError, Result,
    ScalarFunction,
};

/// Version every model identifier is pinned to when rendered.
const MODEL_VERSION: u32 = 1;

/// A node of the WHERE expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Compare(Comparison),
    Membership(Membership),
    Model(ModelType),
    Scalar(ScalarPredicate),
    Not(Box<Condition>),
    Compound(Compound),
}

impl Condition {
    /// `alias.column <op> value`
    pub fn compare(
        alias: impl Into<String>,
        column: impl Into<String>,
        operator: ComparisonOperator,
        value: impl Into<Literal>,
    ) -> Result<Self> {
        let column = column.into();
        require_non_blank("column", &column)?;

        let value = value.into();
        if !value.is_finite() {
            return Err(QueryError::invalid_argument(
                "value",
                format!("{} has no query representation", value),
            ));
        }

        Ok(Condition::Compare(Comparison {
            alias: alias.into(),
            column,
            operator,
            value,
        }))
    }

    /// `alias.column IN [...]` or `alias.column NIN [...]`
    pub fn membership<I, S>(
        alias: impl Into<String>,
        column: impl Into<String>,
        kind: MembershipKind,
        values: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let column = column.into();
        require_non_blank("column", &column)?;

        Ok(Condition::Membership(Membership {
            alias: alias.into(),
            column,
            kind,
            values: values.into_iter().map(Into::into).collect(),
        }))
    }

    pub fn is_in<I, S>(alias: impl Into<String>, column: impl Into<String>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::membership(alias, column, MembershipKind::In, values)
    }

    pub fn not_in<I, S>(
        alias: impl Into<String>,
        column: impl Into<String>,
        values: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::membership(alias, column, MembershipKind::NotIn, values)
    }

    /// `IS_OF_MODEL([alias, ]'model;1')`
    ///
    /// Any version embedded in `model` after the first `;` is dropped and
    /// replaced with the pinned model version. An empty alias is treated
    /// as no alias.
    pub fn is_of_model(alias: Option<&str>, model: impl Into<String>) -> Result<Self> {
        let model = model.into();
        require_non_blank("model", model.split(';').next().unwrap_or_default())?;

        Ok(Condition::Model(ModelType {
            alias: alias.filter(|a| !a.is_empty()).map(str::to_string),
            model,
        }))
    }

    /// `FN(alias.column)` or `FN(alias.column, 'value')`
    ///
    /// Unary functions ignore `value`. Binary functions render a missing
    /// value as an empty string literal.
    pub fn scalar(
        alias: impl Into<String>,
        column: impl Into<String>,
        function: ScalarFunction,
        value: Option<&str>,
    ) -> Result<Self> {
        let column = column.into();
        require_non_blank("column", &column)?;

        Ok(Condition::Scalar(ScalarPredicate {
            alias: alias.into(),
            column,
            function,
            value: value.map(str::to_string),
        }))
    }

    /// `NOT <condition>`
    pub fn negate(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    /// `(<c1> AND <c2> ...)`, failing on an empty sequence.
    pub fn all<I>(conditions: I) -> Result<Self>
    where
        I: IntoIterator<Item = Condition>,
    {
        Compound::try_from_iter(Connective::And, conditions).map(Condition::Compound)
    }

    /// `(<c1> OR <c2> ...)`, failing on an empty sequence.
    pub fn any<I>(conditions: I) -> Result<Self>
    where
        I: IntoIterator<Item = Condition>,
    {
        Compound::try_from_iter(Connective::Or, conditions).map(Condition::Compound)
    }

    /// `(<self> AND <other>)`. Existing groups are nested, never merged.
    pub fn and(self, other: Condition) -> Self {
        self.combine(Connective::And, other)
    }

    /// `(<self> OR <other>)`
    pub fn or(self, other: Condition) -> Self {
        self.combine(Connective::Or, other)
    }

    fn combine(self, connective: Connective, other: Condition) -> Self {
        Condition::Compound(Compound::new(connective, self, [other]))
    }

    /// Every non-empty alias referenced anywhere in the tree, in render order.
    pub fn aliases(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_aliases(&mut out);
        out
    }

    fn collect_aliases<'a>(&'a self, out: &mut Vec<&'a str>) {
        let alias = match self {
            Condition::Compare(c) => c.alias.as_str(),
            Condition::Membership(m) => m.alias.as_str(),
            Condition::Scalar(s) => s.alias.as_str(),
            Condition::Model(m) => m.alias.as_deref().unwrap_or_default(),
            Condition::Not(inner) => return inner.collect_aliases(out),
            Condition::Compound(compound) => {
                for child in &compound.conditions {
                    child.collect_aliases(out);
                }
                return;
            }
        };
        if !alias.is_empty() {
            out.push(alias);
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Compare(c) => write!(f, "{}", c),
            Condition::Membership(m) => write!(f, "{}", m),
            Condition::Model(m) => write!(f, "{}", m),
            Condition::Scalar(s) => write!(f, "{}", s),
            Condition::Not(inner) => write!(f, "{} {}", terms::NOT, inner),
            Condition::Compound(compound) => write!(f, "{}", compound),
        }
    }
}

impl ops::Not for Condition {
    type Output = Condition;

    fn not(self) -> Condition {
        Condition::negate(self)
    }
}

/// `alias.column <op> value`
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    alias: String,
    column: String,
    operator: ComparisonOperator,
    value: Literal,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            qualify(&self.alias, &self.column),
            self.operator,
            self.value
        )
    }
}

/// `alias.column IN ['a', 'b']`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    alias: String,
    column: String,
    kind: MembershipKind,
    values: Vec<String>,
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}]",
            qualify(&self.alias, &self.column),
            self.kind,
            quote_list(&self.values)
        )
    }
}

/// `IS_OF_MODEL(alias, 'dtmi:example:Room;1')`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelType {
    alias: Option<String>,
    model: String,
}

impl ModelType {
    /// Model identifier with its version replaced by the pinned one.
    pub fn versioned_model(&self) -> String {
        let base = self.model.split(';').next().unwrap_or_default();
        format!("{};{}", base, MODEL_VERSION)
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = escape(&self.versioned_model()).into_owned();
        match &self.alias {
            Some(alias) => write!(f, "{}({}, '{}')", terms::IS_OF_MODEL, alias, model),
            None => write!(f, "{}('{}')", terms::IS_OF_MODEL, model),
        }
    }
}

/// `STARTSWITH(alias.column, 'prefix')`, `IS_DEFINED(alias.column)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarPredicate {
    alias: String,
    column: String,
    function: ScalarFunction,
    value: Option<String>,
}

impl fmt::Display for ScalarPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = qualify(&self.alias, &self.column);
        if self.function.is_binary() {
            let value = self.value.as_deref().unwrap_or_default();
            write!(f, "{}({}, '{}')", self.function, target, escape(value))
        } else {
            write!(f, "{}({})", self.function, target)
        }
    }
}

/// Parenthesized AND/OR group. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    connective: Connective,
    conditions: Vec<Condition>,
}

impl Compound {
    /// Group with at least `first`; cannot be empty by construction.
    pub fn new(
        connective: Connective,
        first: Condition,
        rest: impl IntoIterator<Item = Condition>,
    ) -> Self {
        let mut conditions = vec![first];
        conditions.extend(rest);
        Self {
            connective,
            conditions,
        }
    }

    pub fn try_from_iter(
        connective: Connective,
        conditions: impl IntoIterator<Item = Condition>,
    ) -> Result<Self> {
        let mut iter = conditions.into_iter();
        let first = iter.next().ok_or_else(|| {
            QueryError::invalid_argument(
                "conditions",
                format!("{} requires at least one condition", connective),
            )
        })?;
        Ok(Self::new(connective, first, iter))
    }

    pub fn connective(&self) -> Connective {
        self.connective
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.connective)?;
            }
            write!(f, "{}", condition)?;
        }
        f.write_str(")")
    }
}
