//! Clause holders.
//!
//! Plain data carriers for the clauses of a query. Each renders itself
//! through `Display`; the builder decides the order they appear in.

use crate::terms;
use std::fmt;

/// Collection a query reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    DigitalTwins,
    Relationships,
}

impl Collection {
    pub fn token(self) -> &'static str {
        match self {
            Collection::DigitalTwins => terms::DIGITAL_TWINS,
            Collection::Relationships => terms::RELATIONSHIPS,
        }
    }
}

/// `FROM DIGITALTWINS twin`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromClause {
    pub collection: Collection,
    pub alias: String,
}

impl FromClause {
    pub fn new(collection: Collection, alias: impl Into<String>) -> Self {
        Self {
            collection,
            alias: alias.into(),
        }
    }
}

impl fmt::Display for FromClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            terms::FROM,
            self.collection.token(),
            self.alias
        )
    }
}

/// `JOIN room RELATED twin.isLocatedIn rel`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinClause {
    /// Alias bound to the joined twin
    pub alias: String,
    /// Alias of the twin the relationship starts from
    pub source_alias: String,
    /// Relationship name as declared on the source model
    pub relationship: String,
    /// Optional alias bound to the relationship itself
    pub relationship_alias: Option<String>,
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}.{}",
            terms::JOIN,
            self.alias,
            terms::RELATED,
            self.source_alias,
            self.relationship
        )?;
        if let Some(rel) = &self.relationship_alias {
            write!(f, " {}", rel)?;
        }
        Ok(())
    }
}

/// `SELECT [TOP(n)] a, b`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectClause {
    pub aliases: Vec<String>,
    pub top: Option<u16>,
}

impl SelectClause {
    pub fn new(aliases: Vec<String>) -> Self {
        Self { aliases, top: None }
    }
}

impl fmt::Display for SelectClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(terms::SELECT)?;
        if let Some(n) = self.top {
            write!(f, " {}({})", terms::TOP, n)?;
        }
        write!(f, " {}", self.aliases.join(", "))
    }
}

/// `SELECT COUNT()`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountClause;

impl fmt::Display for CountClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", terms::SELECT, terms::COUNT)
    }
}

/// What the query returns: a projection or a record count
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    Select(SelectClause),
    Count(CountClause),
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::Select(select) => fmt::Display::fmt(select, f),
            Projection::Count(count) => fmt::Display::fmt(count, f),
        }
    }
}

/// `WHERE <condition>`
///
/// Generic over the condition so this crate stays independent of the
/// condition tree that renders into it.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause<C> {
    pub condition: C,
}

impl<C> WhereClause<C> {
    pub fn new(condition: C) -> Self {
        Self { condition }
    }
}

impl<C: fmt::Display> fmt::Display for WhereClause<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", terms::WHERE, self.condition)
    }
}
