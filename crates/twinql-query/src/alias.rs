//! Alias scope.
//!
//! The set of aliases introduced by FROM and JOIN, in introduction order.
//! Conditions and projections may only reference aliases in this set.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;
use twinql_core::terms::is_reserved;
use twinql_core::{QueryError, Result};

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Checks that `alias` can be written unquoted as an alias in query text.
pub fn validate_alias(field: &str, alias: &str) -> Result<()> {
    if alias.trim().is_empty() {
        return Err(QueryError::invalid_argument(field, "must not be blank"));
    }
    if !IDENTIFIER_RE.is_match(alias) {
        return Err(QueryError::invalid_argument(
            field,
            format!("'{}' is not a valid identifier", alias),
        ));
    }
    if is_reserved(alias) {
        return Err(QueryError::invalid_argument(
            field,
            format!("'{}' is a reserved keyword", alias),
        ));
    }
    Ok(())
}

/// Ordered set of aliases in scope for a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasScope {
    aliases: IndexSet<String>,
}

impl AliasScope {
    /// Scope holding only the root alias. The alias is not validated here.
    pub(crate) fn new(root: impl Into<String>) -> Self {
        let mut aliases = IndexSet::new();
        aliases.insert(root.into());
        Self { aliases }
    }

    /// Introduces a new alias, failing if it is malformed or already bound.
    pub(crate) fn introduce(&mut self, field: &str, alias: &str) -> Result<()> {
        validate_alias(field, alias)?;
        if self.aliases.contains(alias) {
            return Err(QueryError::DuplicateAlias {
                alias: alias.to_string(),
            });
        }
        self.aliases.insert(alias.to_string());
        Ok(())
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.contains(alias)
    }

    /// Fails with [`QueryError::UnknownAlias`] when `alias` is not in scope.
    pub fn require(&self, alias: &str) -> Result<()> {
        if self.contains(alias) {
            return Ok(());
        }
        warn!("Rejected alias '{}' (in scope: {:?})", alias, self.aliases);
        Err(QueryError::UnknownAlias {
            alias: alias.to_string(),
            allowed: self.aliases.iter().cloned().collect(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
