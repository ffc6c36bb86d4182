//! Type-state query builder.
//!
//! A query moves through stages encoded in the type of [`Query`]:
//!
//! ```text
//! QueryBuilder
//!   ↓ from_twins() / from_relationships()
//! Base ──join()──┐          (join only on the Twins track)
//!   │ ←──────────┘
//!   ├─ where_() → Filtered
//!   │               ├─ select() → Selected ─ top() ⟲
//!   │               ├─ top()    → Topped   ─ top() ⟲, select() → Selected
//!   │               └─ count()  → Counted
//!   ├─ select() / top() / count()   (same as Filtered)
//! ```
//!
//! Only `Selected`, `Topped` and `Counted` render. Transitions never modify
//! the stage they are called on; each returns a new value, so two calls on
//! the same stage produce independent siblings.
//!
//! ```
//! use twinql_query::{ComparisonOperator, Condition, QueryBuilder};
//!
//! let query = QueryBuilder::new()
//!     .from_twins()
//!     .join("room", "twin", "contains")?
//!     .where_(Condition::compare("room", "temperature", ComparisonOperator::GreaterThan, 21)?)?
//!     .select(["room"])?
//!     .top(10);
//!
//! assert_eq!(
//!     query.render(),
//!     "SELECT TOP(10) room FROM DIGITALTWINS twin JOIN room RELATED twin.contains \
//!      WHERE room.temperature > 21"
//! );
//! # Ok::<(), twinql_query::QueryError>(())
//! ```
//!
//! Relationship queries have no JOIN:
//!
//! ```compile_fail
//! use twinql_query::QueryBuilder;
//!
//! let _ = QueryBuilder::new()
//!     .from_relationships()
//!     .join("room", "relationship", "contains");
//! ```
//!
//! A count cannot be projected afterwards:
//!
//! ```compile_fail
//! use twinql_query::QueryBuilder;
//!
//! let _ = QueryBuilder::new().from_twins().count().select(["twin"]);
//! ```
//!
//! Open stages do not render:
//!
//! ```compile_fail
//! use twinql_query::QueryBuilder;
//!
//! let _ = QueryBuilder::new().from_twins().render();
//! ```

mod stage;

pub use stage::{
    Base, Counted, Filtered, Open, Relationships, Selected, Stage, Terminal, Topped, Track, Twins,
};

use crate::alias::{validate_alias, AliasScope};
use crate::condition::Condition;
use crate::config::QueryConfig;
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;
use twinql_core::error::require_non_blank;
use twinql_core::{
    CountClause, FromClause, JoinClause, Projection, QueryError, Result, SelectClause,
    WhereClause,
};

/// Entry point: creates queries rooted on a collection.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    config: QueryConfig,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder using `config`, which is validated first.
    pub fn with_config(config: QueryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// `FROM DIGITALTWINS <twin_alias>`
    pub fn from_twins(&self) -> Query<Base, Twins> {
        Query::root(&self.config.twin_alias, self.config.log_rendered)
    }

    /// `FROM DIGITALTWINS <alias>`
    pub fn from_twins_as(&self, alias: &str) -> Result<Query<Base, Twins>> {
        validate_alias("alias", alias)?;
        Ok(Query::root(alias, self.config.log_rendered))
    }

    /// `FROM RELATIONSHIPS <relationship_alias>`
    pub fn from_relationships(&self) -> Query<Base, Relationships> {
        Query::root(&self.config.relationship_alias, self.config.log_rendered)
    }

    /// `FROM RELATIONSHIPS <alias>`
    pub fn from_relationships_as(&self, alias: &str) -> Result<Query<Base, Relationships>> {
        validate_alias("alias", alias)?;
        Ok(Query::root(alias, self.config.log_rendered))
    }
}

/// Clauses accumulated so far
#[derive(Debug, Clone)]
struct QueryState {
    root_alias: String,
    scope: AliasScope,
    projection: Projection,
    from: FromClause,
    joins: Vec<JoinClause>,
    where_clause: Option<WhereClause<Condition>>,
    log_rendered: bool,
}

impl QueryState {
    fn default_projection(&self, top: Option<u16>) -> Projection {
        Projection::Select(SelectClause {
            aliases: vec![self.root_alias.clone()],
            top,
        })
    }

    /// Every projected entry must start with an alias in scope.
    /// `room.name` is checked as `room`.
    fn check_projection(&self, entries: &[String]) -> Result<()> {
        for entry in entries {
            let alias = entry.split('.').next().unwrap_or_default();
            self.scope.require(alias)?;
        }
        Ok(())
    }

    fn top(&self) -> Option<u16> {
        match &self.projection {
            Projection::Select(select) => select.top,
            Projection::Count(_) => None,
        }
    }
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.projection, self.from)?;
        for join in &self.joins {
            write!(f, " {}", join)?;
        }
        if let Some(where_clause) = &self.where_clause {
            write!(f, " {}", where_clause)?;
        }
        Ok(())
    }
}

/// A query at stage `S` on track `T`
pub struct Query<S, T> {
    state: QueryState,
    _stage: PhantomData<fn() -> (S, T)>,
}

impl<S, T> Clone for Query<S, T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            _stage: PhantomData,
        }
    }
}

impl<S: Stage, T: Track> fmt::Debug for Query<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("stage", &S::NAME)
            .field("state", &self.state)
            .finish()
    }
}

impl<T: Track> Query<Base, T> {
    fn root(alias: &str, log_rendered: bool) -> Self {
        debug!("Starting query from {} {}", T::COLLECTION.token(), alias);
        let state = QueryState {
            root_alias: alias.to_string(),
            scope: AliasScope::new(alias),
            projection: Projection::Select(SelectClause::new(vec![alias.to_string()])),
            from: FromClause::new(T::COLLECTION, alias),
            joins: Vec::new(),
            where_clause: None,
            log_rendered,
        };
        Self {
            state,
            _stage: PhantomData,
        }
    }

    /// Attach a WHERE clause.
    ///
    /// Every alias referenced anywhere in `condition` must be in scope;
    /// otherwise fails with [`QueryError::UnknownAlias`].
    pub fn where_(&self, condition: Condition) -> Result<Query<Filtered, T>> {
        for alias in condition.aliases() {
            self.state.scope.require(alias)?;
        }

        let mut state = self.state.clone();
        state.where_clause = Some(WhereClause::new(condition));
        Ok(Self::advance(state))
    }
}

impl Query<Base, Twins> {
    /// `JOIN <alias> RELATED <source>.<relationship>`
    pub fn join(&self, alias: &str, source: &str, relationship: &str) -> Result<Self> {
        self.join_clause(alias, source, relationship, None)
    }

    /// `JOIN <alias> RELATED <source>.<relationship> <relationship_alias>`
    ///
    /// Both `alias` and `relationship_alias` enter the scope.
    pub fn join_as(
        &self,
        alias: &str,
        source: &str,
        relationship: &str,
        relationship_alias: &str,
    ) -> Result<Self> {
        self.join_clause(alias, source, relationship, Some(relationship_alias))
    }

    fn join_clause(
        &self,
        alias: &str,
        source: &str,
        relationship: &str,
        relationship_alias: Option<&str>,
    ) -> Result<Self> {
        require_non_blank("relationship", relationship)?;
        self.state.scope.require(source)?;

        let mut state = self.state.clone();
        state.scope.introduce("alias", alias)?;
        if let Some(rel) = relationship_alias {
            state.scope.introduce("relationship_alias", rel)?;
        }
        state.joins.push(JoinClause {
            alias: alias.to_string(),
            source_alias: source.to_string(),
            relationship: relationship.to_string(),
            relationship_alias: relationship_alias.map(str::to_string),
        });

        debug!("Joined {} via {}.{}", alias, source, relationship);
        Ok(Self {
            state,
            _stage: PhantomData,
        })
    }
}

impl<S: Open, T: Track> Query<S, T> {
    /// Project the given aliases, replacing the default projection.
    ///
    /// Blank entries are dropped; others are kept verbatim. Each remaining
    /// entry (or its alias part, for `alias.property`) must be in scope. Fails with
    /// [`QueryError::InvalidArgument`] when nothing is left to project.
    pub fn select<I, A>(&self, aliases: I) -> Result<Query<Selected, T>>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<str>,
    {
        let entries: Vec<String> = aliases
            .into_iter()
            .filter(|a| !a.as_ref().trim().is_empty())
            .map(|a| a.as_ref().to_string())
            .collect();
        if entries.is_empty() {
            return Err(QueryError::invalid_argument(
                "aliases",
                "at least one non-blank alias is required",
            ));
        }
        self.state.check_projection(&entries)?;

        let mut state = self.state.clone();
        state.projection = Projection::Select(SelectClause::new(entries));
        Ok(Self::advance(state))
    }

    /// Cap the default projection at `n` records. `TOP(0)` is allowed.
    pub fn top(&self, n: u16) -> Query<Topped, T> {
        let mut state = self.state.clone();
        state.projection = state.default_projection(Some(n));
        Self::advance(state)
    }

    /// Replace the projection with `COUNT()`.
    pub fn count(&self) -> Query<Counted, T> {
        let mut state = self.state.clone();
        state.projection = Projection::Count(CountClause);
        Self::advance(state)
    }
}

impl<T: Track> Query<Selected, T> {
    /// Cap the selected projection at `n` records, replacing any earlier cap.
    pub fn top(&self, n: u16) -> Self {
        let mut state = self.state.clone();
        if let Projection::Select(select) = &mut state.projection {
            select.top = Some(n);
        }
        Self {
            state,
            _stage: PhantomData,
        }
    }
}

impl<T: Track> Query<Topped, T> {
    /// Replace the record cap.
    pub fn top(&self, n: u16) -> Self {
        let mut state = self.state.clone();
        state.projection = state.default_projection(Some(n));
        Self {
            state,
            _stage: PhantomData,
        }
    }

    /// Project the given aliases, keeping the record cap.
    ///
    /// Unlike the select on an open stage, entries are taken verbatim:
    /// a blank entry is never in scope and fails with
    /// [`QueryError::UnknownAlias`].
    pub fn select<I, A>(&self, aliases: I) -> Result<Query<Selected, T>>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<str>,
    {
        let entries: Vec<String> = aliases
            .into_iter()
            .map(|a| a.as_ref().to_string())
            .collect();
        if entries.is_empty() {
            return Err(QueryError::invalid_argument(
                "aliases",
                "at least one alias is required",
            ));
        }
        self.state.check_projection(&entries)?;

        let mut state = self.state.clone();
        state.projection = Projection::Select(SelectClause {
            aliases: entries,
            top: self.state.top(),
        });
        Ok(Self::advance(state))
    }
}

impl<S: Stage, T: Track> Query<S, T> {
    fn advance<N: Stage>(state: QueryState) -> Query<N, T> {
        debug!("Query stage {} -> {}", S::NAME, N::NAME);
        Query {
            state,
            _stage: PhantomData,
        }
    }

    pub fn root_alias(&self) -> &str {
        &self.state.root_alias
    }

    /// Aliases introduced by FROM and JOIN
    pub fn scope(&self) -> &AliasScope {
        &self.state.scope
    }

    pub fn joins(&self) -> &[JoinClause] {
        &self.state.joins
    }

    /// The attached WHERE condition, if any
    pub fn condition(&self) -> Option<&Condition> {
        self.state
            .where_clause
            .as_ref()
            .map(|clause| &clause.condition)
    }

    pub fn projection(&self) -> &Projection {
        &self.state.projection
    }
}

impl<S: Terminal, T: Track> Query<S, T> {
    /// Full query text.
    pub fn render(&self) -> String {
        let text = self.state.to_string();
        if self.state.log_rendered {
            debug!("Rendered query: {}", text);
        }
        text
    }
}

impl<S: Terminal, T: Track> fmt::Display for Query<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinql_core::ComparisonOperator;

    fn eq(alias: &str, column: &str, value: &str) -> Condition {
        Condition::compare(alias, column, ComparisonOperator::Equal, value).unwrap()
    }

    #[test]
    fn test_base_scope_is_root_only() {
        let base = QueryBuilder::new().from_twins();
        assert_eq!(base.root_alias(), "twin");
        assert_eq!(base.scope().iter().collect::<Vec<_>>(), vec!["twin"]);
        assert!(base.condition().is_none());
    }

    #[test]
    fn test_select_on_base() {
        let query = QueryBuilder::new().from_twins().select(["twin"]).unwrap();
        assert_eq!(query.render(), "SELECT twin FROM DIGITALTWINS twin");
    }

    #[test]
    fn test_top_on_base_uses_default_projection() {
        let query = QueryBuilder::new().from_twins().top(5);
        assert_eq!(query.render(), "SELECT TOP(5) twin FROM DIGITALTWINS twin");
    }

    #[test]
    fn test_where_attaches_condition() {
        let filtered = QueryBuilder::new()
            .from_twins()
            .where_(eq("twin", "name", "x"))
            .unwrap();

        assert_eq!(filtered.condition(), Some(&eq("twin", "name", "x")));
        assert_eq!(
            filtered.count().render(),
            "SELECT COUNT() FROM DIGITALTWINS twin WHERE twin.name = 'x'"
        );
    }

    #[test]
    fn test_where_unknown_alias_leaves_stage_usable() {
        let base = QueryBuilder::new().from_twins();
        let err = base.where_(eq("room", "name", "x")).unwrap_err();

        assert!(matches!(err, QueryError::UnknownAlias { ref alias, .. } if alias == "room"));
        assert_eq!(base.count().render(), "SELECT COUNT() FROM DIGITALTWINS twin");
    }

    #[test]
    fn test_join_extends_scope() {
        let base = QueryBuilder::new()
            .from_twins()
            .join_as("room", "twin", "contains", "rel")
            .unwrap();

        assert_eq!(
            base.scope().iter().collect::<Vec<_>>(),
            vec!["twin", "room", "rel"]
        );
        assert_eq!(base.joins().len(), 1);
    }

    #[test]
    fn test_join_does_not_touch_parent() {
        let base = QueryBuilder::new().from_twins();
        let joined = base.join("room", "twin", "contains").unwrap();

        assert_eq!(base.scope().len(), 1);
        assert_eq!(joined.scope().len(), 2);
    }

    #[test]
    fn test_join_unknown_source() {
        let err = QueryBuilder::new()
            .from_twins()
            .join("room", "floor", "contains")
            .unwrap_err();
        assert!(matches!(err, QueryError::UnknownAlias { ref alias, .. } if alias == "floor"));
    }

    #[test]
    fn test_join_duplicate_alias() {
        let err = QueryBuilder::new()
            .from_twins()
            .join("twin", "twin", "contains")
            .unwrap_err();
        assert_eq!(
            err,
            QueryError::DuplicateAlias {
                alias: "twin".to_string()
            }
        );
    }

    #[test]
    fn test_join_relationship_alias_clash() {
        let result = QueryBuilder::new()
            .from_twins()
            .join_as("room", "twin", "contains", "room");
        assert!(matches!(result, Err(QueryError::DuplicateAlias { .. })));
    }

    #[test]
    fn test_join_blank_relationship() {
        let result = QueryBuilder::new().from_twins().join("room", "twin", " ");
        assert!(matches!(
            result,
            Err(QueryError::InvalidArgument { ref field, .. }) if field == "relationship"
        ));
    }

    #[test]
    fn test_select_property_projection() {
        let query = QueryBuilder::new()
            .from_twins()
            .select(["twin.name", "twin.$dtId"])
            .unwrap();
        assert_eq!(
            query.render(),
            "SELECT twin.name, twin.$dtId FROM DIGITALTWINS twin"
        );
    }

    #[test]
    fn test_select_all_blank_fails() {
        let result = QueryBuilder::new().from_twins().select(["", "  "]);
        assert!(matches!(result, Err(QueryError::InvalidArgument { .. })));
    }

    #[test]
    fn test_selected_top_replaces_cap() {
        let query = QueryBuilder::new()
            .from_twins()
            .select(["twin"])
            .unwrap()
            .top(3)
            .top(7);
        assert_eq!(query.render(), "SELECT TOP(7) twin FROM DIGITALTWINS twin");
    }

    #[test]
    fn test_topped_top_replaces_cap() {
        let query = QueryBuilder::new().from_twins().top(3).top(7);
        assert_eq!(query.render(), "SELECT TOP(7) twin FROM DIGITALTWINS twin");
    }

    #[test]
    fn test_select_keeps_padded_entry_verbatim() {
        let err = QueryBuilder::new()
            .from_twins()
            .select(["", " twin "])
            .unwrap_err();
        assert!(matches!(err, QueryError::UnknownAlias { ref alias, .. } if alias == " twin "));
    }

    #[test]
    fn test_topped_select_keeps_cap() {
        let query = QueryBuilder::new()
            .from_twins()
            .join("room", "twin", "contains")
            .unwrap()
            .top(2)
            .select(["room"])
            .unwrap();
        assert_eq!(
            query.render(),
            "SELECT TOP(2) room FROM DIGITALTWINS twin JOIN room RELATED twin.contains"
        );
    }

    #[test]
    fn test_topped_select_rejects_blank() {
        let result = QueryBuilder::new().from_twins().top(2).select(["twin", ""]);
        assert!(matches!(
            result,
            Err(QueryError::UnknownAlias { ref alias, .. }) if alias.is_empty()
        ));
    }

    #[test]
    fn test_render_logging_does_not_change_output() {
        let config = QueryConfig {
            log_rendered: true,
            ..QueryConfig::default()
        };
        let builder = QueryBuilder::with_config(config).unwrap();
        let query = builder.from_twins().count();
        assert_eq!(query.render(), query.to_string());
    }

    #[test]
    fn test_with_config_validates() {
        let config = QueryConfig {
            twin_alias: "from".to_string(),
            ..QueryConfig::default()
        };
        assert!(matches!(
            QueryBuilder::with_config(config),
            Err(QueryError::Config { .. })
        ));
    }

    #[test]
    fn test_debug_names_stage() {
        let query = QueryBuilder::new().from_relationships().count();
        assert!(format!("{:?}", query).contains("Counted"));
    }
}
