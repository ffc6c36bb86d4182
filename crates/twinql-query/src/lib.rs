//! # twinql-query
//!
//! Compile-time checked builder for digital twins graph queries.
//!
//! Queries are assembled in grammar order (FROM → JOIN* → WHERE? →
//! SELECT/TOP/COUNT). Each stage is a distinct type exposing only the
//! operations that are legal next, and alias references are checked
//! against the FROM/JOIN scope at the call that introduces them.
//!
//! ## Quick Start
//!
//! ```
//! use twinql_query::{Condition, QueryBuilder, ScalarFunction};
//!
//! let builder = QueryBuilder::new();
//! let query = builder
//!     .from_twins()
//!     .where_(
//!         Condition::is_of_model(None, "dtmi:com:example:Room;2")?
//!             .and(Condition::scalar("twin", "name", ScalarFunction::StartsWith, Some("Lab"))?),
//!     )?
//!     .count();
//!
//! assert_eq!(
//!     query.render(),
//!     "SELECT COUNT() FROM DIGITALTWINS twin \
//!      WHERE (IS_OF_MODEL('dtmi:com:example:Room;1') AND STARTSWITH(twin.name, 'Lab'))"
//! );
//! # Ok::<(), twinql_query::QueryError>(())
//! ```
//!
//! ## Modules
//!
//! - [`condition`] - WHERE expression tree
//! - [`builder`] - stage types and transitions
//! - [`alias`] - alias scope and identifier rules
//! - [`config`] - builder configuration

#![warn(clippy::all)]

pub mod alias;
pub mod builder;
pub mod condition;
pub mod config;

pub use alias::AliasScope;
pub use builder::{
    Base, Counted, Filtered, Query, QueryBuilder, Relationships, Selected, Topped, Twins,
};
pub use condition::{Compound, Condition};
pub use config::QueryConfig;

pub use twinql_core::{
    ComparisonOperator, Connective, Literal, MembershipKind, QueryError, Result, ScalarFunction,
};
