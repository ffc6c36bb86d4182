//! # twinql-core
//!
//! Building blocks shared by the twinql query builder:
//!
//! - [`terms`] - keyword, operator and scalar function tables
//! - [`format`] - quoting and escaping of values in query text
//! - [`literal`] - scalar literals for comparisons
//! - [`clause`] - FROM/JOIN/SELECT/COUNT/WHERE clause holders
//! - [`error`] - the error taxonomy raised during query construction

pub mod clause;
pub mod error;
pub mod format;
pub mod literal;
pub mod terms;

pub use clause::{
    Collection, CountClause, FromClause, JoinClause, Projection, SelectClause, WhereClause,
};
pub use error::{QueryError, Result};
pub use literal::Literal;
pub use terms::{Arity, ComparisonOperator, Connective, MembershipKind, ScalarFunction};
