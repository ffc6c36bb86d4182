//! Stage and track markers.
//!
//! Zero-sized types that parameterize [`Query`](super::Query). The stage
//! decides which operations are callable; the track decides whether JOIN
//! exists at all.

use twinql_core::Collection;

mod sealed {
    pub trait Sealed {}
}

/// A position in the query grammar
pub trait Stage: sealed::Sealed {
    const NAME: &'static str;
}

/// Stages where the projection has not been chosen yet: `select`, `top`
/// and `count` are available.
pub trait Open: Stage {}

/// Stages whose accumulated clauses form a complete query.
pub trait Terminal: Stage {}

/// The root collection a query reads from
pub trait Track: sealed::Sealed {
    const COLLECTION: Collection;
}

/// FROM and JOIN fixed, nothing else chosen
#[derive(Debug, Clone, Copy)]
pub struct Base;

/// WHERE attached
#[derive(Debug, Clone, Copy)]
pub struct Filtered;

/// Explicit projection chosen
#[derive(Debug, Clone, Copy)]
pub struct Selected;

/// Record cap set on the default projection
#[derive(Debug, Clone, Copy)]
pub struct Topped;

/// Projection replaced by a record count
#[derive(Debug, Clone, Copy)]
pub struct Counted;

/// `FROM DIGITALTWINS`; JOINs allowed
#[derive(Debug, Clone, Copy)]
pub struct Twins;

/// `FROM RELATIONSHIPS`; no JOINs
#[derive(Debug, Clone, Copy)]
pub struct Relationships;

macro_rules! stages {
    ($($ty:ident),*) => {
        $(
            impl sealed::Sealed for $ty {}
            impl Stage for $ty {
                const NAME: &'static str = stringify!($ty);
            }
        )*
    };
}

stages!(Base, Filtered, Selected, Topped, Counted);

impl Open for Base {}
impl Open for Filtered {}

impl Terminal for Selected {}
impl Terminal for Topped {}
impl Terminal for Counted {}

impl sealed::Sealed for Twins {}
impl Track for Twins {
    const COLLECTION: Collection = Collection::DigitalTwins;
}

impl sealed::Sealed for Relationships {}
impl Track for Relationships {
    const COLLECTION: Collection = Collection::Relationships;
}
