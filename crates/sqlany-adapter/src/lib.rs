//! # sqlany-adapter
//!
//! SQL Anywhere-specific extensions for `sqlany-core`: the dialect
//! renderer, the native type bridge, schema introspection over the
//! SYS catalogs, and the statement executor with its auto-commit and
//! isolation-level state machine.
//!
//! # How SQL Anywhere differs from other dialects
//!
//! - **Pagination**: there is no `LIMIT`/`OFFSET`. Paging is spelled
//!   `TOP n START AT m` and sits between the `SELECT` keyword and the
//!   projection list, not after the predicate clauses. `START AT` is
//!   1-based. See [`SqlAnywhereDialect`].
//! - **Forced ordering**: `TOP` is only deterministic with an
//!   `ORDER BY`, so the renderer synthesizes `ORDER BY 1` for
//!   limited queries without an explicit order.
//! - **DISTINCT with ORDER BY**: every ordering expression must also
//!   appear in the projection list. The renderer strips `ASC`/`DESC`
//!   and `NULLS FIRST`/`LAST` modifiers and appends the expressions
//!   as `alias_0`, `alias_1`, ... projections.
//! - **Boolean literals**: there are no TRUE/FALSE keywords in
//!   predicates; the renderer emits the tautologies `1=1` and `1=0`.
//! - **Owner-qualified names**: relations are referenced as
//!   `owner.table`, where either part may be double-quoted and a
//!   quoted part may itself contain `.`. See [`OwnerQualifiedName`].
//! - **Booleans in DDL**: boolean columns are `bit`, stored as
//!   `1`/`0`.
//!
//! The vendor client library is reached through the
//! [`client::NativeConnection`] trait; the adapter owns the handle
//! explicitly and serializes every statement lifecycle behind one
//! lock.

pub mod adapter;
pub mod client;
pub mod config;
pub mod ddl;
pub mod error;
pub mod name;
pub mod quoting;
pub mod schema;
pub mod transaction;
pub mod types;
pub mod visitor;

pub use adapter::{SqlAnywhereAdapter, BIND_LIMIT};
pub use config::{ConnectionConfig, CreateDatabaseOptions};
pub use error::{AdapterError, Result};
pub use name::OwnerQualifiedName;
pub use schema::{
    ColumnDescriptor, DataSourceKind, ForeignKeyDescriptor, IndexDescriptor, ReferentialAction,
};
pub use transaction::{IsolationLevel, TransactionState};
pub use visitor::SqlAnywhereDialect;
