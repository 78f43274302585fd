//! # sqlany-core
//!
//! Engine-independent building blocks shared by SQL Anywhere adapter
//! crates:
//!
//! - [`SqlValue`]: the abstract value model a database adapter maps
//!   native wire values into and out of.
//! - [`SelectStatement`]: an abstract SELECT statement (projections,
//!   source, predicates, ordering, paging, set quantifier) that a
//!   dialect renders into engine-specific SQL text.
//! - [`Dialect`]: the seam between the abstract statement and the
//!   engine-specific renderer.
//! - [`QueryResult`]: the generic tabular result an adapter returns
//!   from statement execution.
//!
//! This crate deliberately contains no engine-specific behavior. The
//! SQL Anywhere dialect, type bridge and executor live in
//! `sqlany-adapter`.
//!
//! ## Example
//!
//! ```rust
//! use sqlany_core::select::SelectStatement;
//!
//! let stmt = SelectStatement::new()
//!     .project("id")
//!     .project("name")
//!     .from("users")
//!     .limit(10);
//!
//! assert_eq!(stmt.projections, vec!["id", "name"]);
//! assert_eq!(stmt.limit, Some(10));
//! ```

pub mod dialect;
pub mod result;
pub mod select;
pub mod value;

pub use dialect::Dialect;
pub use result::QueryResult;
pub use select::{Predicate, SelectStatement, SetQuantifier};
pub use value::{SqlValue, ToSqlValue};
