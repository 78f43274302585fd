//! Native client boundary.
//!
//! The vendor client library is reached through these traits so the
//! adapter owns an explicit, injectable handle instead of a
//! process-wide library singleton. Re-initialization after a process
//! fork is the embedding environment's lifecycle hook: it constructs
//! a fresh connection and hands it to a fresh adapter.
//!
//! The traits are deliberately narrow: prepare/execute/fetch for
//! statements, execute-immediate for session options, commit and
//! rollback. The adapter serializes all calls on one connection (see
//! [`crate::adapter`]); implementations do not need internal locking.

use async_trait::async_trait;

use crate::types::BindValue;

/// A failure reported by the native client, tagged with its SQLCODE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeError {
    /// Negative SQLCODE.
    pub code: i32,
    /// Engine-supplied message.
    pub message: String,
}

impl NativeError {
    /// Creates a native error.
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for NativeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SQLCODE {}: {}", self.code, self.message)
    }
}

impl std::error::Error for NativeError {}

/// One fetched cell in its wire form. The column's type tag (see
/// [`crate::types::native_type`]) determines how it decodes.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    /// SQL NULL.
    Null,
    /// 32-bit integer buffer.
    I32(i32),
    /// 64-bit integer buffer.
    I64(i64),
    /// Double buffer.
    Double(f64),
    /// Character buffer.
    Text(String),
    /// Binary buffer.
    Bytes(Vec<u8>),
}

/// Result column metadata, read once per statement before fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeColumn {
    /// Column name.
    pub name: String,
    /// Wire-protocol type tag.
    pub native_type: u32,
}

/// The outcome of executing a prepared statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NativeResult {
    /// Column metadata; empty for statements that produce no rows.
    pub columns: Vec<NativeColumn>,
    /// Fetched rows, one wire value per column.
    pub rows: Vec<Vec<NativeValue>>,
    /// Rows affected by a data-modifying statement.
    pub affected_rows: u64,
}

/// A prepared statement held by the native client.
#[async_trait]
pub trait NativeStatement: Send {
    /// Executes the statement with the given bind parameters and, for
    /// row-producing statements, fetches all rows.
    async fn execute(&mut self, binds: &[BindValue]) -> Result<NativeResult, NativeError>;

    /// Releases the prepared statement resource. Always called,
    /// success or failure, before the adapter reports the outcome.
    async fn close(&mut self);
}

/// A native connection handle.
#[async_trait]
pub trait NativeConnection: Send {
    /// The statement type this connection prepares.
    type Stmt: NativeStatement;

    /// Prepares a statement.
    async fn prepare(&mut self, sql: &str) -> Result<Self::Stmt, NativeError>;

    /// Executes a statement without binds or result, used for session
    /// options and transaction control verbs.
    async fn execute_immediate(&mut self, sql: &str) -> Result<(), NativeError>;

    /// Commits the current transaction.
    async fn commit(&mut self) -> Result<(), NativeError>;

    /// Rolls back the current transaction.
    async fn rollback(&mut self) -> Result<(), NativeError>;
}
