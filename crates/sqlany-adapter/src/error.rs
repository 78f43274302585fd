//! Error types for the adapter.
//!
//! Native SQL Anywhere errors carry a negative SQLCODE. The executor
//! translates every native failure through [`translate_native_error`]
//! before it leaves the crate; no raw code is surfaced unmapped.

use crate::client::NativeError;

/// SQLCODE for "database not found".
pub const SQLE_DATABASE_NOT_FOUND: i32 = -83;
/// SQLCODE for a foreign key constraint violation.
pub const SQLE_INVALID_FOREIGN_KEY: i32 = -194;
/// SQLCODE for a NOT NULL constraint violation.
pub const SQLE_NOT_NULL_VIOLATION: i32 = -195;
/// SQLCODE for a uniqueness constraint violation.
pub const SQLE_INDEX_NOT_UNIQUE: i32 = -196;
/// SQLCODE for a deadlock.
pub const SQLE_DEADLOCK: i32 = -306;

/// Errors raised by the SQL Anywhere adapter.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// The target database does not exist.
    #[error("database not found: {message}")]
    NoDatabase {
        /// Native error message.
        message: String,
    },

    /// A foreign key constraint was violated.
    #[error("invalid foreign key: {message}")]
    InvalidForeignKey {
        /// Native error message.
        message: String,
    },

    /// A NOT NULL constraint was violated.
    #[error("not-null constraint violated: {message}")]
    NotNullViolation {
        /// Native error message.
        message: String,
    },

    /// A uniqueness constraint was violated.
    #[error("uniqueness constraint violated: {message}")]
    UniqueViolation {
        /// Native error message.
        message: String,
    },

    /// The engine detected a deadlock.
    #[error("deadlock detected: {message}")]
    Deadlock {
        /// Native error message.
        message: String,
    },

    /// More bind parameters were supplied than the protocol allows.
    /// Detected before any native call is made.
    #[error("{count} bind parameters exceed the limit of {limit}")]
    BindLimitExceeded {
        /// Number of parameters supplied.
        count: usize,
        /// The protocol limit.
        limit: usize,
    },

    /// An owner-qualified name could not be parsed.
    #[error("malformed owner-qualified name: '{0}'")]
    MalformedIdentifier(String),

    /// A second transaction was begun while one is already open.
    /// Only one transaction (and one saved isolation level) is
    /// tracked per connection.
    #[error("a transaction is already open on this connection")]
    NestedTransaction,

    /// Generic statement failure, carrying the native SQLCODE and the
    /// offending SQL when available.
    #[error("statement failed: {message}")]
    StatementInvalid {
        /// Native error message.
        message: String,
        /// Native SQLCODE, if the failure came from the engine.
        code: Option<i32>,
        /// The SQL text that failed, if available.
        sql: Option<String>,
    },
}

/// Result type for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Maps a native error to the adapter taxonomy.
///
/// Unmapped SQLCODEs fall through to [`AdapterError::StatementInvalid`]
/// with the original code, message and SQL text preserved.
#[must_use]
pub fn translate_native_error(err: NativeError, sql: Option<&str>) -> AdapterError {
    let message = err.message;
    match err.code {
        SQLE_DATABASE_NOT_FOUND => AdapterError::NoDatabase { message },
        SQLE_INVALID_FOREIGN_KEY => AdapterError::InvalidForeignKey { message },
        SQLE_NOT_NULL_VIOLATION => AdapterError::NotNullViolation { message },
        SQLE_INDEX_NOT_UNIQUE => AdapterError::UniqueViolation { message },
        SQLE_DEADLOCK => AdapterError::Deadlock { message },
        code => AdapterError::StatementInvalid {
            message,
            code: Some(code),
            sql: sql.map(String::from),
        },
    }
}
