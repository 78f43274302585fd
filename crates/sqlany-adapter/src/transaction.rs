//! Transaction and isolation-level state.
//!
//! A connection is either auto-committing (every successful statement
//! commits, every failed one rolls back) or inside one explicit
//! transaction. An isolated transaction additionally remembers the
//! isolation level that was active when it began, so the level can be
//! restored whether the transaction commits or rolls back. Only one
//! level is tracked; transactions do not nest.

/// SQL standard transaction isolation levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IsolationLevel {
    /// Allows dirty reads.
    ReadUncommitted,
    /// Prevents dirty reads; the engine default.
    #[default]
    ReadCommitted,
    /// Additionally prevents non-repeatable reads.
    RepeatableRead,
    /// Full serializability.
    Serializable,
}

impl IsolationLevel {
    /// Returns the SQL spelling used in
    /// `SET TRANSACTION ISOLATION LEVEL`.
    #[must_use]
    pub const fn to_sql(self) -> &'static str {
        match self {
            Self::ReadUncommitted => "READ UNCOMMITTED",
            Self::ReadCommitted => "READ COMMITTED",
            Self::RepeatableRead => "REPEATABLE READ",
            Self::Serializable => "SERIALIZABLE",
        }
    }

    /// Decodes the digit reported by
    /// `CONNECTION_PROPERTY('isolation_level')`.
    #[must_use]
    pub fn from_property(value: &str) -> Option<Self> {
        match value.trim() {
            "0" => Some(Self::ReadUncommitted),
            "1" => Some(Self::ReadCommitted),
            "2" => Some(Self::RepeatableRead),
            "3" => Some(Self::Serializable),
            _ => None,
        }
    }
}

/// Connection-local transaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionState {
    /// Each statement commits or rolls back on its own.
    #[default]
    AutoCommit,
    /// An explicit transaction is open.
    InTransaction {
        /// The isolation level read before an isolated begin, to be
        /// restored when the transaction ends. `None` for plain
        /// begins or when the level was not readable.
        saved_isolation: Option<IsolationLevel>,
    },
}

impl TransactionState {
    /// Returns `true` when no explicit transaction is open.
    #[must_use]
    pub const fn is_auto_commit(self) -> bool {
        matches!(self, Self::AutoCommit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isolation_sql_spelling() {
        assert_eq!(IsolationLevel::ReadUncommitted.to_sql(), "READ UNCOMMITTED");
        assert_eq!(IsolationLevel::Serializable.to_sql(), "SERIALIZABLE");
    }

    #[test]
    fn test_isolation_from_property_digits() {
        assert_eq!(
            IsolationLevel::from_property("0"),
            Some(IsolationLevel::ReadUncommitted)
        );
        assert_eq!(
            IsolationLevel::from_property("2"),
            Some(IsolationLevel::RepeatableRead)
        );
        assert_eq!(
            IsolationLevel::from_property(" 3 "),
            Some(IsolationLevel::Serializable)
        );
        assert_eq!(IsolationLevel::from_property("9"), None);
        assert_eq!(IsolationLevel::from_property("serializable"), None);
    }

    #[test]
    fn test_state_default_is_auto_commit() {
        assert!(TransactionState::default().is_auto_commit());
        assert!(!TransactionState::InTransaction {
            saved_isolation: None
        }
        .is_auto_commit());
    }
}
