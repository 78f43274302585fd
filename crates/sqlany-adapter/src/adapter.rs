//! Statement execution, transactions and the high-level adapter API.
//!
//! One adapter owns one native connection. Every operation locks the
//! connection for its whole statement lifecycle, so prepare, execute,
//! close and the follow-up commit or rollback never interleave across
//! tasks. Outside an explicit transaction the adapter auto-commits:
//! each successful statement commits and each failed one rolls back.

use std::future::Future;

use sqlany_core::result::QueryResult;
use sqlany_core::value::SqlValue;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::client::{NativeConnection, NativeResult, NativeStatement};
use crate::config::{ConnectionConfig, CreateDatabaseOptions};
use crate::ddl;
use crate::error::{translate_native_error, AdapterError, Result};
use crate::quoting::{quote_identifier, Quoter};
use crate::schema::{
    self, ColumnDescriptor, DataSourceKind, ForeignKeyDescriptor, IndexDescriptor,
};
use crate::transaction::{IsolationLevel, TransactionState};
use crate::types::{decode_native_value, BindValue};
use crate::visitor::SqlAnywhereDialect;

/// Maximum number of bind parameters per statement. The wire protocol
/// counts them in a signed 16-bit field; the check runs before any
/// native call so an oversized bind set never reaches the client.
pub const BIND_LIMIT: usize = 32767;

struct Core<C: NativeConnection> {
    conn: C,
    state: TransactionState,
}

impl<C: NativeConnection> Core<C> {
    async fn run(&mut self, sql: &str, binds: &[BindValue]) -> Result<NativeResult> {
        if binds.len() > BIND_LIMIT {
            return Err(AdapterError::BindLimitExceeded {
                count: binds.len(),
                limit: BIND_LIMIT,
            });
        }

        debug!(sql = %sql, binds = binds.len(), "executing statement");

        let mut stmt = self
            .conn
            .prepare(sql)
            .await
            .map_err(|e| translate_native_error(e, Some(sql)))?;

        match stmt.execute(binds).await {
            Ok(result) => {
                stmt.close().await;
                if self.state.is_auto_commit() {
                    self.conn
                        .commit()
                        .await
                        .map_err(|e| translate_native_error(e, Some(sql)))?;
                }
                Ok(result)
            }
            Err(e) => {
                stmt.close().await;
                if self.state.is_auto_commit() {
                    if let Err(rollback_err) = self.conn.rollback().await {
                        warn!(code = rollback_err.code, "rollback after failed statement also failed");
                    }
                }
                Err(translate_native_error(e, Some(sql)))
            }
        }
    }

    async fn query(&mut self, sql: &str, binds: &[BindValue]) -> Result<QueryResult> {
        decode_result(&self.run(sql, binds).await?)
    }

    async fn immediate(&mut self, sql: &str) -> Result<()> {
        debug!(sql = %sql, "executing immediate");
        self.conn
            .execute_immediate(sql)
            .await
            .map_err(|e| translate_native_error(e, Some(sql)))
    }
}

fn decode_result(native: &NativeResult) -> Result<QueryResult> {
    let columns: Vec<String> = native.columns.iter().map(|c| c.name.clone()).collect();
    let rows = native
        .rows
        .iter()
        .map(|row| {
            native
                .columns
                .iter()
                .zip(row)
                .map(|(col, value)| decode_native_value(col.native_type, value))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(QueryResult::new(columns, rows))
}

fn to_binds(values: &[SqlValue]) -> Vec<BindValue> {
    values.iter().map(BindValue::from_sql_value).collect()
}

/// The SQL Anywhere adapter.
///
/// Generic over the native connection so the client library can be
/// swapped out, in tests and when the embedding environment
/// re-establishes connections after a process fork.
pub struct SqlAnywhereAdapter<C: NativeConnection> {
    core: Mutex<Core<C>>,
    quoter: Quoter,
    dialect: SqlAnywhereDialect,
}

impl<C: NativeConnection> SqlAnywhereAdapter<C> {
    /// Wraps an established native connection.
    pub fn new(connection: C, config: &ConnectionConfig) -> Self {
        Self {
            core: Mutex::new(Core {
                conn: connection,
                state: TransactionState::AutoCommit,
            }),
            quoter: Quoter::new(config.encoding.clone()),
            dialect: SqlAnywhereDialect::new(),
        }
    }

    /// The dialect used to render SELECT statements for this adapter.
    #[must_use]
    pub fn dialect(&self) -> SqlAnywhereDialect {
        self.dialect
    }

    /// The literal quoter configured for this connection.
    #[must_use]
    pub fn quoter(&self) -> &Quoter {
        &self.quoter
    }

    /// Applies the session options every fresh connection needs:
    /// `LOGIN` usable as an identifier, a fixed timestamp format, and
    /// the liveness probe variable. Failures are logged and ignored so
    /// older engine versions still connect.
    pub async fn configure_session(&self) {
        let mut core = self.core.lock().await;
        for sql in [
            "SET TEMPORARY OPTION non_keywords = 'LOGIN'",
            "SET TEMPORARY OPTION timestamp_format = 'YYYY-MM-DD HH:NN:SS'",
            "CREATE VARIABLE liveness INT",
        ] {
            if let Err(e) = core.immediate(sql).await {
                debug!(error = %e, sql = %sql, "session option not applied");
            }
        }
    }

    /// Probes connection liveness by assigning the session variable
    /// created in [`Self::configure_session`].
    pub async fn is_active(&self) -> bool {
        let mut core = self.core.lock().await;
        core.immediate("SET liveness = 1").await.is_ok()
    }

    /// Executes a row-producing statement and decodes the result.
    pub async fn exec_query(&self, sql: &str, binds: &[SqlValue]) -> Result<QueryResult> {
        let mut core = self.core.lock().await;
        core.query(sql, &to_binds(binds)).await
    }

    /// Executes a data-modifying statement and returns the affected
    /// row count.
    pub async fn exec_update(&self, sql: &str, binds: &[SqlValue]) -> Result<u64> {
        let mut core = self.core.lock().await;
        Ok(core.run(sql, &to_binds(binds)).await?.affected_rows)
    }

    /// Executes a DELETE and returns the affected row count.
    pub async fn exec_delete(&self, sql: &str, binds: &[SqlValue]) -> Result<u64> {
        self.exec_update(sql, binds).await
    }

    /// Executes a statement without binds.
    pub async fn execute(&self, sql: &str) -> Result<u64> {
        self.exec_update(sql, &[]).await
    }

    /// Opens an explicit transaction, suspending auto-commit.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::NestedTransaction`] if a transaction is
    /// already open; only one is tracked per connection.
    pub async fn begin_transaction(&self) -> Result<()> {
        let mut core = self.core.lock().await;
        if !core.state.is_auto_commit() {
            return Err(AdapterError::NestedTransaction);
        }
        core.immediate("BEGIN TRANSACTION").await?;
        core.state = TransactionState::InTransaction {
            saved_isolation: None,
        };
        Ok(())
    }

    /// Opens an explicit transaction at the given isolation level.
    ///
    /// The level active before the begin is read first and restored
    /// when the transaction ends, commit and rollback alike.
    pub async fn begin_isolated_transaction(&self, isolation: IsolationLevel) -> Result<()> {
        let mut core = self.core.lock().await;
        if !core.state.is_auto_commit() {
            return Err(AdapterError::NestedTransaction);
        }

        let result = core
            .query("SELECT CONNECTION_PROPERTY('isolation_level')", &[])
            .await?;
        let saved = match result.first_value() {
            Some(SqlValue::Text(s)) => IsolationLevel::from_property(s),
            Some(SqlValue::Int(n)) => IsolationLevel::from_property(&n.to_string()),
            _ => None,
        };

        core.immediate(&format!(
            "SET TRANSACTION ISOLATION LEVEL {}",
            isolation.to_sql()
        ))
        .await?;
        core.immediate("BEGIN TRANSACTION").await?;
        core.state = TransactionState::InTransaction {
            saved_isolation: saved,
        };
        Ok(())
    }

    /// Commits the open transaction and resumes auto-commit.
    pub async fn commit_transaction(&self) -> Result<()> {
        let mut core = self.core.lock().await;
        let commit = core
            .conn
            .commit()
            .await
            .map_err(|e| translate_native_error(e, None));
        Self::finish_transaction(&mut core, commit).await
    }

    /// Rolls back the open transaction and resumes auto-commit.
    pub async fn rollback_transaction(&self) -> Result<()> {
        let mut core = self.core.lock().await;
        let rollback = core
            .conn
            .rollback()
            .await
            .map_err(|e| translate_native_error(e, None));
        Self::finish_transaction(&mut core, rollback).await
    }

    // Auto-commit resumes and the saved isolation level is restored no
    // matter how the transaction ended.
    async fn finish_transaction(core: &mut Core<C>, outcome: Result<()>) -> Result<()> {
        let saved = match core.state {
            TransactionState::InTransaction { saved_isolation } => saved_isolation,
            TransactionState::AutoCommit => None,
        };
        core.state = TransactionState::AutoCommit;

        let restore = match saved {
            Some(level) => {
                core.immediate(&format!("SET TRANSACTION ISOLATION LEVEL {}", level.to_sql()))
                    .await
            }
            None => Ok(()),
        };

        outcome.and(restore)
    }

    /// Reads the connection's current isolation level.
    pub async fn current_isolation_level(&self) -> Result<IsolationLevel> {
        let raw = self
            .scalar_text("SELECT CONNECTION_PROPERTY('isolation_level')")
            .await?
            .unwrap_or_default();
        IsolationLevel::from_property(&raw).ok_or_else(|| AdapterError::StatementInvalid {
            message: format!("unexpected isolation level '{raw}'"),
            code: None,
            sql: None,
        })
    }

    /// Runs `body` with a session option temporarily set, restoring
    /// the previous value afterwards even when `body` fails.
    pub async fn with_connection_property<T, Fut>(
        &self,
        property: &str,
        value: &str,
        body: impl FnOnce() -> Fut,
    ) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let old = self
            .scalar_text(&format!("SELECT connection_property( '{property}' )"))
            .await?
            .unwrap_or_default();

        self.set_temporary_option(property, value).await?;
        let result = body().await;
        self.set_temporary_option(property, &old).await?;
        result
    }

    /// Runs `body` with referential integrity checks deferred to
    /// commit (`wait_for_commit`). Auto-commit is suspended for the
    /// whole block, so no statement inside it commits and the deferred
    /// checks are never triggered mid-block; the prior transaction
    /// state comes back afterwards even when `body` fails.
    pub async fn disable_referential_integrity<T, Fut>(
        &self,
        body: impl FnOnce() -> Fut,
    ) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let previous = {
            let mut core = self.core.lock().await;
            let previous = core.state;
            core.state = TransactionState::InTransaction {
                saved_isolation: None,
            };
            previous
        };

        let result = self
            .with_connection_property("wait_for_commit", "ON", body)
            .await;

        self.core.lock().await.state = previous;
        result
    }

    async fn set_temporary_option(&self, property: &str, value: &str) -> Result<()> {
        let mut core = self.core.lock().await;
        core.run(
            &format!("SET TEMPORARY OPTION {property} = '{value}'"),
            &[],
        )
        .await?;
        Ok(())
    }

    /// The name of the connected database.
    pub async fn current_database(&self) -> Result<Option<String>> {
        self.scalar_text("SELECT DB_PROPERTY('Name')").await
    }

    /// The database collation specification.
    pub async fn collation(&self) -> Result<Option<String>> {
        self.scalar_text("SELECT DB_EXTENDED_PROPERTY('Collation', 'Specification')")
            .await
    }

    /// The database character set.
    pub async fn charset(&self) -> Result<Option<String>> {
        self.scalar_text("SELECT DB_PROPERTY('CharSet')").await
    }

    /// The NCHAR collation specification.
    pub async fn ncollation(&self) -> Result<Option<String>> {
        self.scalar_text("SELECT DB_EXTENDED_PROPERTY('NcharCollation', 'Specification')")
            .await
    }

    /// The NCHAR character set.
    pub async fn ncharset(&self) -> Result<Option<String>> {
        self.scalar_text("SELECT DB_PROPERTY('NcharCharSet')").await
    }

    /// The identity value generated by the last insert on this
    /// connection.
    pub async fn last_inserted_id(&self) -> Result<Option<i64>> {
        let result = self.exec_query("SELECT @@IDENTITY", &[]).await?;
        Ok(match result.first_value() {
            Some(SqlValue::Int(n)) => Some(*n),
            Some(SqlValue::Decimal(d)) => d.parse().ok(),
            _ => None,
        })
    }

    /// Empties a table.
    pub async fn truncate_table(&self, table: &str) -> Result<()> {
        self.execute(&ddl::truncate_table_sql(table)?).await?;
        Ok(())
    }

    /// Creates a database file with the given options.
    pub async fn create_database(
        &self,
        name: &str,
        options: &CreateDatabaseOptions,
    ) -> Result<()> {
        info!(database = %name, "creating database");
        self.execute(&options.to_sql(name)).await?;
        Ok(())
    }

    /// Starts a database on the connected server. Already-missing
    /// databases are not an error, so provisioning stays idempotent.
    pub async fn start_database(&self, name: &str) -> Result<()> {
        Self::ignore_no_database(self.execute(&format!("START DATABASE '{name}' AUTOSTOP OFF")).await)
    }

    /// Stops a database unconditionally.
    pub async fn stop_database(&self, name: &str) -> Result<()> {
        Self::ignore_no_database(self.execute(&format!("STOP DATABASE {name} UNCONDITIONALLY")).await)
    }

    /// Drops a database file. Dropping a database that does not exist
    /// succeeds.
    pub async fn drop_database(&self, name: &str) -> Result<()> {
        info!(database = %name, "dropping database");
        Self::ignore_no_database(self.execute(&format!("DROP DATABASE '{name}'")).await)
    }

    fn ignore_no_database(result: Result<u64>) -> Result<()> {
        match result {
            Ok(_) | Err(AdapterError::NoDatabase { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Creates a database user.
    pub async fn create_user(&self, name: &str, password: &str) -> Result<()> {
        self.execute(&format!(
            "CREATE USER {} IDENTIFIED BY {}",
            quote_identifier(name),
            quote_identifier(password)
        ))
        .await?;
        Ok(())
    }

    /// Drops a database user.
    pub async fn drop_user(&self, name: &str) -> Result<()> {
        self.execute(&format!("DROP USER {}", quote_identifier(name)))
            .await?;
        Ok(())
    }

    /// Lists base and global temporary tables, owner-qualified.
    pub async fn tables(&self) -> Result<Vec<String>> {
        self.data_sources(DataSourceKind::Table).await
    }

    /// Lists views, owner-qualified.
    pub async fn views(&self) -> Result<Vec<String>> {
        self.data_sources(DataSourceKind::View).await
    }

    /// Lists data sources of the given kind, owner-qualified.
    pub async fn data_sources(&self, kind: DataSourceKind) -> Result<Vec<String>> {
        let result = self
            .exec_query(&schema::data_source_sql(None, kind)?, &[])
            .await?;
        Ok((0..result.len())
            .filter_map(|row| match result.get(row, "table_name") {
                Some(SqlValue::Text(s)) => Some(s.clone()),
                _ => None,
            })
            .collect())
    }

    /// Describes the columns of a table.
    pub async fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let result = self
            .exec_query(&schema::column_definitions_sql(table)?, &[])
            .await?;
        schema::parse_columns(&result)
    }

    /// Describes the user indexes of a table.
    pub async fn indexes(&self, table: &str) -> Result<Vec<IndexDescriptor>> {
        let listing = self.exec_query(&schema::indexes_sql(table)?, &[]).await?;

        let mut columns_per_index = Vec::with_capacity(listing.len());
        for row in 0..listing.len() {
            let name = match listing.get(row, "index_name") {
                Some(SqlValue::Text(s)) => s.clone(),
                _ => continue,
            };
            columns_per_index.push(
                self.exec_query(&schema::index_columns_sql(&name), &[])
                    .await?,
            );
        }

        schema::parse_indexes(table, &listing, &columns_per_index)
    }

    /// The first primary-key column of a table, if any.
    pub async fn primary_key(&self, table: &str) -> Result<Option<String>> {
        let result = self
            .exec_query(&schema::primary_key_sql(table)?, &[])
            .await?;
        Ok(match result.first_value() {
            Some(SqlValue::Text(s)) => Some(s.clone()),
            _ => None,
        })
    }

    /// All primary-key columns of a table in key order, if any.
    pub async fn primary_keys(&self, table: &str) -> Result<Option<Vec<String>>> {
        let result = self
            .exec_query(&schema::primary_keys_sql(table)?, &[])
            .await?;
        Ok(schema::parse_primary_keys(&result))
    }

    /// The single-column foreign keys of a table.
    pub async fn foreign_keys(&self, table: &str) -> Result<Vec<ForeignKeyDescriptor>> {
        let result = self
            .exec_query(&schema::foreign_keys_sql(table)?, &[])
            .await?;
        schema::parse_foreign_keys(table, &result)
    }

    /// Renames a table.
    pub async fn rename_table(&self, name: &str, new_name: &str) -> Result<()> {
        self.execute(&ddl::rename_table_sql(name, new_name)?).await?;
        Ok(())
    }

    /// Adds a column.
    pub async fn add_column(&self, table: &str, column: &str, type_sql: &str) -> Result<()> {
        self.execute(&ddl::add_column_sql(table, column, type_sql)?)
            .await?;
        Ok(())
    }

    /// Changes a column's type.
    pub async fn change_column(
        &self,
        table: &str,
        column: &str,
        type_sql: &str,
        nullable: bool,
    ) -> Result<()> {
        self.execute(&ddl::change_column_sql(table, column, type_sql, nullable)?)
            .await?;
        Ok(())
    }

    /// Renames a column, going through an intermediate name when only
    /// the letter case changes.
    pub async fn rename_column(&self, table: &str, column: &str, new_column: &str) -> Result<()> {
        for sql in ddl::rename_column_sql(table, column, new_column)? {
            self.execute(&sql).await?;
        }
        Ok(())
    }

    /// Drops a column, removing indexes that cover it first.
    pub async fn remove_column(&self, table: &str, column: &str) -> Result<()> {
        let covering = self
            .exec_query(&ddl::column_indexes_sql(table, column), &[])
            .await?;
        for row in 0..covering.len() {
            if let Some(SqlValue::Text(index)) = covering.get(row, "index_name") {
                let index = index.clone();
                self.execute(&ddl::remove_index_sql(table, &index)?).await?;
            }
        }
        self.execute(&ddl::drop_column_sql(table, column)?).await?;
        Ok(())
    }

    /// Changes a column's default value.
    pub async fn change_column_default(
        &self,
        table: &str,
        column: &str,
        default: &SqlValue,
    ) -> Result<()> {
        self.execute(&ddl::change_column_default_sql(
            table,
            column,
            default,
            &self.quoter,
        )?)
        .await?;
        Ok(())
    }

    /// Changes a column's nullability. When going NOT NULL with a
    /// default, existing NULLs are backfilled first so the alteration
    /// cannot fail on old rows.
    pub async fn change_column_null(
        &self,
        table: &str,
        column: &str,
        nullable: bool,
        default: Option<&SqlValue>,
    ) -> Result<()> {
        if !nullable {
            if let Some(default) = default {
                self.execute(&ddl::backfill_nulls_sql(table, column, default, &self.quoter)?)
                    .await?;
            }
        }
        self.execute(&ddl::change_column_null_sql(table, column, nullable)?)
            .await?;
        Ok(())
    }

    /// Drops an index.
    pub async fn remove_index(&self, table: &str, index: &str) -> Result<()> {
        self.execute(&ddl::remove_index_sql(table, index)?).await?;
        Ok(())
    }

    async fn scalar_text(&self, sql: &str) -> Result<Option<String>> {
        let result = self.exec_query(sql, &[]).await?;
        Ok(match result.first_value() {
            Some(SqlValue::Text(s)) => Some(s.clone()),
            Some(SqlValue::Int(n)) => Some(n.to_string()),
            _ => None,
        })
    }
}
