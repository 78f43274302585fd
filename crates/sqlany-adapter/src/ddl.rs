//! ALTER TABLE statement builders.
//!
//! Thin string builders; every embedded identifier goes through
//! [`crate::quoting`] and every literal through the [`Quoter`].
//! Execution and index bookkeeping live in [`crate::adapter`].

use sqlany_core::value::SqlValue;

use crate::error::Result;
use crate::quoting::{quote_identifier, quote_string_literal, quote_table_name, Quoter};

/// Renders `ALTER TABLE .. RENAME ..` for a table rename.
pub fn rename_table_sql(name: &str, new_name: &str) -> Result<String> {
    Ok(format!(
        "ALTER TABLE {} RENAME {}",
        quote_table_name(name)?,
        quote_table_name(new_name)?
    ))
}

/// Renders the statement adding one column.
pub fn add_column_sql(table: &str, column: &str, type_sql: &str) -> Result<String> {
    Ok(format!(
        "ALTER TABLE {} ADD {} {type_sql}",
        quote_table_name(table)?,
        quote_identifier(column)
    ))
}

/// Renders the statement changing a column's type. `nullable` appends
/// an explicit `NULL` marker.
pub fn change_column_sql(
    table: &str,
    column: &str,
    type_sql: &str,
    nullable: bool,
) -> Result<String> {
    let null_suffix = if nullable { " NULL" } else { "" };
    Ok(format!(
        "ALTER TABLE {} ALTER {} {type_sql}{null_suffix}",
        quote_table_name(table)?,
        quote_identifier(column)
    ))
}

/// Renders the statements renaming a column.
///
/// The engine treats a rename that only changes letter case as a
/// no-op, so that case goes through an intermediate name and two
/// statements come back.
pub fn rename_column_sql(table: &str, column: &str, new_column: &str) -> Result<Vec<String>> {
    let rename = |from: &str, to: &str| -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} RENAME {} TO {}",
            quote_table_name(table)?,
            quote_identifier(from),
            quote_identifier(to)
        ))
    };

    if column.eq_ignore_ascii_case(new_column) {
        let intermediate = format!("{new_column}_rename_tmp");
        Ok(vec![
            rename(column, &intermediate)?,
            rename(&intermediate, new_column)?,
        ])
    } else {
        Ok(vec![rename(column, new_column)?])
    }
}

/// Renders the statement dropping one column. Indexes covering the
/// column must be dropped first; see [`column_indexes_sql`].
pub fn drop_column_sql(table: &str, column: &str) -> Result<String> {
    Ok(format!(
        "ALTER TABLE {} DROP {}",
        quote_table_name(table)?,
        quote_identifier(column)
    ))
}

/// Builds the catalog query listing index names that cover the given
/// column, used before a column drop.
#[must_use]
pub fn column_indexes_sql(table: &str, column: &str) -> String {
    format!(
        "SELECT \"index_name\" \
         FROM SYS.SYSTAB join SYS.SYSTABCOL join SYS.SYSIDXCOL join SYS.SYSIDX \
         WHERE \"column_name\" = {} AND \"table_name\" = {}",
        quote_string_literal(column),
        quote_string_literal(table)
    )
}

/// Renders the statement changing a column default.
pub fn change_column_default_sql(
    table: &str,
    column: &str,
    default: &SqlValue,
    quoter: &Quoter,
) -> Result<String> {
    Ok(format!(
        "ALTER TABLE {} ALTER {} DEFAULT {}",
        quote_table_name(table)?,
        quote_identifier(column),
        quoter.quote_value(default)
    ))
}

/// Renders the statement changing a column's nullability.
pub fn change_column_null_sql(table: &str, column: &str, nullable: bool) -> Result<String> {
    let marker = if nullable { "NULL" } else { "NOT NULL" };
    Ok(format!(
        "ALTER TABLE {} ALTER {} {marker}",
        quote_table_name(table)?,
        quote_identifier(column)
    ))
}

/// Renders the backfill run before a column goes NOT NULL, replacing
/// existing NULLs with the given default.
pub fn backfill_nulls_sql(
    table: &str,
    column: &str,
    default: &SqlValue,
    quoter: &Quoter,
) -> Result<String> {
    let column = quote_identifier(column);
    Ok(format!(
        "UPDATE {} SET {column}={} WHERE {column} IS NULL",
        quote_table_name(table)?,
        quoter.quote_value(default)
    ))
}

/// Renders `DROP INDEX`; the index name is qualified by its table.
pub fn remove_index_sql(table: &str, index: &str) -> Result<String> {
    Ok(format!(
        "DROP INDEX {}.{}",
        quote_table_name(table)?,
        quote_identifier(index)
    ))
}

/// Renders `TRUNCATE TABLE`.
pub fn truncate_table_sql(table: &str) -> Result<String> {
    Ok(format!("TRUNCATE TABLE {}", quote_table_name(table)?))
}
