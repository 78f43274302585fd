//! Schema introspection over the SYS catalog.
//!
//! Everything here is split into pure SQL builders and pure row
//! parsers; [`crate::adapter`] wires them to the connection. Names
//! arriving from callers may be owner-qualified; an unqualified name
//! is matched against every owner except `SYS` so user objects are
//! found regardless of their creator.

use std::sync::LazyLock;

use regex::Regex;
use sqlany_core::result::QueryResult;
use sqlany_core::value::SqlValue;

use crate::error::{AdapterError, Result};
use crate::name::OwnerQualifiedName;
use crate::quoting::quote_string_literal;

/// Owner filter applied when a name carries no explicit owner.
const ANY_NON_SYS_OWNER: &str =
    "ANY(SELECT user_name FROM SYS.SYSUSER WHERE user_name != 'SYS')";

static NUMERIC_DEFAULT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?[0-9]*\.?[0-9]+([eE][-+]?[0-9]+)?$").expect("valid numeric pattern")
});
static STRING_DEFAULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^'.*'$").expect("valid string-literal pattern"));
static HEX_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\x([0-9A-Fa-f]{2})").expect("valid hex-escape pattern"));

/// Referential action attached to a foreign key trigger.
///
/// Decoded from the one-letter specifier in `SYS.SYSTRIGGER`; a
/// missing trigger row means the engine default, `Restrict`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferentialAction {
    /// Propagate the change to referencing rows.
    Cascade,
    /// Set referencing columns to their default.
    Default,
    /// Set referencing columns to NULL.
    Nullify,
    /// Reject the change.
    #[default]
    Restrict,
}

impl ReferentialAction {
    /// Decodes the catalog specifier. Unknown letters fall back to
    /// `Restrict`, matching the engine's behavior without a trigger.
    #[must_use]
    pub fn from_specifier(specifier: Option<&str>) -> Self {
        match specifier {
            Some("C") => Self::Cascade,
            Some("D") => Self::Default,
            Some("N") => Self::Nullify,
            _ => Self::Restrict,
        }
    }
}

/// One column as described by the catalog.
///
/// At most one of `default` and `default_function` is set: numeric
/// and quoted-string defaults are literal values, anything else (for
/// example `autoincrement` or `current timestamp`) is an upper-cased
/// function expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,
    /// Declared SQL type, width and scale included for sized domains.
    pub sql_type: String,
    /// Literal default value, unquoted.
    pub default: Option<String>,
    /// Default function expression, upper-cased.
    pub default_function: Option<String>,
    /// Whether the column accepts NULL.
    pub nullable: bool,
}

/// A user-created index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDescriptor {
    /// Table the index belongs to, as given by the caller.
    pub table: String,
    /// Index name.
    pub name: String,
    /// Whether the index enforces uniqueness.
    pub unique: bool,
    /// Indexed columns in index order.
    pub columns: Vec<String>,
}

/// A single-column foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyDescriptor {
    /// Referencing table, as given by the caller.
    pub from_table: String,
    /// Referenced table, owner-qualified and quoted by the catalog
    /// query.
    pub to_table: String,
    /// Referencing column.
    pub column: String,
    /// Referenced column.
    pub primary_key: String,
    /// Constraint name.
    pub name: String,
    /// Action on update of the referenced row.
    pub on_update: ReferentialAction,
    /// Action on delete of the referenced row.
    pub on_delete: ReferentialAction,
}

/// Which kinds of data sources a listing query matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceKind {
    /// Base and global temporary tables.
    Table,
    /// Views.
    View,
    /// Tables and views together.
    All,
}

impl DataSourceKind {
    const fn type_list(self) -> &'static str {
        match self {
            Self::Table => "'BASE','GBL TEMP'",
            Self::View => "'VIEW'",
            Self::All => "'BASE','GBL TEMP','VIEW'",
        }
    }
}

/// Owner and object-name filters for a catalog query, pre-quoted as
/// SQL literals.
#[derive(Debug, Clone)]
struct QuotedScope {
    owner: String,
    name: Option<String>,
}

fn quoted_scope(name: Option<&str>) -> Result<QuotedScope> {
    let parsed = name.map(OwnerQualifiedName::parse).transpose()?;
    let owner = parsed
        .as_ref()
        .and_then(|n| n.owner())
        .map_or_else(|| String::from(ANY_NON_SYS_OWNER), quote_string_literal);
    let name = parsed.map(|n| quote_string_literal(n.identifier()));
    Ok(QuotedScope { owner, name })
}

/// Builds the query listing data sources of the given kind, optionally
/// restricted to one owner-qualified name. Rows come back
/// owner-qualified as `owner.table`.
pub fn data_source_sql(name: Option<&str>, kind: DataSourceKind) -> Result<String> {
    let scope = quoted_scope(name)?;
    let name_filter = scope
        .name
        .as_ref()
        .map(|n| format!(" AND SYS.SYSTAB.table_name = {n}"))
        .unwrap_or_default();

    Ok(format!(
        "SELECT SYS.SYSUSER.user_name + '.' + SYS.SYSTAB.table_name table_name \
         FROM SYS.SYSTAB \
         JOIN SYS.SYSUSER ON SYS.SYSUSER.user_id = SYS.SYSTAB.creator \
         WHERE SYS.SYSTAB.table_type_str IN ({types}) \
         AND SYS.SYSUSER.user_name = {owner} \
         AND SYS.SYSTAB.server_type = 1{name_filter}",
        types = kind.type_list(),
        owner = scope.owner,
    ))
}

/// Builds the column-definitions query for one table.
///
/// The catalog stores quoted-string defaults with their quotes; the
/// query strips them so literal defaults arrive bare. Sized domains
/// render as `name(width)` and decimals as `name(width,scale)`.
pub fn column_definitions_sql(table_name: &str) -> Result<String> {
    let scope = quoted_scope(Some(table_name))?;
    let name = scope.name.as_deref().unwrap_or_default();

    Ok(format!(
        "SELECT SYS.SYSCOLUMN.column_name AS name, \
         if left(\"default\",1)='''' then \
         substring(\"default\", 2, length(\"default\")-2) \
         else SYS.SYSCOLUMN.\"default\" endif AS \"default\", \
         IF SYS.SYSCOLUMN.domain_id IN (7,8,9,11,33,34,35,3,27) THEN \
         IF SYS.SYSCOLUMN.domain_id IN (3,27) THEN \
         SYS.SYSDOMAIN.domain_name || '(' || SYS.SYSCOLUMN.width || ',' || SYS.SYSCOLUMN.scale || ')' \
         ELSE \
         SYS.SYSDOMAIN.domain_name || '(' || SYS.SYSCOLUMN.width || ')' \
         ENDIF \
         ELSE SYS.SYSDOMAIN.domain_name ENDIF AS domain, \
         IF SYS.SYSCOLUMN.nulls = 'Y' THEN 1 ELSE 0 ENDIF AS nulls \
         FROM SYS.SYSCOLUMN \
         INNER JOIN SYS.SYSTABLE ON SYS.SYSCOLUMN.table_id = SYS.SYSTABLE.table_id \
         INNER JOIN SYS.SYSDOMAIN ON SYS.SYSCOLUMN.domain_id = SYS.SYSDOMAIN.domain_id \
         INNER JOIN SYS.SYSUSER ON SYS.SYSUSER.user_id = SYS.SYSTABLE.creator \
         WHERE SYS.SYSTABLE.table_name = {name} AND SYS.SYSUSER.user_name = {owner}",
        owner = scope.owner,
    ))
}

/// Builds the query listing user indexes (category above 2 excludes
/// primary-key and foreign-key indexes) for one table.
pub fn indexes_sql(table_name: &str) -> Result<String> {
    let scope = quoted_scope(Some(table_name))?;
    let name = scope.name.as_deref().unwrap_or_default();

    Ok(format!(
        "SELECT DISTINCT index_name, \"unique\" \
         FROM SYS.SYSTABLE \
         INNER JOIN SYS.SYSIDXCOL ON SYS.SYSTABLE.table_id = SYS.SYSIDXCOL.table_id \
         INNER JOIN SYS.SYSIDX ON SYS.SYSTABLE.table_id = SYS.SYSIDX.table_id \
         AND SYS.SYSIDXCOL.index_id = SYS.SYSIDX.index_id \
         INNER JOIN SYS.SYSUSER ON SYS.SYSUSER.user_id = SYS.SYSTABLE.creator \
         WHERE SYS.SYSTABLE.table_name = {name} \
         AND SYS.SYSIDX.index_category > 2 \
         AND SYS.SYSUSER.user_name = {owner}",
        owner = scope.owner,
    ))
}

/// Builds the per-index query listing indexed columns.
#[must_use]
pub fn index_columns_sql(index_name: &str) -> String {
    format!(
        "SELECT column_name \
         FROM SYS.SYSIDX \
         INNER JOIN SYS.SYSIDXCOL ON \
         SYS.SYSIDXCOL.table_id = SYS.SYSIDX.table_id AND \
         SYS.SYSIDXCOL.index_id = SYS.SYSIDX.index_id \
         INNER JOIN SYS.SYSCOLUMN ON \
         SYS.SYSCOLUMN.table_id = SYS.SYSIDXCOL.table_id AND \
         SYS.SYSCOLUMN.column_id = SYS.SYSIDXCOL.column_id \
         WHERE index_name = {}",
        quote_string_literal(index_name),
    )
}

/// Builds the query returning the first primary-key column.
pub fn primary_key_sql(table_name: &str) -> Result<String> {
    let scope = quoted_scope(Some(table_name))?;
    let name = scope.name.as_deref().unwrap_or_default();

    Ok(format!(
        "select cname from SYS.SYSCOLUMNS \
         where tname = {name} and creator = {owner} and in_primary_key = 'Y'",
        owner = scope.owner,
    ))
}

/// Builds the query returning all primary-key columns as one
/// comma-joined list in key order.
pub fn primary_keys_sql(table_name: &str) -> Result<String> {
    let scope = quoted_scope(Some(table_name))?;
    let name = scope.name.as_deref().unwrap_or_default();

    Ok(format!(
        "SELECT list(c.column_name ORDER BY ixc.sequence) AS pk_columns \
         FROM SYSIDX ix, SYSTABLE t, SYSIDXCOL ixc, SYSCOLUMN c, SYSUSER s \
         WHERE ix.table_id = t.table_id \
         AND ixc.table_id = t.table_id \
         AND ixc.index_id = ix.index_id \
         AND ixc.table_id = c.table_id \
         AND ixc.column_id = c.column_id \
         AND ix.index_category in (1,2) \
         AND t.table_name = {name} \
         AND s.user_name = {owner} \
         GROUP BY ix.index_name, ix.index_id, ix.index_category \
         ORDER BY ix.index_id",
        owner = scope.owner,
    ))
}

/// Builds the foreign-keys query for one table. Compound foreign keys
/// are excluded by the trailing single-column subquery.
pub fn foreign_keys_sql(table_name: &str) -> Result<String> {
    let scope = quoted_scope(Some(table_name))?;
    let name = scope.name.as_deref().unwrap_or_default();

    Ok(format!(
        "SELECT \
         '\"' + user_name(systab_p.creator) + '\".\"' + systab_p.table_name + '\"' to_table, \
         systabcol_p.column_name primary_key, \
         systabcol_f.column_name column, \
         sysidx.index_name name, \
         isnull(systrigger_c.referential_action, 'R') on_update, \
         isnull(systrigger_d.referential_action, 'R') on_delete \
         FROM sys.sysfkey \
         JOIN sys.sysidxcol sysidxcol_f ON \
         sysidxcol_f.table_id = sysfkey.foreign_table_id \
         AND sysidxcol_f.index_id = sysfkey.foreign_index_id \
         JOIN sys.sysidxcol sysidxcol_p ON \
         sysidxcol_p.table_id = sysfkey.primary_table_id \
         AND sysidxcol_p.index_id = sysfkey.primary_index_id \
         JOIN sys.systable systab_f ON systab_f.table_id = sysidxcol_f.table_id \
         JOIN sys.sysuser sysuser_f ON sysuser_f.user_id = systab_f.creator \
         JOIN sys.systable systab_p ON systab_p.table_id = sysidxcol_p.table_id \
         JOIN sys.systabcol systabcol_f ON \
         systabcol_f.table_id = sysidxcol_f.table_id \
         AND systabcol_f.column_id = sysidxcol_f.column_id \
         JOIN sys.systabcol systabcol_p ON \
         systabcol_p.table_id = sysidxcol_p.table_id \
         AND systabcol_p.column_id = sysidxcol_p.column_id \
         JOIN sys.sysidx ON sysidx.table_id = sysfkey.foreign_table_id \
         AND sysidx.index_id = sysfkey.foreign_index_id \
         LEFT JOIN sys.systrigger systrigger_c ON \
         systrigger_c.table_id = sysfkey.primary_table_id \
         AND systrigger_c.foreign_table_id = sysfkey.foreign_table_id \
         AND systrigger_c.foreign_key_id = sysfkey.foreign_index_id \
         AND systrigger_c.event = 'C' \
         LEFT JOIN sys.systrigger systrigger_d ON \
         systrigger_d.table_id = sysfkey.primary_table_id \
         AND systrigger_d.foreign_table_id = sysfkey.foreign_table_id \
         AND systrigger_d.foreign_key_id = sysfkey.foreign_index_id \
         AND systrigger_d.event = 'D' \
         WHERE sysidxcol_f.primary_column_id = sysidxcol_p.column_id \
         AND systab_f.table_name = {name} \
         AND sysuser_f.user_name = {owner} \
         AND (SELECT count(*) FROM sysidxcol \
         WHERE sysidxcol.table_id = sysfkey.foreign_table_id \
         AND sysidxcol.index_id = sysfkey.foreign_index_id) = 1",
        owner = scope.owner,
    ))
}

/// Replaces catalog `\xHH` escapes with the bytes they stand for.
/// A default with an embedded newline, for example, arrives as
/// `foo\x0Abar`.
#[must_use]
pub fn unescape_catalog_text(text: &str) -> String {
    HEX_ESCAPE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let byte = u8::from_str_radix(&caps[1], 16).unwrap_or(b'?');
            (byte as char).to_string()
        })
        .into_owned()
}

fn cell_text(result: &QueryResult, row: usize, column: &str) -> Option<String> {
    match result.get(row, column) {
        Some(SqlValue::Text(s)) => Some(s.clone()),
        Some(SqlValue::Int(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn cell_truthy(result: &QueryResult, row: usize, column: &str) -> bool {
    match result.get(row, column) {
        Some(SqlValue::Int(n)) => *n != 0,
        Some(SqlValue::Bool(b)) => *b,
        _ => false,
    }
}

fn missing(column: &str) -> AdapterError {
    AdapterError::StatementInvalid {
        message: format!("catalog row is missing the {column} column"),
        code: None,
        sql: None,
    }
}

/// Parses the column-definitions result into descriptors.
///
/// Numeric and quoted-string defaults become literal defaults;
/// anything else is treated as a default function and upper-cased.
pub fn parse_columns(result: &QueryResult) -> Result<Vec<ColumnDescriptor>> {
    (0..result.len())
        .map(|row| {
            let name = cell_text(result, row, "name").ok_or_else(|| missing("name"))?;
            let sql_type = cell_text(result, row, "domain").ok_or_else(|| missing("domain"))?;
            let raw_default = cell_text(result, row, "default").map(|d| unescape_catalog_text(&d));

            let (default, default_function) = match raw_default {
                Some(d) if NUMERIC_DEFAULT.is_match(&d) || STRING_DEFAULT.is_match(&d) => {
                    (Some(d), None)
                }
                Some(d) => (None, Some(d.to_uppercase())),
                None => (None, None),
            };

            Ok(ColumnDescriptor {
                name,
                sql_type,
                default,
                default_function,
                nullable: cell_truthy(result, row, "nulls"),
            })
        })
        .collect()
}

/// Parses the index listing together with the per-index column
/// results, which must arrive in listing order.
pub fn parse_indexes(
    table: &str,
    listing: &QueryResult,
    columns_per_index: &[QueryResult],
) -> Result<Vec<IndexDescriptor>> {
    if listing.len() != columns_per_index.len() {
        return Err(AdapterError::StatementInvalid {
            message: format!(
                "expected {} index column sets, got {}",
                listing.len(),
                columns_per_index.len()
            ),
            code: None,
            sql: None,
        });
    }

    (0..listing.len())
        .map(|row| {
            let name = cell_text(listing, row, "index_name").ok_or_else(|| missing("index_name"))?;
            let columns = (0..columns_per_index[row].len())
                .map(|col_row| {
                    cell_text(&columns_per_index[row], col_row, "column_name")
                        .ok_or_else(|| missing("column_name"))
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(IndexDescriptor {
                table: table.to_string(),
                name,
                unique: cell_truthy(listing, row, "unique"),
                columns,
            })
        })
        .collect()
}

/// Parses the comma-joined primary-key column list. An absent or NULL
/// list means the table has no primary key.
#[must_use]
pub fn parse_primary_keys(result: &QueryResult) -> Option<Vec<String>> {
    let list = cell_text(result, 0, "pk_columns")?;
    Some(list.split(',').map(str::to_string).collect())
}

/// Parses the foreign-keys result into descriptors.
pub fn parse_foreign_keys(table: &str, result: &QueryResult) -> Result<Vec<ForeignKeyDescriptor>> {
    (0..result.len())
        .map(|row| {
            Ok(ForeignKeyDescriptor {
                from_table: table.to_string(),
                to_table: cell_text(result, row, "to_table").ok_or_else(|| missing("to_table"))?,
                column: cell_text(result, row, "column").ok_or_else(|| missing("column"))?,
                primary_key: cell_text(result, row, "primary_key")
                    .ok_or_else(|| missing("primary_key"))?,
                name: cell_text(result, row, "name").ok_or_else(|| missing("name"))?,
                on_update: ReferentialAction::from_specifier(
                    cell_text(result, row, "on_update").as_deref(),
                ),
                on_delete: ReferentialAction::from_specifier(
                    cell_text(result, row, "on_delete").as_deref(),
                ),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> SqlValue {
        SqlValue::Text(String::from(s))
    }

    #[test]
    fn test_data_source_sql_unqualified_uses_any_owner() {
        let sql = data_source_sql(None, DataSourceKind::All).unwrap();
        assert!(sql.contains(ANY_NON_SYS_OWNER));
        assert!(sql.contains("'BASE','GBL TEMP','VIEW'"));
        assert!(!sql.contains("table_name = '"));
    }

    #[test]
    fn test_data_source_sql_qualified() {
        let sql = data_source_sql(Some("dba.users"), DataSourceKind::Table).unwrap();
        assert!(sql.contains("SYS.SYSUSER.user_name = 'dba'"));
        assert!(sql.contains("SYS.SYSTAB.table_name = 'users'"));
        assert!(sql.contains("'BASE','GBL TEMP'"));
        assert!(!sql.contains("VIEW"));
    }

    #[test]
    fn test_view_listing_excludes_tables() {
        let sql = data_source_sql(None, DataSourceKind::View).unwrap();
        assert!(sql.contains("IN ('VIEW')"));
    }

    #[test]
    fn test_column_definitions_sql_filters() {
        let sql = column_definitions_sql("users").unwrap();
        assert!(sql.contains("SYS.SYSTABLE.table_name = 'users'"));
        assert!(sql.contains(ANY_NON_SYS_OWNER));
        assert!(sql.contains("domain_id IN (3,27)"));
    }

    #[test]
    fn test_indexes_sql_user_indexes_only() {
        let sql = indexes_sql("users").unwrap();
        assert!(sql.contains("index_category > 2"));
    }

    #[test]
    fn test_primary_keys_sql_orders_by_sequence() {
        let sql = primary_keys_sql("users").unwrap();
        assert!(sql.contains("ORDER BY ixc.sequence"));
        assert!(sql.contains("index_category in (1,2)"));
    }

    #[test]
    fn test_foreign_keys_sql_excludes_compound_keys() {
        let sql = foreign_keys_sql("orders").unwrap();
        assert!(sql.contains("= 1"));
        assert!(sql.contains("isnull(systrigger_c.referential_action, 'R')"));
    }

    #[test]
    fn test_unescape_catalog_text() {
        assert_eq!(unescape_catalog_text(r"foo\x0Abar"), "foo\nbar");
        assert_eq!(unescape_catalog_text("plain"), "plain");
    }

    #[test]
    fn test_parse_columns_default_classification() {
        let result = QueryResult::new(
            vec![
                String::from("name"),
                String::from("default"),
                String::from("domain"),
                String::from("nulls"),
            ],
            vec![
                vec![text("id"), SqlValue::Null, text("integer"), SqlValue::Int(0)],
                vec![text("price"), text("12.50"), text("decimal(10,2)"), SqlValue::Int(1)],
                vec![text("label"), text("'new'"), text("varchar(255)"), SqlValue::Int(1)],
                vec![
                    text("created_at"),
                    text("current timestamp"),
                    text("timestamp"),
                    SqlValue::Int(0),
                ],
            ],
        );

        let columns = parse_columns(&result).unwrap();
        assert_eq!(columns.len(), 4);

        assert_eq!(columns[0].default, None);
        assert_eq!(columns[0].default_function, None);
        assert!(!columns[0].nullable);

        assert_eq!(columns[1].default.as_deref(), Some("12.50"));
        assert_eq!(columns[1].default_function, None);

        assert_eq!(columns[2].default.as_deref(), Some("'new'"));

        assert_eq!(columns[3].default, None);
        assert_eq!(
            columns[3].default_function.as_deref(),
            Some("CURRENT TIMESTAMP")
        );
    }

    #[test]
    fn test_parse_indexes() {
        let listing = QueryResult::new(
            vec![String::from("index_name"), String::from("unique")],
            vec![vec![text("idx_users_email"), SqlValue::Int(1)]],
        );
        let columns = vec![QueryResult::new(
            vec![String::from("column_name")],
            vec![vec![text("email")]],
        )];

        let indexes = parse_indexes("users", &listing, &columns).unwrap();
        assert_eq!(indexes.len(), 1);
        assert_eq!(indexes[0].name, "idx_users_email");
        assert!(indexes[0].unique);
        assert_eq!(indexes[0].columns, vec![String::from("email")]);
    }

    #[test]
    fn test_parse_indexes_count_mismatch() {
        let listing = QueryResult::new(
            vec![String::from("index_name"), String::from("unique")],
            vec![vec![text("idx"), SqlValue::Int(0)]],
        );
        assert!(parse_indexes("users", &listing, &[]).is_err());
    }

    #[test]
    fn test_parse_primary_keys_splits_list() {
        let result = QueryResult::new(
            vec![String::from("pk_columns")],
            vec![vec![text("tenant_id,id")]],
        );
        assert_eq!(
            parse_primary_keys(&result),
            Some(vec![String::from("tenant_id"), String::from("id")])
        );

        let empty = QueryResult::new(vec![String::from("pk_columns")], vec![]);
        assert_eq!(parse_primary_keys(&empty), None);
    }

    #[test]
    fn test_parse_foreign_keys_actions() {
        let result = QueryResult::new(
            vec![
                String::from("to_table"),
                String::from("primary_key"),
                String::from("column"),
                String::from("name"),
                String::from("on_update"),
                String::from("on_delete"),
            ],
            vec![vec![
                text("\"dba\".\"users\""),
                text("id"),
                text("user_id"),
                text("fk_orders_user"),
                text("C"),
                text("R"),
            ]],
        );

        let fks = parse_foreign_keys("orders", &result).unwrap();
        assert_eq!(fks.len(), 1);
        assert_eq!(fks[0].to_table, "\"dba\".\"users\"");
        assert_eq!(fks[0].on_update, ReferentialAction::Cascade);
        assert_eq!(fks[0].on_delete, ReferentialAction::Restrict);
    }

    #[test]
    fn test_referential_action_default_is_restrict() {
        assert_eq!(
            ReferentialAction::from_specifier(None),
            ReferentialAction::Restrict
        );
        assert_eq!(
            ReferentialAction::from_specifier(Some("D")),
            ReferentialAction::Default
        );
        assert_eq!(
            ReferentialAction::from_specifier(Some("N")),
            ReferentialAction::Nullify
        );
    }
}
