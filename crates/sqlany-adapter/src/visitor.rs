//! SQL Anywhere dialect renderer.
//!
//! Rewrites an abstract SELECT statement into the engine's syntax.
//! The interesting differences are all at the head of the statement:
//! `TOP`/`START AT` paging sits between `SELECT` and the projection
//! list, `TOP` needs a deterministic order, and DISTINCT queries must
//! project every ordering expression.

use std::sync::LazyLock;

use regex::Regex;
use sqlany_core::dialect::Dialect;
use sqlany_core::select::{Predicate, SelectStatement, SetQuantifier};

use crate::quoting;

/// Limit synthesized when an offset is given without a limit, so the
/// `TOP n START AT m` syntax stays valid. Largest 32-bit signed
/// integer, the engine's maximum row count for TOP.
pub const MAX_LIMIT: u64 = 2_147_483_647;

static ORDER_MODIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(?:ASC|DESC)\b").expect("valid modifier pattern"));
static NULLS_MODIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+NULLS\s+(?:FIRST|LAST)\b").expect("valid nulls pattern")
});

/// The SQL Anywhere dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlAnywhereDialect;

impl SqlAnywhereDialect {
    /// Creates a new SQL Anywhere dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the projection list for a DISTINCT query with the
    /// given ordering expressions appended as aliased projections.
    ///
    /// The engine requires every ORDER BY expression of a DISTINCT
    /// query to appear in the projection list. Direction and null
    /// placement modifiers are stripped (they are meaningless in a
    /// projection) and each surviving expression is aliased
    /// positionally: `alias_0`, `alias_1`, ... Ordering expressions
    /// must already be flattened to strings by the caller.
    #[must_use]
    pub fn columns_for_distinct(&self, columns: &[String], orders: &[String]) -> Vec<String> {
        let aliased = orders
            .iter()
            .map(|order| {
                let stripped = ORDER_MODIFIER.replace_all(order, "");
                NULLS_MODIFIER.replace_all(&stripped, "").trim().to_string()
            })
            .filter(|expr| !expr.is_empty())
            .enumerate()
            .map(|(i, expr)| format!("{expr} AS alias_{i}"));

        columns.iter().cloned().chain(aliased).collect()
    }

    fn render_predicate(predicate: &Predicate) -> &str {
        match predicate {
            Predicate::Raw(expr) => expr,
            Predicate::True => "1=1",
            Predicate::False => "1=0",
        }
    }
}

impl Dialect for SqlAnywhereDialect {
    fn name(&self) -> &'static str {
        "sqlanywhere"
    }

    fn quote_identifier(&self, name: &str) -> String {
        quoting::quote_identifier(name)
    }

    fn render_select(&self, stmt: &SelectStatement) -> String {
        let mut stmt = stmt.clone();
        let distinct = stmt.quantifier == Some(SetQuantifier::Distinct);

        // Ordering expressions of a DISTINCT query join the projection
        // list before any order is synthesized below, so the synthetic
        // ordinal never gets an alias.
        if distinct && !stmt.orders.is_empty() {
            stmt.projections = self.columns_for_distinct(&stmt.projections, &stmt.orders);
        }

        // An offset without a limit still needs TOP for START AT to
        // be valid syntax.
        if stmt.offset.is_some() && stmt.limit.is_none() {
            stmt.limit = Some(MAX_LIMIT);
        }

        // TOP without ORDER BY is non-deterministic; order by the
        // first projection ordinal.
        if stmt.limit.is_some() && stmt.orders.is_empty() {
            stmt.orders.push(String::from("1"));
        }

        let mut sql = String::from("SELECT");

        if let Some(limit) = stmt.limit {
            sql.push_str(&format!(" TOP {limit}"));
        }
        if let Some(offset) = stmt.offset {
            // The abstract offset is 0-based, START AT is 1-based.
            sql.push_str(&format!(" START AT {}", offset + 1));
        }
        if distinct {
            sql.push_str(" DISTINCT");
        }

        sql.push(' ');
        sql.push_str(&stmt.projections.join(", "));

        if let Some(source) = &stmt.source {
            sql.push_str(" FROM ");
            sql.push_str(source);
        }

        if !stmt.wheres.is_empty() {
            sql.push_str(" WHERE ");
            let rendered: Vec<&str> = stmt.wheres.iter().map(Self::render_predicate).collect();
            sql.push_str(&rendered.join(" AND "));
        }

        if !stmt.groups.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&stmt.groups.join(", "));
        }

        if !stmt.havings.is_empty() {
            sql.push_str(" HAVING ");
            let rendered: Vec<&str> = stmt.havings.iter().map(Self::render_predicate).collect();
            sql.push_str(&rendered.join(" AND "));
        }

        if !stmt.windows.is_empty() {
            sql.push_str(" WINDOW ");
            sql.push_str(&stmt.windows.join(", "));
        }

        if !stmt.orders.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&stmt.orders.join(", "));
        }

        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SelectStatement {
        SelectStatement::new().project("id").project("name").from("users")
    }

    #[test]
    fn test_plain_select() {
        let sql = SqlAnywhereDialect::new().render_select(&base());
        assert_eq!(sql, "SELECT id, name FROM users");
    }

    #[test]
    fn test_limit_synthesizes_order_by_ordinal() {
        let sql = SqlAnywhereDialect::new().render_select(&base().limit(10));
        assert_eq!(sql, "SELECT TOP 10 id, name FROM users ORDER BY 1");
        assert!(sql.starts_with("SELECT TOP 10"));
    }

    #[test]
    fn test_limit_keeps_explicit_order() {
        let sql = SqlAnywhereDialect::new().render_select(&base().limit(10).order_by("name DESC"));
        assert_eq!(sql, "SELECT TOP 10 id, name FROM users ORDER BY name DESC");
    }

    #[test]
    fn test_offset_without_limit_synthesizes_max_top() {
        let sql = SqlAnywhereDialect::new().render_select(&base().offset(20));
        assert_eq!(
            sql,
            "SELECT TOP 2147483647 START AT 21 id, name FROM users ORDER BY 1"
        );
    }

    #[test]
    fn test_offset_is_one_based() {
        let sql = SqlAnywhereDialect::new().render_select(&base().limit(5).offset(0));
        assert!(sql.contains("TOP 5 START AT 1 "));
    }

    #[test]
    fn test_distinct_after_paging() {
        let stmt = SelectStatement::new()
            .project("status")
            .from("orders")
            .distinct()
            .limit(3);
        let sql = SqlAnywhereDialect::new().render_select(&stmt);
        assert_eq!(sql, "SELECT TOP 3 DISTINCT status FROM orders ORDER BY 1");
    }

    #[test]
    fn test_distinct_order_by_appends_aliased_projection() {
        let stmt = SelectStatement::new()
            .project("status")
            .from("orders")
            .distinct()
            .order_by("created_at DESC");
        let sql = SqlAnywhereDialect::new().render_select(&stmt);
        assert_eq!(
            sql,
            "SELECT DISTINCT status, created_at AS alias_0 FROM orders ORDER BY created_at DESC"
        );
        let projection = sql.split(" FROM ").next().unwrap();
        assert!(!projection.contains("DESC"));
    }

    #[test]
    fn test_columns_for_distinct_strips_modifiers() {
        let dialect = SqlAnywhereDialect::new();
        let columns = vec![String::from("status")];
        let orders = vec![
            String::from("created_at DESC"),
            String::from("name ASC NULLS LAST"),
        ];
        assert_eq!(
            dialect.columns_for_distinct(&columns, &orders),
            vec![
                String::from("status"),
                String::from("created_at AS alias_0"),
                String::from("name AS alias_1"),
            ]
        );
    }

    #[test]
    fn test_columns_for_distinct_skips_blank_orders() {
        let dialect = SqlAnywhereDialect::new();
        let columns = vec![String::from("a")];
        let orders = vec![String::from("  "), String::from("b DESC")];
        assert_eq!(
            dialect.columns_for_distinct(&columns, &orders),
            vec![String::from("a"), String::from("b AS alias_0")]
        );
    }

    #[test]
    fn test_boolean_literals_render_as_tautologies() {
        let stmt = base()
            .and_where(Predicate::True)
            .and_having(Predicate::False)
            .group_by("name");
        let sql = SqlAnywhereDialect::new().render_select(&stmt);
        assert!(sql.contains("WHERE 1=1"));
        assert!(sql.contains("HAVING 1=0"));
    }

    #[test]
    fn test_predicates_joined_with_and() {
        let stmt = base()
            .and_where(Predicate::raw("a = 1"))
            .and_where(Predicate::raw("b = 2"));
        let sql = SqlAnywhereDialect::new().render_select(&stmt);
        assert!(sql.contains("WHERE a = 1 AND b = 2"));
    }

    #[test]
    fn test_clause_order_with_window() {
        let stmt = base()
            .group_by("name")
            .and_having(Predicate::raw("COUNT(*) > 1"))
            .window("w AS (PARTITION BY name)")
            .order_by("name");
        let sql = SqlAnywhereDialect::new().render_select(&stmt);
        let group = sql.find("GROUP BY").unwrap();
        let having = sql.find("HAVING").unwrap();
        let window = sql.find("WINDOW").unwrap();
        let order = sql.find("ORDER BY").unwrap();
        assert!(group < having && having < window && window < order);
    }

    #[test]
    fn test_dialect_name_and_quote() {
        let dialect = SqlAnywhereDialect::new();
        assert_eq!(dialect.name(), "sqlanywhere");
        assert_eq!(dialect.quote_identifier("us\"ers"), "\"users\"");
    }
}
