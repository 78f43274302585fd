//! Identifier and literal quoting.
//!
//! Quoting never touches the connection; everything here is a pure
//! string transform. Identifier quoting is deliberately lossy:
//! backslashes and double quotes are dropped rather than escaped, so
//! an identifier can never break out of its quotes.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlany_core::value::SqlValue;

use crate::error::Result;
use crate::name::OwnerQualifiedName;

/// Timestamp rendering matching the session
/// `timestamp_format = 'YYYY-MM-DD HH:NN:SS'` option.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.6f";

/// Quotes an identifier (column, table or owner name).
///
/// Backslash and double-quote characters are removed, not escaped,
/// and the remainder is wrapped in one pair of double quotes. The
/// input must be the unquoted form; quoting is not re-applied to
/// already-quoted text by callers.
#[must_use]
pub fn quote_identifier(ident: &str) -> String {
    let cleaned: String = ident.chars().filter(|c| *c != '\\' && *c != '"').collect();
    format!("\"{cleaned}\"")
}

/// Quotes a possibly owner-qualified table reference, quoting each
/// present part and joining with `.`.
///
/// # Errors
///
/// Returns [`crate::error::AdapterError::MalformedIdentifier`] when
/// the reference does not parse.
pub fn quote_table_name(name: &str) -> Result<String> {
    Ok(OwnerQualifiedName::parse(name)?.quoted())
}

/// Quotes a string for embedding as a SQL string literal, doubling
/// embedded single quotes.
#[must_use]
pub fn quote_string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Renders abstract values as SQL literals.
///
/// The connection's character-set label is threaded in explicitly
/// rather than read from ambient state; byte-level transcoding to
/// that character set is the native client's job, the label travels
/// in the `CS=` connection parameter.
#[derive(Debug, Clone, Default)]
pub struct Quoter {
    encoding: Option<String>,
}

impl Quoter {
    /// Creates a quoter for a connection with the given character-set
    /// label.
    #[must_use]
    pub fn new(encoding: Option<String>) -> Self {
        Self { encoding }
    }

    /// Returns the connection character-set label, if configured.
    #[must_use]
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// Renders a value as a SQL literal.
    ///
    /// Booleans render unquoted as `1`/`0` (the engine stores them in
    /// `bit` columns). Binary values are passed through as a
    /// single-quoted byte sequence; the superseded `\xHH` escaping
    /// scheme is not applied. Prefer binding over inlining for binary
    /// payloads, which keeps them byte-exact.
    #[must_use]
    pub fn quote_value(&self, value: &SqlValue) -> String {
        match value {
            SqlValue::Null => String::from("NULL"),
            SqlValue::Bool(true) => String::from("1"),
            SqlValue::Bool(false) => String::from("0"),
            SqlValue::Int(n) => n.to_string(),
            SqlValue::Double(f) => f.to_string(),
            SqlValue::Decimal(d) => d.clone(),
            SqlValue::Text(s) => quote_string_literal(s),
            SqlValue::Binary(bytes) => {
                let raw = String::from_utf8_lossy(bytes);
                format!("'{}'", raw.replace('\'', "''"))
            }
            SqlValue::Date(d) => quote_date(d),
            SqlValue::Time(t) => quote_time(t),
            SqlValue::Timestamp(ts) => quote_timestamp(ts),
        }
    }
}

fn quote_date(d: &NaiveDate) -> String {
    format!("'{}'", d.format(DATE_FORMAT))
}

fn quote_time(t: &NaiveTime) -> String {
    format!("'{}'", t.format(TIME_FORMAT))
}

fn quote_timestamp(ts: &NaiveDateTime) -> String {
    format!("'{}'", ts.format(TIMESTAMP_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier_strips_quotes_and_backslashes() {
        let quoted = quote_identifier("us\\er\"s");
        assert_eq!(quoted, "\"users\"");
        assert!(!quoted[1..quoted.len() - 1].contains('"'));
        assert!(!quoted.contains('\\'));
    }

    #[test]
    fn test_quote_identifier_wraps_once() {
        assert_eq!(quote_identifier("users"), "\"users\"");
    }

    #[test]
    fn test_quote_table_name_owner_qualified() {
        assert_eq!(quote_table_name("dba.users").unwrap(), "\"dba\".\"users\"");
        assert_eq!(quote_table_name("users").unwrap(), "\"users\"");
    }

    #[test]
    fn test_quote_value_booleans_unquoted() {
        let quoter = Quoter::default();
        assert_eq!(quoter.quote_value(&SqlValue::Bool(true)), "1");
        assert_eq!(quoter.quote_value(&SqlValue::Bool(false)), "0");
    }

    #[test]
    fn test_quote_value_text_escapes_single_quotes() {
        let quoter = Quoter::default();
        assert_eq!(
            quoter.quote_value(&SqlValue::Text(String::from("O'Brien"))),
            "'O''Brien'"
        );
    }

    #[test]
    fn test_quote_value_binary_passthrough() {
        let quoter = Quoter::default();
        // No hex escaping: the bytes appear as-is inside the quotes.
        assert_eq!(
            quoter.quote_value(&SqlValue::Binary(b"abc".to_vec())),
            "'abc'"
        );
    }

    #[test]
    fn test_quote_value_decimal_bare() {
        let quoter = Quoter::default();
        assert_eq!(
            quoter.quote_value(&SqlValue::Decimal(String::from("12.50"))),
            "12.50"
        );
    }

    #[test]
    fn test_quote_value_null() {
        assert_eq!(Quoter::default().quote_value(&SqlValue::Null), "NULL");
    }

    #[test]
    fn test_quote_value_date() {
        let quoter = Quoter::new(Some(String::from("UTF-8")));
        let d = chrono::NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        assert_eq!(quoter.quote_value(&SqlValue::Date(d)), "'2024-05-17'");
        assert_eq!(quoter.encoding(), Some("UTF-8"));
    }
}
