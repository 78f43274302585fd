//! Native type bridge.
//!
//! SQL Anywhere describes result columns with numeric wire type tags
//! and accepts bind parameters tagged with a small set of direct data
//! types. This module maps both directions: wire tag -> abstract type
//! for fetch, abstract value -> tagged wire value for bind, plus the
//! DDL type-name rules the engine uses for sized integers.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlany_core::value::SqlValue;

use crate::client::NativeValue;
use crate::error::{AdapterError, Result};

/// Wire-protocol column type tags as reported by the native client.
pub mod native_type {
    /// DATE.
    pub const DATE: u32 = 384;
    /// TIME.
    pub const TIME: u32 = 388;
    /// TIMESTAMP.
    pub const TIMESTAMP: u32 = 392;
    /// VARCHAR.
    pub const VARCHAR: u32 = 448;
    /// CHAR (fixed width).
    pub const FIXCHAR: u32 = 452;
    /// LONG VARCHAR.
    pub const LONGVARCHAR: u32 = 456;
    /// STRING.
    pub const STRING: u32 = 460;
    /// DOUBLE.
    pub const DOUBLE: u32 = 480;
    /// FLOAT.
    pub const FLOAT: u32 = 482;
    /// DECIMAL / NUMERIC.
    pub const DECIMAL: u32 = 484;
    /// INT.
    pub const INT: u32 = 496;
    /// SMALLINT.
    pub const SMALLINT: u32 = 500;
    /// BINARY.
    pub const BINARY: u32 = 524;
    /// LONG BINARY.
    pub const LONGBINARY: u32 = 528;
    /// TINYINT.
    pub const TINYINT: u32 = 604;
    /// BIGINT.
    pub const BIGINT: u32 = 608;
    /// UNSIGNED INT.
    pub const UNSINT: u32 = 612;
    /// UNSIGNED SMALLINT.
    pub const UNSSMALLINT: u32 = 616;
    /// UNSIGNED BIGINT.
    pub const UNSBIGINT: u32 = 620;
    /// BIT.
    pub const BIT: u32 = 624;
    /// NSTRING.
    pub const NSTRING: u32 = 628;
    /// NCHAR (fixed width).
    pub const NFIXCHAR: u32 = 632;
    /// NVARCHAR.
    pub const NVARCHAR: u32 = 636;
    /// LONG NVARCHAR.
    pub const LONGNVARCHAR: u32 = 640;
}

/// Direct data type tags for bind parameters.
pub mod direct_type {
    /// Binary payload. Distinct from STRING so binary bytes are never
    /// re-interpreted as character data.
    pub const BINARY: u32 = 1;
    /// Character payload.
    pub const STRING: u32 = 2;
    /// Double-precision float.
    pub const DOUBLE: u32 = 3;
    /// Signed 64-bit integer.
    pub const VAL64: u32 = 4;
    /// Unsigned 64-bit integer.
    pub const UVAL64: u32 = 5;
    /// Signed 32-bit integer.
    pub const VAL32: u32 = 6;
    /// Unsigned 32-bit integer.
    pub const UVAL32: u32 = 7;
    /// Signed 16-bit integer.
    pub const VAL16: u32 = 8;
    /// Unsigned 16-bit integer.
    pub const UVAL16: u32 = 9;
    /// Signed 8-bit integer.
    pub const VAL8: u32 = 10;
    /// Unsigned 8-bit integer.
    pub const UVAL8: u32 = 11;
}

/// Abstract column type derived from a wire tag or a SQL type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbstractType {
    /// Boolean (`bit`, `tinyint`).
    Boolean,
    /// Fixed-width integer with its byte width.
    Integer {
        /// Width in bytes: 1, 2, 4 or 8.
        bytes: u8,
    },
    /// Floating point.
    Double,
    /// Exact numeric.
    Decimal,
    /// Character data.
    Text,
    /// Binary data.
    Binary,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time.
    Timestamp,
}

impl AbstractType {
    /// Maps a wire-protocol type tag to an abstract type.
    #[must_use]
    pub fn from_native_code(code: u32) -> Option<Self> {
        use native_type as nt;
        match code {
            nt::BIT | nt::TINYINT => Some(Self::Boolean),
            nt::SMALLINT | nt::UNSSMALLINT => Some(Self::Integer { bytes: 2 }),
            nt::INT | nt::UNSINT => Some(Self::Integer { bytes: 4 }),
            nt::BIGINT | nt::UNSBIGINT => Some(Self::Integer { bytes: 8 }),
            nt::DOUBLE | nt::FLOAT => Some(Self::Double),
            nt::DECIMAL => Some(Self::Decimal),
            nt::VARCHAR | nt::FIXCHAR | nt::LONGVARCHAR | nt::STRING | nt::NSTRING
            | nt::NFIXCHAR | nt::NVARCHAR | nt::LONGNVARCHAR => Some(Self::Text),
            nt::BINARY | nt::LONGBINARY => Some(Self::Binary),
            nt::DATE => Some(Self::Date),
            nt::TIME => Some(Self::Time),
            nt::TIMESTAMP => Some(Self::Timestamp),
            _ => None,
        }
    }

    /// Derives an abstract type from the SQL type name the catalog
    /// reports (e.g. `varchar(255)`, `bigint`, `long binary`).
    #[must_use]
    pub fn from_sql_type_name(sql_type: &str) -> Self {
        let lower = sql_type.to_lowercase();
        // Multi-word and aliased names first, so "long binary" is not
        // matched as "binary" text and "datetime" not as "time".
        if lower.contains("long binary") || lower.contains("uniqueidentifier") {
            Self::Binary
        } else if lower.contains("long varchar") || lower.contains("text") {
            Self::Text
        } else if lower.starts_with("binary") {
            Self::Binary
        } else if lower.starts_with("tinyint") || lower.starts_with("bit") || lower.contains("boolean") {
            Self::Boolean
        } else if lower.starts_with("bigint") {
            Self::Integer { bytes: 8 }
        } else if lower.starts_with("smallint") {
            Self::Integer { bytes: 2 }
        } else if lower.contains("int") {
            Self::Integer {
                bytes: integer_width_from_sql_type(&lower),
            }
        } else if lower.contains("decimal") || lower.contains("numeric") {
            Self::Decimal
        } else if lower.contains("double") || lower.contains("float") || lower.contains("real") {
            Self::Double
        } else if lower.contains("timestamp") || lower.contains("datetime") {
            Self::Timestamp
        } else if lower.starts_with("date") {
            Self::Date
        } else if lower.starts_with("time") {
            Self::Time
        } else {
            // char, varchar, varbit, xml and anything unrecognized.
            Self::Text
        }
    }
}

/// Extracts the integer byte width from a SQL type name: 1 for
/// tinyint, 2 for smallint, 4 for integer, 8 for bigint; 4 when
/// unspecified.
#[must_use]
pub fn integer_width_from_sql_type(sql_type: &str) -> u8 {
    let lower = sql_type.to_lowercase();
    if lower.starts_with("tinyint") {
        1
    } else if lower.starts_with("smallint") {
        2
    } else if lower.starts_with("bigint") {
        8
    } else {
        4
    }
}

/// Abstract DDL column kinds accepted by [`type_to_sql`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DdlType {
    /// Autoincrementing integer primary key.
    PrimaryKey,
    /// Sized character column.
    String,
    /// Unbounded character column.
    Text,
    /// Integer column; the byte width is taken from `limit`.
    Integer,
    /// Floating point column.
    Float,
    /// Exact numeric column.
    Decimal,
    /// Date and time column.
    DateTime,
    /// Time column.
    Time,
    /// Date column.
    Date,
    /// Binary column.
    Binary,
    /// Boolean column.
    Boolean,
}

/// Renders a DDL type name with the engine's sizing rules.
///
/// The engine has no `INTEGER(n)` syntax; the requested byte width
/// selects the type name instead: 1 -> `tinyint`, 2 -> `smallint`,
/// 3-4 -> `integer`, 5-8 -> `bigint`, anything else -> `integer`.
#[must_use]
pub fn type_to_sql(ty: DdlType, limit: Option<u32>, precision: Option<u32>, scale: Option<u32>) -> String {
    match ty {
        DdlType::PrimaryKey => String::from("INTEGER PRIMARY KEY DEFAULT AUTOINCREMENT NOT NULL"),
        DdlType::Integer => String::from(match limit {
            Some(1) => "tinyint",
            Some(2) => "smallint",
            None | Some(3..=4) => "integer",
            Some(5..=8) => "bigint",
            Some(_) => "integer",
        }),
        DdlType::String => match limit {
            Some(n) => format!("varchar ({n})"),
            None => String::from("varchar(255)"),
        },
        DdlType::Text => String::from("long varchar"),
        DdlType::Float => String::from("float"),
        DdlType::Decimal => match (precision, scale) {
            (Some(p), Some(s)) => format!("decimal({p},{s})"),
            (Some(p), None) => format!("decimal({p})"),
            _ => String::from("decimal"),
        },
        DdlType::DateTime => String::from("datetime"),
        DdlType::Time => String::from("time"),
        DdlType::Date => String::from("date"),
        DdlType::Binary => match limit {
            Some(n) => format!("binary ({n})"),
            None => String::from("long binary"),
        },
        DdlType::Boolean => String::from("bit"),
    }
}

/// A bind parameter in its wire representation, tagged with a direct
/// data type.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    /// Explicit null marker; never an empty value.
    Null,
    /// Signed 64-bit integer, tagged [`direct_type::VAL64`].
    I64(i64),
    /// Double, tagged [`direct_type::DOUBLE`].
    Double(f64),
    /// Character data, tagged [`direct_type::STRING`].
    Text(String),
    /// Binary data, tagged [`direct_type::BINARY`] so the client
    /// never treats the bytes as character data.
    Binary(Vec<u8>),
}

impl BindValue {
    /// Encodes an abstract value into its wire representation.
    ///
    /// Temporal and decimal values transfer as text; booleans as the
    /// integers the engine stores in `bit` columns.
    #[must_use]
    pub fn from_sql_value(value: &SqlValue) -> Self {
        match value {
            SqlValue::Null => Self::Null,
            SqlValue::Bool(b) => Self::I64(i64::from(*b)),
            SqlValue::Int(n) => Self::I64(*n),
            SqlValue::Double(f) => Self::Double(*f),
            SqlValue::Decimal(d) => Self::Text(d.clone()),
            SqlValue::Text(s) => Self::Text(s.clone()),
            SqlValue::Binary(bytes) => Self::Binary(bytes.clone()),
            SqlValue::Date(d) => Self::Text(d.format("%Y-%m-%d").to_string()),
            SqlValue::Time(t) => Self::Text(t.format("%H:%M:%S%.6f").to_string()),
            SqlValue::Timestamp(ts) => Self::Text(ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string()),
        }
    }

    /// Returns the direct data type tag for this value, or `None` for
    /// the null marker.
    #[must_use]
    pub fn direct_type(&self) -> Option<u32> {
        match self {
            Self::Null => None,
            Self::I64(_) => Some(direct_type::VAL64),
            Self::Double(_) => Some(direct_type::DOUBLE),
            Self::Text(_) => Some(direct_type::STRING),
            Self::Binary(_) => Some(direct_type::BINARY),
        }
    }
}

/// Decodes one fetched cell into an abstract value, using the
/// column's wire type tag.
///
/// # Errors
///
/// Returns [`AdapterError::StatementInvalid`] when the cell payload
/// does not agree with the column tag (for example unparsable
/// temporal text), carrying a description of the mismatch.
pub fn decode_native_value(column_type: u32, value: &NativeValue) -> Result<SqlValue> {
    if matches!(value, NativeValue::Null) {
        return Ok(SqlValue::Null);
    }
    let abstract_type = AbstractType::from_native_code(column_type);
    match (abstract_type, value) {
        (Some(AbstractType::Boolean), NativeValue::I32(n)) => Ok(SqlValue::Bool(*n != 0)),
        (Some(AbstractType::Boolean), NativeValue::I64(n)) => Ok(SqlValue::Bool(*n != 0)),
        (Some(AbstractType::Integer { .. }), NativeValue::I32(n)) => Ok(SqlValue::Int(i64::from(*n))),
        (Some(AbstractType::Integer { .. }), NativeValue::I64(n)) => Ok(SqlValue::Int(*n)),
        (Some(AbstractType::Double), NativeValue::Double(f)) => Ok(SqlValue::Double(*f)),
        (Some(AbstractType::Decimal), NativeValue::Text(s)) => Ok(SqlValue::Decimal(s.clone())),
        (Some(AbstractType::Text), NativeValue::Text(s)) => Ok(SqlValue::Text(s.clone())),
        (Some(AbstractType::Text), NativeValue::Bytes(b)) => {
            Ok(SqlValue::Text(String::from_utf8_lossy(b).into_owned()))
        }
        (Some(AbstractType::Binary), NativeValue::Bytes(b)) => Ok(SqlValue::Binary(b.clone())),
        (Some(AbstractType::Binary), NativeValue::Text(s)) => {
            Ok(SqlValue::Binary(s.clone().into_bytes()))
        }
        (Some(AbstractType::Date), NativeValue::Text(s)) => parse_date(s),
        (Some(AbstractType::Time), NativeValue::Text(s)) => parse_time(s),
        (Some(AbstractType::Timestamp), NativeValue::Text(s)) => parse_timestamp(s),
        (_, other) => Err(decode_error(column_type, other)),
    }
}

fn parse_date(s: &str) -> Result<SqlValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(SqlValue::Date)
        .map_err(|e| text_decode_error("date", s, &e))
}

fn parse_time(s: &str) -> Result<SqlValue> {
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .map(SqlValue::Time)
        .map_err(|e| text_decode_error("time", s, &e))
}

fn parse_timestamp(s: &str) -> Result<SqlValue> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .map(SqlValue::Timestamp)
        .map_err(|e| text_decode_error("timestamp", s, &e))
}

fn decode_error(column_type: u32, value: &NativeValue) -> AdapterError {
    AdapterError::StatementInvalid {
        message: format!("cannot decode {value:?} reported as native type {column_type}"),
        code: None,
        sql: None,
    }
}

fn text_decode_error(kind: &str, raw: &str, err: &chrono::ParseError) -> AdapterError {
    AdapterError::StatementInvalid {
        message: format!("invalid {kind} value '{raw}': {err}"),
        code: None,
        sql: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_code_mapping() {
        assert_eq!(
            AbstractType::from_native_code(native_type::DECIMAL),
            Some(AbstractType::Decimal)
        );
        assert_eq!(
            AbstractType::from_native_code(native_type::BIGINT),
            Some(AbstractType::Integer { bytes: 8 })
        );
        assert_eq!(
            AbstractType::from_native_code(native_type::BIT),
            Some(AbstractType::Boolean)
        );
        assert_eq!(
            AbstractType::from_native_code(native_type::LONGBINARY),
            Some(AbstractType::Binary)
        );
        assert_eq!(AbstractType::from_native_code(9999), None);
    }

    #[test]
    fn test_sql_type_name_mapping() {
        assert_eq!(
            AbstractType::from_sql_type_name("varchar(255)"),
            AbstractType::Text
        );
        assert_eq!(
            AbstractType::from_sql_type_name("long binary"),
            AbstractType::Binary
        );
        assert_eq!(
            AbstractType::from_sql_type_name("long varchar"),
            AbstractType::Text
        );
        assert_eq!(
            AbstractType::from_sql_type_name("bigint"),
            AbstractType::Integer { bytes: 8 }
        );
        assert_eq!(
            AbstractType::from_sql_type_name("datetime"),
            AbstractType::Timestamp
        );
        assert_eq!(AbstractType::from_sql_type_name("bit"), AbstractType::Boolean);
        assert_eq!(
            AbstractType::from_sql_type_name("decimal(10,2)"),
            AbstractType::Decimal
        );
    }

    #[test]
    fn test_integer_width_extraction() {
        assert_eq!(integer_width_from_sql_type("tinyint"), 1);
        assert_eq!(integer_width_from_sql_type("smallint"), 2);
        assert_eq!(integer_width_from_sql_type("integer"), 4);
        assert_eq!(integer_width_from_sql_type("bigint"), 8);
        assert_eq!(integer_width_from_sql_type("unsigned int"), 4);
    }

    #[test]
    fn test_type_to_sql_integer_sizing() {
        assert_eq!(type_to_sql(DdlType::Integer, Some(1), None, None), "tinyint");
        assert_eq!(type_to_sql(DdlType::Integer, Some(2), None, None), "smallint");
        assert_eq!(type_to_sql(DdlType::Integer, Some(3), None, None), "integer");
        assert_eq!(type_to_sql(DdlType::Integer, Some(4), None, None), "integer");
        assert_eq!(type_to_sql(DdlType::Integer, Some(5), None, None), "bigint");
        assert_eq!(type_to_sql(DdlType::Integer, Some(8), None, None), "bigint");
        assert_eq!(type_to_sql(DdlType::Integer, None, None, None), "integer");
        assert_eq!(type_to_sql(DdlType::Integer, Some(16), None, None), "integer");
    }

    #[test]
    fn test_type_to_sql_string_and_binary() {
        assert_eq!(type_to_sql(DdlType::String, Some(40), None, None), "varchar (40)");
        assert_eq!(type_to_sql(DdlType::String, None, None, None), "varchar(255)");
        assert_eq!(type_to_sql(DdlType::Binary, Some(16), None, None), "binary (16)");
        assert_eq!(type_to_sql(DdlType::Binary, None, None, None), "long binary");
        assert_eq!(type_to_sql(DdlType::Boolean, None, None, None), "bit");
    }

    #[test]
    fn test_bind_binary_keeps_distinct_tag() {
        let bind = BindValue::from_sql_value(&SqlValue::Binary(vec![0x00, 0xFF]));
        assert_eq!(bind.direct_type(), Some(direct_type::BINARY));
        assert_ne!(bind.direct_type(), Some(direct_type::STRING));
        assert_eq!(bind, BindValue::Binary(vec![0x00, 0xFF]));
    }

    #[test]
    fn test_bind_null_is_explicit_marker() {
        let bind = BindValue::from_sql_value(&SqlValue::Null);
        assert_eq!(bind, BindValue::Null);
        assert_eq!(bind.direct_type(), None);
    }

    #[test]
    fn test_bind_bool_as_integer() {
        assert_eq!(
            BindValue::from_sql_value(&SqlValue::Bool(true)),
            BindValue::I64(1)
        );
    }

    #[test]
    fn test_decode_round_trips_binary() {
        let payload = vec![0x00, 0x27, 0x5C, 0xFF];
        let decoded =
            decode_native_value(native_type::BINARY, &NativeValue::Bytes(payload.clone())).unwrap();
        assert_eq!(decoded, SqlValue::Binary(payload));
    }

    #[test]
    fn test_decode_temporals() {
        let d = decode_native_value(
            native_type::DATE,
            &NativeValue::Text(String::from("2024-05-17")),
        )
        .unwrap();
        assert_eq!(
            d,
            SqlValue::Date(chrono::NaiveDate::from_ymd_opt(2024, 5, 17).unwrap())
        );

        let ts = decode_native_value(
            native_type::TIMESTAMP,
            &NativeValue::Text(String::from("2024-05-17 08:30:00")),
        )
        .unwrap();
        assert!(matches!(ts, SqlValue::Timestamp(_)));
    }

    #[test]
    fn test_decode_bit_to_bool() {
        assert_eq!(
            decode_native_value(native_type::BIT, &NativeValue::I32(1)).unwrap(),
            SqlValue::Bool(true)
        );
    }

    #[test]
    fn test_decode_mismatch_is_statement_invalid() {
        let err = decode_native_value(native_type::DATE, &NativeValue::Double(1.0)).unwrap_err();
        assert!(matches!(err, AdapterError::StatementInvalid { .. }));
    }
}
