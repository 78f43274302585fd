//! Owner-qualified relation names.
//!
//! SQL Anywhere references relations as `owner.identifier`, where
//! either part may be double-quoted and a quoted part may itself
//! contain `.`. Parsed parts are stored unquoted so the same name
//! compares equal regardless of how the source string was quoted.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AdapterError, Result};
use crate::quoting;

/// One unquoted segment, or one double-quoted span taken whole (the
/// quotes protect embedded `.` from being treated as the separator).
static NAME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^".\s]+|"[^"]*""#).expect("valid token pattern"));

/// An owner-qualified relation name with unquoted parts.
///
/// Equality and hashing are defined over the unquoted pair, so
/// `users`, `"users"` and `dba."users"` vs `"dba".users` compare the
/// way the engine resolves them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerQualifiedName {
    owner: Option<String>,
    identifier: String,
}

impl OwnerQualifiedName {
    /// Creates a name from raw parts, stripping surrounding quotes if
    /// present.
    #[must_use]
    pub fn new(owner: Option<&str>, identifier: &str) -> Self {
        Self {
            owner: owner.map(unquote),
            identifier: unquote(identifier),
        }
    }

    /// Parses a possibly owner-qualified, possibly quoted reference.
    ///
    /// Accepted forms include `table_name`, `"table.name"`,
    /// `owner.table_name`, `owner."table.name"` and
    /// `"ow.ner"."table name"`.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::MalformedIdentifier`] when the string
    /// does not tokenize into exactly one or two parts.
    pub fn parse(raw: &str) -> Result<Self> {
        let tokens: Vec<&str> = NAME_TOKEN.find_iter(raw).map(|m| m.as_str()).collect();
        match tokens.as_slice() {
            [identifier] => Ok(Self::new(None, identifier)),
            [owner, identifier] => Ok(Self::new(Some(owner), identifier)),
            _ => Err(AdapterError::MalformedIdentifier(String::from(raw))),
        }
    }

    /// Returns the unquoted owner, if present.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Returns the unquoted identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Renders the name with every part quoted, joined with `.`.
    #[must_use]
    pub fn quoted(&self) -> String {
        match &self.owner {
            Some(owner) => format!(
                "{}.{}",
                quoting::quote_identifier(owner),
                quoting::quote_identifier(&self.identifier)
            ),
            None => quoting::quote_identifier(&self.identifier),
        }
    }
}

impl fmt::Display for OwnerQualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            Some(owner) => write!(f, "{owner}.{}", self.identifier),
            None => write!(f, "{}", self.identifier),
        }
    }
}

fn unquote(part: &str) -> String {
    if part.len() >= 2 && part.starts_with('"') && part.ends_with('"') {
        String::from(&part[1..part.len() - 1])
    } else {
        String::from(part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_identifier() {
        let name = OwnerQualifiedName::parse("users").unwrap();
        assert_eq!(name.owner(), None);
        assert_eq!(name.identifier(), "users");
    }

    #[test]
    fn test_parse_owner_qualified() {
        let name = OwnerQualifiedName::parse("dba.users").unwrap();
        assert_eq!(name.owner(), Some("dba"));
        assert_eq!(name.identifier(), "users");
    }

    #[test]
    fn test_parse_quoted_identifier_with_dot() {
        let name = OwnerQualifiedName::parse("\"table.name\"").unwrap();
        assert_eq!(name.owner(), None);
        assert_eq!(name.identifier(), "table.name");
    }

    #[test]
    fn test_parse_quoted_owner_and_identifier() {
        let name = OwnerQualifiedName::parse("\"ow.ner\".\"table name\"").unwrap();
        assert_eq!(name.owner(), Some("ow.ner"));
        assert_eq!(name.identifier(), "table name");
    }

    #[test]
    fn test_parse_mixed_quoting() {
        let name = OwnerQualifiedName::parse("owner.\"table.name\"").unwrap();
        assert_eq!(name.owner(), Some("owner"));
        assert_eq!(name.identifier(), "table.name");
    }

    #[test]
    fn test_parse_rejects_three_parts() {
        let err = OwnerQualifiedName::parse("a.b.c").unwrap_err();
        assert!(matches!(err, AdapterError::MalformedIdentifier(_)));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(OwnerQualifiedName::parse("").is_err());
    }

    #[test]
    fn test_equality_ignores_source_quoting() {
        let quoted = OwnerQualifiedName::parse("\"dba\".\"users\"").unwrap();
        let bare = OwnerQualifiedName::parse("dba.users").unwrap();
        assert_eq!(quoted, bare);
    }

    #[test]
    fn test_quoted_round_trips_to_same_rendering() {
        // Parsing a quoted form and re-rendering is stable even though
        // the unquoted raw input is not recoverable.
        let first = OwnerQualifiedName::parse("\"ow.ner\".\"table.name\"").unwrap();
        let rendered = first.quoted();
        assert_eq!(rendered, "\"ow.ner\".\"table.name\"");
        let second = OwnerQualifiedName::parse(&rendered).unwrap();
        assert_eq!(second.quoted(), rendered);
        assert_eq!(first, second);
    }

    #[test]
    fn test_display_unquoted() {
        let name = OwnerQualifiedName::parse("dba.\"users\"").unwrap();
        assert_eq!(name.to_string(), "dba.users");
    }
}
