//! SQL dialect support.
//!
//! Different engines render the same abstract statement differently.
//! This module provides the trait adapter crates implement; the core
//! crate stays engine-agnostic.

use crate::select::SelectStatement;

/// Trait for SQL dialect-specific rendering.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Quotes an identifier.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        format!("{quote}{name}{quote}")
    }

    /// Renders an abstract SELECT statement into dialect SQL text.
    fn render_select(&self, stmt: &SelectStatement) -> String;
}
