//! Abstract SELECT statement.
//!
//! [`SelectStatement`] carries the relational pieces a dialect needs
//! to render engine-specific SQL text: projections, source,
//! predicates, grouping, windows, ordering and paging. Expressions
//! are flattened strings; callers holding structured expression nodes
//! must convert them to text before building the statement, because
//! dialects post-process ordering expressions textually (for example
//! when a distinct query forces order expressions into the projection
//! list).

/// Set quantifier for the projection list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetQuantifier {
    /// ALL (the implicit default, never rendered).
    All,
    /// DISTINCT.
    Distinct,
}

/// A predicate in a WHERE or HAVING clause.
///
/// Boolean literals are kept structured rather than flattened so that
/// dialects without boolean literal keywords can render them as
/// tautologies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// An opaque SQL expression.
    Raw(String),
    /// The literal TRUE.
    True,
    /// The literal FALSE.
    False,
}

impl Predicate {
    /// Builds a raw predicate from an expression string.
    #[must_use]
    pub fn raw(expr: impl Into<String>) -> Self {
        Self::Raw(expr.into())
    }
}

/// An abstract SELECT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    /// Projection expressions, in order.
    pub projections: Vec<String>,
    /// FROM source (table reference or join expression).
    pub source: Option<String>,
    /// WHERE predicates, joined with AND by the dialect.
    pub wheres: Vec<Predicate>,
    /// GROUP BY expressions.
    pub groups: Vec<String>,
    /// HAVING predicates, joined with AND by the dialect.
    pub havings: Vec<Predicate>,
    /// WINDOW clause definitions.
    pub windows: Vec<String>,
    /// ORDER BY expressions, possibly carrying ASC/DESC and NULLS
    /// FIRST/LAST modifiers.
    pub orders: Vec<String>,
    /// Row limit.
    pub limit: Option<u64>,
    /// Zero-based row offset.
    pub offset: Option<u64>,
    /// Optional set quantifier.
    pub quantifier: Option<SetQuantifier>,
}

impl SelectStatement {
    /// Creates an empty SELECT statement.
    #[must_use]
    pub fn new() -> Self {
        Self {
            projections: vec![],
            source: None,
            wheres: vec![],
            groups: vec![],
            havings: vec![],
            windows: vec![],
            orders: vec![],
            limit: None,
            offset: None,
            quantifier: None,
        }
    }

    /// Adds a projection expression.
    #[must_use]
    pub fn project(mut self, expr: impl Into<String>) -> Self {
        self.projections.push(expr.into());
        self
    }

    /// Sets the FROM source.
    #[must_use]
    pub fn from(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a WHERE predicate.
    #[must_use]
    pub fn and_where(mut self, predicate: Predicate) -> Self {
        self.wheres.push(predicate);
        self
    }

    /// Adds a GROUP BY expression.
    #[must_use]
    pub fn group_by(mut self, expr: impl Into<String>) -> Self {
        self.groups.push(expr.into());
        self
    }

    /// Adds a HAVING predicate.
    #[must_use]
    pub fn and_having(mut self, predicate: Predicate) -> Self {
        self.havings.push(predicate);
        self
    }

    /// Adds a WINDOW definition.
    #[must_use]
    pub fn window(mut self, definition: impl Into<String>) -> Self {
        self.windows.push(definition.into());
        self
    }

    /// Adds an ORDER BY expression.
    #[must_use]
    pub fn order_by(mut self, expr: impl Into<String>) -> Self {
        self.orders.push(expr.into());
        self
    }

    /// Sets the row limit.
    #[must_use]
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets the zero-based row offset.
    #[must_use]
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Marks the projection list DISTINCT.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.quantifier = Some(SetQuantifier::Distinct);
        self
    }
}

impl Default for SelectStatement {
    fn default() -> Self {
        Self::new()
    }
}
