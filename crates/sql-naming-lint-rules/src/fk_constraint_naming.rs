//! Rule requiring foreign-key constraint names to carry a prefix.
//!
//! # Detected Patterns
//!
//! ```sql
//! ALTER TABLE orders ADD CONSTRAINT orders_customer
//!     FOREIGN KEY (customer_id) REFERENCES customer (id);
//! ```
//!
//! # Good Patterns
//!
//! ```sql
//! ALTER TABLE orders ADD CONSTRAINT fk_orders_customer
//!     FOREIGN KEY (customer_id) REFERENCES customer (id);
//! ```

use sql_naming_lint_core::{
    AncestorPath, Construct, FileContext, Lookahead, NamingRule, NodeKind, Rule, Severity,
    SyntaxNode, Violation,
};

/// Rule code for fk-constraint-naming.
pub const CODE: &str = "CR02";

/// Rule name for fk-constraint-naming.
pub const NAME: &str = "constraints.fk_constraint_naming";

/// Requires `FOREIGN KEY` constraint names to start with `fk_`.
#[derive(Debug, Clone)]
pub struct FkConstraintNaming {
    /// Severity level.
    pub severity: Severity,
    naming: NamingRule,
}

impl Default for FkConstraintNaming {
    fn default() -> Self {
        Self::new()
    }
}

impl FkConstraintNaming {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            naming: NamingRule::new(Construct::ForeignKey),
        }
    }

    /// Sets the expected prefix.
    #[must_use]
    pub fn expected_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.naming = self.naming.with_prefix(prefix);
        self
    }

    /// Sets the keyword lookahead bounds.
    #[must_use]
    pub fn lookahead(mut self, lookahead: Lookahead) -> Self {
        self.naming = self.naming.with_lookahead(lookahead);
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for FkConstraintNaming {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Foreign key constraint names should start with the expected prefix"
    }

    fn groups(&self) -> &'static [&'static str] {
        &["all", "custom", "constraints"]
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn kinds_of_interest(&self) -> &[NodeKind] {
        &self.naming.config().kinds_of_interest
    }

    fn check(
        &self,
        ctx: &FileContext<'_>,
        node: &SyntaxNode,
        ancestors: &AncestorPath<'_>,
    ) -> Vec<Violation> {
        self.naming.check_as(self, ctx, node, ancestors)
    }
}
