//! Rule requiring check constraint names to carry a prefix.
//!
//! Both table constraints and inline column constraints are judged:
//!
//! ```sql
//! CREATE TABLE account (
//!     balance INT CONSTRAINT balance_positive CHECK (balance >= 0)
//! );
//! ```

use sql_naming_lint_core::{
    AncestorPath, Construct, FileContext, Lookahead, NamingRule, NodeKind, Rule, Severity,
    SyntaxNode, Violation,
};

/// Rule code for chk-constraint-naming.
pub const CODE: &str = "CR03";

/// Rule name for chk-constraint-naming.
pub const NAME: &str = "constraints.chk_constraint_naming";

/// Requires `CHECK` constraint names to start with `chk_`.
#[derive(Debug, Clone)]
pub struct ChkConstraintNaming {
    /// Severity level.
    pub severity: Severity,
    naming: NamingRule,
}

impl Default for ChkConstraintNaming {
    fn default() -> Self {
        Self::new()
    }
}

impl ChkConstraintNaming {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            naming: NamingRule::new(Construct::Check),
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

impl Rule for ChkConstraintNaming {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Check constraint names should start with the expected prefix"
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
