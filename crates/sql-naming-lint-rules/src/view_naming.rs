//! Rule requiring view names to carry a prefix.
//!
//! Covers `CREATE VIEW`, `CREATE OR REPLACE VIEW` and
//! `CREATE MATERIALIZED VIEW`.

use sql_naming_lint_core::{
    AncestorPath, Construct, FileContext, Lookahead, NamingRule, NodeKind, Rule, Severity,
    SyntaxNode, Violation,
};

/// Rule code for view-naming.
pub const CODE: &str = "VW01";

/// Rule name for view-naming.
pub const NAME: &str = "views.view_naming";

/// Requires view and materialized view names to start with `v_`.
#[derive(Debug, Clone)]
pub struct ViewNaming {
    /// Severity level.
    pub severity: Severity,
    naming: NamingRule,
}

impl Default for ViewNaming {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewNaming {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            naming: NamingRule::new(Construct::ViewName),
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

impl Rule for ViewNaming {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "View names should start with the expected prefix"
    }

    fn groups(&self) -> &'static [&'static str] {
        &["all", "custom", "views"]
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
