//! Rule requiring unique constraint names to carry a prefix.

use sql_naming_lint_core::{
    AncestorPath, Construct, FileContext, Lookahead, NamingRule, NodeKind, Rule, Severity,
    SyntaxNode, Violation,
};

/// Rule code for uc-constraint-naming.
pub const CODE: &str = "CR04";

/// Rule name for uc-constraint-naming.
pub const NAME: &str = "constraints.uc_constraint_naming";

/// Requires `UNIQUE` constraint names to start with `uc_`.
#[derive(Debug, Clone)]
pub struct UcConstraintNaming {
    /// Severity level.
    pub severity: Severity,
    naming: NamingRule,
}

impl Default for UcConstraintNaming {
    fn default() -> Self {
        Self::new()
    }
}

impl UcConstraintNaming {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            naming: NamingRule::new(Construct::Unique),
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

impl Rule for UcConstraintNaming {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Unique constraint names should start with the expected prefix"
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
