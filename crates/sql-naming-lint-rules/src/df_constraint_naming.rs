//! Rule requiring named default constraints to carry a prefix.
//!
//! # Detected Patterns
//!
//! ```sql
//! CREATE TABLE account (status INT CONSTRAINT status_default DEFAULT 0);
//! ```
//!
//! # Good Patterns
//!
//! ```sql
//! CREATE TABLE account (status INT CONSTRAINT df_status DEFAULT 0);
//! ```

use sql_naming_lint_core::{
    AncestorPath, Construct, FileContext, Lookahead, NamingRule, NodeKind, Rule, Severity,
    SyntaxNode, Violation,
};

/// Rule code for df-constraint-naming.
pub const CODE: &str = "CR05";

/// Rule name for df-constraint-naming.
pub const NAME: &str = "constraints.df_constraint_naming";

/// Requires `DEFAULT` constraint names to start with `df_`.
#[derive(Debug, Clone)]
pub struct DfConstraintNaming {
    /// Severity level.
    pub severity: Severity,
    naming: NamingRule,
}

impl Default for DfConstraintNaming {
    fn default() -> Self {
        Self::new()
    }
}

impl DfConstraintNaming {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            naming: NamingRule::new(Construct::Default),
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

impl Rule for DfConstraintNaming {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Default constraint names should start with the expected prefix"
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{check, create_table};
    use sql_naming_lint_core::test_support::{ident, kw, leaf, node, ws};

    fn status_column(name: &str) -> SyntaxNode {
        node(
            "column_definition",
            vec![
                ident("status"),
                ws(),
                node("data_type", vec![kw("INT")]),
                ws(),
                node(
                    "column_constraint_segment",
                    vec![
                        kw("CONSTRAINT"),
                        ws(),
                        node("object_reference", vec![ident(name)]),
                        ws(),
                        kw("DEFAULT"),
                        ws(),
                        leaf("numeric_literal", "0"),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_detects_missing_prefix() {
        let violations = check(DfConstraintNaming::new(), create_table(vec![status_column("status_default")]));
        insta::assert_snapshot!(violations[0].to_string(), @"test.json:1:39: error [CR05] DEFAULT constraint name 'status_default' should start with 'df_'.");
    }

    #[test]
    fn test_allows_prefixed_name() {
        let violations = check(DfConstraintNaming::new(), create_table(vec![status_column("DF_status")]));
        assert!(violations.is_empty());
    }

    #[test]
    fn test_unnamed_default_is_ignored() {
        let column = node(
            "column_definition",
            vec![ident("status"), ws(), kw("DEFAULT"), ws(), leaf("numeric_literal", "0")],
        );
        assert!(check(DfConstraintNaming::new(), create_table(vec![column])).is_empty());
    }
}
