//! Rule requiring primary-key constraint names to carry a prefix.
//!
//! # Detected Patterns
//!
//! ```sql
//! CREATE TABLE person (id INT, CONSTRAINT person_pk PRIMARY KEY (id));
//! ALTER TABLE person ADD CONSTRAINT person_pk PRIMARY KEY (id);
//! ```
//!
//! # Good Patterns
//!
//! ```sql
//! CREATE TABLE person (id INT, CONSTRAINT pk_person PRIMARY KEY (id));
//! ```
//!
//! Unnamed primary keys (`id INT PRIMARY KEY`) have no name to judge and are
//! never reported.

use sql_naming_lint_core::{
    AncestorPath, Construct, FileContext, Lookahead, NamingRule, NodeKind, Rule, Severity,
    SyntaxNode, Violation,
};

/// Rule code for pk-constraint-naming.
pub const CODE: &str = "CR01";

/// Rule name for pk-constraint-naming.
pub const NAME: &str = "constraints.pk_constraint_naming";

/// Requires `PRIMARY KEY` constraint names to start with `pk_`.
#[derive(Debug, Clone)]
pub struct PkConstraintNaming {
    /// Severity level.
    pub severity: Severity,
    naming: NamingRule,
}

impl Default for PkConstraintNaming {
    fn default() -> Self {
        Self::new()
    }
}

impl PkConstraintNaming {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            naming: NamingRule::new(Construct::PrimaryKey),
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

impl Rule for PkConstraintNaming {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Primary key constraint names should start with the expected prefix"
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
    use sql_naming_lint_core::test_support::{constraint_clause, ident, kw, node, ws};

    fn id_column() -> SyntaxNode {
        node(
            "column_definition",
            vec![ident("id"), ws(), node("data_type", vec![kw("INT")])],
        )
    }

    #[test]
    fn test_detects_missing_prefix() {
        let tree = create_table(vec![
            id_column(),
            constraint_clause("person_pk", &["PRIMARY", "KEY"]),
        ]);
        let violations = check(PkConstraintNaming::new(), tree);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].subject_name, "person_pk");
        insta::assert_snapshot!(violations[0].to_string(), @"test.json:1:36: error [CR01] PRIMARY KEY constraint name 'person_pk' should start with 'pk_'.");
    }

    #[test]
    fn test_allows_prefixed_name_in_any_case() {
        let tree = create_table(vec![
            id_column(),
            constraint_clause("PK_Person", &["PRIMARY", "KEY"]),
        ]);
        assert!(check(PkConstraintNaming::new(), tree).is_empty());
    }

    #[test]
    fn test_ignores_other_constraint_kinds() {
        let tree = create_table(vec![
            constraint_clause("person_uc", &["UNIQUE"]),
            constraint_clause("person_fk", &["FOREIGN", "KEY"]),
        ]);
        assert!(check(PkConstraintNaming::new(), tree).is_empty());
    }

    #[test]
    fn test_custom_prefix() {
        let tree = create_table(vec![constraint_clause("pk_person", &["PRIMARY", "KEY"])]);
        let violations = check(PkConstraintNaming::new().expected_prefix("key_"), tree);
        assert_eq!(
            violations[0].message,
            "PRIMARY KEY constraint name 'pk_person' should start with 'key_'."
        );
    }
}
