//! Rule requiring function parameter names to carry a prefix.
//!
//! # Detected Patterns
//!
//! ```sql
//! CREATE FUNCTION fun_users(p_min_age INT, max_age INT) RETURNS INT AS $$ ... $$;
//! ```
//!
//! # Good Patterns
//!
//! ```sql
//! CREATE FUNCTION fun_users(p_min_age INT, p_max_age INT) RETURNS INT AS $$ ... $$;
//! CREATE FUNCTION fun_users(IN p_min_age INT) RETURNS INT AS $$ ... $$;
//! ```
//!
//! Argument modes (`IN`, `OUT`, `INOUT`, `VARIADIC`) are not names.

use sql_naming_lint_core::{
    AncestorPath, Construct, FileContext, Lookahead, NamingRule, NodeKind, Rule, Severity,
    SyntaxNode, Violation,
};

/// Rule code for function-parameter-naming.
pub const CODE: &str = "FN02";

/// Rule name for function-parameter-naming.
pub const NAME: &str = "functions.function_parameter_naming";

/// Requires function parameter names to start with `p_`.
///
/// At most one violation is reported per function: the first parameter
/// without the prefix, in declaration order.
#[derive(Debug, Clone)]
pub struct FunctionParameterNaming {
    /// Severity level.
    pub severity: Severity,
    naming: NamingRule,
}

impl Default for FunctionParameterNaming {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionParameterNaming {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            naming: NamingRule::new(Construct::FunctionParameter),
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

impl Rule for FunctionParameterNaming {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Function parameter names should start with the expected prefix"
    }

    fn groups(&self) -> &'static [&'static str] {
        &["all", "custom", "functions"]
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
    use crate::testing::{check, file};
    use sql_naming_lint_core::test_support::{bracketed, create_function, ident, kw, leaf, node, ws};

    #[test]
    fn test_reports_first_offending_parameter_only() {
        let tree = file(vec![create_function(
            "fun_users",
            &[("p_min_age", "INT"), ("max_age", "INT"), ("active", "BOOLEAN")],
        )]);
        let violations = check(FunctionParameterNaming::new(), tree);
        assert_eq!(violations.len(), 1);
        insta::assert_snapshot!(violations[0].to_string(), @"test.json:1:42: error [FN02] Function parameter name 'max_age' should start with 'p_'.");
    }

    #[test]
    fn test_function_without_parameters() {
        let tree = file(vec![create_function("fun_now", &[])]);
        assert!(check(FunctionParameterNaming::new(), tree).is_empty());
    }

    #[test]
    fn test_argument_modes_are_skipped() {
        let definition = |mode: &str, name: &str| {
            leaf("parameter_definition", &format!("{mode} {name} INT"))
        };
        let statement = node(
            "create_function_statement",
            vec![
                kw("CREATE"),
                ws(),
                kw("FUNCTION"),
                ws(),
                node("function_name", vec![leaf("function_name_identifier", "fun_split")]),
                node(
                    "function_parameter_list",
                    vec![bracketed(vec![
                        definition("IN", "p_text"),
                        leaf("comma", ","),
                        ws(),
                        definition("OUT", "parts"),
                    ])],
                ),
            ],
        );
        let violations = check(FunctionParameterNaming::new(), file(vec![statement]));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].subject_name, "parts");
    }

    #[test]
    fn test_custom_prefix() {
        let tree = file(vec![create_function("fun_users", &[("p_min_age", "INT")])]);
        let violations = check(FunctionParameterNaming::new().expected_prefix("in_"), tree);
        assert_eq!(violations[0].expected_prefix, "in_");
        assert_eq!(violations[0].subject_name, "p_min_age");
    }

    #[test]
    fn test_create_table_is_ignored() {
        let tree = node(
            "file",
            vec![node("statement", vec![kw("CREATE"), ws(), kw("TABLE"), ws(), ident("t")])],
        );
        assert!(check(FunctionParameterNaming::new(), tree).is_empty());
    }
}
