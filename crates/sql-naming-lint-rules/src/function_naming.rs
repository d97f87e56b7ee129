//! Rule requiring function names to carry a prefix.
//!
//! Schema-qualified names are judged by their final segment, so
//! `public.fun_total` conforms and `public.total` does not.
//!
//! # Detected Patterns
//!
//! ```sql
//! CREATE FUNCTION public.configuration_get() RETURNS TEXT AS $$ ... $$;
//! ```
//!
//! # Good Patterns
//!
//! ```sql
//! CREATE OR REPLACE FUNCTION fun_configuration_get() RETURNS TEXT AS $$ ... $$;
//! ```

use sql_naming_lint_core::{
    AncestorPath, Construct, FileContext, Lookahead, NamingRule, NodeKind, Rule, Severity,
    SyntaxNode, Violation,
};

/// Rule code for function-naming.
pub const CODE: &str = "FN01";

/// Rule name for function-naming.
pub const NAME: &str = "functions.function_naming";

/// Requires function names to start with `fun_`, ignoring any schema qualifier.
#[derive(Debug, Clone)]
pub struct FunctionNaming {
    /// Severity level.
    pub severity: Severity,
    naming: NamingRule,
}

impl Default for FunctionNaming {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionNaming {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            naming: NamingRule::new(Construct::FunctionName),
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

impl Rule for FunctionNaming {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Function names should start with the expected prefix"
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
    use sql_naming_lint_core::test_support::{create_function, ident, kw, leaf, node, ws};

    #[test]
    fn test_detects_qualified_name() {
        let violations = check(
            FunctionNaming::new(),
            file(vec![create_function("public.configuration_get", &[])]),
        );
        assert_eq!(violations.len(), 1);
        insta::assert_snapshot!(violations[0].to_string(), @"test.json:1:17: error [FN01] Function name 'configuration_get' should start with 'fun_'.");
    }

    #[test]
    fn test_allows_prefixed_name() {
        let tree = file(vec![
            create_function("fun_total", &[("p_id", "INT")]),
            create_function("public.FUN_count", &[]),
        ]);
        assert!(check(FunctionNaming::new(), tree).is_empty());
    }

    #[test]
    fn test_object_reference_name() {
        let statement = node(
            "create_function_statement",
            vec![
                kw("CREATE"),
                ws(),
                kw("OR"),
                ws(),
                kw("REPLACE"),
                ws(),
                kw("FUNCTION"),
                ws(),
                node("object_reference", vec![ident("compute")]),
                leaf("bracketed", "()"),
            ],
        );
        let violations = check(FunctionNaming::new(), file(vec![statement]));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].subject_name, "compute");
    }

    #[test]
    fn test_parameters_are_not_judged() {
        let tree = file(vec![create_function("fun_total", &[("total", "INT")])]);
        assert!(check(FunctionNaming::new(), tree).is_empty());
    }
}
