//! Rule trait for defining naming rules.

use crate::context::FileContext;
use crate::evaluator::{Finding, NamingRule};
use crate::tree::{AncestorPath, NodeKind, SyntaxNode};
use crate::types::{Severity, Suggestion, Violation};

/// A lint rule evaluated on individual parse-tree nodes.
///
/// The crawler calls [`check`](Rule::check) once for every node whose kind is
/// in [`kinds_of_interest`](Rule::kinds_of_interest), passing the node's full
/// ancestor path. Implementations must not keep per-call state.
///
/// # Example
///
/// ```ignore
/// use sql_naming_lint_core::{Construct, FileContext, NamingRule, NodeKind, Rule, Violation};
///
/// pub struct IndexNaming(NamingRule);
///
/// impl Rule for IndexNaming {
///     fn name(&self) -> &'static str { "custom.index_naming" }
///     fn code(&self) -> &'static str { "IX01" }
///     fn kinds_of_interest(&self) -> &[NodeKind] { &self.0.config().kinds_of_interest }
///
///     fn check(&self, ctx: &FileContext, node: &SyntaxNode, ancestors: &AncestorPath<'_>) -> Vec<Violation> {
///         self.0.check_as(self, ctx, node, ancestors)
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the dotted rule name (e.g., "constraints.pk_constraint_naming").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "CR01").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Groups this rule belongs to, used for selection.
    fn groups(&self) -> &'static [&'static str] {
        &["all"]
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Node kinds this rule wants to visit.
    fn kinds_of_interest(&self) -> &[NodeKind];

    /// Checks one visited node. Returns at most one violation.
    fn check(
        &self,
        ctx: &FileContext<'_>,
        node: &SyntaxNode,
        ancestors: &AncestorPath<'_>,
    ) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

impl NamingRule {
    /// Evaluates `node` and reports any finding under `rule`'s identity.
    ///
    /// This is the whole of [`Rule::check`] for the naming rules.
    pub fn check_as<R: Rule + ?Sized>(
        &self,
        rule: &R,
        ctx: &FileContext<'_>,
        node: &SyntaxNode,
        ancestors: &AncestorPath<'_>,
    ) -> Vec<Violation> {
        self.evaluate(node, ancestors)
            .map(|finding| report(rule, ctx, finding))
            .into_iter()
            .collect()
    }
}

fn report<R: Rule + ?Sized>(rule: &R, ctx: &FileContext<'_>, finding: Finding<'_>) -> Violation {
    let rename = format!("{}{}", finding.expected_prefix, finding.subject_name);
    Violation::new(
        rule.code(),
        rule.name(),
        rule.default_severity(),
        ctx.location_of(finding.anchor),
        finding.message,
    )
    .with_subject(finding.subject_name, finding.expected_prefix)
    .with_suggestion(Suggestion::new(format!("rename to '{rename}'")))
}
