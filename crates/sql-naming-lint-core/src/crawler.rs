//! Depth-first crawl that hands each node of interest to the rules.

use tracing::debug;

use crate::context::FileContext;
use crate::rule::RuleBox;
use crate::tree::SyntaxNode;
use crate::types::Violation;

/// Visits every node of `ctx.tree` once, in pre-order, and collects the
/// violations of each rule whose interest set contains the node's kind.
///
/// Results are ordered by source offset, then rule code.
#[must_use]
pub fn crawl(ctx: &FileContext<'_>, rules: &[RuleBox]) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut ancestors: Vec<&SyntaxNode> = Vec::new();
    visit(ctx, rules, ctx.tree.root(), &mut ancestors, &mut violations);

    violations.sort_by(|a, b| {
        a.location
            .offset
            .cmp(&b.location.offset)
            .then_with(|| a.code.cmp(&b.code))
    });
    debug!(
        "Crawled {}: {} violation(s)",
        ctx.relative_path.display(),
        violations.len()
    );
    violations
}

fn visit<'t>(
    ctx: &FileContext<'_>,
    rules: &[RuleBox],
    node: &'t SyntaxNode,
    ancestors: &mut Vec<&'t SyntaxNode>,
    violations: &mut Vec<Violation>,
) {
    for rule in rules {
        if rule.kinds_of_interest().contains(&node.kind()) {
            violations.extend(rule.check(ctx, node, &ancestors[..]));
        }
    }

    ancestors.push(node);
    for child in node.children() {
        visit(ctx, rules, child, ancestors, violations);
    }
    ancestors.pop();
}
