//! Helpers shared by the rule tests.

use sql_naming_lint_core::test_support::{kw, node, ws};
use sql_naming_lint_core::{crawl, FileContext, Rule, RuleBox, SyntaxNode, SyntaxTree, Violation};
use std::path::Path;

/// Crawls `root` with a single rule.
pub(crate) fn check<R: Rule + 'static>(rule: R, root: SyntaxNode) -> Vec<Violation> {
    let tree = SyntaxTree::new(root);
    let ctx = FileContext::new(Path::new("test.json"), &tree, Path::new(""));
    let rules: Vec<RuleBox> = vec![Box::new(rule)];
    crawl(&ctx, &rules)
}

/// `CREATE TABLE t (<items>)` with the items comma-separated.
pub(crate) fn create_table(items: Vec<SyntaxNode>) -> SyntaxNode {
    let mut inner = vec![SyntaxNode::leaf("start_bracket", "(")];
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            inner.push(SyntaxNode::leaf("comma", ","));
            inner.push(ws());
        }
        inner.push(item);
    }
    inner.push(SyntaxNode::leaf("end_bracket", ")"));

    node(
        "file",
        vec![node(
            "statement",
            vec![node(
                "create_table_statement",
                vec![
                    kw("CREATE"),
                    ws(),
                    kw("TABLE"),
                    ws(),
                    node("table_reference", vec![SyntaxNode::leaf("naked_identifier", "t")]),
                    ws(),
                    node("bracketed", inner),
                ],
            )],
        )],
    )
}

/// Wraps statements in a `file` root.
pub(crate) fn file(statements: Vec<SyntaxNode>) -> SyntaxNode {
    node(
        "file",
        statements
            .into_iter()
            .map(|s| node("statement", vec![s]))
            .collect(),
    )
}
