//! Tree-building helpers for tests.
//!
//! Shapes follow what SQLFluff's ANSI/Postgres dialects emit for the
//! statements the naming rules judge.

use crate::tree::SyntaxNode;

/// Keyword leaf.
#[must_use]
pub fn kw(text: &str) -> SyntaxNode {
    SyntaxNode::leaf("keyword", text)
}

/// Single-space whitespace leaf.
#[must_use]
pub fn ws() -> SyntaxNode {
    SyntaxNode::leaf("whitespace", " ")
}

/// Newline leaf.
#[must_use]
pub fn nl() -> SyntaxNode {
    SyntaxNode::leaf("newline", "\n")
}

/// Unquoted identifier leaf.
#[must_use]
pub fn ident(text: &str) -> SyntaxNode {
    SyntaxNode::leaf("naked_identifier", text)
}

/// Leaf with an arbitrary tag.
#[must_use]
pub fn leaf(tag: &str, text: &str) -> SyntaxNode {
    SyntaxNode::leaf(tag, text)
}

/// Branch with an arbitrary tag.
#[must_use]
pub fn node(tag: &str, children: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::branch(tag, children)
}

/// `(inner)` as a bracketed group.
#[must_use]
pub fn bracketed(inner: Vec<SyntaxNode>) -> SyntaxNode {
    let mut children = vec![leaf("start_bracket", "(")];
    children.extend(inner);
    children.push(leaf("end_bracket", ")"));
    node("bracketed", children)
}

/// Words separated by single spaces, each becoming a keyword leaf.
fn keyword_run(words: &[&str]) -> Vec<SyntaxNode> {
    let mut out = Vec::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push(ws());
        }
        out.push(kw(word));
    }
    out
}

/// `CONSTRAINT <name> <keywords> (id)` as a `table_constraint`.
///
/// The name reference is always child 2.
#[must_use]
pub fn constraint_clause(name: &str, keywords: &[&str]) -> SyntaxNode {
    let mut children = vec![
        kw("CONSTRAINT"),
        ws(),
        node("object_reference", vec![ident(name)]),
    ];
    if !keywords.is_empty() {
        children.push(ws());
        children.extend(keyword_run(keywords));
    }
    children.push(ws());
    children.push(bracketed(vec![ident("id")]));
    node("table_constraint", children)
}

fn function_name(name: &str) -> SyntaxNode {
    let mut parts = name.split('.').peekable();
    let mut children = Vec::new();
    while let Some(part) = parts.next() {
        if parts.peek().is_some() {
            children.push(ident(part));
            children.push(leaf("dot", "."));
        } else {
            children.push(leaf("function_name_identifier", part));
        }
    }
    node("function_name", children)
}

/// `CREATE FUNCTION <name>(<param> <type>, ..) RETURNS INT AS $$ .. $$`.
#[must_use]
pub fn create_function(name: &str, params: &[(&str, &str)]) -> SyntaxNode {
    let mut list = Vec::new();
    for (i, (param, ty)) in params.iter().enumerate() {
        if i > 0 {
            list.push(leaf("comma", ","));
            list.push(ws());
        }
        list.push(leaf("parameter", param));
        list.push(ws());
        list.push(node("data_type", vec![kw(ty)]));
    }

    node(
        "create_function_statement",
        vec![
            kw("CREATE"),
            ws(),
            kw("FUNCTION"),
            ws(),
            function_name(name),
            node("function_parameter_list", vec![bracketed(list)]),
            ws(),
            kw("RETURNS"),
            ws(),
            node("data_type", vec![kw("INT")]),
            ws(),
            node(
                "function_definition",
                vec![
                    kw("AS"),
                    ws(),
                    leaf("quoted_literal", "$$ SELECT 1 $$"),
                ],
            ),
        ],
    )
}

/// `CREATE [MATERIALIZED] VIEW <name> AS SELECT 1`.
#[must_use]
pub fn create_view(name: &str, materialized: bool) -> SyntaxNode {
    let (tag, words): (&str, &[&str]) = if materialized {
        (
            "create_materialized_view_statement",
            &["CREATE", "MATERIALIZED", "VIEW"],
        )
    } else {
        ("create_view_statement", &["CREATE", "VIEW"])
    };

    let mut children = keyword_run(words);
    children.extend([
        ws(),
        node("table_reference", vec![ident(name)]),
        ws(),
        kw("AS"),
        ws(),
        node("select_statement", vec![kw("SELECT"), ws(), leaf("numeric_literal", "1")]),
    ]);
    node(tag, children)
}
