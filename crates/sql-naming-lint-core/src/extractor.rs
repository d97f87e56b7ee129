//! Ordered fallback strategies for locating a construct's name.
//!
//! No single node kind holds "the function name" or "the parameter names"
//! across dialects, so each subject has a chain of strategies tried in
//! priority order. The first strategy that yields anything wins. Chains are
//! plain data ([`Strategy`] slices) so each strategy can be inspected and
//! tested on its own.

use crate::classifier::Declaration;
use crate::matcher::Lookahead;
use crate::tree::{AncestorPath, NodeKind, SyntaxNode};

/// Positions scanned after a declaring keyword for the object name.
pub const NAME_SCAN_WINDOW: usize = 4;

/// Type keywords that are never accepted as parameter names.
pub const TYPE_KEYWORDS: &[&str] = &[
    "INT",
    "INTEGER",
    "TEXT",
    "VARCHAR",
    "CHAR",
    "BOOLEAN",
    "DATE",
    "TIMESTAMP",
    "NUMERIC",
    "DECIMAL",
    "FLOAT",
    "REAL",
    "JSON",
    "JSONB",
    "UUID",
    "ARRAY",
    "SETOF",
];

/// Argument modes that may precede a parameter name.
pub const ARGUMENT_MODES: &[&str] = &["IN", "OUT", "INOUT", "VARIADIC"];

/// A name together with the node a violation should point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCandidate<'t> {
    /// Node carrying the name.
    pub anchor: &'t SyntaxNode,
    /// Name text; reduced to its final segment by [`extract`].
    pub name: String,
}

impl<'t> NameCandidate<'t> {
    fn of(anchor: &'t SyntaxNode) -> Self {
        Self {
            anchor,
            name: anchor.text().trim().to_string(),
        }
    }
}

/// What a strategy is run against.
#[derive(Debug, Clone, Copy)]
pub struct Target<'a, 't> {
    /// The visited node.
    pub node: &'t SyntaxNode,
    /// Its ancestors, root first.
    pub ancestors: &'a AncestorPath<'t>,
    /// Lookahead bounds in force for the rule.
    pub lookahead: Lookahead,
}

/// Signature shared by all strategies.
pub type StrategyFn = for<'a, 't> fn(&Target<'a, 't>) -> Vec<NameCandidate<'t>>;

/// One named extraction technique.
#[derive(Clone, Copy)]
pub struct Strategy {
    /// Stable identifier, used in debug logs.
    pub name: &'static str,
    /// The technique itself.
    pub run: StrategyFn,
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Strategy").field(&self.name).finish()
    }
}

/// What is being named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    /// The node bound by `CONSTRAINT`.
    ConstraintName,
    /// The name of a created function.
    FunctionName,
    /// The name of a created view.
    ViewName,
    /// Every parameter of a created function.
    Parameters,
}

/// Chain for constraint names: the bound node is the name.
pub const CONSTRAINT_NAME_CHAIN: &[Strategy] = &[Strategy {
    name: "bound-node",
    run: bound_node,
}];

/// Chain for function names.
pub const FUNCTION_NAME_CHAIN: &[Strategy] = &[
    Strategy {
        name: "schema-qualified-name",
        run: schema_qualified_name,
    },
    Strategy {
        name: "function-name-child",
        run: function_name_child,
    },
    Strategy {
        name: "object-reference-child",
        run: object_reference_child,
    },
    Strategy {
        name: "after-function-keyword",
        run: after_function_keyword,
    },
];

/// Chain for view names.
pub const VIEW_NAME_CHAIN: &[Strategy] = &[
    Strategy {
        name: "schema-qualified-name",
        run: schema_qualified_name,
    },
    Strategy {
        name: "view-name-child",
        run: view_name_child,
    },
    Strategy {
        name: "table-reference-child",
        run: table_reference_child,
    },
    Strategy {
        name: "object-reference-child",
        run: object_reference_child,
    },
    Strategy {
        name: "after-view-keyword",
        run: after_view_keyword,
    },
];

/// Chain for function parameters.
pub const PARAMETER_CHAIN: &[Strategy] = &[
    Strategy {
        name: "typed-parameters",
        run: typed_parameters,
    },
    Strategy {
        name: "raw-text",
        run: raw_text_parameters,
    },
    Strategy {
        name: "identifier-sweep",
        run: identifier_sweep,
    },
];

impl Subject {
    /// The strategy chain for this subject, in priority order.
    #[must_use]
    pub fn chain(self) -> &'static [Strategy] {
        match self {
            Self::ConstraintName => CONSTRAINT_NAME_CHAIN,
            Self::FunctionName => FUNCTION_NAME_CHAIN,
            Self::ViewName => VIEW_NAME_CHAIN,
            Self::Parameters => PARAMETER_CHAIN,
        }
    }

    /// Single-valued subjects keep only the first candidate.
    #[must_use]
    pub fn is_multi_valued(self) -> bool {
        matches!(self, Self::Parameters)
    }
}

/// Runs `chain` until a strategy yields candidates.
///
/// Returns the winning strategy's name alongside its candidates.
#[must_use]
pub fn run_chain<'t>(
    chain: &[Strategy],
    target: &Target<'_, 't>,
) -> Option<(&'static str, Vec<NameCandidate<'t>>)> {
    chain.iter().find_map(|strategy| {
        let found = (strategy.run)(target);
        (!found.is_empty()).then_some((strategy.name, found))
    })
}

/// Extracts the name(s) for `subject`, reduced to their final segment.
///
/// Empty when every strategy comes up short.
#[must_use]
pub fn extract<'t>(subject: Subject, target: &Target<'_, 't>) -> Vec<NameCandidate<'t>> {
    let Some((strategy, mut found)) = run_chain(subject.chain(), target) else {
        tracing::debug!("No {:?} found in {}", subject, target.node.tag());
        return Vec::new();
    };
    tracing::trace!("{:?} resolved by {}", subject, strategy);

    if !subject.is_multi_valued() {
        found.truncate(1);
    }
    found
        .into_iter()
        .filter_map(|candidate| {
            let name = final_segment(&candidate.name);
            (!name.is_empty()).then(|| NameCandidate {
                anchor: candidate.anchor,
                name: name.to_string(),
            })
        })
        .collect()
}

/// Reduces `schema.object` to `object` and strips identifier quoting.
///
/// Dots inside a quoted identifier (`"v.daily"`, `` `a.b` ``, `[a.b]`) do not
/// separate segments.
#[must_use]
pub fn final_segment(name: &str) -> &str {
    let mut closing: Option<char> = None;
    let mut start = 0;

    for (i, ch) in name.char_indices() {
        match (closing, ch) {
            (Some(c), _) if ch == c => closing = None,
            (Some(_), _) => {}
            (None, '"' | '`') => closing = Some(ch),
            (None, '[') => closing = Some(']'),
            (None, '.') => start = i + 1,
            _ => {}
        }
    }
    unquote(name[start..].trim())
}

fn unquote(name: &str) -> &str {
    for (open, close) in [('"', '"'), ('`', '`'), ('[', ']')] {
        if let Some(inner) = name
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            return inner;
        }
    }
    name
}

fn is_type_keyword(word: &str) -> bool {
    TYPE_KEYWORDS.iter().any(|t| t.eq_ignore_ascii_case(word))
}

fn is_argument_mode(word: &str) -> bool {
    ARGUMENT_MODES.iter().any(|m| m.eq_ignore_ascii_case(word))
}

// --- Names ---

fn bound_node<'t>(target: &Target<'_, 't>) -> Vec<NameCandidate<'t>> {
    vec![NameCandidate::of(target.node)]
}

fn schema_qualified_name<'t>(target: &Target<'_, 't>) -> Vec<NameCandidate<'t>> {
    target
        .node
        .child(NodeKind::SchemaQualifiedName)
        .and_then(|qualified| {
            qualified
                .children()
                .iter()
                .rev()
                .find(|c| c.kind().is_identifier())
        })
        .map(NameCandidate::of)
        .into_iter()
        .collect()
}

fn typed_child<'t>(target: &Target<'_, 't>, kind: NodeKind) -> Vec<NameCandidate<'t>> {
    target
        .node
        .child(kind)
        .map(NameCandidate::of)
        .into_iter()
        .collect()
}

fn function_name_child<'t>(target: &Target<'_, 't>) -> Vec<NameCandidate<'t>> {
    typed_child(target, NodeKind::FunctionName)
}

fn view_name_child<'t>(target: &Target<'_, 't>) -> Vec<NameCandidate<'t>> {
    typed_child(target, NodeKind::ViewName)
}

fn table_reference_child<'t>(target: &Target<'_, 't>) -> Vec<NameCandidate<'t>> {
    typed_child(target, NodeKind::TableReference)
}

fn object_reference_child<'t>(target: &Target<'_, 't>) -> Vec<NameCandidate<'t>> {
    typed_child(target, NodeKind::ObjectReference)
}

fn after_declaring_keyword<'t>(
    target: &Target<'_, 't>,
    declaration: Declaration,
) -> Vec<NameCandidate<'t>> {
    let children = target.node.children();
    declaration
        .locate(children, target.lookahead)
        .and_then(|at| {
            children
                .iter()
                .skip(at + 1)
                .take(NAME_SCAN_WINDOW)
                .find(|c| !c.kind().is_whitespace() && !c.kind().is_comment())
        })
        .map(NameCandidate::of)
        .into_iter()
        .collect()
}

fn after_function_keyword<'t>(target: &Target<'_, 't>) -> Vec<NameCandidate<'t>> {
    after_declaring_keyword(target, Declaration::Function)
}

fn after_view_keyword<'t>(target: &Target<'_, 't>) -> Vec<NameCandidate<'t>> {
    after_declaring_keyword(target, Declaration::View)
}

// --- Parameters ---

/// Finds the node holding a function's parameter list.
///
/// Tries a dedicated list node, then the first group after the function name
/// or `FUNCTION` keyword, then any group that looks like an argument list
/// rather than a dollar-quoted body.
#[must_use]
pub fn parameter_list(node: &SyntaxNode) -> Option<&SyntaxNode> {
    if let Some(list) = node.child(NodeKind::FunctionParameterList) {
        return Some(list);
    }

    let mut after_name = false;
    for child in node.children() {
        if after_name && child.kind().is_group() {
            return Some(child);
        }
        if matches!(
            child.kind(),
            NodeKind::FunctionName | NodeKind::ObjectReference
        ) || child.is_keyword("FUNCTION")
        {
            after_name = true;
        }
    }

    node.children()
        .iter()
        .find(|c| c.kind().is_group() && c.text().contains('(') && !c.text().starts_with("$$"))
}

fn typed_parameters<'t>(target: &Target<'_, 't>) -> Vec<NameCandidate<'t>> {
    let Some(list) = parameter_list(target.node) else {
        return Vec::new();
    };

    let mut found = Vec::new();
    collect_typed_parameters(list, &mut found);
    found
}

fn collect_typed_parameters<'t>(node: &'t SyntaxNode, found: &mut Vec<NameCandidate<'t>>) {
    for child in node.children() {
        match child.kind() {
            NodeKind::Parameter => found.push(NameCandidate::of(child)),
            NodeKind::ParameterDefinition => {
                if let Some(candidate) = parameter_definition_name(child) {
                    found.push(candidate);
                }
            }
            _ => collect_typed_parameters(child, found),
        }
    }
}

fn parameter_definition_name(definition: &SyntaxNode) -> Option<NameCandidate<'_>> {
    if let Some(named) = definition
        .children()
        .iter()
        .find(|c| c.kind() == NodeKind::Parameter || c.kind().is_identifier())
    {
        return Some(NameCandidate::of(named));
    }

    first_name_word(definition.text()).map(|word| NameCandidate {
        anchor: definition,
        name: word.to_string(),
    })
}

fn first_name_word(definition: &str) -> Option<&str> {
    definition
        .split_whitespace()
        .find(|word| !is_argument_mode(word))
}

fn raw_text_parameters<'t>(target: &Target<'_, 't>) -> Vec<NameCandidate<'t>> {
    let Some(list) = parameter_list(target.node) else {
        return Vec::new();
    };

    let raw = list.text().trim();
    let inner = raw
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .unwrap_or(raw);

    let leaves: Vec<&SyntaxNode> = list
        .descendants()
        .filter(|n| n.children().is_empty())
        .collect();
    let mut claimed = vec![false; leaves.len()];

    split_top_level(inner)
        .into_iter()
        .filter_map(first_name_word)
        .filter(|word| !is_type_keyword(word))
        .map(|word| {
            let anchor = leaves
                .iter()
                .enumerate()
                .find(|(i, leaf)| !claimed[*i] && leaf.text() == word)
                .map_or(list, |(i, leaf)| {
                    claimed[i] = true;
                    *leaf
                });
            NameCandidate {
                anchor,
                name: word.to_string(),
            }
        })
        .collect()
}

/// Splits on commas that are not nested in brackets or quotes.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(ch),
            (None, '(' | '[') => depth += 1,
            (None, ')' | ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}

fn identifier_sweep<'t>(target: &Target<'_, 't>) -> Vec<NameCandidate<'t>> {
    let Some(list) = parameter_list(target.node) else {
        return Vec::new();
    };

    list.descendants()
        .filter(|n| n.kind().is_identifier() && !is_type_keyword(n.text().trim()))
        .map(NameCandidate::of)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(text: &str) -> SyntaxNode {
        SyntaxNode::leaf("keyword", text)
    }

    fn ws() -> SyntaxNode {
        SyntaxNode::leaf("whitespace", " ")
    }

    fn leaf(tag: &str, text: &str) -> SyntaxNode {
        SyntaxNode::leaf(tag, text)
    }

    fn target(node: &SyntaxNode) -> Target<'_, '_> {
        Target {
            node,
            ancestors: &[],
            lookahead: Lookahead::default(),
        }
    }

    fn names(found: &[NameCandidate<'_>]) -> Vec<String> {
        found.iter().map(|c| c.name.clone()).collect()
    }

    fn function_with(children: Vec<SyntaxNode>) -> SyntaxNode {
        let mut all = vec![kw("CREATE"), ws(), kw("FUNCTION"), ws()];
        all.extend(children);
        SyntaxNode::branch("create_function_statement", all)
    }

    #[test]
    fn final_segment_reduces_qualified_and_quoted_names() {
        assert_eq!(final_segment("public.fun_foo"), "fun_foo");
        assert_eq!(final_segment("fun_foo"), "fun_foo");
        assert_eq!(final_segment("\"Sales\".\"v_Totals\""), "v_Totals");
        assert_eq!(final_segment("[dbo].[v_x]"), "v_x");
    }

    #[test]
    fn final_segment_keeps_dots_inside_quotes() {
        assert_eq!(final_segment("\"my.view\""), "my.view");
        assert_eq!(final_segment("public.\"v.x\""), "v.x");
        assert_eq!(final_segment("`a.b`"), "a.b");
        assert_eq!(final_segment("[dbo].[v.x]"), "v.x");
        assert_eq!(final_segment("\"Sales.2024\".v_totals"), "v_totals");
    }

    #[test]
    fn schema_qualified_name_wins_over_later_strategies() {
        let stmt = function_with(vec![SyntaxNode::branch(
            "schema_qualified_name",
            vec![
                leaf("naked_identifier", "public"),
                leaf("dot", "."),
                leaf("naked_identifier", "fun_get"),
            ],
        )]);
        let (strategy, found) = run_chain(FUNCTION_NAME_CHAIN, &target(&stmt)).expect("found");
        assert_eq!(strategy, "schema-qualified-name");
        assert_eq!(names(&found), ["fun_get"]);
        assert_eq!(found[0].anchor.offset(), stmt.children()[4].children()[2].offset());
    }

    #[test]
    fn function_name_child_is_reduced() {
        let stmt = function_with(vec![SyntaxNode::branch(
            "function_name",
            vec![
                leaf("naked_identifier", "public"),
                leaf("dot", "."),
                leaf("function_name_identifier", "configuration_get"),
            ],
        )]);
        let found = extract(Subject::FunctionName, &target(&stmt));
        assert_eq!(names(&found), ["configuration_get"]);
        assert_eq!(found[0].anchor.tag(), "function_name");
    }

    #[test]
    fn forward_scan_skips_comments_after_keyword() {
        let stmt = function_with(vec![
            leaf("comment", "/* helper */"),
            ws(),
            leaf("word", "util.fun_helper"),
        ]);
        let (strategy, found) = run_chain(FUNCTION_NAME_CHAIN, &target(&stmt)).expect("found");
        assert_eq!(strategy, "after-function-keyword");
        assert_eq!(found[0].anchor.tag(), "word");
        assert_eq!(names(&extract(Subject::FunctionName, &target(&stmt))), ["fun_helper"]);
    }

    #[test]
    fn forward_scan_is_windowed() {
        let stmt = function_with(vec![ws(), ws(), ws(), ws(), leaf("word", "late")]);
        assert!(extract(Subject::FunctionName, &target(&stmt)).is_empty());
    }

    #[test]
    fn view_name_from_table_reference() {
        let stmt = SyntaxNode::branch(
            "create_view_statement",
            vec![
                kw("CREATE"),
                ws(),
                kw("VIEW"),
                ws(),
                SyntaxNode::branch(
                    "table_reference",
                    vec![
                        leaf("naked_identifier", "public"),
                        leaf("dot", "."),
                        leaf("naked_identifier", "user_details"),
                    ],
                ),
            ],
        );
        let found = extract(Subject::ViewName, &target(&stmt));
        assert_eq!(names(&found), ["user_details"]);
    }

    #[test]
    fn view_name_after_materialized_view_keywords() {
        let stmt = SyntaxNode::branch(
            "create_materialized_view_statement",
            vec![
                kw("CREATE"),
                ws(),
                kw("MATERIALIZED"),
                ws(),
                kw("VIEW"),
                ws(),
                leaf("word", "user_stats"),
            ],
        );
        let (strategy, found) = run_chain(VIEW_NAME_CHAIN, &target(&stmt)).expect("found");
        assert_eq!(strategy, "after-view-keyword");
        assert_eq!(names(&found), ["user_stats"]);
    }

    fn bracketed(children: Vec<SyntaxNode>) -> SyntaxNode {
        let mut all = vec![leaf("start_bracket", "(")];
        all.extend(children);
        all.push(leaf("end_bracket", ")"));
        SyntaxNode::branch("bracketed", all)
    }

    #[test]
    fn typed_parameters_from_parameter_leaves() {
        let stmt = function_with(vec![
            leaf("function_name", "f"),
            SyntaxNode::branch(
                "function_parameter_list",
                vec![bracketed(vec![
                    leaf("parameter", "p_min_age"),
                    ws(),
                    SyntaxNode::branch("data_type", vec![kw("INT")]),
                    leaf("comma", ","),
                    ws(),
                    leaf("parameter", "max_age"),
                    ws(),
                    SyntaxNode::branch("data_type", vec![kw("INT")]),
                ])],
            ),
        ]);
        let (strategy, found) = run_chain(PARAMETER_CHAIN, &target(&stmt)).expect("found");
        assert_eq!(strategy, "typed-parameters");
        assert_eq!(names(&found), ["p_min_age", "max_age"]);
    }

    #[test]
    fn parameter_definition_prefers_identifier_child() {
        let stmt = function_with(vec![
            leaf("function_name", "f"),
            bracketed(vec![
                SyntaxNode::branch(
                    "parameter_definition",
                    vec![
                        kw("IN"),
                        ws(),
                        leaf("naked_identifier", "p_a"),
                        ws(),
                        kw("TEXT"),
                    ],
                ),
                leaf("comma", ","),
                SyntaxNode::branch(
                    "parameter_definition",
                    vec![leaf("word", "OUT b"), ws(), kw("INT")],
                ),
            ]),
        ]);
        let found = extract(Subject::Parameters, &target(&stmt));
        assert_eq!(names(&found), ["p_a", "b"]);
    }

    #[test]
    fn raw_text_decomposition_splits_top_level_commas() {
        let stmt = function_with(vec![
            leaf("function_name", "f"),
            bracketed(vec![
                leaf("word", "p_amount"),
                ws(),
                leaf("word", "NUMERIC(10,2)"),
                leaf("comma", ","),
                ws(),
                leaf("word", "VARIADIC"),
                ws(),
                leaf("word", "tags"),
                ws(),
                leaf("word", "TEXT"),
            ]),
        ]);
        let (strategy, found) = run_chain(PARAMETER_CHAIN, &target(&stmt)).expect("found");
        assert_eq!(strategy, "raw-text");
        assert_eq!(names(&found), ["p_amount", "tags"]);
        assert_eq!(found[1].anchor.text(), "tags");
    }

    #[test]
    fn raw_text_rejects_type_keywords() {
        let stmt = function_with(vec![
            leaf("function_name", "f"),
            bracketed(vec![leaf("word", "INTEGER"), leaf("comma", ","), leaf("word", "uuid")]),
        ]);
        assert!(raw_text_parameters(&target(&stmt)).is_empty());
    }

    #[test]
    fn identifier_sweep_is_last_resort() {
        let list = SyntaxNode::branch(
            "function_parameter_list",
            vec![SyntaxNode::branch(
                "bracketed",
                vec![
                    leaf("naked_identifier", "TEXT"),
                    ws(),
                    leaf("naked_identifier", "p_id"),
                ],
            )],
        );
        // Raw text "TEXT p_id" yields only the type keyword, so it is rejected.
        let stmt = function_with(vec![leaf("function_name", "f"), list]);
        let (strategy, found) = run_chain(PARAMETER_CHAIN, &target(&stmt)).expect("found");
        assert_eq!(strategy, "identifier-sweep");
        assert_eq!(names(&found), ["p_id"]);
    }

    #[test]
    fn empty_parameter_list_exhausts_chain() {
        let stmt = function_with(vec![leaf("function_name", "f"), bracketed(vec![])]);
        assert!(run_chain(PARAMETER_CHAIN, &target(&stmt)).is_none());
        assert!(extract(Subject::Parameters, &target(&stmt)).is_empty());
    }

    #[test]
    fn parameter_list_ignores_dollar_quoted_bodies() {
        let stmt = SyntaxNode::branch(
            "statement",
            vec![
                kw("AS"),
                ws(),
                SyntaxNode::branch("bracketed", vec![leaf("word", "$$ SELECT (1) $$")]),
            ],
        );
        assert!(parameter_list(&stmt).is_none());
    }

    #[test]
    fn extraction_is_repeatable() {
        let stmt = function_with(vec![leaf("function_name", "public.get_user")]);
        let first = extract(Subject::FunctionName, &target(&stmt));
        let second = extract(Subject::FunctionName, &target(&stmt));
        assert_eq!(first, second);
    }
}
