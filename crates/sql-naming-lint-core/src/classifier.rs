//! Deciding whether a node is the name a construct binds.
//!
//! Classification depends only on the local sibling order under the node's
//! parent. It keeps no state between calls, so nodes may be classified in
//! any order and from any thread.

use std::sync::OnceLock;

use crate::matcher::{self, KeywordSequence, Lookahead};
use crate::tree::{parent_slot, AncestorPath, NodeKind, SyntaxNode};

/// A candidate confirmed as the name bound by a preceding `CONSTRAINT`.
#[derive(Debug, Clone, Copy)]
pub struct BoundName<'t> {
    /// The parent whose children hold the constraint clause.
    pub parent: &'t SyntaxNode,
    /// Index of the name node among `parent`'s children.
    pub index: usize,
    /// The `CONSTRAINT` keyword that binds the name.
    pub keyword: &'t SyntaxNode,
}

impl BoundName<'_> {
    /// Siblings that follow the name, where the construct keywords live.
    #[must_use]
    pub fn following(&self) -> usize {
        self.index + 1
    }
}

/// Left-anchored lookback from `node` to a `CONSTRAINT` keyword.
///
/// Whitespace between the keyword and the name is skipped; any other
/// sibling ends the lookback unsuccessfully. Returns `None` when the node
/// has no parent or is not a child of the last ancestor.
#[must_use]
pub fn bound_constraint_name<'t>(
    node: &SyntaxNode,
    ancestors: &AncestorPath<'t>,
) -> Option<BoundName<'t>> {
    let (parent, index) = parent_slot(node, ancestors)?;

    let keyword = parent.children()[..index]
        .iter()
        .rev()
        .find(|sibling| !sibling.kind().is_whitespace())
        .filter(|sibling| sibling.is_keyword("CONSTRAINT"))?;

    Some(BoundName {
        parent,
        index,
        keyword,
    })
}

/// Object whose name follows its own declaring keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Declaration {
    /// `CREATE [OR REPLACE] FUNCTION name`
    Function,
    /// `CREATE [OR REPLACE] [MATERIALIZED] VIEW name`
    View,
}

impl Declaration {
    /// The keyword after which the name is sought.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Function => "FUNCTION",
            Self::View => "VIEW",
        }
    }

    /// Index of the declaring keyword among `children`.
    ///
    /// For views a `MATERIALIZED` keyword is followed through to its `VIEW`.
    #[must_use]
    pub fn locate(self, children: &[SyntaxNode], lookahead: Lookahead) -> Option<usize> {
        match self {
            Self::Function => matcher::find_keyword(children, "FUNCTION"),
            Self::View => children.iter().enumerate().find_map(|(i, child)| {
                if child.is_keyword("VIEW") {
                    Some(i)
                } else if child.is_keyword("MATERIALIZED") {
                    matcher::match_span(i + 1, children, view_sequence(), lookahead)
                        .map(|span| span.start)
                } else {
                    None
                }
            }),
        }
    }
}

fn view_sequence() -> &'static KeywordSequence {
    static VIEW: OnceLock<KeywordSequence> = OnceLock::new();
    VIEW.get_or_init(|| KeywordSequence::new(["VIEW"]))
}

fn create_function_sequences() -> &'static [KeywordSequence; 2] {
    static SEQUENCES: OnceLock<[KeywordSequence; 2]> = OnceLock::new();
    SEQUENCES.get_or_init(|| {
        [
            KeywordSequence::new(["CREATE", "FUNCTION"]),
            KeywordSequence::new(["CREATE", "OR", "REPLACE", "FUNCTION"]),
        ]
    })
}

/// Is this node a `CREATE FUNCTION` statement?
///
/// Dedicated function node kinds qualify directly. Generic `statement` and
/// `create_statement` nodes qualify when their keyword children read
/// `CREATE FUNCTION` or `CREATE OR REPLACE FUNCTION`.
#[must_use]
pub fn is_create_function(node: &SyntaxNode) -> bool {
    match node.kind() {
        NodeKind::FunctionDefinition | NodeKind::CreateFunctionStatement => true,
        NodeKind::Statement | NodeKind::CreateStatement => create_function_sequences()
            .iter()
            .any(|seq| matcher::keyword_run_contains(node.children(), seq)),
        _ => false,
    }
}
