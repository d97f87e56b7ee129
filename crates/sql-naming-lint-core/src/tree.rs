//! Read-only syntax tree façade.
//!
//! The core never parses SQL. A host parser builds the tree once; after
//! [`SyntaxTree::new`] assigns source offsets the tree is immutable and every
//! rule evaluation borrows it.

use std::fmt;

/// Grammatical role of a node.
///
/// External parsers identify roles with string tags. The tags the core
/// reasons about are mapped into this closed set once, at node construction;
/// everything else becomes [`NodeKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A reserved or unreserved SQL keyword.
    Keyword,
    /// Horizontal whitespace.
    Whitespace,
    /// A line break.
    Newline,
    /// Inline or block comment.
    Comment,
    /// Generic identifier (including function name identifiers).
    Identifier,
    /// Unquoted identifier.
    NakedIdentifier,
    /// Quoted identifier (`"x"`, `` `x` ``, `[x]`).
    QuotedIdentifier,
    /// Reference to a named object, possibly schema-qualified.
    ObjectReference,
    /// Reference to a table or view.
    TableReference,
    /// `schema.object` name node.
    SchemaQualifiedName,
    /// Dedicated function name node.
    FunctionName,
    /// Dedicated view name node.
    ViewName,
    /// A function parameter name.
    Parameter,
    /// A full parameter definition (`name TYPE [DEFAULT ..]`).
    ParameterDefinition,
    /// Function parameter list wrapper.
    FunctionParameterList,
    /// Bracketed group.
    Bracketed,
    /// Parenthesized group (dialects that distinguish it from bracketed).
    Parenthesized,
    /// Out-of-line table constraint.
    TableConstraint,
    /// Inline column constraint.
    ColumnConstraint,
    /// Function definition.
    FunctionDefinition,
    /// `CREATE FUNCTION` statement.
    CreateFunctionStatement,
    /// `CREATE VIEW` statement.
    CreateViewStatement,
    /// `CREATE MATERIALIZED VIEW` statement.
    CreateMaterializedViewStatement,
    /// Generic statement wrapper.
    Statement,
    /// Generic create statement.
    CreateStatement,
    /// `(`
    StartBracket,
    /// `)`
    EndBracket,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// Any other punctuation.
    Symbol,
    /// A tag the core does not reason about.
    Other,
}

impl NodeKind {
    /// Maps an external parser tag to a kind.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "keyword" => Self::Keyword,
            "whitespace" => Self::Whitespace,
            "newline" => Self::Newline,
            "comment" | "inline_comment" | "block_comment" => Self::Comment,
            "identifier" | "function_name_identifier" => Self::Identifier,
            "naked_identifier" => Self::NakedIdentifier,
            "quoted_identifier" => Self::QuotedIdentifier,
            "object_reference" => Self::ObjectReference,
            "table_reference" => Self::TableReference,
            "schema_qualified_name" => Self::SchemaQualifiedName,
            "function_name" => Self::FunctionName,
            "view_name" => Self::ViewName,
            "parameter" => Self::Parameter,
            "parameter_definition" => Self::ParameterDefinition,
            "function_parameter_list" => Self::FunctionParameterList,
            "bracketed" => Self::Bracketed,
            "parenthesized" => Self::Parenthesized,
            "table_constraint" => Self::TableConstraint,
            "column_constraint_segment" | "column_constraint" => Self::ColumnConstraint,
            "function_definition" => Self::FunctionDefinition,
            "create_function_statement" => Self::CreateFunctionStatement,
            "create_view_statement" => Self::CreateViewStatement,
            "create_materialized_view_statement" => Self::CreateMaterializedViewStatement,
            "statement" => Self::Statement,
            "create_statement" => Self::CreateStatement,
            "start_bracket" => Self::StartBracket,
            "end_bracket" => Self::EndBracket,
            "comma" => Self::Comma,
            "dot" => Self::Dot,
            "symbol" | "statement_terminator" | "raw_comparison_operator" => Self::Symbol,
            _ => Self::Other,
        }
    }

    /// Whitespace or newline.
    #[must_use]
    pub fn is_whitespace(self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline)
    }

    /// Any comment flavour.
    #[must_use]
    pub fn is_comment(self) -> bool {
        matches!(self, Self::Comment)
    }

    /// Identifier of any quoting style.
    #[must_use]
    pub fn is_identifier(self) -> bool {
        matches!(
            self,
            Self::Identifier | Self::NakedIdentifier | Self::QuotedIdentifier
        )
    }

    /// Bracketed or parenthesized group.
    #[must_use]
    pub fn is_group(self) -> bool {
        matches!(self, Self::Bracketed | Self::Parenthesized)
    }
}

/// A node of the parse tree.
///
/// Leaves carry their raw source text; a branch's text is the concatenation
/// of its children's texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    kind: NodeKind,
    tag: String,
    text: String,
    children: Vec<SyntaxNode>,
    offset: usize,
}

impl SyntaxNode {
    /// Creates a leaf node with raw source text.
    #[must_use]
    pub fn leaf(tag: impl Into<String>, text: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            kind: NodeKind::from_tag(&tag),
            tag,
            text: text.into(),
            children: Vec::new(),
            offset: 0,
        }
    }

    /// Creates a branch node from ordered children.
    #[must_use]
    pub fn branch(tag: impl Into<String>, children: Vec<SyntaxNode>) -> Self {
        let tag = tag.into();
        let text = children.iter().map(SyntaxNode::text).collect();
        Self {
            kind: NodeKind::from_tag(&tag),
            tag,
            text,
            children,
            offset: 0,
        }
    }

    /// Grammatical kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The external parser's tag, verbatim.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Verbatim source text covered by this node.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Children in source order.
    #[must_use]
    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    /// Byte offset of this node in the tree's source.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length in bytes of this node's text.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True when the node covers no source text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Checks the node kind.
    #[must_use]
    pub fn is_kind(&self, kind: NodeKind) -> bool {
        self.kind == kind
    }

    /// True for a keyword whose text equals `word`, ignoring ASCII case.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == NodeKind::Keyword && self.text.eq_ignore_ascii_case(word)
    }

    /// First direct child of the given kind.
    #[must_use]
    pub fn child(&self, kind: NodeKind) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Position of `child` among this node's children, by identity.
    #[must_use]
    pub fn index_of(&self, child: &SyntaxNode) -> Option<usize> {
        self.children.iter().position(|c| std::ptr::eq(c, child))
    }

    /// Pre-order iterator over this node and all its descendants.
    pub fn descendants(&self) -> impl Iterator<Item = &SyntaxNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    fn assign_offsets(&mut self, start: usize) {
        self.offset = start;
        let mut cursor = start;
        for child in &mut self.children {
            child.assign_offsets(cursor);
            cursor += child.len();
        }
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} {:?}", self.tag, self.offset, self.text)
    }
}

/// Ancestors of a visited node, root first, parent last.
pub type AncestorPath<'t> = [&'t SyntaxNode];

/// Returns the direct parent and the node's index within it.
#[must_use]
pub fn parent_slot<'t>(
    node: &SyntaxNode,
    ancestors: &AncestorPath<'t>,
) -> Option<(&'t SyntaxNode, usize)> {
    let parent = *ancestors.last()?;
    let index = parent.index_of(node)?;
    Some((parent, index))
}

/// An immutable tree plus the source text reconstructed from its leaves.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    root: SyntaxNode,
    line_starts: Vec<usize>,
}

impl SyntaxTree {
    /// Freezes a tree, assigning every node its source offset.
    #[must_use]
    pub fn new(mut root: SyntaxNode) -> Self {
        root.assign_offsets(0);
        let line_starts = std::iter::once(0)
            .chain(root.text().match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { root, line_starts }
    }

    /// Root node.
    #[must_use]
    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// Full source text.
    #[must_use]
    pub fn source(&self) -> &str {
        self.root.text()
    }

    /// Converts a byte offset into a 1-indexed `(line, column)` pair.
    ///
    /// Columns count characters, not bytes.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self.line_starts.partition_point(|&s| s <= offset);
        let line_start = self.line_starts[line.saturating_sub(1)];
        let column = self
            .source()
            .get(line_start..offset)
            .map_or(offset - line_start, |s| s.chars().count());
        (line.max(1), column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SyntaxTree {
        SyntaxTree::new(SyntaxNode::branch(
            "statement",
            vec![
                SyntaxNode::leaf("keyword", "CREATE"),
                SyntaxNode::leaf("whitespace", " "),
                SyntaxNode::leaf("keyword", "VIEW"),
                SyntaxNode::leaf("newline", "\n"),
                SyntaxNode::branch(
                    "table_reference",
                    vec![
                        SyntaxNode::leaf("naked_identifier", "public"),
                        SyntaxNode::leaf("dot", "."),
                        SyntaxNode::leaf("naked_identifier", "v_users"),
                    ],
                ),
            ],
        ))
    }

    #[test]
    fn tags_map_into_closed_kinds() {
        assert_eq!(NodeKind::from_tag("keyword"), NodeKind::Keyword);
        assert_eq!(NodeKind::from_tag("inline_comment"), NodeKind::Comment);
        assert_eq!(
            NodeKind::from_tag("function_name_identifier"),
            NodeKind::Identifier
        );
        assert_eq!(NodeKind::from_tag("select_clause"), NodeKind::Other);
        assert!(NodeKind::Newline.is_whitespace());
        assert!(!NodeKind::Comment.is_whitespace());
    }

    #[test]
    fn branch_text_concatenates_children() {
        let tree = sample();
        assert_eq!(tree.source(), "CREATE VIEW\npublic.v_users");
        assert_eq!(tree.root().children()[4].text(), "public.v_users");
    }

    #[test]
    fn offsets_follow_source_order() {
        let tree = sample();
        let reference = &tree.root().children()[4];
        assert_eq!(reference.offset(), 12);
        assert_eq!(reference.children()[2].offset(), 19);
        assert_eq!(tree.line_col(reference.children()[2].offset()), (2, 8));
        assert_eq!(tree.line_col(0), (1, 1));
    }

    #[test]
    fn keyword_match_ignores_case() {
        let node = SyntaxNode::leaf("keyword", "Primary");
        assert!(node.is_keyword("PRIMARY"));
        assert!(!SyntaxNode::leaf("naked_identifier", "primary").is_keyword("PRIMARY"));
    }

    #[test]
    fn index_of_uses_identity() {
        let tree = sample();
        let root = tree.root();
        let ws = &root.children()[1];
        assert_eq!(root.index_of(ws), Some(1));
        let lookalike = SyntaxNode::leaf("whitespace", " ");
        assert_eq!(root.index_of(&lookalike), None);
    }

    #[test]
    fn descendants_are_pre_order() {
        let tree = sample();
        let tags: Vec<&str> = tree.root().descendants().map(SyntaxNode::tag).take(3).collect();
        assert_eq!(tags, ["statement", "keyword", "whitespace"]);
        assert_eq!(tree.root().descendants().count(), 9);
    }
}
