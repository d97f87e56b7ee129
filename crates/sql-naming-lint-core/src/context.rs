//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::tree::{SyntaxNode, SyntaxTree};
use crate::types::Location;

/// Context provided to rules while one parse tree is crawled.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path of the parse-tree file.
    pub path: &'a Path,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
    /// Source file recorded by the parser, when it recorded one.
    pub source_file: Option<&'a str>,
    /// The tree being checked.
    pub tree: &'a SyntaxTree,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, tree: &'a SyntaxTree, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            relative_path,
            source_file: None,
            tree,
        }
    }

    /// Records the SQL file the parser read.
    #[must_use]
    pub fn with_source_file(mut self, source_file: Option<&'a str>) -> Self {
        self.source_file = source_file;
        self
    }

    /// Location of `node` in this file.
    ///
    /// Reported against the parser's source file when known, otherwise the
    /// parse-tree file.
    #[must_use]
    pub fn location_of(&self, node: &SyntaxNode) -> Location {
        let (line, column) = self.tree.line_col(node.offset());
        let file = self
            .source_file
            .map_or_else(|| self.relative_path.clone(), PathBuf::from);
        Location::new(file, line, column).with_span(node.offset(), node.len())
    }
}
