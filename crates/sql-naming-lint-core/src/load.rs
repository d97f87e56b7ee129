//! Loading parse trees produced by an external SQL parser.
//!
//! The supported interchange format is the JSON emitted by
//! `sqlfluff parse --format json`. A segment is a one-key object whose key is
//! the segment type and whose value is either the raw text (leaf), an object
//! of uniquely-typed children, or an array of one-key child objects. Child
//! order is the JSON key order, so documents are read with order-preserving
//! maps.

use miette::Diagnostic;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::tree::{SyntaxNode, SyntaxTree};
use std::path::Path;

/// Errors raised while turning a JSON document into syntax trees.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    /// The file could not be read as UTF-8 text.
    #[error("cannot read parse tree: {0}")]
    #[diagnostic(code(sql_naming_lint::load::io))]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON.
    #[error("invalid parse tree JSON: {0}")]
    #[diagnostic(code(sql_naming_lint::load::json))]
    Json(#[from] serde_json::Error),

    /// A value does not have the shape of a segment.
    #[error("malformed segment at {path}: expected {expected}, found {found}")]
    #[diagnostic(
        code(sql_naming_lint::load::shape),
        help("segments look like {{\"keyword\": \"CREATE\"}} or {{\"statement\": [..]}}")
    )]
    Shape {
        /// JSON path of the offending value.
        path: String,
        /// What the loader expected at that position.
        expected: &'static str,
        /// Short description of what was found instead.
        found: String,
    },

    /// The document holds no parse tree at all.
    #[error("parse tree document contains no segments")]
    #[diagnostic(code(sql_naming_lint::load::empty))]
    Empty,
}

/// One parse tree, with the source file name recorded by the parser.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    /// File path as recorded by the parser (`stdin` for piped input).
    pub filepath: Option<String>,
    /// The frozen tree.
    pub tree: SyntaxTree,
}

/// Parses every tree contained in a JSON document.
///
/// Accepts a bare segment, a file record (`{"filepath": .., "segments": ..}`),
/// or an array of file records. Records whose `segments` is `null` (the
/// parser failed on that file) are skipped with a warning.
///
/// # Errors
///
/// Returns [`LoadError`] when the text is not JSON or a segment is malformed.
pub fn parse_trees(json: &str) -> Result<Vec<ParsedFile>, LoadError> {
    let value: Value = serde_json::from_str(json)?;
    let mut files = Vec::new();

    match &value {
        Value::Array(records) => {
            for (i, record) in records.iter().enumerate() {
                if let Some(file) = record_to_file(record, &format!("$[{i}]"))? {
                    files.push(file);
                }
            }
        }
        other => {
            if let Some(file) = record_to_file(other, "$")? {
                files.push(file);
            }
        }
    }

    if files.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(files)
}

/// Reads a parse-tree file and parses every tree it contains.
///
/// # Errors
///
/// Returns [`LoadError::Io`] when the file cannot be read (including text
/// that is not UTF-8), otherwise as [`parse_trees`].
pub fn load_file(path: &Path) -> Result<Vec<ParsedFile>, LoadError> {
    let json = std::fs::read_to_string(path)?;
    parse_trees(&json)
}

fn record_to_file(value: &Value, path: &str) -> Result<Option<ParsedFile>, LoadError> {
    let Value::Object(map) = value else {
        return Err(shape(path, "a file record or segment object", value));
    };

    if !map.contains_key("segments") {
        return Ok(Some(ParsedFile {
            filepath: None,
            tree: SyntaxTree::new(segment(value, path)?),
        }));
    }

    let filepath = map
        .get("filepath")
        .and_then(Value::as_str)
        .map(String::from);

    match &map["segments"] {
        Value::Null => {
            warn!(
                "Skipping {}: parser produced no segments",
                filepath.as_deref().unwrap_or(path)
            );
            Ok(None)
        }
        segments => Ok(Some(ParsedFile {
            tree: SyntaxTree::new(segment(segments, &format!("{path}.segments"))?),
            filepath,
        })),
    }
}

fn segment(value: &Value, path: &str) -> Result<SyntaxNode, LoadError> {
    match value {
        Value::Object(map) if map.len() == 1 => {
            let (tag, inner) = map.iter().next().ok_or(LoadError::Empty)?;
            node(tag, inner, &format!("{path}.{tag}"))
        }
        other => Err(shape(path, "an object with exactly one key", other)),
    }
}

fn node(tag: &str, value: &Value, path: &str) -> Result<SyntaxNode, LoadError> {
    match value {
        Value::String(raw) => Ok(SyntaxNode::leaf(tag, raw.as_str())),
        Value::Null => Ok(SyntaxNode::leaf(tag, "")),
        Value::Object(children) => Ok(SyntaxNode::branch(tag, keyed_children(children, path)?)),
        Value::Array(children) => {
            let children = children
                .iter()
                .enumerate()
                .map(|(i, child)| segment(child, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(SyntaxNode::branch(tag, children))
        }
        other => Err(shape(path, "raw text, an object, or an array", other)),
    }
}

fn keyed_children(children: &Map<String, Value>, path: &str) -> Result<Vec<SyntaxNode>, LoadError> {
    children
        .iter()
        .map(|(tag, inner)| node(tag, inner, &format!("{path}.{tag}")))
        .collect()
}

fn shape(path: &str, expected: &'static str, found: &Value) -> LoadError {
    let found = match found {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(_) => "a string".to_string(),
        Value::Array(a) => format!("an array of {}", a.len()),
        Value::Object(o) => format!("an object with {} keys", o.len()),
    };
    LoadError::Shape {
        path: path.to_string(),
        expected,
        found,
    }
}
