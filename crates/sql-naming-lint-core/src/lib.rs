//! # sql-naming-lint-core
//!
//! Core engine for SQL naming-convention linting over pre-built parse trees.
//!
//! The crate never parses SQL. It reads trees produced by an external parser
//! (SQLFluff's JSON output) and judges the names of constraints, functions,
//! function parameters and views. It includes:
//!
//! - [`SyntaxTree`] / [`SyntaxNode`], a read-only tree façade
//! - [`matcher`], bounded keyword-sequence matching over sibling runs
//! - [`classifier`], deciding whether a node is a bound name
//! - [`extractor`], ordered fallback strategies for finding names
//! - [`NamingRule`], the shared evaluator behind every naming rule
//! - [`Rule`] and [`Analyzer`] for running rules over files
//!
//! ## Example
//!
//! ```ignore
//! use sql_naming_lint_core::{Analyzer, Severity};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./parse-trees")
//!     .rules(sql_naming_lint_rules::all_rules())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! result.print_report();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
pub mod classifier;
mod config;
mod context;
mod crawler;
mod evaluator;
pub mod extractor;
mod load;
pub mod matcher;
mod rule;
mod tree;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig, EXPECTED_PREFIX};
pub use context::FileContext;
pub use crawler::crawl;
pub use evaluator::{
    Construct, Finding, NamingConfig, NamingRule, Skip, CONSTRAINT_KINDS, FUNCTION_KINDS,
    PARAMETER_KINDS, VIEW_KINDS,
};
pub use load::{load_file, parse_trees, LoadError, ParsedFile};
pub use matcher::{KeywordSequence, Lookahead};
pub use rule::{Rule, RuleBox};
pub use tree::{parent_slot, AncestorPath, NodeKind, SyntaxNode, SyntaxTree};
pub use types::{LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
