//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::FileContext;
use crate::crawler::crawl;
use crate::load::{load_file, LoadError};
use crate::rule::{Rule, RuleBox};
use crate::types::{LintResult, Violation};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A parse-tree file could not be loaded.
    #[error("Failed to load {path}: {source}")]
    Load {
        /// Path to the file that failed to load.
        path: PathBuf,
        /// What went wrong.
        source: LoadError,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Directory walk error.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    files: Vec<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    parallelism: Option<usize>,
    fail_on_load_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Analyzes exactly these files instead of discovering them under the root.
    #[must_use]
    pub fn files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the number of worker threads (default: from config, else 1).
    #[must_use]
    pub fn parallelism(mut self, workers: usize) -> Self {
        self.parallelism = Some(workers);
        self
    }

    /// Sets whether an unloadable file aborts the run (default: false).
    #[must_use]
    pub fn fail_on_load_error(mut self, fail: bool) -> Self {
        self.fail_on_load_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        // Merge exclude patterns from config
        let mut exclude_patterns = self.exclude_patterns;
        if let Some(ref config) = self.config {
            exclude_patterns.extend(config.analyzer.exclude.clone());
        }

        let config = self.config.unwrap_or_default();
        let parallelism = self
            .parallelism
            .or(config.analyzer.parallelism)
            .unwrap_or(1)
            .max(1);

        Ok(Analyzer {
            root,
            files: self.files,
            rules: self.rules,
            exclude_patterns,
            config,
            parallelism,
            fail_on_load_error: self.fail_on_load_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    files: Vec<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Config,
    parallelism: usize,
    fail_on_load_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all parse-tree files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails, or if a file fails to load
    /// and `fail_on_load_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = if self.files.is_empty() {
            self.discover_files()?
        } else {
            self.files.clone()
        };
        info!("Found {} parse-tree file(s) to analyze", files.len());

        let rules: Vec<&RuleBox> = self
            .rules
            .iter()
            .filter(|rule| {
                let enabled = self.config.is_rule_enabled(rule.name(), rule.code());
                if !enabled {
                    debug!("Skipping disabled rule: {}", rule.name());
                }
                enabled
            })
            .collect();

        let outcomes = if self.parallelism > 1 && files.len() > 1 {
            self.analyze_parallel(&files, &rules)
        } else {
            files
                .iter()
                .map(|path| self.analyze_file(path, &rules))
                .collect()
        };

        let mut result = LintResult::new();
        for outcome in outcomes {
            match outcome {
                Ok(file_result) => result.extend(file_result),
                Err(AnalyzerError::Load { path, source }) => {
                    warn!("Failed to load {}: {}", path.display(), source);
                    if self.fail_on_load_error {
                        return Err(AnalyzerError::Load { path, source });
                    }
                    result.files_skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes files on a dedicated rayon pool, keeping input order.
    fn analyze_parallel(
        &self,
        files: &[PathBuf],
        rules: &[&RuleBox],
    ) -> Vec<Result<LintResult, AnalyzerError>> {
        let analyze_all = || -> Vec<Result<LintResult, AnalyzerError>> {
            files
                .par_iter()
                .map(|path| self.analyze_file(path, rules))
                .collect()
        };

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.parallelism)
            .build()
        {
            Ok(pool) => {
                debug!(
                    "Analyzing {} files on {} workers",
                    files.len(),
                    pool.current_num_threads()
                );
                pool.install(analyze_all)
            }
            Err(e) => {
                warn!("Could not start worker pool ({}), using the global pool", e);
                analyze_all()
            }
        }
    }

    /// Loads one parse-tree file and crawls every tree it contains.
    fn analyze_file(&self, path: &Path, rules: &[&RuleBox]) -> Result<LintResult, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let parsed = load_file(path).map_err(|source| AnalyzerError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let mut result = LintResult::new();
        for file in &parsed {
            let ctx = FileContext::new(path, &file.tree, &self.root)
                .with_source_file(file.filepath.as_deref());

            for rule in rules {
                let violations = crawl(&ctx, std::slice::from_ref(*rule));
                let violations =
                    self.apply_severity_override(rule.name(), rule.code(), violations);
                result.violations.extend(violations);
            }
            result.files_checked += 1;
        }

        Ok(result)
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        rule_code: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name, rule_code) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers all `*.json` parse-tree files to analyze.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut files = Vec::new();

        if self.config.analyzer.respect_gitignore {
            let mut builder = ignore::WalkBuilder::new(&self.root);
            builder
                .hidden(false)
                .git_ignore(true)
                .filter_entry(|entry| entry.file_name() != ".git");
            for entry in builder.build() {
                let path = entry?.into_path();
                if path.is_file() && is_parse_tree(&path) && !self.should_exclude(&path) {
                    files.push(path);
                }
            }
        } else {
            let pattern = format!("{}/**/*.json", self.root.display());
            for entry in glob::glob(&pattern)? {
                let path = entry.map_err(|e| AnalyzerError::Io(e.into_error()))?;
                if self.should_exclude(&path) {
                    debug!("Excluding: {}", path.display());
                    continue;
                }
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/target/**"
            let normalized_pattern = pattern.replace("**", "");
            if !normalized_pattern.is_empty() && path_str.contains(&normalized_pattern) {
                return true;
            }
        }

        false
    }
}

fn is_parse_tree(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}
