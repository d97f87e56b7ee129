//! Check command implementation.

use anyhow::{Context, Result};
use sql_naming_lint_core::{Analyzer, Config, RuleBox, Severity};
use sql_naming_lint_rules::rules_from_config;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
///
/// Returns `true` when a violation reaches the configured `fail_on`
/// severity (default: error).
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<bool> {
    let config = load_config(source)?;
    let fail_on = config.fail_on.unwrap_or(Severity::Error);

    let mut rules = rules_from_config(&config);
    if let Some(filter) = rules_filter {
        let names: Vec<&str> = filter.split(',').map(str::trim).collect();
        rules = filter_rules(rules, &names);
    }

    let mut builder = Analyzer::builder().config(config).excludes(exclude);
    builder = if path.is_file() {
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        builder.root(root).files([path])
    } else {
        builder.root(path)
    };

    let analyzer = builder
        .rules(rules)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format)?;

    Ok(result.has_violations_at(fail_on))
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Keeps the rules whose name or code appears in `names`.
fn filter_rules(rules: Vec<RuleBox>, names: &[&str]) -> Vec<RuleBox> {
    for name in names {
        if !rules
            .iter()
            .any(|r| r.name() == *name || r.code().eq_ignore_ascii_case(name))
        {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    rules
        .into_iter()
        .filter(|r| {
            names
                .iter()
                .any(|n| r.name() == *n || r.code().eq_ignore_ascii_case(n))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sql_naming_lint_rules::all_rules;

    #[test]
    fn filter_accepts_names_and_codes() {
        let rules = filter_rules(all_rules(), &["cr01", "views.view_naming", "bogus"]);
        let codes: Vec<&str> = rules.iter().map(|r| r.code()).collect();
        assert_eq!(codes, ["CR01", "VW01"]);
    }

    #[test]
    fn default_source_uses_default_config() {
        let config = load_config(&ConfigSource::Default).expect("default config");
        assert!(config.rules.is_empty());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let source = ConfigSource::Explicit("/nonexistent/sql-naming-lint.toml".into());
        let err = load_config(&source).expect_err("missing file");
        assert!(err.to_string().contains("Failed to load config"));
    }
}
