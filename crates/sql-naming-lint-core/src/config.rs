//! Configuration types for sql-naming-lint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::matcher::Lookahead;

/// Option key holding a rule's expected prefix.
pub const EXPECTED_PREFIX: &str = "expected_prefix";

/// Top-level configuration for sql-naming-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use ("all", "constraints", "functions", "views").
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity threshold for a failing exit status (default: "error").
    #[serde(default)]
    pub fail_on: Option<crate::Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Keyword matcher bounds shared by all rules.
    #[serde(default)]
    pub matcher: Lookahead,

    /// Per-rule configurations, keyed by rule name or code.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or fails validation.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings no rule can work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero lookahead window or an
    /// empty expected prefix.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.matcher.window == 0 {
            return Err(ConfigError::Invalid {
                message: "matcher.window must be at least 1".to_string(),
            });
        }
        for (key, rule) in &self.rules {
            if let Some(toml::Value::String(prefix)) = rule.options.get(EXPECTED_PREFIX) {
                if prefix.is_empty() {
                    return Err(ConfigError::Invalid {
                        message: format!("rules.\"{key}\".expected_prefix must not be empty"),
                    });
                }
            } else if rule.options.contains_key(EXPECTED_PREFIX) {
                return Err(ConfigError::Invalid {
                    message: format!("rules.\"{key}\".expected_prefix must be a string"),
                });
            }
        }
        Ok(())
    }

    /// Looks up a rule's settings by name, then by code.
    #[must_use]
    pub fn rule(&self, name: &str, code: &str) -> Option<&RuleConfig> {
        self.rules.get(name).or_else(|| self.rules.get(code))
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, name: &str, code: &str) -> bool {
        self.rule(name, code)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, name: &str, code: &str) -> Option<crate::Severity> {
        self.rule(name, code).and_then(|c| c.severity)
    }

    /// Gets the configured prefix for a rule, if overridden.
    #[must_use]
    pub fn expected_prefix(&self, name: &str, code: &str) -> Option<&str> {
        self.rule(name, code)
            .and_then(|c| c.options.get(EXPECTED_PREFIX))
            .and_then(toml::Value::as_str)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Maximum number of parse-tree files analyzed in parallel.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: vec!["**/target/**".to_string(), "**/node_modules/**".to_string()],
            respect_gitignore: true,
            parallelism: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Settings that parse but cannot be used.
    #[error("Invalid config: {message}")]
    Invalid {
        /// What is wrong.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.rules.is_empty());
        assert_eq!(config.matcher, Lookahead::default());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "constraints"
fail_on = "warning"

[analyzer]
root = "./trees"
exclude = ["**/generated/**"]
parallelism = 4

[matcher]
window = 12

[rules."constraints.pk_constraint_naming"]
severity = "warning"
expected_prefix = "PK_"

[rules.CR05]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("./trees"));
        assert_eq!(config.analyzer.parallelism, Some(4));
        assert_eq!(config.fail_on, Some(Severity::Warning));
        assert_eq!(config.matcher.window, 12);
        assert_eq!(config.matcher.gap, crate::matcher::DEFAULT_GAP);

        assert_eq!(
            config.expected_prefix("constraints.pk_constraint_naming", "CR01"),
            Some("PK_")
        );
        assert_eq!(
            config.rule_severity("constraints.pk_constraint_naming", "CR01"),
            Some(Severity::Warning)
        );
        assert!(!config.is_rule_enabled("constraints.df_constraint_naming", "CR05"));
        assert!(config.is_rule_enabled("views.view_naming", "VW01"));
        assert_eq!(config.expected_prefix("views.view_naming", "VW01"), None);
    }

    #[test]
    fn name_takes_precedence_over_code() {
        let config = Config::parse(
            r#"
[rules.FN01]
expected_prefix = "fn_"

[rules."functions.function_naming"]
expected_prefix = "f_"
"#,
        )
        .expect("valid");
        assert_eq!(
            config.expected_prefix("functions.function_naming", "FN01"),
            Some("f_")
        );
    }

    #[test]
    fn empty_prefix_is_invalid() {
        let err = Config::parse("[rules.VW01]\nexpected_prefix = \"\"\n").expect_err("empty");
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("rules.\"VW01\".expected_prefix"));
    }

    #[test]
    fn non_string_prefix_is_invalid() {
        let err = Config::parse("[rules.VW01]\nexpected_prefix = 3\n").expect_err("number");
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn zero_window_is_invalid() {
        let err = Config::parse("[matcher]\nwindow = 0\n").expect_err("zero window");
        assert!(err.to_string().contains("matcher.window"));
    }

    #[test]
    fn unparsable_toml_is_parse_error() {
        assert!(matches!(
            Config::parse("preset = ["),
            Err(ConfigError::Parse { .. })
        ));
    }
}
