//! Locates the configuration file for a lint run.
//!
//! Parse trees usually live in a subdirectory of the project (for example
//! `build/trees/`), so project configs are searched from the analyzed
//! directory upwards. Priority order:
//!
//! 1. `--config` flag or `SQL_NAMING_LINT_CONFIG`
//! 2. `sql-naming-lint.toml` or `.sql-naming-lint.toml` in the analyzed
//!    directory or the nearest ancestor that has one
//! 3. `~/.sql-naming-lint/config.toml`
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line or in the environment.
    Explicit(PathBuf),
    /// Found next to, or above, the analyzed directory.
    Project(PathBuf),
    /// Found in the per-user config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config came from the per-user directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Project-level config file names, checked in order within each directory.
const PROJECT_CONFIG_NAMES: &[&str] = &["sql-naming-lint.toml", ".sql-naming-lint.toml"];

/// Config file name within the per-user config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Overrides the per-user config directory.
const CONFIG_DIR_ENV: &str = "SQL_NAMING_LINT_CONFIG_DIR";

/// Resolves the configuration file for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    let start = std::fs::canonicalize(project_dir).unwrap_or_else(|_| project_dir.to_path_buf());
    resolve_inner(&start, explicit, global_config_dir())
}

fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = find_project_config(project_dir) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, |candidate| {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        })
}

/// Nearest project config at or above `dir`.
fn find_project_config(dir: &Path) -> Option<PathBuf> {
    dir.ancestors().find_map(|ancestor| {
        PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| ancestor.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Returns the per-user config directory.
///
/// `$SQL_NAMING_LINT_CONFIG_DIR` if set, else `~/.sql-naming-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".sql-naming-lint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, "").unwrap();
    }

    #[test]
    fn explicit_wins_and_is_not_checked() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("sql-naming-lint.toml"));

        let result = resolve_inner(tmp.path(), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
    }

    #[test]
    fn project_config_in_analyzed_dir() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join(".sql-naming-lint.toml"));

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join(".sql-naming-lint.toml"))
        );
    }

    #[test]
    fn plain_name_preferred_over_dot_prefix() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("sql-naming-lint.toml"));
        touch(&tmp.path().join(".sql-naming-lint.toml"));

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join("sql-naming-lint.toml"))
        );
    }

    #[test]
    fn project_config_found_in_ancestor() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("sql-naming-lint.toml"));
        let trees = tmp.path().join("build/trees");
        fs::create_dir_all(&trees).unwrap();

        let result = resolve_inner(&trees, None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join("sql-naming-lint.toml"))
        );
    }

    #[test]
    fn nearest_project_config_wins() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("sql-naming-lint.toml"));
        let nested = tmp.path().join("db");
        fs::create_dir(&nested).unwrap();
        touch(&nested.join(".sql-naming-lint.toml"));

        let result = resolve_inner(&nested, None, None);
        assert_eq!(
            result,
            ConfigSource::Project(nested.join(".sql-naming-lint.toml"))
        );
    }

    #[test]
    fn global_fallback_when_no_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        touch(&global.path().join("config.toml"));

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(
            result,
            ConfigSource::Global(global.path().join("config.toml"))
        );
        assert!(result.is_global());
    }

    #[test]
    fn empty_global_dir_returns_default() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
        assert!(result.path().is_none());
    }
}
