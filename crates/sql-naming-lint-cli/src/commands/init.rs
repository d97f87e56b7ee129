//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# sql-naming-lint configuration
#
# Lints SQLFluff JSON parse trees, e.g. produced with:
#   sqlfluff parse --format json --dialect postgres schema.sql > trees/schema.json

# Rule preset: "all", "constraints", "functions" or "views"
preset = "all"

# Exit with status 1 when a violation at or above this severity is found
fail_on = "error"

[analyzer]
# Root directory holding the parse-tree files (default: current directory)
# root = "./trees"

# Glob patterns to exclude from analysis
exclude = [
    "**/target/**",
    "**/node_modules/**",
]

# Respect .gitignore files
respect_gitignore = true

# Parse-tree files analyzed in parallel
# parallelism = 4

[matcher]
# Tokens scanned after a constraint name for its keywords
window = 10
# Tokens allowed between consecutive keywords
gap = 3

# Rule configurations, keyed by rule name or code.
# Each rule can be disabled, have its severity overridden,
# or expect a different prefix.

[rules."constraints.pk_constraint_naming"]
expected_prefix = "pk_"

[rules."constraints.fk_constraint_naming"]
expected_prefix = "fk_"

[rules."constraints.chk_constraint_naming"]
expected_prefix = "chk_"

[rules."constraints.uc_constraint_naming"]
expected_prefix = "uc_"

[rules."constraints.df_constraint_naming"]
expected_prefix = "df_"
# severity = "warning"

[rules."functions.function_naming"]
expected_prefix = "fun_"

[rules."functions.function_parameter_naming"]
expected_prefix = "p_"

[rules."views.view_naming"]
expected_prefix = "v_"
# enabled = false
"#;

/// Config file written by `init`.
const CONFIG_FILE: &str = "sql-naming-lint.toml";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: sql-naming-lint check <parse-tree dir>");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}
