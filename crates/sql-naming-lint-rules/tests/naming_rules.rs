//! Integration test: built-in rules over SQLFluff parse-tree fixtures.

use sql_naming_lint_core::{Analyzer, Config, LintResult, RuleBox, Severity};
use sql_naming_lint_rules::{all_rules, constraint_rules, rules_from_config, Preset};
use std::path::PathBuf;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn run(rules: Vec<RuleBox>, files: &[&str], config: Config) -> LintResult {
    let root = fixtures();
    let mut builder = Analyzer::builder().root(&root).config(config).rules(rules);
    if !files.is_empty() {
        builder = builder.files(files.iter().map(|f| root.join(f)));
    }
    builder
        .build()
        .expect("analyzer should build")
        .analyze()
        .expect("analysis should succeed")
}

fn summarize(result: &LintResult) -> Vec<String> {
    result
        .violations
        .iter()
        .map(|v| {
            format!(
                "{}:{}:{} {} {}",
                v.location.file.display(),
                v.location.line,
                v.location.column,
                v.code,
                v.subject_name
            )
        })
        .collect()
}

#[test]
fn all_rules_over_every_fixture() {
    let result = run(all_rules(), &[], Config::default());

    assert_eq!(
        summarize(&result),
        [
            "sql/account.sql:4:28 CR05 balance_default",
            "sql/account.sql:6:16 CR01 account_pk",
            "sql/account.sql:7:16 CR02 account_parent",
            "sql/account.sql:8:16 CR03 balance_positive",
            "sql/account.sql:9:16 CR04 email_unique",
            "sql/compact.sql:1:66 CR03 t_chk",
            "sql/functions.sql:1:17 FN01 configuration_get",
            "sql/functions.sql:6:61 FN02 max_age",
            "sql/orders_alter.sql:2:35 CR03 orders_total_check",
            "sql/person.sql:1:41 CR01 person_pk",
            "sql/views.sql:1:13 VW01 user_details",
        ]
    );
    assert_eq!(result.files_checked, 6);
    assert_eq!(result.files_skipped, 0);
    assert!(result.violations.iter().all(|v| v.severity == Severity::Error));
}

#[test]
fn one_violation_per_constraint_kind() {
    let result = run(constraint_rules(), &["constraints_mixed.json"], Config::default());
    let messages: Vec<&str> = result.violations.iter().map(|v| v.message.as_str()).collect();
    assert_eq!(
        messages,
        [
            "DEFAULT constraint name 'balance_default' should start with 'df_'.",
            "PRIMARY KEY constraint name 'account_pk' should start with 'pk_'.",
            "FOREIGN KEY constraint name 'account_parent' should start with 'fk_'.",
            "CHECK constraint name 'balance_positive' should start with 'chk_'.",
            "UNIQUE constraint name 'email_unique' should start with 'uc_'.",
        ]
    );
}

#[test]
fn conforming_alter_table_constraint_is_not_reported() {
    let result = run(all_rules(), &["constraints_alter_table.json"], Config::default());
    assert_eq!(
        summarize(&result),
        ["sql/orders_alter.sql:2:35 CR03 orders_total_check"]
    );
}

#[test]
fn configured_prefix_replaces_default() {
    let config = Config::parse(
        r#"
[rules.VW01]
expected_prefix = "user_"
"#,
    )
    .expect("config should parse");

    let rules = Preset::Views.configured(&config);
    let result = run(rules, &["views.json"], config);
    let names: Vec<&str> = result.violations.iter().map(|v| v.subject_name.as_str()).collect();
    assert_eq!(names, ["v_user_stats", "v_orders"]);
    assert!(result
        .violations
        .iter()
        .all(|v| v.message.ends_with("should start with 'user_'.")));
}

#[test]
fn config_selects_preset_and_severity() {
    let config = Config::parse(
        r#"
preset = "functions"

[rules."functions.function_parameter_naming"]
severity = "warning"
"#,
    )
    .expect("config should parse");

    let rules = rules_from_config(&config);
    let result = run(rules, &["functions.json"], config);
    let found: Vec<(&str, Severity)> = result
        .violations
        .iter()
        .map(|v| (v.code.as_str(), v.severity))
        .collect();
    assert_eq!(found, [("FN01", Severity::Error), ("FN02", Severity::Warning)]);
}

#[test]
fn disabled_rule_is_not_run() {
    let config = Config::parse("[rules.CR03]\nenabled = false\n").expect("config should parse");
    let result = run(all_rules(), &["constraints_compact.json"], config);
    assert!(result.violations.is_empty());
    assert_eq!(result.files_checked, 1);
}
