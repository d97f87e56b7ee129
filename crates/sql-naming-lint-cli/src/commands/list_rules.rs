//! List rules command implementation.

use sql_naming_lint_rules::{all_rules, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!(
        "{:<6} {:<40} {:<28} Description",
        "Code", "Name", "Groups"
    );
    println!("{}", "-".repeat(120));

    for rule in all_rules() {
        println!(
            "{:<6} {:<40} {:<28} {}",
            rule.code(),
            rule.name(),
            rule.groups().join(","),
            rule.description()
        );
    }

    println!("\nPresets (set `preset = \"...\"` in the config file):");
    for preset in Preset::ALL {
        let codes: Vec<&str> = preset.rules().iter().map(|r| r.code()).collect();
        println!("  {:<12} - {}", preset.name(), codes.join(", "));
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  sql-naming-lint check --rules constraints.pk_constraint_naming,views.view_naming");
    println!("  sql-naming-lint check --rules CR01,FN02");
}
