//! Shared output formatting for lint results.

use anyhow::Result;
use serde::Serialize;
use sql_naming_lint_core::{LintResult, Severity, Violation};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    let (errors, warnings, _) = result.count_by_severity();

    for violation in &result.violations {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        println!(
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        println!("  {}: {}", severity_indicator, violation.message);
        if let Some(suggestion) = &violation.suggestion {
            println!("  = help: {}", suggestion.message);
        }
        println!();
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!("{}{}\x1b[0m", summary_color, result.summary());
    if result.files_skipped > 0 {
        println!("Skipped {} unreadable file(s)", result.files_skipped);
    }
}

/// JSON document emitted by `--format json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    violations: &'a [Violation],
    files_checked: usize,
    files_skipped: usize,
    errors: usize,
    warnings: usize,
    infos: usize,
}

impl<'a> From<&'a LintResult> for JsonReport<'a> {
    fn from(result: &'a LintResult) -> Self {
        let (errors, warnings, infos) = result.count_by_severity();
        Self {
            violations: &result.violations,
            files_checked: result.files_checked,
            files_skipped: result.files_skipped,
            errors,
            warnings,
            infos,
        }
    }
}

fn print_json(result: &LintResult) -> Result<()> {
    println!("{}", render_json(result)?);
    Ok(())
}

fn render_json(result: &LintResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::from(result))?)
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}
