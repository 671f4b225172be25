//! Terminal rendering of validation results

use colored::Colorize;
use std::fmt::Write as _;

use super::validation::{FileReport, ValidationSummary};
use crate::models::{LogItem, LogType};

const LINE_WIDTH: usize = 6;
const TYPE_WIDTH: usize = 9;

/// One finding as ` <line><type><message>`, line and type left-aligned.
///
/// Values longer than their column are kept whole.
pub fn format_item(item: &LogItem, colorize: bool) -> String {
    let position = format!("{:<LINE_WIDTH$}", item.line);
    let kind = format!("{:<TYPE_WIDTH$}", item.log_type.as_ref());

    if !colorize {
        return format!(" {position}{kind}{}", item.message);
    }

    let kind = match item.log_type {
        LogType::Error => kind.red(),
        LogType::Warning => kind.yellow(),
    };
    format!(" {}{}{}", position.bright_black(), kind, item.message)
}

/// Underlined path followed by the file's findings, preceded by a blank line
pub fn format_file(report: &FileReport, colorize: bool) -> String {
    let path = report.path.display().to_string();
    let mut out = String::new();
    if colorize {
        let _ = writeln!(out, "\n{}", path.underline());
    } else {
        let _ = writeln!(out, "\n{path}");
    }
    for item in &report.items {
        let _ = writeln!(out, "{}", format_item(item, colorize));
    }
    out
}

pub fn format_totals(summary: &ValidationSummary, colorize: bool) -> String {
    let totals = format!(
        "\n{} problems ({} errors, {} warnings)",
        summary.problems(),
        summary.errors,
        summary.warnings
    );
    if colorize {
        totals.red().to_string()
    } else {
        totals
    }
}

/// Print per-file findings to stdout and the totals line to stderr
pub fn print_summary(summary: &ValidationSummary) {
    for report in &summary.reports {
        print!("{}", format_file(report, true));
    }
    eprintln!("{}", format_totals(summary, true));
}
