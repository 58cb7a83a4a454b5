use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::language::ScriptingLanguage;
use crate::report_helpers;
use crate::validation::{InvalidCodeLine, ValidationReport};

/// Validation result for a single script file.
pub struct FileFindings {
    pub path: PathBuf,
    pub report: ValidationReport,
}

impl FileFindings {
    /// Distinct duplicate groups; members of one group share an error string.
    pub fn duplicate_groups(&self) -> usize {
        self.report
            .findings
            .iter()
            .map(|f| f.error.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Summary metrics for the duplicate line analysis.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct DuplicationMetrics {
    pub files_analyzed: usize,
    pub total_lines: usize,
    pub duplicated_lines: usize,
    pub duplicate_groups: usize,
    pub files_with_duplicates: usize,
}

impl DuplicationMetrics {
    pub fn from_files(files: &[FileFindings]) -> Self {
        files.iter().fold(Self::default(), |mut acc, f| {
            acc.files_analyzed += 1;
            acc.total_lines += f.report.lines.len();
            acc.duplicated_lines += f.report.findings.len();
            acc.duplicate_groups += f.duplicate_groups();
            if !f.report.is_valid() {
                acc.files_with_duplicates += 1;
            }
            acc
        })
    }

    pub fn percentage(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            (self.duplicated_lines as f64 / self.total_lines as f64) * 100.0
        }
    }
}

fn table_row(width: usize, file: &str, language: &str, flagged: &str) -> String {
    format!(" {file:<width$}  {language:>11}  {flagged:>7}")
}

/// Print the summary table followed by a per-file breakdown.
pub fn print_summary(metrics: &DuplicationMetrics, flagged: &[&FileFindings]) {
    let separator = report_helpers::separator(68);

    println!("{separator}");
    println!(" Duplicate Line Analysis");
    println!();
    println!(" Files analyzed:       {:>42}", metrics.files_analyzed);
    println!(" Total lines:          {:>42}", metrics.total_lines);
    println!(" Duplicated lines:     {:>42}", metrics.duplicated_lines);
    println!(" Duplication:          {:>41.1}%", metrics.percentage());
    println!();
    println!(" Duplicate groups:     {:>42}", metrics.duplicate_groups);
    println!(
        " Files with duplicates:{:>42}",
        metrics.files_with_duplicates
    );

    if !flagged.is_empty() {
        let width = report_helpers::max_path_width(flagged.iter().map(|f| f.path.as_path()), 4);
        println!();
        println!("{}", table_row(width, "File", "Language", "Flagged"));
        for f in flagged {
            println!(
                "{}",
                table_row(
                    width,
                    &f.path.display().to_string(),
                    f.report.language.name(),
                    &f.report.findings.len().to_string(),
                )
            );
        }
    }
    println!("{separator}");
}

/// Print the summary, then every flagged file line by line with its errors.
pub fn print_detailed(metrics: &DuplicationMetrics, flagged: &[&FileFindings]) {
    print_summary(metrics, flagged);

    for f in flagged {
        println!();
        println!(
            " {} ({}, {} groups)",
            f.path.display(),
            f.report.language,
            f.duplicate_groups()
        );
        println!();
        for line in f.report.annotated_lines() {
            println!("   {line}");
        }
    }
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: &'a PathBuf,
    language: ScriptingLanguage,
    duplicate_groups: usize,
    findings: &'a [InvalidCodeLine],
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    metrics: &'a DuplicationMetrics,
    files: Vec<JsonFile<'a>>,
}

fn json_output<'a>(
    metrics: &'a DuplicationMetrics,
    flagged: &[&'a FileFindings],
) -> JsonOutput<'a> {
    JsonOutput {
        metrics,
        files: flagged
            .iter()
            .map(|f| JsonFile {
                path: &f.path,
                language: f.report.language,
                duplicate_groups: f.duplicate_groups(),
                findings: &f.report.findings,
            })
            .collect(),
    }
}

/// Serialize the metrics and per-file findings as pretty-printed JSON.
pub fn print_json(
    metrics: &DuplicationMetrics,
    flagged: &[&FileFindings],
) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(&json_output(metrics, flagged))
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
