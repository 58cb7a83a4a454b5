/// Shared contract for line-level code validation analyzers.
///
/// The caller splits script source into numbered `CodeLine`s, every analyzer
/// inspects the same lines with the same syntax provider, and the findings
/// are merged into one `ValidationReport`.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::language::ScriptingLanguage;
use crate::syntax::{SyntaxError, SyntaxProvider};

/// A single line of script source with its original position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeLine {
    pub text: String,
    pub line_number: usize, // 1-based, as shown to the user
}

impl CodeLine {
    pub fn new(text: impl Into<String>, line_number: usize) -> Self {
        Self {
            text: text.into(),
            line_number,
        }
    }
}

/// A line flagged by an analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidCodeLine {
    pub line_number: usize,
    pub error: String,
}

/// Signature every analyzer shares.
pub type CodeValidationAnalyzer =
    fn(&[CodeLine], ScriptingLanguage, &dyn SyntaxProvider) -> Result<Vec<InvalidCodeLine>, SyntaxError>;

/// Split raw source into 1-based, contiguous code lines.
///
/// Handles `\n` and `\r\n`. A trailing terminator does not open an extra
/// line, so empty source yields no lines.
pub fn split_code_lines(source: &str) -> Vec<CodeLine> {
    source
        .lines()
        .enumerate()
        .map(|(i, text)| CodeLine::new(text, i + 1))
        .collect()
}

/// All lines of one script together with the merged analyzer findings.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub language: ScriptingLanguage,
    pub lines: Vec<CodeLine>,
    pub findings: Vec<InvalidCodeLine>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.findings.is_empty()
    }

    /// Findings grouped by line number, each group in analyzer order.
    pub fn findings_by_line(&self) -> BTreeMap<usize, Vec<&InvalidCodeLine>> {
        let mut by_line: BTreeMap<usize, Vec<&InvalidCodeLine>> = BTreeMap::new();
        for finding in &self.findings {
            by_line.entry(finding.line_number).or_default().push(finding);
        }
        by_line
    }

    /// Every line prefixed with its number and a pass/fail marker, each
    /// failing line followed by its errors.
    pub fn annotated_lines(&self) -> Vec<String> {
        let by_line = self.findings_by_line();
        let mut out = Vec::with_capacity(self.lines.len() + self.findings.len());
        for line in &self.lines {
            let Some(errors) = by_line.get(&line.line_number) else {
                out.push(format!("[{}] \u{2705} {}", line.line_number, line.text));
                continue;
            };
            out.push(format!("[{}] \u{274c} {}", line.line_number, line.text));
            for finding in errors {
                out.push(format!("\t\u{27f6} {}", finding.error));
            }
        }
        out
    }
}

/// Run every analyzer over `source` and merge their findings by line number.
///
/// The first configuration error aborts the whole validation.
pub fn validate_code(
    source: &str,
    language: ScriptingLanguage,
    provider: &dyn SyntaxProvider,
    analyzers: &[CodeValidationAnalyzer],
) -> Result<ValidationReport, SyntaxError> {
    let lines = split_code_lines(source);
    let mut findings = Vec::new();
    for analyze in analyzers {
        findings.extend(analyze(&lines, language, provider)?);
    }
    // stable: findings on the same line keep analyzer order
    findings.sort_by_key(|f| f.line_number);

    Ok(ValidationReport {
        language,
        lines,
        findings,
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
