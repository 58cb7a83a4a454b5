use std::collections::BTreeMap;

use crate::language::ScriptingLanguage;
use crate::syntax::{LanguageSyntax, SyntaxError, SyntaxProvider};
use crate::validation::{CodeLine, InvalidCodeLine};

/// How a line takes part in duplicate detection.
#[derive(Debug, PartialEq, Eq)]
enum LineClass {
    Comment,
    CommonOnly,
    Comparable,
}

fn classify(line: &CodeLine, syntax: &LanguageSyntax) -> LineClass {
    if syntax.is_comment(&line.text) {
        LineClass::Comment
    } else if syntax.is_common_only(&line.text) {
        LineClass::CommonOnly
    } else {
        LineClass::Comparable
    }
}

fn duplicate_error(line_numbers: &[usize]) -> String {
    let joined = line_numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("Line is duplicated at line numbers {joined}.")
}

/// Flag every line whose full text also appears on another line.
///
/// Pure comment lines and lines made only of common code parts (including
/// blank lines) are ignored. Remaining lines are grouped by their verbatim
/// text; each member of a group with two or more lines gets one finding whose
/// error lists the whole group in ascending order. Findings come back sorted
/// by line number.
pub fn analyze_duplicate_lines(
    lines: &[CodeLine],
    language: ScriptingLanguage,
    provider: &dyn SyntaxProvider,
) -> Result<Vec<InvalidCodeLine>, SyntaxError> {
    let syntax = provider.resolve(language)?;

    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    let mut ignored = 0usize;
    for line in lines {
        if classify(line, &syntax) != LineClass::Comparable {
            ignored += 1;
            continue;
        }
        groups
            .entry(line.text.as_str())
            .or_default()
            .push(line.line_number);
    }

    let mut findings = Vec::new();
    let mut duplicate_groups = 0usize;
    for mut numbers in groups.into_values().filter(|g| g.len() >= 2) {
        numbers.sort_unstable();
        let error = duplicate_error(&numbers);
        findings.extend(numbers.iter().map(|&line_number| InvalidCodeLine {
            line_number,
            error: error.clone(),
        }));
        duplicate_groups += 1;
    }
    findings.sort_by_key(|f| f.line_number);

    tracing::debug!(
        %language,
        lines = lines.len(),
        ignored,
        duplicate_groups,
        duplicated_lines = findings.len(),
        "duplicate line analysis finished"
    );
    Ok(findings)
}

#[cfg(test)]
#[path = "analyzer_test.rs"]
mod tests;
