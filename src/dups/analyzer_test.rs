use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};

use super::*;
use crate::validation::split_code_lines;

fn lines(texts: &[&str]) -> Vec<CodeLine> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| CodeLine::new(*t, i + 1))
        .collect()
}

fn syntax_provider(
    delimiters: &'static [&'static str],
    common: &'static [&'static str],
) -> impl Fn(ScriptingLanguage) -> Result<LanguageSyntax, SyntaxError> {
    move |_| {
        Ok(LanguageSyntax::new(
            delimiters.iter().copied(),
            common.iter().copied(),
        ))
    }
}

fn analyze(
    texts: &[&str],
    delimiters: &'static [&'static str],
    common: &'static [&'static str],
) -> Vec<InvalidCodeLine> {
    let provider = syntax_provider(delimiters, common);
    analyze_duplicate_lines(&lines(texts), ScriptingLanguage::Batchfile, &provider).unwrap()
}

/// Findings expected for the given duplicate groups, sorted by line number.
fn expected(groups: &[&[usize]]) -> Vec<InvalidCodeLine> {
    let mut out: Vec<InvalidCodeLine> = groups
        .iter()
        .flat_map(|group| {
            let error = format!(
                "Line is duplicated at line numbers {}.",
                group
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            );
            group.iter().map(move |&line_number| InvalidCodeLine {
                line_number,
                error: error.clone(),
            })
        })
        .collect();
    out.sort_by_key(|f| f.line_number);
    out
}

#[test]
fn no_results_for_unique_lines() {
    let actual = analyze(&["unique1", "unique2", "unique3", "unique4"], &[], &[]);
    assert!(actual.is_empty());
}

#[test]
fn no_results_for_empty_input() {
    let actual = analyze(&[], &["#"], &["good"]);
    assert!(actual.is_empty());
}

#[test]
fn single_duplicated_line() {
    let actual = analyze(&["duplicate", "duplicate", "unique", "duplicate"], &[], &[]);
    assert_eq!(actual, expected(&[&[1, 2, 4]]));
}

#[test]
fn multiple_duplicated_lines() {
    let actual = analyze(
        &["duplicate1", "duplicate2", "unique", "duplicate1", "unique2", "duplicate2"],
        &[],
        &[],
    );
    assert_eq!(actual, expected(&[&[1, 4], &[2, 6]]));
}

#[test]
fn triple_duplicate_shares_one_error() {
    let actual = analyze(&["x", "x", "x"], &["#"], &["good"]);
    assert_eq!(actual.len(), 3);
    for finding in &actual {
        assert_eq!(finding.error, "Line is duplicated at line numbers 1,2,3.");
    }
}

#[test]
fn common_only_lines_are_ignored() {
    let actual = analyze(&["good", "good", "bad", "bad"], &["#"], &["good"]);
    assert_eq!(actual, expected(&[&[3, 4]]));
    assert_eq!(actual[0].error, "Line is duplicated at line numbers 3,4.");
}

#[test]
fn ignores_multiple_occurrences_of_common_code_parts() {
    let actual = analyze(
        &["good", "good", "bad", "bad", "good", "also-good", "also-good", "unique"],
        &[],
        &["good", "also-good"],
    );
    assert_eq!(actual, expected(&[&[3, 4]]));
}

#[test]
fn ignores_common_code_parts_used_in_same_line() {
    let actual = analyze(
        &["bad", "bad", "good1 good2", "good1 good2", "good2 good1", "good2 good1"],
        &[],
        &["good2", "good1"],
    );
    assert_eq!(actual, expected(&[&[1, 2]]));
}

#[test]
fn detects_duplicates_with_common_parts_and_unique_words() {
    let actual = analyze(
        &[
            "common-part1",
            "common-part1",
            "common-part1 common-part2",
            "common-part1 unique",
            "common-part1 unique",
            "common-part2",
            "common-part2 common-part1",
            "unique common-part2",
            "unique common-part2",
        ],
        &[],
        &["common-part1", "common-part2"],
    );
    assert_eq!(actual, expected(&[&[4, 5], &[8, 9]]));
}

#[test]
fn leftover_token_does_not_merge_groups() {
    let actual = analyze(&["good x", "good x", "y good", "y good"], &["#"], &["good"]);
    assert_eq!(actual, expected(&[&[1, 2], &[3, 4]]));
}

#[test]
fn ignores_lines_starting_with_comment_delimiters() {
    let actual = analyze(
        &[
            "#abc", "#abc", "abc", "unique", "abc", "//abc", "//abc", "//unique", "#unique",
        ],
        &["#", "//"],
        &[],
    );
    assert_eq!(actual, expected(&[&[3, 5]]));
}

#[test]
fn pure_comment_duplicates_are_ignored() {
    let actual = analyze(&["#same", "#same"], &["#"], &["good"]);
    assert!(actual.is_empty());
}

#[test]
fn indented_comments_are_ignored() {
    let actual = analyze(&["   #same", "\t#same"], &["#"], &[]);
    assert!(actual.is_empty());
}

#[test]
fn detects_duplicates_when_comments_are_not_at_line_start() {
    let actual = analyze(
        &["test #comment", "test #comment", "test2 # comment", "test2 # comment"],
        &["#"],
        &[],
    );
    assert_eq!(actual, expected(&[&[1, 2], &[3, 4]]));
}

#[test]
fn blank_lines_are_never_duplicates() {
    let actual = analyze(&["", "  ", "", "\t"], &[], &[]);
    assert!(actual.is_empty());
}

#[test]
fn comparison_is_whitespace_and_case_sensitive() {
    let actual = analyze(&["echo a", "echo  a", " echo a", "ECHO a", "echo a "], &[], &[]);
    assert!(actual.is_empty());
}

#[test]
fn line_numbers_come_from_caller() {
    let input = vec![
        CodeLine::new("dup", 40),
        CodeLine::new("other", 7),
        CodeLine::new("dup", 12),
    ];
    let provider = syntax_provider(&[], &[]);
    let actual =
        analyze_duplicate_lines(&input, ScriptingLanguage::Shellscript, &provider).unwrap();
    assert_eq!(actual, expected(&[&[12, 40]]));
    assert_eq!(actual[0].error, "Line is duplicated at line numbers 12,40.");
}

#[test]
fn resolves_syntax_once_for_requested_language() {
    let calls = Cell::new(0);
    let requested = Cell::new(None);
    let provider = |language: ScriptingLanguage| -> Result<LanguageSyntax, SyntaxError> {
        calls.set(calls.get() + 1);
        requested.set(Some(language));
        Ok(LanguageSyntax::new(["#"], ["good"]))
    };

    analyze_duplicate_lines(&lines(&["a", "a", "b"]), ScriptingLanguage::Shellscript, &provider)
        .unwrap();

    assert_eq!(calls.get(), 1);
    assert_eq!(requested.get(), Some(ScriptingLanguage::Shellscript));
}

#[test]
fn configuration_error_aborts_analysis() {
    let provider =
        |language: ScriptingLanguage| -> Result<LanguageSyntax, SyntaxError> {
            Err(SyntaxError::Unsupported(language))
        };
    let result =
        analyze_duplicate_lines(&lines(&["a", "a"]), ScriptingLanguage::Batchfile, &provider);
    assert!(matches!(
        result,
        Err(SyntaxError::Unsupported(ScriptingLanguage::Batchfile))
    ));
}

#[test]
fn builtin_batchfile_ignores_else_blocks_and_rem() {
    let source = "\
@echo off
REM Disable service
sc stop svc
if %errorlevel% neq 0 (
    echo failed
) else (
    echo ok
)
REM Disable service
sc stop svc
if %errorlevel% neq 0 (
    echo failed
) else (
    echo ok
)
";
    let actual = analyze_duplicate_lines(
        &split_code_lines(source),
        ScriptingLanguage::Batchfile,
        &crate::syntax::BuiltinSyntaxProvider,
    )
    .unwrap();

    let groups: BTreeSet<&str> = actual.iter().map(|f| f.error.as_str()).collect();
    assert_eq!(
        groups,
        BTreeSet::from([
            "Line is duplicated at line numbers 3,10.",
            "Line is duplicated at line numbers 4,11.",
            "Line is duplicated at line numbers 5,12.",
            "Line is duplicated at line numbers 7,14.",
        ])
    );
}

#[test]
fn grouping_by_error_reconstructs_partition() {
    let texts = ["a", "b", "#c", "a", "", "b", "c", "a", "good", "good"];
    let actual = analyze(&texts, &["#"], &["good"]);

    let mut partition: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for finding in &actual {
        partition
            .entry(finding.error.as_str())
            .or_default()
            .push(finding.line_number);
    }
    let groups: Vec<Vec<usize>> = partition.into_values().collect();
    assert_eq!(groups, vec![vec![1, 4, 8], vec![2, 6]]);

    // every referenced group has at least two members, and ignored lines never show up
    for finding in &actual {
        assert!(finding.error.contains(','));
        assert!(![3, 5, 9, 10].contains(&finding.line_number));
    }
}
