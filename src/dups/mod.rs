pub mod analyzer;
mod report;

use std::error::Error;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::language::ScriptingLanguage;
use crate::syntax::SyntaxProvider;
use crate::util::is_binary_reader;
use crate::validation::validate_code;
use crate::walk::{self, ExcludeFilter};
use analyzer::analyze_duplicate_lines;
use report::{DuplicationMetrics, FileFindings, print_detailed, print_json, print_summary};

/// Read a script as text. Returns `None` for binary files.
///
/// Scripts saved in a legacy code page are still analyzed; bytes that are
/// not valid UTF-8 become U+FFFD.
fn read_script(path: &Path) -> std::io::Result<Option<String>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    if is_binary_reader(&mut reader)? {
        return Ok(None);
    }

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(Some(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!(path = %path.display(), "not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }))
}

/// Walk `path`, validate every recognized script and collect the results.
///
/// I/O problems on individual files are logged and skipped; a syntax
/// configuration error aborts the whole run.
fn collect_findings(
    path: &Path,
    language: Option<ScriptingLanguage>,
    provider: &dyn SyntaxProvider,
    filter: &ExcludeFilter,
) -> Result<Vec<FileFindings>, Box<dyn Error>> {
    let mut results = Vec::new();

    for entry in walk::walk(path) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!("{err}");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let file_path = entry.path();
        if filter.excludes(file_path, path) {
            tracing::debug!(path = %file_path.display(), "excluded");
            continue;
        }
        let Some(lang) = walk::resolve_language(file_path, language) else {
            continue;
        };

        let source = match read_script(file_path) {
            Ok(Some(s)) => s,
            Ok(None) => {
                tracing::debug!(path = %file_path.display(), "binary file skipped");
                continue;
            }
            Err(err) => {
                tracing::warn!("{}: {err}", file_path.display());
                continue;
            }
        };

        let report = validate_code(&source, lang, provider, &[analyze_duplicate_lines])?;
        results.push(FileFindings {
            path: file_path.to_path_buf(),
            report,
        });
    }

    results.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(results)
}

pub fn run(
    path: &Path,
    language: Option<ScriptingLanguage>,
    provider: &dyn SyntaxProvider,
    filter: &ExcludeFilter,
    show_report: bool,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let files = collect_findings(path, language, provider, filter)?;

    if files.is_empty() {
        if json {
            print_json(&DuplicationMetrics::default(), &[])?;
        } else {
            println!("No recognized script files found.");
        }
        return Ok(());
    }

    let metrics = DuplicationMetrics::from_files(&files);
    let flagged: Vec<&FileFindings> = files.iter().filter(|f| !f.report.is_valid()).collect();

    if json {
        print_json(&metrics, &flagged)?;
    } else if show_report {
        print_detailed(&metrics, &flagged);
    } else {
        print_summary(&metrics, &flagged);
    }

    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
