use std::error::Error;

use serde::Serialize;

use super::{LanguageSyntax, SyntaxProvider};
use crate::language::ScriptingLanguage;
use crate::report_helpers;

#[derive(Serialize)]
struct SyntaxEntry {
    language: ScriptingLanguage,
    #[serde(flatten)]
    syntax: LanguageSyntax,
}

fn quoted(items: impl Iterator<Item = impl AsRef<str>>) -> String {
    items
        .map(|s| format!("\"{}\"", s.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_entries(entries: &[SyntaxEntry]) {
    let separator = report_helpers::separator(68);
    println!("{separator}");
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(" {}", entry.language);
        println!(
            "   Comment delimiters: {}",
            quoted(entry.syntax.comment_delimiters.iter())
        );
        println!(
            "   Common code parts:  {}",
            quoted(entry.syntax.common_code_parts.iter())
        );
    }
    println!("{separator}");
}

/// Every language the provider can resolve. Unmapped languages are logged
/// and left out; any other error still surfaces when the language is named
/// explicitly or analyzed.
fn resolvable_entries(provider: &dyn SyntaxProvider) -> Vec<SyntaxEntry> {
    ScriptingLanguage::ALL
        .into_iter()
        .filter_map(|language| match provider.resolve(language) {
            Ok(syntax) => Some(SyntaxEntry { language, syntax }),
            Err(err) => {
                tracing::warn!("{err}");
                None
            }
        })
        .collect()
}

/// Print the effective syntax for one language, or for every resolvable one.
pub fn run(
    language: Option<ScriptingLanguage>,
    provider: &dyn SyntaxProvider,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let entries = match language {
        Some(language) => vec![SyntaxEntry {
            language,
            syntax: provider.resolve(language)?,
        }],
        None => resolvable_entries(provider),
    };

    if json {
        report_helpers::print_json_stdout(&entries)
    } else {
        print_entries(&entries);
        Ok(())
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
