/// Per-language line syntax used by the validation analyzers.
///
/// A `LanguageSyntax` answers two questions about a single line of script
/// text: is it a pure comment, and does it consist only of boilerplate
/// tokens. Syntaxes are obtained through a `SyntaxProvider`, which callers
/// inject so that tests and configuration can substitute their own tables.
mod builtin;
mod config;
pub mod report;

use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use crate::language::ScriptingLanguage;

pub use builtin::BuiltinSyntaxProvider;
pub use config::SyntaxConfig;

/// Configuration errors raised while resolving or loading syntaxes.
///
/// These indicate a wiring or setup defect and are never retried.
#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("unknown scripting language '{0}' (expected batchfile or shellscript)")]
    UnknownLanguage(String),

    #[error("no syntax is configured for language '{0}'")]
    Unsupported(ScriptingLanguage),

    #[error("empty comment delimiter configured for language '{0}'")]
    EmptyDelimiter(ScriptingLanguage),

    #[error("cannot read syntax configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid syntax configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageSyntax {
    pub comment_delimiters: Vec<String>,
    pub common_code_parts: BTreeSet<String>,
}

impl LanguageSyntax {
    pub fn new<D, C>(comment_delimiters: D, common_code_parts: C) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            comment_delimiters: comment_delimiters.into_iter().map(Into::into).collect(),
            common_code_parts: common_code_parts.into_iter().map(Into::into).collect(),
        }
    }

    /// True if the line, ignoring leading whitespace, starts with a comment
    /// delimiter. Only the prefix is inspected.
    pub fn is_comment(&self, text: &str) -> bool {
        let trimmed = text.trim_start();
        self.comment_delimiters
            .iter()
            .any(|delimiter| trimmed.starts_with(delimiter.as_str()))
    }

    /// True if every whitespace-separated token is a common code part.
    /// Blank lines have no tokens and are vacuously common.
    pub fn is_common_only(&self, text: &str) -> bool {
        text.split_whitespace()
            .all(|token| self.common_code_parts.contains(token))
    }
}

/// Resolves the syntax for a scripting language.
///
/// Called exactly once per analysis. Resolution failures are configuration
/// errors, not data errors.
pub trait SyntaxProvider {
    fn resolve(&self, language: ScriptingLanguage) -> Result<LanguageSyntax, SyntaxError>;
}

impl<F> SyntaxProvider for F
where
    F: Fn(ScriptingLanguage) -> Result<LanguageSyntax, SyntaxError>,
{
    fn resolve(&self, language: ScriptingLanguage) -> Result<LanguageSyntax, SyntaxError> {
        self(language)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
