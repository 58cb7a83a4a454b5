/// TOML-backed syntax table.
///
/// ```toml
/// replace_builtin = false
///
/// [batchfile]
/// comment_delimiters = ["REM", "::", "@REM"]
/// common_code_parts = ["(", ")", "else"]
/// ```
///
/// A language table replaces that language's built-in syntax. Absent tables
/// fall back to the built-in one unless `replace_builtin` is set, in which
/// case resolving them fails.
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::builtin::builtin_syntax;
use super::{LanguageSyntax, SyntaxError, SyntaxProvider};
use crate::language::ScriptingLanguage;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    replace_builtin: bool,
    batchfile: Option<RawSyntax>,
    shellscript: Option<RawSyntax>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSyntax {
    #[serde(default)]
    comment_delimiters: Vec<String>,
    #[serde(default)]
    common_code_parts: Vec<String>,
}

#[derive(Debug, Default, Clone)]
pub struct SyntaxConfig {
    replace_builtin: bool,
    overrides: BTreeMap<ScriptingLanguage, LanguageSyntax>,
}

impl SyntaxConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, SyntaxError> {
        let raw: RawConfig = toml::from_str(content)?;
        let mut overrides = BTreeMap::new();

        let tables = [
            (ScriptingLanguage::Batchfile, raw.batchfile),
            (ScriptingLanguage::Shellscript, raw.shellscript),
        ];
        for (language, table) in tables {
            let Some(table) = table else { continue };
            if table.comment_delimiters.iter().any(|d| d.is_empty()) {
                return Err(SyntaxError::EmptyDelimiter(language));
            }
            overrides.insert(
                language,
                LanguageSyntax::new(table.comment_delimiters, table.common_code_parts),
            );
        }

        Ok(Self {
            replace_builtin: raw.replace_builtin,
            overrides,
        })
    }

    pub fn load(path: &Path) -> Result<Self, SyntaxError> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            overrides = config.overrides.len(),
            replace_builtin = config.replace_builtin,
            "loaded syntax configuration"
        );
        Ok(config)
    }

    /// Load from `path` if given, otherwise the built-in table alone.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, SyntaxError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

impl SyntaxProvider for SyntaxConfig {
    fn resolve(&self, language: ScriptingLanguage) -> Result<LanguageSyntax, SyntaxError> {
        match self.overrides.get(&language) {
            Some(syntax) => Ok(syntax.clone()),
            None if self.replace_builtin => Err(SyntaxError::Unsupported(language)),
            None => Ok(builtin_syntax(language)),
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
