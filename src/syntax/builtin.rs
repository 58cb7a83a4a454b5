use super::{LanguageSyntax, SyntaxError, SyntaxProvider};
use crate::language::ScriptingLanguage;

const BATCHFILE_COMMENTS: &[&str] = &["REM", "::"];
const BATCHFILE_COMMON_PARTS: &[&str] = &["(", ")", "else", "||"];
// PowerShell blocks embedded in batch scripts
const POWERSHELL_COMMON_PARTS: &[&str] = &["{", "}"];

const SHELLSCRIPT_COMMENTS: &[&str] = &["#"];
const SHELLSCRIPT_COMMON_PARTS: &[&str] = &["(", ")", "else", "fi", "done"];

pub fn builtin_syntax(language: ScriptingLanguage) -> LanguageSyntax {
    match language {
        ScriptingLanguage::Batchfile => LanguageSyntax::new(
            BATCHFILE_COMMENTS.iter().copied(),
            BATCHFILE_COMMON_PARTS
                .iter()
                .chain(POWERSHELL_COMMON_PARTS)
                .copied(),
        ),
        ScriptingLanguage::Shellscript => LanguageSyntax::new(
            SHELLSCRIPT_COMMENTS.iter().copied(),
            SHELLSCRIPT_COMMON_PARTS.iter().copied(),
        ),
    }
}

/// Provider backed by the built-in table. Total over `ScriptingLanguage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinSyntaxProvider;

impl SyntaxProvider for BuiltinSyntaxProvider {
    fn resolve(&self, language: ScriptingLanguage) -> Result<LanguageSyntax, SyntaxError> {
        Ok(builtin_syntax(language))
    }
}
