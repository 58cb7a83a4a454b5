use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::syntax::SyntaxError;

/// Scripting languages whose generated code can be validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptingLanguage {
    Batchfile,
    Shellscript,
}

struct LanguageInfo {
    language: ScriptingLanguage,
    name: &'static str,
    aliases: &'static [&'static str],
    extensions: &'static [&'static str],
    shebangs: &'static [&'static str],
}

static LANGUAGES: &[LanguageInfo] = &[
    LanguageInfo {
        language: ScriptingLanguage::Batchfile,
        name: "batchfile",
        aliases: &["bat", "cmd"],
        extensions: &["bat", "cmd"],
        shebangs: &[],
    },
    LanguageInfo {
        language: ScriptingLanguage::Shellscript,
        name: "shellscript",
        aliases: &["sh", "bash"],
        extensions: &["sh", "bash"],
        shebangs: &["sh", "bash", "zsh", "dash"],
    },
];

impl ScriptingLanguage {
    pub const ALL: [ScriptingLanguage; 2] =
        [ScriptingLanguage::Batchfile, ScriptingLanguage::Shellscript];

    fn info(self) -> &'static LanguageInfo {
        match self {
            ScriptingLanguage::Batchfile => &LANGUAGES[0],
            ScriptingLanguage::Shellscript => &LANGUAGES[1],
        }
    }

    /// Canonical identifier, as accepted by `--language` and config tables.
    pub fn name(self) -> &'static str {
        self.info().name
    }
}

impl fmt::Display for ScriptingLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScriptingLanguage {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        LANGUAGES
            .iter()
            .find(|info| info.name == wanted || info.aliases.contains(&wanted.as_str()))
            .map(|info| info.language)
            .ok_or_else(|| SyntaxError::UnknownLanguage(s.to_string()))
    }
}

/// Detect a language from the file extension (case-insensitive).
pub fn detect(path: &Path) -> Option<ScriptingLanguage> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    LANGUAGES
        .iter()
        .find(|info| info.extensions.contains(&ext.as_str()))
        .map(|info| info.language)
}

pub fn detect_by_shebang(first_line: &str) -> Option<ScriptingLanguage> {
    let line = first_line.trim();
    if !line.starts_with("#!") {
        return None;
    }

    // Interpreter name from patterns like:
    //   #!/bin/sh
    //   #!/usr/bin/env bash
    //   #!/bin/bash -e
    //   #!/usr/bin/env -S bash -e
    let interpreter = line
        .rsplit('/')
        .next()
        .unwrap_or("")
        .split_whitespace()
        .next()
        .unwrap_or("");

    let prog = if interpreter == "env" {
        line.split_whitespace()
            .skip_while(|part| !part.ends_with("env"))
            .skip(1)
            .find(|part| !part.starts_with('-'))
            .unwrap_or("")
    } else {
        interpreter
    };

    LANGUAGES
        .iter()
        .find(|info| info.shebangs.contains(&prog))
        .map(|info| info.language)
}

#[cfg(test)]
#[path = "language_test.rs"]
mod tests;
