use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::language::{ScriptingLanguage, detect, detect_by_shebang};

/// User-supplied `--exclude` glob patterns, matched against paths relative
/// to the walk root.
#[derive(Default)]
pub struct ExcludeFilter {
    globs: Option<GlobSet>,
}

impl ExcludeFilter {
    pub fn new(patterns: &[String]) -> Result<Self, globset::Error> {
        if patterns.is_empty() {
            return Ok(Self::default());
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            globs: Some(builder.build()?),
        })
    }

    pub fn excludes(&self, path: &Path, root: &Path) -> bool {
        let Some(globs) = &self.globs else {
            return false;
        };
        let relative = path.strip_prefix(root).unwrap_or(path);
        globs.is_match(relative)
    }
}

/// Try to detect a language by reading the shebang line of a file.
pub fn try_detect_shebang(path: &Path) -> Option<ScriptingLanguage> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let mut first_line = String::new();
    reader.read_line(&mut first_line).ok()?;
    detect_by_shebang(&first_line)
}

/// Language for a file: explicit override, then extension, then shebang.
pub fn resolve_language(
    path: &Path,
    forced: Option<ScriptingLanguage>,
) -> Option<ScriptingLanguage> {
    forced
        .or_else(|| detect(path))
        .or_else(|| try_detect_shebang(path))
}

/// Build a directory walker that respects `.gitignore` and skips `.git`.
/// A file path yields just that file.
pub fn walk(path: &Path) -> ignore::Walk {
    WalkBuilder::new(path)
        .hidden(false)
        .follow_links(false)
        .filter_entry(|entry| {
            !(entry.file_type().is_some_and(|ft| ft.is_dir()) && entry.file_name() == ".git")
        })
        .build()
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
