/// CLI argument definitions for the `scriptguard` command.
///
/// Defines all subcommands, their arguments, and long help text
/// using the `clap` derive macros.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::language::ScriptingLanguage;

/// Top-level CLI parser with a single subcommand selector.
#[derive(Parser)]
#[command(name = "scriptguard", version, about = "Validate generated scripts")]
pub struct Cli {
    /// Log debug details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by commands that resolve language syntax.
#[derive(Args)]
pub struct SyntaxArgs {
    /// TOML file overriding the built-in comment delimiters and common code parts
    #[arg(long, value_name = "FILE")]
    pub syntax_config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// All available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Flag lines that are duplicated within a script
    #[command(long_about = "\
Flag lines that are duplicated within a script.

Each script is checked on its own. A line is reported when its exact text
(case and whitespace included) appears on at least one other line of the
same script. Two kinds of lines never count:

  * comment lines: after leading whitespace the line starts with one of the
    language's comment delimiters (batchfile: REM, ::  shellscript: #)
  * boilerplate lines: every whitespace-separated token is a common code
    part of the language, e.g. `) else (` or `fi`. Blank lines fall here.

A single non-boilerplate token makes the whole line significant again.

Languages are detected from the extension (.bat/.cmd, .sh/.bash) or the
shebang line; use --language to force one. Files that are neither are
skipped.")]
    Dups {
        /// File or directory to analyze (default: current directory)
        path: Option<PathBuf>,

        /// Treat every file as this language (batchfile, shellscript)
        #[arg(short, long, value_parser = parse_language)]
        language: Option<ScriptingLanguage>,

        /// Show every flagged script line by line
        #[arg(short, long)]
        report: bool,

        /// Glob of paths to skip, relative to PATH (repeatable)
        #[arg(long, value_name = "GLOB")]
        exclude: Vec<String>,

        #[command(flatten)]
        syntax: SyntaxArgs,
    },

    /// Show the comment delimiters and common code parts in effect
    Syntax {
        /// Language to show (default: all)
        #[arg(value_parser = parse_language)]
        language: Option<ScriptingLanguage>,

        #[command(flatten)]
        syntax: SyntaxArgs,
    },

    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn parse_language(s: &str) -> Result<ScriptingLanguage, String> {
    s.parse().map_err(|e: crate::syntax::SyntaxError| e.to_string())
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
