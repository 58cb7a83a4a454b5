mod cli;
mod dups;
mod language;
mod report_helpers;
mod syntax;
mod util;
mod validation;
mod walk;

use std::error::Error;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use syntax::SyntaxConfig;
use walk::ExcludeFilter;

/// Log to stderr so JSON on stdout stays parseable. `RUST_LOG` wins over
/// the `--verbose` default.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Dups {
            path,
            language,
            report,
            exclude,
            syntax: args,
        } => {
            let target = path.unwrap_or_else(|| PathBuf::from("."));
            let provider = SyntaxConfig::load_optional(args.syntax_config.as_deref())?;
            let filter = ExcludeFilter::new(&exclude)?;
            dups::run(&target, language, &provider, &filter, report, args.json)
        }
        Commands::Syntax {
            language,
            syntax: args,
        } => {
            let provider = SyntaxConfig::load_optional(args.syntax_config.as_deref())?;
            syntax::report::run(language, &provider, args.json)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "scriptguard", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = dispatch(cli.command) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
