//! Deppy CLI - vendor Go dependencies at pinned revisions

use anyhow::Result;
use clap::Parser;
use miette::{GraphicalReportHandler, GraphicalTheme};
use tracing_subscriber::EnvFilter;

use deppy::rewrite::ImportParseError;
use deppy::util::diagnostic::emit;
use deppy::util::Shell;
use deppy::ResolveError;

mod cli;
mod commands;

use cli::{Cli, Commands};

/// Options shared by every command.
pub struct GlobalOptions {
    pub shell: Shell,
}

fn main() {
    let cli = Cli::parse();
    let global_opts = GlobalOptions {
        shell: Shell::from_flags(cli.verbose, cli.no_color),
    };

    if let Err(e) = run(cli, &global_opts) {
        report(&e, &global_opts.shell);
        std::process::exit(1);
    }
}

fn run(cli: Cli, global_opts: &GlobalOptions) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("deppy=debug")
    } else {
        EnvFilter::new("deppy=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Save(args) => commands::save::execute(args, global_opts),
        Commands::Path => commands::path::execute(),
        Commands::Go(args) => commands::go::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

fn report(e: &anyhow::Error, shell: &Shell) {
    if let Some(err) = e.downcast_ref::<ResolveError>() {
        emit(&err.to_diagnostic(), shell.use_color());
        return;
    }

    if let Some(err) = e.downcast_ref::<ImportParseError>() {
        let mut out = String::new();
        let theme = if shell.use_color() {
            GraphicalTheme::unicode()
        } else {
            GraphicalTheme::unicode_nocolor()
        };
        let handler = GraphicalReportHandler::new_themed(theme);
        if handler.render_report(&mut out, err).is_ok() {
            eprint!("{}", out);
            return;
        }
    }

    eprintln!("error: {:#}", e);
}
