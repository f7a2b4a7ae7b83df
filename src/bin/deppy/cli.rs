//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

/// Deppy - vendor Go dependencies at pinned revisions
#[derive(Parser)]
#[command(name = "deppy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save the current dependencies to Deps/Deps.json and copy their sources
    Save(SaveArgs),

    /// Print the vendor workspace path, for use in GOPATH
    Path,

    /// Run the go tool with the vendor workspace on GOPATH
    Go(GoArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct SaveArgs {
    /// Package patterns to save (defaults to the current directory)
    pub packages: Vec<String>,

    /// Rewrite imports of dependencies to their vendored paths
    #[arg(
        short = 'r',
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub rewrite: Option<bool>,

    /// Deprecated; sources are always copied
    #[arg(long, hide = true)]
    pub copy: bool,
}

#[derive(Args)]
pub struct GoArgs {
    /// Arguments passed to `go`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}
