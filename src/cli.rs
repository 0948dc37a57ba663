//! CLI interface for git-cx.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commit;
pub mod generate;
pub mod paths;

pub use commit::CommitCommand;
pub use generate::GenerateCommand;
pub use paths::PathsCommand;

/// git-cx: conventional commits with customizable types and scope history.
#[derive(Parser)]
#[command(name = "git-cx")]
#[command(about = "Interactive conventional commit composer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Stages tracked files changed in the worktree before committing.
    #[arg(short, long)]
    pub all: bool,

    /// Prints the message to stdout instead of committing.
    #[arg(long)]
    pub debug: bool,

    /// Subcommand; composes a commit when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Writes the default rule file.
    #[command(alias = "gen")]
    Generate(GenerateCommand),
    /// Shows where the rule and scope-history files resolve from.
    Paths(PathsCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Some(Commands::Generate(generate_cmd)) => generate_cmd.execute(),
            Some(Commands::Paths(paths_cmd)) => paths_cmd.execute(),
            None => CommitCommand {
                all: self.all,
                debug: self.debug,
            }
            .execute(),
        }
    }
}
