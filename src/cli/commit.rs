//! Default command: compose a conventional commit and run `git commit`.

use anyhow::{Context, Result};
use tracing::debug;

use crate::compose::{stdio_console, Console, MessageComposer, ShortcodeTable};
use crate::config::{ConfigKind, ConfigResolver, RepoContext};
use crate::git::GitRepository;

/// Separator printed before the message in debug mode.
pub const DEBUG_SEPARATOR: &str = "----------";

/// Options for the default command.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitCommand {
    /// Stage tracked worktree changes first. Ignored with `debug`.
    pub all: bool,
    /// Print the message instead of committing.
    pub debug: bool,
}

impl CommitCommand {
    /// Executes the commit flow in the repository containing the current directory.
    pub fn execute(self) -> Result<()> {
        let repo = GitRepository::open()
            .context("Failed to open git repository. Make sure you're in a git repository.")?;

        if self.debug {
            let wd = std::env::current_dir().context("Failed to read working directory")?;
            eprintln!("{}", wd.display());
        }

        let context = repo.context();
        let resolver = ConfigResolver::for_context(&context);
        let mut console = stdio_console();

        let Some(message) = self.prepare_message(&repo, &context, &resolver, console.as_mut())?
        else {
            return Ok(());
        };

        if self.debug {
            println!("{DEBUG_SEPARATOR}");
            println!("{message}");
            return Ok(());
        }

        repo.commit_with_message(&message)
    }

    /// Stages and composes; `None` when there is nothing to commit.
    pub fn prepare_message(
        &self,
        repo: &GitRepository,
        context: &RepoContext,
        resolver: &ConfigResolver,
        console: &mut dyn Console,
    ) -> Result<Option<String>> {
        if self.all && !self.debug {
            let staged = repo.stage_tracked_changes()?;
            debug!(staged, "Staged tracked changes");
        }

        if !repo.has_staged_changes()? {
            console.notice("no changes");
            if !self.debug {
                return Ok(None);
            }
        }

        compose_message(context, resolver, console).map(Some)
    }
}

/// Loads rules and scope history for `context` and runs the prompts.
pub fn compose_message(
    context: &RepoContext,
    resolver: &ConfigResolver,
    console: &mut dyn Console,
) -> Result<String> {
    let rules = resolver.load_rule_set(context.override_path(ConfigKind::Rule).as_deref());
    debug!(source = %rules.source, "Loaded rules");

    let mut scopes =
        resolver.load_scope_history(context.override_path(ConfigKind::ScopeHistory).as_deref());
    debug!(source = %scopes.source, scopes = scopes.history.len(), "Loaded scope history");

    let composer = MessageComposer::new(&rules.rules, &ShortcodeTable);
    let message = composer.compose(console, &mut scopes)?;
    Ok(message)
}
