//! Paths command: reports where configuration is loaded from.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{ConfigKind, ConfigResolver, RepoContext};
use crate::git::GitRepository;

/// Paths command options.
#[derive(Parser)]
pub struct PathsCommand {}

impl PathsCommand {
    /// Executes the paths command.
    pub fn execute(self) -> Result<()> {
        let context = GitRepository::open()
            .map(|repo| repo.context())
            .unwrap_or_default();
        let resolver = ConfigResolver::for_context(&context);

        let stdout = std::io::stdout();
        report_paths(&resolver, &context, &mut stdout.lock())
    }
}

/// Writes one line per configuration file with the source it resolved to.
pub fn report_paths(
    resolver: &ConfigResolver,
    context: &RepoContext,
    out: &mut dyn Write,
) -> Result<()> {
    let rules = resolver.load_rule_set(context.override_path(ConfigKind::Rule).as_deref());
    let scopes =
        resolver.load_scope_history(context.override_path(ConfigKind::ScopeHistory).as_deref());

    writeln!(out, "rule:   {}", rules.source).context("Failed to write output")?;
    writeln!(out, "scopes: {}", scopes.source).context("Failed to write output")?;
    let written = match scopes.write_back {
        Some(path) => writeln!(out, "        updated at {}", path.display()),
        None => writeln!(out, "        not updated"),
    };
    written.context("Failed to write output")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reports_found_and_fallback_sources() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("repo");
        let exe = tmp.path().join("bin");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&exe).unwrap();
        fs::write(root.join(".cx.yaml"), "denyAdlibType: true\n").unwrap();

        let context = RepoContext {
            root: Some(root.clone()),
            ..RepoContext::default()
        };
        let resolver = ConfigResolver::new(Some(root.clone()), None, Some(exe.clone()));

        let mut out = Vec::new();
        report_paths(&resolver, &context, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains(&format!("rule:   Repository: {}", root.join(".cx.yaml").display())));
        assert!(text.contains(&format!(
            "scopes: (not found) {}",
            exe.join(".scope-history.json").display()
        )));
        assert!(text.contains("not updated"));
    }
}
