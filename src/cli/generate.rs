//! Generate command: writes the built-in rules to a file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{write_config_file, Format};
use crate::data::RuleSet;

/// Generate command options.
#[derive(Parser)]
pub struct GenerateCommand {
    /// Output file; JSON when it ends in `.json`, YAML otherwise.
    #[arg(value_name = "PATH", default_value = ".cx.yaml")]
    pub path: PathBuf,
}

impl GenerateCommand {
    /// Executes the generate command.
    pub fn execute(self) -> Result<()> {
        let output = std::path::absolute(&self.path)
            .with_context(|| format!("Invalid output path: {}", self.path.display()))?;
        eprintln!("output: {}", output.display());
        write_rule_file(&output, &RuleSet::default())
    }
}

/// Writes `rules` to `path` in the format its extension names.
pub fn write_rule_file(path: &Path, rules: &RuleSet) -> Result<()> {
    let format = match Format::from_path(path) {
        Some(Format::Json) => Format::Json,
        _ => Format::Yaml,
    };
    write_config_file(path, rules, format)
        .with_context(|| format!("Failed to write rule file: {}", path.display()))
}
