//! Layered lookup of rule and scope-history files.
//!
//! Priority, first existing and parseable file wins:
//! 1. explicit override path from git config (`[cx] rule` / `[cx] scopes`)
//! 2. `{repository root}/{stem}.{ext}`
//! 3. `$XDG_CONFIG_HOME/git-cx/{stem}.{ext}`
//! 4. `{executable dir}/{stem}.{ext}`

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::codec::{decode_any, Format};
use crate::config::{APP_NAME, RULE_FILE_STEM, SCOPES_FILE_STEM};
use crate::data::{RuleSet, ScopeHistory};
use crate::error::{CxError, Result};

/// Which configuration file is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    /// Commit type rules.
    Rule,
    /// Scope history.
    ScopeHistory,
}

impl ConfigKind {
    /// File name without extension.
    pub fn stem(self) -> &'static str {
        match self {
            Self::Rule => RULE_FILE_STEM,
            Self::ScopeHistory => SCOPES_FILE_STEM,
        }
    }

    /// Formats probed for this kind, preferred first.
    pub fn codecs(self) -> &'static [Format] {
        match self {
            Self::Rule => &[Format::Yaml, Format::Json],
            Self::ScopeHistory => &[Format::Json, Format::Yaml],
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Rule => "rule file",
            Self::ScopeHistory => "scope history",
        }
    }

    /// Candidate file names inside a search directory.
    fn file_names(self) -> Vec<String> {
        let stem = self.stem();
        let mut names: Vec<String> = self
            .codecs()
            .iter()
            .flat_map(|format| format.extensions())
            .map(|ext| format!("{stem}.{ext}"))
            .collect();
        names.push(stem.to_string());
        names
    }
}

/// A search tier of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigTier {
    /// Path named in git config.
    ExplicitOverride,
    /// Repository working-tree root.
    RepositoryRoot,
    /// Per-user configuration directory.
    UserConfigDir,
    /// Directory of the running executable.
    ExecutableDir,
}

impl ConfigTier {
    /// Only project-level tiers receive scope-history write-backs.
    pub fn is_writable(self) -> bool {
        matches!(self, Self::ExplicitOverride | Self::RepositoryRoot)
    }
}

impl fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExplicitOverride => write!(f, "Git config"),
            Self::RepositoryRoot => write!(f, "Repository"),
            Self::UserConfigDir => write!(f, "User config"),
            Self::ExecutableDir => write!(f, "Executable dir"),
        }
    }
}

/// Where a configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    /// Tier that produced the file.
    pub tier: ConfigTier,
    /// Path of the file.
    pub path: PathBuf,
}

impl fmt::Display for ConfigLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.tier, self.path.display())
    }
}

/// A decoded file and its location.
#[derive(Debug)]
pub struct Resolved<T> {
    /// Decoded content.
    pub value: T,
    /// Where it was read from.
    pub location: ConfigLocation,
}

/// Outcome of a load, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from a file.
    Found(ConfigLocation),
    /// Built-in default used; `fallback` names the lowest-priority location.
    Default {
        /// Display-only expected path.
        fallback: Option<PathBuf>,
    },
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(location) => write!(f, "{location}"),
            Self::Default {
                fallback: Some(path),
            } => write!(f, "(not found) {}", path.display()),
            Self::Default { fallback: None } => write!(f, "(not found)"),
        }
    }
}

/// Rules plus where they came from.
#[derive(Debug)]
pub struct LoadedRules {
    /// Rules to compose with.
    pub rules: RuleSet,
    /// Source used.
    pub source: ConfigSource,
}

/// Scope history plus its write-back target.
#[derive(Debug)]
pub struct LoadedScopes {
    /// Remembered scopes.
    pub history: ScopeHistory,
    /// File to overwrite after use; `None` for read-only tiers or defaults.
    pub write_back: Option<PathBuf>,
    /// Source used.
    pub source: ConfigSource,
}

/// Repository facts needed by the resolver, threaded explicitly.
#[derive(Debug, Clone, Default)]
pub struct RepoContext {
    /// Working-tree root.
    pub root: Option<PathBuf>,
    /// Rule file named in git config, relative to `root`.
    pub rule_override: Option<String>,
    /// Scope-history file named in git config, relative to `root`.
    pub scopes_override: Option<String>,
}

impl RepoContext {
    /// Absolute override path for `kind`, if configured.
    pub fn override_path(&self, kind: ConfigKind) -> Option<PathBuf> {
        let configured = match kind {
            ConfigKind::Rule => self.rule_override.as_deref(),
            ConfigKind::ScopeHistory => self.scopes_override.as_deref(),
        }?;
        Some(self.root.as_ref()?.join(configured))
    }
}

/// Returns the XDG-style config directory for git-cx.
///
/// `$XDG_CONFIG_HOME/git-cx/` when set, otherwise `$HOME/.config/git-cx/`.
pub fn xdg_config_dir() -> Option<PathBuf> {
    if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_home.is_empty() {
            return Some(PathBuf::from(xdg_home).join(APP_NAME));
        }
    }

    dirs::home_dir().map(|home| home.join(".config").join(APP_NAME))
}

/// Locates configuration files through the tier cascade.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    root_dir: Option<PathBuf>,
    user_config_dir: Option<PathBuf>,
    executable_dir: Option<PathBuf>,
}

impl ConfigResolver {
    /// Creates a resolver with explicit search directories.
    pub fn new(
        root_dir: Option<PathBuf>,
        user_config_dir: Option<PathBuf>,
        executable_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            root_dir,
            user_config_dir,
            executable_dir,
        }
    }

    /// Creates a resolver for `context` using the user and executable
    /// directories of this process.
    pub fn for_context(context: &RepoContext) -> Self {
        let executable_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        Self::new(context.root.clone(), xdg_config_dir(), executable_dir)
    }

    /// Finds and decodes the highest-priority file for `kind`.
    ///
    /// Returns `Ok(None)` when no tier has a usable file. A file whose
    /// extension selects a format but fails to decode ends the search
    /// with [`CxError::ConfigParse`].
    pub fn resolve<T: DeserializeOwned>(
        &self,
        kind: ConfigKind,
        explicit: Option<&Path>,
    ) -> Result<Option<Resolved<T>>> {
        for (tier, path) in self.candidates(kind, explicit) {
            match load_candidate(kind, &path) {
                Ok(value) => {
                    debug!(tier = %tier, path = %path.display(), "Resolved {}", kind.label());
                    return Ok(Some(Resolved {
                        value,
                        location: ConfigLocation { tier, path },
                    }));
                }
                Err(CxError::ConfigNotFound { path, .. }) => {
                    debug!(tier = %tier, path = %path.display(), "No {} here", kind.label());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    /// Display-only location in the lowest-priority tier.
    pub fn fallback_path(&self, kind: ConfigKind) -> Option<PathBuf> {
        let ext = kind.codecs().first()?.extensions().first()?;
        self.executable_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.{ext}", kind.stem())))
    }

    /// Loads rules, falling back to the built-in set.
    pub fn load_rule_set(&self, explicit: Option<&Path>) -> LoadedRules {
        match self.resolve::<RuleSet>(ConfigKind::Rule, explicit) {
            Ok(Some(found)) => LoadedRules {
                rules: found.value,
                source: ConfigSource::Found(found.location),
            },
            Ok(None) => LoadedRules {
                rules: RuleSet::default(),
                source: self.default_source(ConfigKind::Rule),
            },
            Err(e) => {
                warn!("{e}; using default rules");
                LoadedRules {
                    rules: RuleSet::default(),
                    source: self.default_source(ConfigKind::Rule),
                }
            }
        }
    }

    /// Loads scope history; only project-level tiers get a write-back path.
    ///
    /// A configured override that does not exist yet is still the write-back
    /// target, so the first recorded scope creates it.
    pub fn load_scope_history(&self, explicit: Option<&Path>) -> LoadedScopes {
        match self.resolve::<ScopeHistory>(ConfigKind::ScopeHistory, explicit) {
            Ok(Some(found)) => LoadedScopes {
                history: found.value,
                write_back: found
                    .location
                    .tier
                    .is_writable()
                    .then(|| found.location.path.clone()),
                source: ConfigSource::Found(found.location),
            },
            Ok(None) => LoadedScopes {
                history: ScopeHistory::new(),
                write_back: explicit.map(Path::to_path_buf),
                source: self.default_source(ConfigKind::ScopeHistory),
            },
            Err(e) => {
                warn!("{e}; scope history disabled for this run");
                LoadedScopes {
                    history: ScopeHistory::new(),
                    write_back: None,
                    source: self.default_source(ConfigKind::ScopeHistory),
                }
            }
        }
    }

    fn default_source(&self, kind: ConfigKind) -> ConfigSource {
        ConfigSource::Default {
            fallback: self.fallback_path(kind),
        }
    }

    fn candidates(&self, kind: ConfigKind, explicit: Option<&Path>) -> Vec<(ConfigTier, PathBuf)> {
        let mut candidates = Vec::new();
        if let Some(path) = explicit {
            candidates.push((ConfigTier::ExplicitOverride, path.to_path_buf()));
        }
        let dirs = [
            (ConfigTier::RepositoryRoot, &self.root_dir),
            (ConfigTier::UserConfigDir, &self.user_config_dir),
            (ConfigTier::ExecutableDir, &self.executable_dir),
        ];
        for (tier, dir) in dirs {
            if let Some(dir) = dir {
                for name in kind.file_names() {
                    candidates.push((tier, dir.join(name)));
                }
            }
        }
        candidates
    }
}

fn load_candidate<T: DeserializeOwned>(kind: ConfigKind, path: &Path) -> Result<T> {
    let not_found = || CxError::ConfigNotFound {
        kind: kind.label(),
        path: path.to_path_buf(),
    };

    if !path.is_file() {
        return Err(not_found());
    }
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Cannot read {} {}: {e}", kind.label(), path.display());
            return Err(not_found());
        }
    };

    // An empty scope file is an empty history.
    let content = if kind == ConfigKind::ScopeHistory && content.trim().is_empty() {
        "{}".to_string()
    } else {
        content
    };

    match Format::from_path(path) {
        Some(format) => format.decode(&content).map_err(|message| CxError::ConfigParse {
            path: path.to_path_buf(),
            format: format.name(),
            message,
        }),
        None => decode_any(kind.codecs(), &content)
            .map(|(value, _)| value)
            .ok_or_else(not_found),
    }
}

/// Writes `data` to `path`, choosing the format from the extension.
pub fn write_config_file<T: Serialize>(
    path: &Path,
    data: &T,
    default_format: Format,
) -> anyhow::Result<()> {
    let format = Format::from_path(path).unwrap_or(default_format);
    let content = format.encode(data)?;
    fs::write(path, content)?;
    Ok(())
}

/// Overwrites the scope-history file at `path` with `history`.
pub fn persist_scope_history(history: &ScopeHistory, path: &Path) -> Result<()> {
    let default_format = ConfigKind::ScopeHistory.codecs()[0];
    write_config_file(path, history, default_format).map_err(|e| CxError::PersistenceWrite {
        path: path.to_path_buf(),
        message: format!("{e:#}"),
    })?;
    debug!(path = %path.display(), scopes = history.len(), "Wrote scope history");
    Ok(())
}
