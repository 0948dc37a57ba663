//! Rule and scope-history file resolution.

pub mod codec;
pub mod resolver;

pub use codec::Format;
pub use resolver::{
    persist_scope_history, write_config_file, ConfigKind, ConfigLocation, ConfigResolver,
    ConfigSource, ConfigTier, LoadedRules, LoadedScopes, RepoContext,
};

/// Application name, used for the per-user config directory.
pub const APP_NAME: &str = "git-cx";

/// Rule file name without extension.
pub const RULE_FILE_STEM: &str = ".cx";

/// Scope-history file name without extension.
pub const SCOPES_FILE_STEM: &str = ".scope-history";

/// Git config section holding override paths.
pub const CONFIG_SECTION: &str = "cx";

/// Git config key for the rule file override.
pub const CONFIG_RULE_KEY: &str = "rule";

/// Git config key for the scope-history file override.
pub const CONFIG_SCOPES_KEY: &str = "scopes";
