//! Commit type registry and formatting rules.

use serde::{Deserialize, Serialize};

use crate::data::OrderedMap;

/// Header template used when a rule file does not define one.
pub const DEFAULT_HEADER_FORMAT: &str =
    "{{.type}}{{.scope_with_parens}}{{.bang}}: {{.emoji_unicode}}{{.description}}";

/// Documentation string listing the template fields.
pub const DEFAULT_HEADER_FORMAT_HINT: &str =
    ".type, .scope, .scope_with_parens, .bang(if BREAKING CHANGE), .emoji, .emoji_unicode, .description";

/// Prefix marking a registry key as a comment.
pub const COMMENT_PREFIX: char = '#';

/// One commit type definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitType {
    /// Human-readable description shown next to the suggestion.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Emoji shortcode, e.g. `:sparkles:`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub emoji: String,
}

impl CommitType {
    /// Creates a commit type from a description and an emoji shortcode.
    pub fn new(description: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            emoji: emoji.into(),
        }
    }
}

/// Returns true for registry keys that only document the file.
pub fn is_comment_key(key: &str) -> bool {
    key.starts_with(COMMENT_PREFIX)
}

/// Commit message rules loaded from a rule file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    /// Template for the first line of the message.
    #[serde(default = "default_header_format")]
    pub header_format: String,
    /// Documentation only.
    #[serde(default)]
    pub header_format_hint: String,
    /// Commit types in display order.
    #[serde(default)]
    pub types: OrderedMap<String, CommitType>,
    /// Refuse an empty type.
    #[serde(default)]
    pub deny_empty_type: bool,
    /// Refuse types that are not registry keys.
    #[serde(default)]
    pub deny_adlib_type: bool,
    /// Ask for a BREAKING CHANGE footer.
    #[serde(default)]
    pub use_breaking_change: bool,
}

fn default_header_format() -> String {
    DEFAULT_HEADER_FORMAT.to_string()
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            header_format: default_header_format(),
            header_format_hint: DEFAULT_HEADER_FORMAT_HINT.to_string(),
            types: default_commit_types(),
            deny_empty_type: false,
            deny_adlib_type: false,
            use_breaking_change: false,
        }
    }
}

impl RuleSet {
    /// Looks up a selectable commit type. Comment keys never match.
    pub fn commit_type(&self, key: &str) -> Option<&CommitType> {
        if is_comment_key(key) {
            return None;
        }
        self.types.get(key)
    }

    /// Types offered as suggestions: no comments, no empty descriptions.
    pub fn selectable_types(&self) -> impl Iterator<Item = (&String, &CommitType)> {
        self.types
            .iter()
            .filter(|(key, ct)| !is_comment_key(key) && !ct.description.is_empty())
    }
}

/// The built-in registry, following the commitizen conventional commit types.
pub fn default_commit_types() -> OrderedMap<String, CommitType> {
    [
        ("# comment1", "comment starts with #", ""),
        (
            "# comment2",
            "This default definition is from https://github.com/commitizen/conventional-commit-types/blob/master/index.json",
            "",
        ),
        ("feat", "A new feature", ":sparkles:"),
        ("fix", "A bug fix", ":bug:"),
        ("docs", "Documentation only changes", ":memo:"),
        (
            "style",
            "Changes that do not affect the meaning of the code",
            ":gem:",
        ),
        (
            "refactor",
            "A code change that neither fixes a bug nor adds a feature",
            ":recycle:",
        ),
        ("perf", "A code change that improves performance", ":zap:"),
        (
            "test",
            "Adding missing tests or correcting existing tests",
            ":test_tube:",
        ),
        (
            "build",
            "Changes that affect the build system or external dependencies",
            ":package:",
        ),
        (
            "ci",
            "Changes to our CI configuration files and scripts",
            ":hammer:",
        ),
        ("chore", "Other changes that don't modify src or test files", ""),
        ("revert", "Reverts a previous commit", ":rewind:"),
    ]
    .into_iter()
    .map(|(key, desc, emoji)| (key.to_string(), CommitType::new(desc, emoji)))
    .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_order() {
        let rules = RuleSet::default();
        let keys: Vec<&str> = rules.types.keys().map(String::as_str).collect();
        assert_eq!(keys[0], "# comment1");
        assert_eq!(keys[2], "feat");
        assert_eq!(keys.last(), Some(&"revert"));
    }

    #[test]
    fn selectable_skips_comments_and_empty_descriptions() {
        let mut rules = RuleSet::default();
        rules.types.insert("wip".to_string(), CommitType::default());
        let keys: Vec<&str> = rules.selectable_types().map(|(k, _)| k.as_str()).collect();
        assert!(!keys.iter().any(|k| k.starts_with('#')));
        assert!(!keys.contains(&"wip"));
        assert_eq!(keys.first(), Some(&"feat"));
    }

    #[test]
    fn comment_keys_are_not_commit_types() {
        let rules = RuleSet::default();
        assert!(rules.commit_type("# comment1").is_none());
        assert_eq!(rules.commit_type("fix").map(|t| t.emoji.as_str()), Some(":bug:"));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let rules: RuleSet = serde_json::from_str(r#"{"denyAdlibType": true}"#).unwrap();
        assert!(rules.deny_adlib_type);
        assert!(!rules.deny_empty_type);
        assert!(rules.types.is_empty());
        assert_eq!(rules.header_format, DEFAULT_HEADER_FORMAT);
    }

    #[test]
    fn yaml_rule_file() {
        let yaml = r#"
headerFormat: "{{.type}}: {{.description}}"
types:
  fix:
    description: A bug fix
  feat:
    description: A new feature
    emoji: ":sparkles:"
useBreakingChange: true
"#;
        let rules: RuleSet = serde_yaml::from_str(yaml).unwrap();
        let keys: Vec<&str> = rules.types.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["fix", "feat"]);
        assert_eq!(rules.types.get("fix").unwrap().emoji, "");
        assert!(rules.use_breaking_change);
    }

    #[test]
    fn empty_fields_are_omitted_on_write() {
        let json = serde_json::to_string(&CommitType::new("A bug fix", "")).unwrap();
        assert_eq!(json, r#"{"description":"A bug fix"}"#);
    }
}
