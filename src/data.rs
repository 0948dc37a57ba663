//! Rule and scope-history data models.

pub mod ordered_map;
pub mod rule;
pub mod scope_history;
pub mod yaml;

pub use ordered_map::OrderedMap;
pub use rule::{default_commit_types, is_comment_key, CommitType, RuleSet};
pub use scope_history::ScopeHistory;
pub use yaml::to_yaml;
