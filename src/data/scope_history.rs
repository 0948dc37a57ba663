//! Recently used scopes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Scope name → last time it was used.
///
/// Serializes most recent first; equal timestamps are ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeHistory {
    entries: HashMap<String, DateTime<Utc>>,
}

impl ScopeHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `scope` as used at `at`, replacing any earlier timestamp.
    pub fn touch(&mut self, scope: impl Into<String>, at: DateTime<Utc>) {
        self.entries.insert(scope.into(), at);
    }

    /// Last use of `scope`.
    pub fn last_used(&self, scope: &str) -> Option<DateTime<Utc>> {
        self.entries.get(scope).copied()
    }

    /// Entries most recent first.
    pub fn recent_first(&self) -> Vec<(&str, DateTime<Utc>)> {
        let mut list: Vec<(&str, DateTime<Utc>)> = self
            .entries
            .iter()
            .map(|(scope, at)| (scope.as_str(), *at))
            .collect();
        list.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        list
    }

    /// Scope names most recent first.
    pub fn scopes(&self) -> Vec<&str> {
        self.recent_first().into_iter().map(|(s, _)| s).collect()
    }

    /// Number of remembered scopes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no scope has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ScopeHistory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (scope, at) in self.recent_first() {
            map.serialize_entry(scope, &at.to_rfc3339())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ScopeHistory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Option::<HashMap<String, DateTime<Utc>>>::deserialize(deserializer)?;
        Ok(Self {
            entries: entries.unwrap_or_default(),
        })
    }
}
