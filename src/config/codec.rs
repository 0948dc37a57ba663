//! File formats for rule and scope-history files.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::data::to_yaml;

/// A structured file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl Format {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
        }
    }

    /// File extensions handled by this format, preferred first.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Yaml => &["yaml", "yml"],
            Self::Json => &["json"],
        }
    }

    /// Picks the format matching the extension of `path`, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        [Self::Yaml, Self::Json].into_iter().find(|format| {
            format
                .extensions()
                .iter()
                .any(|e| e.eq_ignore_ascii_case(ext))
        })
    }

    /// Decodes `content`, returning the decoder message on failure.
    pub fn decode<T: DeserializeOwned>(self, content: &str) -> Result<T, String> {
        match self {
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// Decodes `content`, discarding the error.
    pub fn try_decode<T: DeserializeOwned>(self, content: &str) -> Option<T> {
        self.decode(content).ok()
    }

    /// Encodes `data` in this format.
    pub fn encode<T: Serialize>(self, data: &T) -> anyhow::Result<String> {
        match self {
            Self::Yaml => to_yaml(data),
            Self::Json => Ok(serde_json::to_string_pretty(data)?),
        }
    }
}

/// Decodes `content` with the first format in `codecs` that accepts it.
pub fn decode_any<T: DeserializeOwned>(codecs: &[Format], content: &str) -> Option<(T, Format)> {
    codecs
        .iter()
        .find_map(|format| format.try_decode(content).map(|value| (value, *format)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::data::RuleSet;

    #[test]
    fn format_by_extension() {
        assert_eq!(Format::from_path(&PathBuf::from(".cx.yaml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(&PathBuf::from("rules.YML")), Some(Format::Yaml));
        assert_eq!(Format::from_path(&PathBuf::from("a/.cx.json")), Some(Format::Json));
        assert_eq!(Format::from_path(&PathBuf::from(".cx")), None);
        assert_eq!(Format::from_path(&PathBuf::from("rules.toml")), None);
    }

    #[test]
    fn decode_any_tries_codecs_in_order() {
        let (rules, format): (RuleSet, Format) =
            decode_any(&[Format::Json, Format::Yaml], "denyEmptyType: true\n").unwrap();
        assert!(rules.deny_empty_type);
        assert_eq!(format, Format::Yaml);
    }

    #[test]
    fn decode_any_rejects_garbage() {
        let decoded: Option<(RuleSet, Format)> =
            decode_any(&[Format::Yaml, Format::Json], "types: [unterminated");
        assert!(decoded.is_none());
    }

    #[test]
    fn json_encoding_is_pretty() {
        let out = Format::Json.encode(&RuleSet::default()).unwrap();
        assert!(out.starts_with("{\n  \"headerFormat\""));
    }
}
