//! Header template rendering.
//!
//! Templates use flat named placeholders, `{{.type}}` or `{{type}}`, with
//! optional whitespace inside the braces. Any other use of `{{` or `}}` is
//! a malformed template.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CxError, Result};

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*\.?([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").unwrap());

/// Field names available to header templates.
pub const FIELD_NAMES: [&str; 7] = [
    "type",
    "scope",
    "scope_with_parens",
    "bang",
    "emoji",
    "emoji_unicode",
    "description",
];

/// Values substituted into the header template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    /// Commit type.
    pub commit_type: String,
    /// Scope, possibly empty.
    pub scope: String,
    /// `(scope)`, or empty when there is no scope.
    pub scope_with_parens: String,
    /// `!` for breaking changes, otherwise empty.
    pub bang: String,
    /// Raw emoji shortcode.
    pub emoji: String,
    /// Resolved emoji glyph.
    pub emoji_unicode: String,
    /// Short description.
    pub description: String,
}

impl HeaderFields {
    /// Derives the computed fields from the commit parts.
    pub fn new(
        commit_type: &str,
        scope: &str,
        description: &str,
        breaking_change: &str,
        emoji: &str,
        emoji_unicode: &str,
    ) -> Self {
        let scope_with_parens = if scope.is_empty() {
            String::new()
        } else {
            format!("({scope})")
        };
        let bang = if breaking_change.is_empty() { "" } else { "!" };
        Self {
            commit_type: commit_type.to_string(),
            scope: scope.to_string(),
            scope_with_parens,
            bang: bang.to_string(),
            emoji: emoji.to_string(),
            emoji_unicode: emoji_unicode.trim().to_string(),
            description: description.to_string(),
        }
    }

    /// Value of a template field by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        let value = match name {
            "type" => &self.commit_type,
            "scope" => &self.scope,
            "scope_with_parens" => &self.scope_with_parens,
            "bang" => &self.bang,
            "emoji" => &self.emoji,
            "emoji_unicode" => &self.emoji_unicode,
            "description" => &self.description,
            _ => return None,
        };
        Some(value)
    }

    /// Header in the fixed layout used when the template is unusable.
    pub fn fallback_header(&self) -> String {
        format!(
            "{}{}{}: {}{}",
            self.commit_type, self.scope_with_parens, self.bang, self.emoji_unicode, self.description
        )
    }
}

/// Substitutes `fields` into `template`.
pub fn render(template: &str, fields: &HeaderFields) -> Result<String> {
    let error = |reason: String| CxError::TemplateRender {
        template: template.to_string(),
        reason,
    };

    let mut output = String::with_capacity(template.len());
    let mut last = 0;
    for caps in PLACEHOLDER_PATTERN.captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        push_literal(&mut output, &template[last..whole.start()]).map_err(error)?;
        let name = &caps[1];
        let value = fields
            .get(name)
            .ok_or_else(|| {
                error(format!(
                    "unknown field {name:?} (expected one of {})",
                    FIELD_NAMES.join(", ")
                ))
            })?;
        output.push_str(value);
        last = whole.end();
    }
    push_literal(&mut output, &template[last..]).map_err(error)?;

    Ok(output)
}

fn push_literal(output: &mut String, literal: &str) -> std::result::Result<(), String> {
    if literal.contains("{{") {
        return Err("malformed or unclosed placeholder".to_string());
    }
    if literal.contains("}}") {
        return Err("unexpected \"}}\"".to_string());
    }
    output.push_str(literal);
    Ok(())
}
