//! Prompt sequence and commit message assembly.

use chrono::Utc;
use tracing::debug;

use crate::compose::completion::{Completer, FuzzyCompleter, PrefixCompleter, Suggestion};
use crate::compose::console::Console;
use crate::compose::emoji::EmojiResolver;
use crate::compose::template::{self, HeaderFields};
use crate::config::{persist_scope_history, LoadedScopes};
use crate::data::RuleSet;
use crate::error::{CxError, Result, TypeRejection};

/// Footer prefix for breaking changes.
pub const BREAKING_CHANGE_PREFIX: &str = "BREAKING CHANGE: ";

/// Answers collected for one commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitDraft {
    /// Commit type, possibly ad-lib or empty.
    pub commit_type: String,
    /// Scope, possibly empty.
    pub scope: String,
    /// Short description.
    pub description: String,
    /// Body lines joined by `\n`.
    pub body: String,
    /// Breaking change text, empty when none.
    pub breaking_change: String,
}

/// Checks a submitted commit type against the rules.
pub fn validate_type(rules: &RuleSet, input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        if rules.deny_empty_type {
            return Err(CxError::ValidationRejected(TypeRejection::Empty));
        }
        return Ok(String::new());
    }
    if rules.deny_adlib_type && rules.commit_type(input).is_none() {
        return Err(CxError::ValidationRejected(TypeRejection::Adlib(
            input.to_string(),
        )));
    }
    Ok(input.to_string())
}

/// Joins header, body and breaking-change footer.
pub fn assemble_message(header: &str, draft: &CommitDraft) -> String {
    let mut message = header.to_string();
    if !draft.body.is_empty() {
        message.push_str("\n\n");
        message.push_str(&draft.body);
    }
    if !draft.breaking_change.is_empty() {
        message.push('\n');
        message.push_str(BREAKING_CHANGE_PREFIX);
        message.push_str(&draft.breaking_change);
    }
    message
}

/// Drives the prompts for one commit and renders the message.
pub struct MessageComposer<'a> {
    rules: &'a RuleSet,
    emoji: &'a dyn EmojiResolver,
}

impl<'a> MessageComposer<'a> {
    /// Creates a composer for `rules`.
    pub fn new(rules: &'a RuleSet, emoji: &'a dyn EmojiResolver) -> Self {
        Self { rules, emoji }
    }

    /// Runs every prompt, records the scope, and returns the message.
    pub fn compose(&self, console: &mut dyn Console, scopes: &mut LoadedScopes) -> Result<String> {
        let draft = self.collect_draft(console, scopes)?;
        self.record_scope(console, scopes, &draft.scope);
        Ok(self.render_message(console, &draft))
    }

    /// Runs the prompt sequence.
    pub fn collect_draft(
        &self,
        console: &mut dyn Console,
        scopes: &LoadedScopes,
    ) -> Result<CommitDraft> {
        let commit_type = self.prompt_type(console)?;
        let scope = self.prompt_scope(console, scopes)?;
        let description = self.prompt_description(console)?;
        let body = collect_body(console)?;
        let breaking_change = self.prompt_breaking_change(console)?;

        let draft = CommitDraft {
            commit_type,
            scope,
            description,
            body,
            breaking_change,
        };
        debug!(?draft, "Collected commit draft");
        Ok(draft)
    }

    /// Renders the header and appends body and footer.
    pub fn render_message(&self, console: &mut dyn Console, draft: &CommitDraft) -> String {
        let header = self.render_header(console, draft);
        assemble_message(&header, draft)
    }

    /// Renders the header, falling back to the fixed layout on template errors.
    pub fn render_header(&self, console: &mut dyn Console, draft: &CommitDraft) -> String {
        let fields = self.header_fields(draft);
        match template::render(&self.rules.header_format, &fields) {
            Ok(header) => header,
            Err(e) => {
                console.warn(&e.to_string());
                fields.fallback_header()
            }
        }
    }

    /// Template values for `draft`.
    pub fn header_fields(&self, draft: &CommitDraft) -> HeaderFields {
        let shortcode = self.emoji_of(&draft.commit_type);
        let glyph = self.emoji.emojize(shortcode);
        HeaderFields::new(
            &draft.commit_type,
            &draft.scope,
            &draft.description,
            &draft.breaking_change,
            shortcode,
            &glyph,
        )
    }

    /// Records a non-empty scope and writes the history back when allowed.
    pub fn record_scope(&self, console: &mut dyn Console, scopes: &mut LoadedScopes, scope: &str) {
        if scope.is_empty() {
            return;
        }
        scopes.history.touch(scope, Utc::now());

        let Some(path) = scopes.write_back.as_deref() else {
            debug!("No writable scope history; not persisting");
            return;
        };
        if let Err(e) = persist_scope_history(&scopes.history, path) {
            console.warn(&format!("WARNING: {e}"));
        }
    }

    fn emoji_of(&self, commit_type: &str) -> &str {
        self.rules
            .commit_type(commit_type)
            .map_or("", |ct| ct.emoji.as_str())
    }

    fn type_suggestions(&self) -> Vec<Suggestion> {
        self.rules
            .selectable_types()
            .map(|(key, ct)| {
                let glyph = self.emoji.emojize(&ct.emoji);
                Suggestion::new(key.clone(), format!("{}{}", glyph.trim(), ct.description))
            })
            .collect()
    }

    fn prompt_type(&self, console: &mut dyn Console) -> Result<String> {
        let completer = FuzzyCompleter::new(self.type_suggestions());
        loop {
            let Some(input) = console.read_line("Type: ", &completer)? else {
                return Err(CxError::Aborted);
            };
            match validate_type(self.rules, &input) {
                Ok(commit_type) => return Ok(commit_type),
                Err(CxError::ValidationRejected(rejection)) => console.warn(&rejection.to_string()),
                Err(e) => return Err(e),
            }
        }
    }

    fn prompt_scope(&self, console: &mut dyn Console, scopes: &LoadedScopes) -> Result<String> {
        let suggestions = scopes
            .history
            .scopes()
            .into_iter()
            .map(|scope| Suggestion::new(scope, ""))
            .collect();
        let completer = PrefixCompleter::new(suggestions);
        let scope = console.read_line("Scope: ", &completer)?.unwrap_or_default();
        Ok(scope.trim().to_string())
    }

    fn prompt_description(&self, console: &mut dyn Console) -> Result<String> {
        let input = console
            .read_line("Description: ", &PrefixCompleter::default())?
            .unwrap_or_default();
        let description = input.trim().to_string();
        if description.is_empty() {
            console.warn("description required");
        }
        Ok(description)
    }

    fn prompt_breaking_change(&self, console: &mut dyn Console) -> Result<String> {
        if !self.rules.use_breaking_change {
            return Ok(String::new());
        }
        let input = console
            .read_line(BREAKING_CHANGE_PREFIX, &PrefixCompleter::default())?
            .unwrap_or_default();
        Ok(input.trim().to_string())
    }
}

/// Reads body lines until two consecutive blank lines or end of input.
pub fn collect_body(console: &mut dyn Console) -> Result<String> {
    console.notice("Body: (Enter 2 empty lines to finish)");

    let none: &dyn Completer = &PrefixCompleter::default();
    let mut lines: Vec<String> = Vec::new();
    let mut prev_empty = false;
    while let Some(line) = console.read_line("", none)? {
        let line = line.trim();
        if line.is_empty() {
            if prev_empty {
                break;
            }
            prev_empty = true;
        } else {
            prev_empty = false;
        }
        if line.is_empty() && lines.is_empty() {
            continue;
        }
        lines.push(line.to_string());
    }

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    Ok(lines.join("\n"))
}
