//! Interactive composition of a conventional commit message.

pub mod completion;
pub mod composer;
pub mod console;
pub mod emoji;
pub mod template;

pub use completion::{Completer, FuzzyCompleter, PrefixCompleter, Suggestion};
pub use composer::{assemble_message, collect_body, validate_type, CommitDraft, MessageComposer};
pub use console::{stdio_console, Console, LineConsole, TerminalConsole};
pub use emoji::{EmojiResolver, ShortcodeTable};
pub use template::HeaderFields;
