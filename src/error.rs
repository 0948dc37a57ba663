//! Error types for rule resolution and message composition.

use std::path::PathBuf;

use thiserror::Error;

/// Why a commit type was refused by the type-selection loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRejection {
    /// Nothing was entered while `denyEmptyType` is set.
    Empty,
    /// The entered type is not a registry key while `denyAdlibType` is set.
    Adlib(String),
}

impl std::fmt::Display for TypeRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "type is required"),
            Self::Adlib(_) => write!(f, "ad-lib type is not allowed"),
        }
    }
}

/// Errors raised by the commit composition core.
#[derive(Error, Debug)]
pub enum CxError {
    /// No usable file at a search tier; the cascade moves on.
    #[error("no {kind} found at {path}")]
    ConfigNotFound {
        /// What was being looked for.
        kind: &'static str,
        /// The candidate path that was probed.
        path: PathBuf,
    },

    /// A candidate matched a format by extension but failed to decode.
    #[error("failed to parse {path} as {format}: {message}")]
    ConfigParse {
        /// The file that failed to decode.
        path: PathBuf,
        /// Name of the format selected by the extension.
        format: &'static str,
        /// Decoder error message.
        message: String,
    },

    /// The header template could not be rendered.
    #[error("{reason}: {template:?}")]
    TemplateRender {
        /// The offending template text.
        template: String,
        /// What went wrong.
        reason: String,
    },

    /// Scope history could not be written back.
    #[error("write scopes: {path}: {message}")]
    PersistenceWrite {
        /// The write-back target.
        path: PathBuf,
        /// Underlying failure.
        message: String,
    },

    /// Input refused by the type-selection loop.
    #[error("{0}")]
    ValidationRejected(TypeRejection),

    /// The user ended input before a required answer was given.
    #[error("input aborted")]
    Aborted,

    /// Terminal or file I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias for the composition core.
pub type Result<T> = std::result::Result<T, CxError>;
