//! # git-cx
//!
//! Interactive conventional commits with customizable commit types and a
//! per-repository scope history.
//!
//! ## Quick Start
//!
//! ```rust
//! use git_cx::compose::{template, HeaderFields};
//! use git_cx::data::RuleSet;
//!
//! let rules = RuleSet::default();
//! let fields = HeaderFields::new("feat", "hoge", "new feature hoge!", "", ":sparkles:", "✨");
//! let header = template::render(&rules.header_format, &fields).unwrap();
//! assert_eq!(header, "feat(hoge): ✨new feature hoge!");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod compose;
pub mod config;
pub mod data;
pub mod error;
pub mod git;

pub use crate::cli::Cli;
pub use crate::error::{CxError, Result};

/// The current version of git-cx.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
