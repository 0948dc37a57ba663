//! Git repository access.

pub mod repository;

pub use repository::GitRepository;
