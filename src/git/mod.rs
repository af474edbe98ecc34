//! Git command layer

pub mod runner;

pub use runner::{GitError, GitRunner};
