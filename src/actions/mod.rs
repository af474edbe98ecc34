//! GitHub Actions runtime plumbing
//!
//! Everything the workflow runtime provides or consumes: the event payload,
//! the repository slug, step outputs, and workflow-command log annotations.

pub mod context;
pub mod output;

pub use context::{ActionContext, ActionsError, RepoSlug};
pub use output::{end_group, set_failed, set_output, start_group};
