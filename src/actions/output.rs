//! Step outputs and workflow-command annotations
//!
//! Outputs go to the file named by `GITHUB_OUTPUT`; log groups and failure
//! annotations are workflow commands printed to stdout, which the Actions log
//! renderer folds and highlights.

use std::io::Write;
use std::path::Path;

use tracing::error;
use uuid::Uuid;

use super::ActionsError;

/// Record a step output for later workflow steps.
pub fn set_output(name: &str, value: &str) -> Result<(), ActionsError> {
    let path = std::env::var("GITHUB_OUTPUT").map_err(|_| ActionsError::MissingEnv {
        name: "GITHUB_OUTPUT".to_string(),
    })?;
    write_output(Path::new(&path), name, value)
}

fn write_output(path: &Path, name: &str, value: &str) -> Result<(), ActionsError> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    if value.contains('\n') {
        // Multiline values need the heredoc form with a collision-free delimiter
        let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
        writeln!(file, "{name}<<{delimiter}")?;
        writeln!(file, "{value}")?;
        writeln!(file, "{delimiter}")?;
    } else {
        writeln!(file, "{name}={value}")?;
    }

    Ok(())
}

/// Open a collapsible group in the Actions log.
pub fn start_group(name: &str) {
    println!("::group::{name}");
}

/// Close the current log group.
pub fn end_group() {
    println!("::endgroup::");
}

/// Mark the run as failed with an error annotation. Does not exit.
pub fn set_failed(message: &str) {
    error!("{message}");
    println!("::error::{message}");
}
