//! Cherry-pick core
//!
//! Split the way the rest of the codebase separates concerns: pure decision
//! logic (`resolver` classification and path parsing, `types`) apart from the
//! effectful orchestration (`orchestrator`).

pub mod orchestrator;
pub mod resolver;
pub mod types;

pub use orchestrator::{CherryPickOrchestrator, CherryPickRun};
pub use types::{
    CherryPickAttempt, CherryPickError, CherryPickOutcome, CherryPickRequest, PickState,
};
