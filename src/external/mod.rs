//! External tool abstractions
//!
//! Trait-based abstraction over external command execution, enabling testable
//! code through dependency injection and mock implementations. The git layer
//! builds on this; pure decision logic lives in `cherry_pick`.

pub mod command;

pub use command::{CommandError, CommandExecutor, CommandOutput, ProcessCommandExecutor};
