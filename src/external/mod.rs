//! External tool abstractions
//!
//! Trait-based access to the programs this crate shells out to, so that the
//! git layer can be exercised without touching a real repository.

pub mod command;
#[cfg(test)]
pub mod scripted;

pub use command::{CommandError, CommandExecutor, CommandOutput, ProcessCommandExecutor};
