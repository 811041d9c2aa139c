//! Command dispatch
//!
//! Resolves the repository, routes a request to one of the per-command
//! handlers and wraps the outcome in an [`OperationResult`].

pub mod dispatcher;
pub mod envelope;
pub mod handlers;
pub mod request;

pub use dispatcher::{Capabilities, CommandDispatcher, DispatchError};
pub use envelope::OperationResult;
pub use request::{BranchAction, CommandContext, CommandRequest, ContextOverrides, RequestInput};
