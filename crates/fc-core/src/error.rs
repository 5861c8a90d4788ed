//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert them into
//! `CoreError` via `From` impls or keep them separate and wrap `CoreError`
//! as one variant.  Both patterns are acceptable; prefer whichever keeps
//! error sites clean.
//!
//! Nothing in this framework treats an error as fatal: a mis-configured or
//! target-less agent degrades to idling, which is an acceptable mode for a
//! game AI system.  Errors exist so hosts can log and diagnose, not so they
//! can crash.

use thiserror::Error;

use crate::{AgentId, StateId};

/// The top-level error type for `fc-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("state {0} not found")]
    StateNotFound(StateId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `fc-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
