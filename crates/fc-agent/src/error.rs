use thiserror::Error;

use fc_core::StateId;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent has not been initialised")]
    NotInitialised,

    #[error("state {0} is not in the agent's registry")]
    UnknownState(StateId),
}

pub type AgentResult<T> = Result<T, AgentError>;
