use thiserror::Error;

use fc_core::StateId;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("a state named '{0}' is already registered")]
    DuplicateName(String),

    #[error("state {0} is not registered")]
    UnknownState(StateId),
}

pub type StateResult<T> = Result<T, StateError>;
