use thiserror::Error;

#[derive(Debug, Error)]
pub enum SteerError {
    #[error("steering configuration error: {0}")]
    Config(String),

    #[error("behaviour weighting must be >= 0, got {0}")]
    NegativeWeighting(f32),
}

pub type SteerResult<T> = Result<T, SteerError>;
