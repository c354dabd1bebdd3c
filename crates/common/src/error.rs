use thiserror::Error;

#[derive(Error, Debug)]
pub enum WattboardError {
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    #[error("forecast unavailable: {0}")]
    ForecastUnavailable(String),

    #[error("unknown region: {0}")]
    UnknownRegion(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, WattboardError>;
