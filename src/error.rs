use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    #[error("Geodata integrity error: {0}")]
    DataIntegrity(String),

    #[error("Overpass API error: {0}")]
    OverpassApi(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
