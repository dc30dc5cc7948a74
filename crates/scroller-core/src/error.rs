use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Region not found: {0}")]
    RegionNotFound(String),

    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Coordinate not computed for region: {0}")]
    MissingCoordinate(String),

    #[error("Invalid resize state: {0:?}")]
    InvalidResizeState(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
