//! Error types for pointview

use thiserror::Error;

/// Main error type for pointview operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Visualization error: {0}")]
    Visualization(String),

    #[error("Viewer is no longer running")]
    ViewerClosed,
}

/// Result type alias for pointview operations
pub type Result<T> = std::result::Result<T, Error>;
