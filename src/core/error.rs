//! Error types for loading organ data and configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraumaError {
    #[error("Unknown organ prototype: {0}")]
    UnknownPrototype(String),

    #[error("Invalid data: {0}")]
    Validation(String),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TraumaError>;
