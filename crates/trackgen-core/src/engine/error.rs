use super::config::ConfigError;
use crate::core::io::cmake::RegistryError;
use crate::core::kinematics::KinematicsError;
use std::error::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Kinematics error: {0}")]
    Kinematics(#[from] KinematicsError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write deck '{name}': {source}")]
    Deck {
        name: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    #[error("Test registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Internal logic error: {0}")]
    Internal(String),
}
