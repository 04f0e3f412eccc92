//! Error types for cicd-core

use std::path::PathBuf;

/// Result type for cicd-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving options or touching the service description
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An `envVars` entry did not have exactly one key
    #[error("envVars entry {index} must have exactly one key, found {keys:?}")]
    MalformedEnvVar { index: usize, keys: Vec<String> },

    /// An `envVars` value was a list or mapping
    #[error("envVars entry '{name}' must have a scalar value")]
    InvalidEnvVarValue { name: String },

    /// The `custom.cicd` block could not be read
    #[error("Invalid cicd options: {message}")]
    InvalidOptions { message: String },

    /// The service description is not a mapping or is otherwise unusable
    #[error("Invalid service description: {message}")]
    InvalidServiceDescription { message: String },

    /// The service description has no `service` name
    #[error("Service description does not declare a service name")]
    MissingServiceName,

    /// The service description file has an extension we cannot parse
    #[error("Unsupported service description format: {path}")]
    UnsupportedFormat { path: PathBuf },

    // Transparent wrappers for underlying crate errors
    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
