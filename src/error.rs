//! Error taxonomy for the audio processing pipeline

use thiserror::Error;

/// Result type used throughout the pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline error categories
///
/// Recoverable conditions (malformed insight JSON, empty transcript) are
/// absorbed inside the owning stage and never surface here. Everything that
/// does surface is caught once at the HTTP boundary and converted into the
/// single `{success: false, error}` response shape.
#[derive(Error, Debug)]
pub enum Error {
    /// Required input missing or rejected before any external call
    #[error("invalid input: {0}")]
    Validation(String),

    /// Required credential/endpoint missing at startup
    #[error("configuration error: {0}")]
    Config(String),

    /// An external service returned a non-success status or unparseable payload
    #[error("{service} service error: {message}")]
    Upstream {
        service: &'static str,
        message: String,
    },

    /// A store insert failed; names the entity so callers know how far the
    /// ordered write sequence got
    #[error("storage error writing {entity}: {source}")]
    Storage {
        entity: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// Anything uncaught, wrapped at the orchestrator boundary
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn upstream(service: &'static str, message: impl Into<String>) -> Self {
        Self::Upstream {
            service,
            message: message.into(),
        }
    }

    pub fn storage(entity: &'static str, source: sqlx::Error) -> Self {
        Self::Storage { entity, source }
    }
}
