//! Engine error handling
//!
//! This module provides unified error handling for the service layer,
//! converting domain, validation and storage failures into one type the
//! UI layer can map onto messages.

use pawfit_shared::validation::collect_errors;
use pawfit_shared::CareError;
use thiserror::Error;
use tracing::error;

/// Service-layer error type
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Care(#[from] CareError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl EngineError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Validation(_) => "VALIDATION_ERROR",
            EngineError::NotFound(_) => "NOT_FOUND",
            EngineError::Care(err) => err.code(),
            EngineError::Storage(_) => "STORAGE_ERROR",
            EngineError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to the user
    pub fn user_message(&self) -> String {
        match self {
            EngineError::Validation(msg) | EngineError::NotFound(msg) => msg.clone(),
            EngineError::Care(err) => err.to_string(),
            EngineError::Storage(msg) => {
                error!("Storage error: {}", msg);
                "Could not save your progress".to_string()
            }
            EngineError::Internal(err) => {
                error!("Internal error: {:?}", err);
                "Something went wrong".to_string()
            }
        }
    }
}

impl From<validator::ValidationErrors> for EngineError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = collect_errors(&errors)
            .iter()
            .map(|e| e.user_message())
            .collect::<Vec<_>>()
            .join("; ");
        EngineError::Validation(message)
    }
}

/// Result type alias for services
pub type EngineResult<T> = Result<T, EngineError>;
