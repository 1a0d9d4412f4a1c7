//! Typed error handling for the dashboard
//!
//! # Error Categories
//!
//! - [`MutationError`]: the two outcomes a form mutation can fail with
//!   (field validation, persistence). These are shown to the user.
//! - [`AuthError`]: failures reported by an identity provider.
//! - [`ConfigError`]: configuration loading and validation.
//! - [`DashboardError`]: top-level error for handlers, with an HTTP mapping.
//!
//! # Example
//!
//! ```rust,ignore
//! match create_invoice(&store, &cache, &form).await {
//!     Ok(done) => Redirect::to(done.navigation.target().unwrap_or("/")),
//!     Err(MutationError::Validation { errors, message }) => rerender(errors, message),
//!     Err(MutationError::Persistence { message }) => rerender_with(message),
//! }
//! ```

use crate::core::validation::FieldErrors;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Mutation Errors
// =============================================================================

/// Why a create/update/delete did not happen
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// The form did not pass its schema; nothing was written
    #[error("{message}")]
    Validation { errors: FieldErrors, message: String },

    /// The store reported a failure; the cause is logged, not surfaced
    #[error("{message}")]
    Persistence { message: String },
}

impl MutationError {
    pub fn validation(errors: FieldErrors, action: &str, entity: &str) -> Self {
        MutationError::Validation {
            errors,
            message: format!("Missing Fields. Failed to {} {}.", action, entity),
        }
    }

    pub fn persistence(action: &str, entity: &str) -> Self {
        MutationError::Persistence {
            message: format!("Database Error: Failed to {} {}.", action, entity),
        }
    }

    /// Summary message shown above the form
    pub fn message(&self) -> &str {
        match self {
            MutationError::Validation { message, .. } | MutationError::Persistence { message } => {
                message
            }
        }
    }

    /// Per-field messages; persistence errors carry none
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            MutationError::Validation { errors, .. } => Some(errors),
            MutationError::Persistence { .. } => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            MutationError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            MutationError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            MutationError::Validation { .. } => "VALIDATION_ERROR",
            MutationError::Persistence { .. } => "PERSISTENCE_ERROR",
        }
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Failures an identity provider reports
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The submitted credentials were rejected
    #[error("credentials sign-in rejected")]
    CredentialsSignin,

    /// The account exists but may not sign in
    #[error("access denied")]
    AccessDenied,

    /// The provider is misconfigured
    #[error("auth provider misconfigured: {message}")]
    Configuration { message: String },
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::CredentialsSignin => "CredentialsSignin",
            AuthError::AccessDenied => "AccessDenied",
            AuthError::Configuration { .. } => "Configuration",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

// =============================================================================
// Dashboard Error
// =============================================================================

/// The main error type for request handling
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Storage failure outside of a mutation (reads)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Template rendering failed
    #[error("Render error: {0}")]
    Render(String),

    /// Record not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: String },

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DashboardError {
    pub fn not_found(entity_type: &str, id: &str) -> Self {
        DashboardError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    /// Wrap a storage port failure from a read query
    pub fn storage(err: anyhow::Error) -> Self {
        DashboardError::Storage(format!("{:#}", err))
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Mutation(e) => e.status_code(),
            DashboardError::NotFound { .. } => StatusCode::NOT_FOUND,
            DashboardError::Auth(AuthError::Configuration { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            DashboardError::Auth(_) => StatusCode::UNAUTHORIZED,
            DashboardError::Config(_)
            | DashboardError::Storage(_)
            | DashboardError::Render(_)
            | DashboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Mutation(e) => e.error_code(),
            DashboardError::Auth(e) => e.error_code(),
            DashboardError::Config(_) => "CONFIG_ERROR",
            DashboardError::Storage(_) => "STORAGE_ERROR",
            DashboardError::Render(_) => "RENDER_ERROR",
            DashboardError::NotFound { .. } => "NOT_FOUND",
            DashboardError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    ///
    /// Storage and internal causes are replaced by a generic message.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            DashboardError::Storage(_) | DashboardError::Internal(_) => {
                "Something went wrong.".to_string()
            }
            other => other.to_string(),
        };
        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DashboardError::Mutation(MutationError::Validation { errors, .. }) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            DashboardError::NotFound { entity_type, id } => Some(serde_json::json!({
                "entity_type": entity_type,
                "id": id
            })),
            _ => None,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        DashboardError::Internal(format!("{:#}", err))
    }
}

impl From<tera::Error> for DashboardError {
    fn from(err: tera::Error) -> Self {
        // tera keeps the useful part in the source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        DashboardError::Render(message)
    }
}

/// A specialized Result type for handlers
pub type DashboardResult<T> = Result<T, DashboardError>;
