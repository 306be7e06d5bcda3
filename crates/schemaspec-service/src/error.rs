//! Error types for the service registry

use schemaspec_core::ValidationError;
use thiserror::Error;

/// Errors raised when looking up or invoking service members
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The group has no member with that name
    #[error("Service '{service}' has no member named '{name}'")]
    UnknownMember { service: String, name: String },

    /// Raw input was given to a member that declares no request type
    #[error("Method '{method}' declares no request type")]
    MissingRequestType { method: String },

    /// Raw input did not satisfy the declared request type
    #[error("Invalid request for '{method}': {source}")]
    InvalidRequest {
        method: String,
        #[source]
        source: ValidationError,
    },

    /// The wrapped callable failed
    #[error("Method '{method}' failed: {source}")]
    Handler {
        method: String,
        #[source]
        source: anyhow::Error,
    },

    /// An HTTP verb this registry does not know
    #[error("Unsupported HTTP method '{method}'")]
    InvalidHttpMethod { method: String },
}

/// Convenience type alias for registry results
pub type Result<T> = std::result::Result<T, ServiceError>;
