//! Gateway client error types.
//!
//! [`GatewayError`] carries the endpoint each failure happened on.
//! [`GatewayError::kind()`] gives the category, so callers can branch
//! without matching on message text.

use csob_core::{CryptoError, ResultCode, ResultCodeError, ValidationError};

use crate::config::ConfigError;
use crate::transport::TransportError;

/// Failure category of a [`GatewayError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Key,
    InvalidSignature,
    EmptyResponse,
    ResultCode,
    TransportTimeout,
    Transport,
    Serialization,
    Config,
}

/// Errors from gateway calls.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// A request field failed validation before signing.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Key material could not be loaded or used.
    #[error("key error: {0}")]
    Key(String),

    /// The response signature was missing, malformed, or did not verify.
    #[error("invalid signature in response from {endpoint}: {reason}")]
    InvalidSignature { endpoint: String, reason: String },

    /// The gateway answered with no body.
    #[error("empty response from {endpoint}")]
    EmptyResponse { endpoint: String },

    /// The gateway answered with a non-zero `resultCode`.
    #[error("{endpoint} rejected: {error}")]
    ResultCode {
        endpoint: String,
        #[source]
        error: ResultCodeError,
    },

    /// The transport gave up waiting for a response.
    #[error("timeout calling {endpoint} after {elapsed_ms}ms")]
    Timeout { endpoint: String, elapsed_ms: u64 },

    /// Connection or protocol failure.
    #[error("transport error calling {endpoint}: {reason}")]
    Transport { endpoint: String, reason: String },

    /// The gateway returned a non-2xx HTTP status.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    HttpStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// A body could not be encoded or decoded.
    #[error("serialization error on {endpoint}: {reason}")]
    Serialization { endpoint: String, reason: String },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Key(_) => ErrorKind::Key,
            Self::InvalidSignature { .. } => ErrorKind::InvalidSignature,
            Self::EmptyResponse { .. } => ErrorKind::EmptyResponse,
            Self::ResultCode { .. } => ErrorKind::ResultCode,
            Self::Timeout { .. } => ErrorKind::TransportTimeout,
            Self::Transport { .. } | Self::HttpStatus { .. } => ErrorKind::Transport,
            Self::Serialization { .. } => ErrorKind::Serialization,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// The semantic result code, for gateway rejections.
    pub fn result_code(&self) -> Option<ResultCode> {
        match self {
            Self::ResultCode { error, .. } => Some(error.code),
            _ => None,
        }
    }

    pub(crate) fn crypto(endpoint: &str, err: CryptoError) -> Self {
        match err {
            CryptoError::KeyError(reason) => Self::Key(reason),
            CryptoError::InvalidSignature(reason) => Self::InvalidSignature {
                endpoint: endpoint.to_string(),
                reason,
            },
        }
    }

    pub(crate) fn transport(endpoint: &str, err: TransportError) -> Self {
        match err {
            TransportError::Timeout { elapsed_ms } => Self::Timeout {
                endpoint: endpoint.to_string(),
                elapsed_ms,
            },
            TransportError::Failed(reason) => Self::Transport {
                endpoint: endpoint.to_string(),
                reason,
            },
        }
    }

    pub(crate) fn serialization(endpoint: &str, reason: impl std::fmt::Display) -> Self {
        Self::Serialization {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }
}
