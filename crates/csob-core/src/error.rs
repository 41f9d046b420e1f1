//! # Error Types
//!
//! Errors raised by the foundational and cryptographic layers. Everything here uses
//! `thiserror` for `Display` and `Error`.

use thiserror::Error;

/// A field failed validation at construction time.
///
/// Raised before any signing happens, so invalid data is never signed or
/// sent to the gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    /// Wire name of the offending field.
    pub field: String,
    /// What was wrong with it.
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error in key handling, signing, or signature verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key material could not be read or parsed.
    #[error("key error: {0}")]
    KeyError(String),

    /// Signature was malformed or did not match the payload.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
}
