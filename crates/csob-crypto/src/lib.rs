//! # csob-crypto: request signing for the CSOB gateway SDK
//!
//! - [`KeySource`]: where PEM key text comes from (file or memory).
//! - [`MerchantKey`] / [`GatewayKey`]: parsed RSA private/public keys.
//! - [`Signature`]: raw signature bytes with base64 and URL encodings.
//! - [`sign`] / [`verify`]: RSA-SHA256 PKCS#1 v1.5 over a `SignText`.
//!
//! ## Crate Policy
//!
//! - Depends only on `csob-core` internally.
//! - Every signed payload is a `csob_core::SignText`.
//! - No key material in `Debug` output or logs.

pub mod key;
pub mod rsa_sha256;

pub use csob_core::error::CryptoError;
pub use key::{GatewayKey, KeySource, MerchantKey};
pub use rsa_sha256::{sign, verify, Signature};
