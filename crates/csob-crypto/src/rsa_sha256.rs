//! # RSA-SHA256 Signing and Verification
//!
//! Requests are signed with the merchant key and responses verified with the
//! gateway key, both using RSASSA-PKCS1-v1_5 over a SHA-256 digest. The
//! signature travels base64-encoded in the `signature` JSON field, or
//! base64 and then percent-encoded as the last path segment of GET URLs.
//!
//! ## Security Invariant
//!
//! - Signing and verification accept only `&SignText`; raw bytes cannot be
//!   signed.
//! - Malformed base64 and cryptographic mismatch both surface as
//!   `CryptoError::InvalidSignature`, never as a panic or a bare `bool`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use csob_core::error::CryptoError;
use csob_core::SignText;
use rsa::pkcs1v15;
use rsa::signature::{SignatureEncoding, Signer, Verifier};

use crate::key::{GatewayKey, MerchantKey};

/// Raw RSA signature bytes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Signature(Vec<u8>);

impl Signature {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Standard base64 with padding, as carried in JSON bodies.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    /// Decode a base64 signature.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidSignature` for malformed base64.
    pub fn from_base64(encoded: &str) -> Result<Self, CryptoError> {
        STANDARD
            .decode(encoded.trim())
            .map(Self)
            .map_err(|e| CryptoError::InvalidSignature(format!("failed to decode base64: {e}")))
    }

    /// Base64 then percent-encoded, for URL path segments.
    pub fn to_url_encoded(&self) -> String {
        urlencoding::encode(&self.to_base64()).into_owned()
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let b64 = self.to_base64();
        let prefix: String = b64.chars().take(12).collect();
        write!(f, "Signature({prefix}...)")
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl MerchantKey {
    /// Sign `payload` with RSA PKCS#1 v1.5 over SHA-256.
    ///
    /// PKCS#1 v1.5 is deterministic: the same key and payload always give
    /// the same signature.
    pub fn sign(&self, payload: &SignText) -> Result<Signature, CryptoError> {
        let signature: pkcs1v15::Signature = self
            .signing_key()
            .try_sign(payload.as_bytes())
            .map_err(|e| CryptoError::KeyError(format!("signing failed: {e}")))?;
        Ok(Signature(signature.to_vec()))
    }
}

impl GatewayKey {
    /// Verify `signature` over `payload`.
    pub fn verify(&self, signature: &Signature, payload: &SignText) -> Result<(), CryptoError> {
        let signature = pkcs1v15::Signature::try_from(signature.as_bytes())
            .map_err(|e| CryptoError::InvalidSignature(format!("malformed signature: {e}")))?;
        self.verifying_key()
            .verify(payload.as_bytes(), &signature)
            .map_err(|_| CryptoError::InvalidSignature("Invalid signature".into()))
    }
}

/// Sign `payload` with a PEM private key and return the base64 signature.
///
/// # Errors
///
/// Returns `CryptoError::KeyError` if the key cannot be parsed.
pub fn sign(payload: &SignText, private_key_pem: &str) -> Result<String, CryptoError> {
    let key = MerchantKey::from_pem(private_key_pem)?;
    Ok(key.sign(payload)?.to_base64())
}

/// Verify a base64 `signature` over `payload` against the gateway key.
///
/// # Errors
///
/// Returns `CryptoError::InvalidSignature` if the signature is not valid
/// base64 or does not match.
pub fn verify(signature: &str, payload: &SignText, key: &GatewayKey) -> Result<(), CryptoError> {
    let signature = Signature::from_base64(signature)?;
    key.verify(&signature, payload)
}
