//! # Response Models
//!
//! Every gateway response goes through the same pipeline:
//!
//! ```text
//! body ──> Received ──check_result_code──> Received ──verify──> R
//!             │                  │                      │
//!     EmptyResponse /     ResultCode error      InvalidSignature
//!     InvalidSignature
//!     (missing field)
//! ```
//!
//! 1. An absent or empty body fails with `EmptyResponse`.
//! 2. `signature` is removed from the body; if missing, `InvalidSignature`.
//! 3. A non-zero `resultCode` fails with the matching `ResultCode` error.
//! 4. The remaining fields are deserialized into the typed response.
//! 5. The response's sign text is recomputed and verified against the
//!    removed signature.
//!
//! Step 3 runs before step 5: error responses are classified without being
//! authenticated. Only success responses are verified.

pub mod echo;
pub mod oneclick;
pub mod payment;
pub mod wallet;

use csob_core::{result_code, Signable};
use csob_crypto::GatewayKey;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::GatewayError;
use crate::sealed::Sealed;
use crate::wire::value_as_i64;

pub use echo::EchoResponse;
pub use oneclick::{OneClickEchoResponse, OneClickInitResponse, OneClickProcessResponse};
pub use payment::{
    PaymentCloseResponse, PaymentInitResponse, PaymentProcessResponse, PaymentRefundResponse,
    PaymentResponse, PaymentReverseResponse, PaymentStateResponse, PaymentStatusResponse,
};
pub use wallet::{
    ApplePayEchoResponse, ApplePayInitResponse, ApplePayProcessResponse, GooglePayEchoResponse,
    GooglePayInitResponse, GooglePayProcessResponse, WalletEchoResponse,
};

/// A typed, signed gateway response.
pub trait GatewayResponse: Signable + DeserializeOwned + Sealed {}

/// Wire key of the response signature.
pub const SIGNATURE_FIELD: &str = "signature";

/// A response body with its signature extracted but not yet verified.
#[derive(Debug, Clone)]
pub struct Received {
    endpoint: String,
    fields: Map<String, Value>,
    signature: String,
}

impl Received {
    /// Extract the signature from a response body.
    ///
    /// # Errors
    ///
    /// - `EmptyResponse` for an absent, `null`, or `{}` body.
    /// - `Serialization` for a body that is not a JSON object.
    /// - `InvalidSignature` when `signature` is missing or not a string.
    pub fn new(endpoint: &str, body: Option<Value>) -> Result<Self, GatewayError> {
        let mut fields = match body {
            None | Some(Value::Null) => {
                return Err(GatewayError::EmptyResponse {
                    endpoint: endpoint.to_string(),
                })
            }
            Some(Value::Object(map)) if map.is_empty() => {
                return Err(GatewayError::EmptyResponse {
                    endpoint: endpoint.to_string(),
                })
            }
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(GatewayError::serialization(
                    endpoint,
                    format!("expected a JSON object, got {}", describe(&other)),
                ))
            }
        };

        let signature = match fields.remove(SIGNATURE_FIELD) {
            Some(Value::String(sig)) => sig,
            Some(_) => {
                return Err(GatewayError::InvalidSignature {
                    endpoint: endpoint.to_string(),
                    reason: "signature field is not a string".into(),
                })
            }
            None => {
                return Err(GatewayError::InvalidSignature {
                    endpoint: endpoint.to_string(),
                    reason: "response has no signature".into(),
                })
            }
        };

        tracing::debug!(endpoint, "response received");
        Ok(Self {
            endpoint: endpoint.to_string(),
            fields,
            signature,
        })
    }

    /// The raw `resultCode`, from a JSON number or numeric string.
    pub fn result_code(&self) -> Result<i64, GatewayError> {
        self.fields
            .get("resultCode")
            .and_then(value_as_i64)
            .ok_or_else(|| GatewayError::serialization(&self.endpoint, "missing or non-numeric resultCode"))
    }

    pub fn result_message(&self) -> &str {
        self.fields
            .get("resultMessage")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Pass a zero result code through; reject anything else.
    pub fn check_result_code(self) -> Result<Self, GatewayError> {
        let code = self.result_code()?;
        if let Err(error) = result_code::check(code, self.result_message()) {
            tracing::warn!(
                endpoint = %self.endpoint,
                result_code = code,
                result_message = %error.message,
                "gateway rejected request"
            );
            return Err(GatewayError::ResultCode {
                endpoint: self.endpoint,
                error,
            });
        }
        Ok(self)
    }

    /// Build the typed response and verify its signature.
    pub fn verify<R: GatewayResponse>(self, key: &GatewayKey) -> Result<R, GatewayError> {
        let response: R = serde_json::from_value(Value::Object(self.fields))
            .map_err(|e| GatewayError::serialization(&self.endpoint, e))?;
        let text = response.sign_text();
        csob_crypto::verify(&self.signature, &text, key)
            .map_err(|e| GatewayError::crypto(&self.endpoint, e))?;
        tracing::debug!(endpoint = %self.endpoint, "response signature verified");
        Ok(response)
    }
}

/// Run the full pipeline on a response body.
pub fn parse<R: GatewayResponse>(
    endpoint: &str,
    body: Option<Value>,
    key: &GatewayKey,
) -> Result<R, GatewayError> {
    Received::new(endpoint, body)?.check_result_code()?.verify(key)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
