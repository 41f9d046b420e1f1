//! # Request Models
//!
//! One body type per gateway operation, each implementing the sealed
//! [`RequestBody`] trait. A body declares:
//!
//! - its endpoint path and HTTP method,
//! - the response model the gateway answers with,
//! - its sign text field order, as an explicit list literal,
//! - for GET endpoints, the path segments between merchant id and `dttm`.
//!
//! [`Request`] pairs a body with the [`RequestHeader`] (merchant id and
//! timestamp), validates it once at construction, and produces either the
//! signed JSON body (POST/PUT) or the signed URL path (GET).

pub mod echo;
pub mod oneclick;
pub mod payment;
pub mod wallet;

use csob_core::{Dttm, SignValue, Signable, ValidationError};
use csob_crypto::{MerchantKey, Signature};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::GatewayError;
use crate::sealed::Sealed;
use crate::response::GatewayResponse;
use crate::transport::HttpMethod;

pub use echo::Echo;
pub use oneclick::{OneClickEcho, OneClickInit, OneClickProcess};
pub use payment::{
    PaymentClose, PaymentInit, PaymentProcessUrl, PaymentRefund, PaymentReverse, PaymentStatusQuery,
};
pub use wallet::{
    ApplePay, ApplePayEcho, ApplePayInit, ApplePayProcess, GooglePay, GooglePayEcho, GooglePayInit,
    GooglePayProcess, Wallet, WalletEcho, WalletInit, WalletInitData, WalletProcess,
};

/// Merchant id and timestamp common to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeader {
    pub merchant_id: String,
    pub dttm: Dttm,
}

impl RequestHeader {
    /// Timestamp in wire form.
    pub fn dttm_wire(&self) -> String {
        self.dttm.to_wire()
    }
}

/// Operation-specific part of a gateway request.
pub trait RequestBody: Serialize + Sealed {
    const ENDPOINT: &'static str;
    const METHOD: HttpMethod;
    type Response: GatewayResponse;

    /// Field checks beyond what the body's constructors enforce.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Fields in the order the gateway signs them, header included.
    fn sign_fields(&self, header: &RequestHeader) -> Vec<Option<SignValue>>;

    /// GET path segments between the merchant id and the timestamp.
    fn path_segments(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// A validated request ready to be signed.
#[derive(Debug, Clone)]
pub struct Request<B> {
    header: RequestHeader,
    body: B,
}

impl<B: RequestBody> Request<B> {
    /// # Errors
    ///
    /// Fails with `ValidationError` for an empty merchant id or an invalid
    /// body. Nothing has been signed at this point.
    pub fn new(merchant_id: impl Into<String>, dttm: Dttm, body: B) -> Result<Self, ValidationError> {
        let merchant_id = merchant_id.into();
        if merchant_id.is_empty() {
            return Err(ValidationError::new("merchantId", "must not be empty"));
        }
        body.validate()?;
        Ok(Self {
            header: RequestHeader { merchant_id, dttm },
            body,
        })
    }

    pub fn endpoint(&self) -> &'static str {
        B::ENDPOINT
    }

    pub fn header(&self) -> &RequestHeader {
        &self.header
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    /// Sign this request's sign text.
    pub fn sign(&self, key: &MerchantKey) -> Result<Signature, GatewayError> {
        let text = self.sign_text();
        tracing::debug!(endpoint = B::ENDPOINT, sign_text_len = text.len(), "signing request");
        key.sign(&text).map_err(|e| GatewayError::crypto(B::ENDPOINT, e))
    }

    /// JSON body with wire keys and the `signature` field.
    pub fn to_wire_body(&self, key: &MerchantKey) -> Result<Value, GatewayError> {
        let mut map = match serde_json::to_value(&self.body)
            .map_err(|e| GatewayError::serialization(B::ENDPOINT, e))?
        {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(GatewayError::serialization(
                    B::ENDPOINT,
                    format!("request body must be an object, got {other}"),
                ))
            }
        };
        map.insert("merchantId".into(), Value::String(self.header.merchant_id.clone()));
        map.insert("dttm".into(), Value::String(self.header.dttm_wire()));
        map.insert("signature".into(), Value::String(self.sign(key)?.to_base64()));
        Ok(Value::Object(map))
    }

    /// `{endpoint}/{merchantId}/{segments..}/{dttm}/{urlEncodedSignature}`.
    pub fn to_path(&self, key: &MerchantKey) -> Result<String, GatewayError> {
        let signature = self.sign(key)?;
        let mut parts: Vec<String> = vec![B::ENDPOINT.to_string(), self.header.merchant_id.clone()];
        parts.extend(self.body.path_segments().into_iter().map(str::to_string));
        parts.push(self.header.dttm_wire());
        parts.push(signature.to_url_encoded());
        Ok(parts.join("/"))
    }
}

impl<B: RequestBody> Signable for Request<B> {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        self.body.sign_fields(&self.header)
    }
}

/// Sign text of an optional nested entity.
pub(crate) fn nested<T: Signable>(entity: Option<&T>) -> Option<SignValue> {
    entity.map(|e| SignValue::from(e.sign_text()))
}

/// Sign text of a present nested entity.
pub(crate) fn nested_required<T: Signable>(entity: &T) -> Option<SignValue> {
    Some(SignValue::from(entity.sign_text()))
}

/// Length checks on a pay id before it goes into a URL or sign text.
pub(crate) fn check_pay_id(field: &str, pay_id: &str) -> Result<(), ValidationError> {
    csob_core::validate::non_empty_max_chars(field, pay_id, 15)?;
    if pay_id.contains('/') {
        return Err(ValidationError::new(field, "must not contain '/'"));
    }
    Ok(())
}
