//! Responses of the `payment/*` endpoints.

use csob_core::{field, optional, SignValue, Signable};
use serde::Deserialize;

use crate::models::PaymentStatus;
use crate::sealed::Sealed;
use crate::wire::lenient_i64;

use super::GatewayResponse;

/// `payment/init` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitResponse {
    pub pay_id: String,
    pub dttm: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    pub result_code: i64,
    pub result_message: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub customer_code: Option<String>,
    pub status_detail: Option<String>,
}

impl Signable for PaymentInitResponse {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            field(&self.pay_id),
            optional(self.dttm.as_ref()),
            field(self.result_code),
            optional(self.result_message.as_ref()),
            optional(self.payment_status),
            optional(self.customer_code.as_ref()),
            optional(self.status_detail.as_ref()),
        ]
    }
}

/// Payment state after a status query, reverse, close, or refund.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub pay_id: String,
    pub dttm: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    pub result_code: i64,
    pub result_message: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    /// Authorization code from the card issuer.
    pub auth_code: Option<String>,
    pub status_detail: Option<String>,
}

impl Signable for PaymentResponse {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            field(&self.pay_id),
            optional(self.dttm.as_ref()),
            field(self.result_code),
            optional(self.result_message.as_ref()),
            optional(self.payment_status),
            optional(self.auth_code.as_ref()),
            optional(self.status_detail.as_ref()),
        ]
    }
}

pub type PaymentStatusResponse = PaymentResponse;
pub type PaymentReverseResponse = PaymentResponse;
pub type PaymentCloseResponse = PaymentResponse;
pub type PaymentRefundResponse = PaymentResponse;

/// Parameters the gateway appends to the merchant's return URL.
///
/// Delivered as form fields (POST) or query parameters (GET), so every value
/// arrives as a string. `merchantData` stays base64-encoded, as signed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProcessResponse {
    pub pay_id: String,
    pub dttm: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    pub result_code: i64,
    pub result_message: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub auth_code: Option<String>,
    pub merchant_data: Option<String>,
    pub status_detail: Option<String>,
}

impl PaymentProcessResponse {
    /// Decoded `merchantData`, if present.
    pub fn merchant_data_bytes(&self) -> Option<Result<Vec<u8>, csob_core::ValidationError>> {
        self.merchant_data
            .as_deref()
            .map(crate::models::MerchantData::decode)
    }
}

impl Signable for PaymentProcessResponse {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            field(&self.pay_id),
            optional(self.dttm.as_ref()),
            field(self.result_code),
            optional(self.result_message.as_ref()),
            optional(self.payment_status),
            optional(self.auth_code.as_ref()),
            optional(self.merchant_data.as_ref()),
            optional(self.status_detail.as_ref()),
        ]
    }
}

/// State of a payment created by a one-click or wallet init, or advanced by
/// the matching process call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStateResponse {
    pub pay_id: String,
    pub dttm: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    pub result_code: i64,
    pub result_message: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub status_detail: Option<String>,
}

impl Signable for PaymentStateResponse {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            field(&self.pay_id),
            optional(self.dttm.as_ref()),
            field(self.result_code),
            optional(self.result_message.as_ref()),
            optional(self.payment_status),
            optional(self.status_detail.as_ref()),
        ]
    }
}

impl Sealed for PaymentInitResponse {}
impl Sealed for PaymentResponse {}
impl Sealed for PaymentProcessResponse {}
impl Sealed for PaymentStateResponse {}
impl GatewayResponse for PaymentInitResponse {}
impl GatewayResponse for PaymentResponse {}
impl GatewayResponse for PaymentProcessResponse {}
impl GatewayResponse for PaymentStateResponse {}
