//! Responses of the `googlepay/*` and `applepay/*` endpoints.

use csob_core::{field, optional, SignValue, Signable};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::models::{ApplePayInitParams, GooglePayInitParams};
use crate::sealed::Sealed;
use crate::wire::lenient_i64;

use super::payment::PaymentStateResponse;
use super::GatewayResponse;

/// Wallet echo: the parameters needed to render the wallet button.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "P: DeserializeOwned"))]
pub struct WalletEchoResponse<P> {
    pub dttm: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    pub result_code: i64,
    pub result_message: Option<String>,
    pub init_params: Option<P>,
}

impl<P: Signable> Signable for WalletEchoResponse<P> {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            self.init_params.as_ref().map(|p| SignValue::from(p.sign_text())),
            optional(self.dttm.as_ref()),
            field(self.result_code),
            optional(self.result_message.as_ref()),
        ]
    }
}

pub type GooglePayEchoResponse = WalletEchoResponse<GooglePayInitParams>;
pub type ApplePayEchoResponse = WalletEchoResponse<ApplePayInitParams>;

pub type GooglePayInitResponse = PaymentStateResponse;
pub type GooglePayProcessResponse = PaymentStateResponse;
pub type ApplePayInitResponse = PaymentStateResponse;
pub type ApplePayProcessResponse = PaymentStateResponse;

impl Sealed for GooglePayEchoResponse {}
impl Sealed for ApplePayEchoResponse {}
impl GatewayResponse for GooglePayEchoResponse {}
impl GatewayResponse for ApplePayEchoResponse {}
