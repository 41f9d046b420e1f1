//! Responses of the `oneclick/*` endpoints.

use csob_core::{field, optional, SignValue, Signable};
use serde::Deserialize;

use crate::sealed::Sealed;
use crate::wire::lenient_i64;

use super::payment::PaymentStateResponse;
use super::GatewayResponse;

pub type OneClickInitResponse = PaymentStateResponse;
pub type OneClickProcessResponse = PaymentStateResponse;

/// `oneclick/echo`: whether a one-click template is still usable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneClickEchoResponse {
    /// The template payment id that was checked.
    pub orig_pay_id: String,
    pub dttm: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    pub result_code: i64,
    pub result_message: Option<String>,
}

impl Signable for OneClickEchoResponse {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            field(&self.orig_pay_id),
            optional(self.dttm.as_ref()),
            field(self.result_code),
            optional(self.result_message.as_ref()),
        ]
    }
}

impl Sealed for OneClickEchoResponse {}
impl GatewayResponse for OneClickEchoResponse {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn echo_sign_text_starts_with_template_id() {
        let resp: OneClickEchoResponse = serde_json::from_value(json!({
            "origPayId": "tmpl01",
            "dttm": "20240919164156",
            "resultCode": 0,
            "resultMessage": "OK"
        }))
        .unwrap();
        assert_eq!(resp.sign_text().as_str(), "tmpl01|20240919164156|0|OK");
    }

    #[test]
    fn init_response_sign_text() {
        let resp: OneClickInitResponse = serde_json::from_value(json!({
            "payId": "p1",
            "dttm": "20240919164156",
            "resultCode": 0,
            "resultMessage": "OK",
            "paymentStatus": 2,
            "statusDetail": "x"
        }))
        .unwrap();
        assert_eq!(resp.sign_text().as_str(), "p1|20240919164156|0|OK|2|x");
    }
}
