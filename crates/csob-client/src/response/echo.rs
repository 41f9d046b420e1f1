//! `echo` connectivity check response.

use csob_core::{field, optional, SignValue, Signable};
use serde::Deserialize;

use crate::sealed::Sealed;
use crate::wire::lenient_i64;

use super::GatewayResponse;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoResponse {
    pub dttm: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    pub result_code: i64,
    pub result_message: Option<String>,
}

impl Signable for EchoResponse {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            optional(self.dttm.as_ref()),
            field(self.result_code),
            optional(self.result_message.as_ref()),
        ]
    }
}

impl Sealed for EchoResponse {}
impl GatewayResponse for EchoResponse {}
