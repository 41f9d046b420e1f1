//! `echo`: checks connectivity and that both sides' keys match.

use csob_core::{field, SignValue};
use serde::Serialize;

use crate::response::EchoResponse;
use crate::sealed::Sealed;
use crate::transport::HttpMethod;

use super::{RequestBody, RequestHeader};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Echo;

impl Sealed for Echo {}

impl RequestBody for Echo {
    const ENDPOINT: &'static str = "echo";
    const METHOD: HttpMethod = HttpMethod::Post;
    type Response = EchoResponse;

    fn sign_fields(&self, header: &RequestHeader) -> Vec<Option<SignValue>> {
        vec![field(&header.merchant_id), field(header.dttm_wire())]
    }
}

#[cfg(test)]
mod tests {
    use super::super::Request;
    use super::*;
    use csob_core::{Dttm, Signable};
    use csob_crypto::{GatewayKey, MerchantKey};

    const MERCHANT_KEY: &str = include_str!("../../../../testdata/keys/merchant.key");
    const MERCHANT_PUB: &str = include_str!("../../../../testdata/keys/merchant.pub");

    fn request() -> Request<Echo> {
        Request::new("M1", Dttm::parse("20240919164156").unwrap(), Echo).unwrap()
    }

    #[test]
    fn sign_text_is_merchant_and_timestamp() {
        assert_eq!(request().sign_text().as_str(), "M1|20240919164156");
    }

    #[test]
    fn wire_body_carries_header_and_verifiable_signature() {
        let key = MerchantKey::from_pem(MERCHANT_KEY).unwrap();
        let req = request();
        let body = req.to_wire_body(&key).unwrap();
        assert_eq!(body["merchantId"], "M1");
        assert_eq!(body["dttm"], "20240919164156");

        let signature = body["signature"].as_str().unwrap();
        let public = GatewayKey::from_pem(MERCHANT_PUB).unwrap();
        csob_crypto::verify(signature, &req.sign_text(), &public).unwrap();
    }

    #[test]
    fn empty_merchant_id_is_rejected_before_signing() {
        let err = Request::new("", Dttm::parse("20240919164156").unwrap(), Echo).unwrap_err();
        assert_eq!(err.field, "merchantId");
    }
}
