//! Google Pay and Apple Pay requests.
//!
//! Both wallets expose the same three operations under their own endpoint
//! prefix. The request types are generic over a [`Wallet`] marker so each
//! operation is written once; use the aliases ([`GooglePayInit`],
//! [`ApplePayEcho`], ...) in application code.

use std::marker::PhantomData;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use csob_core::{field, optional, validate, SignValue, ValidationError};
use serde::Serialize;

use crate::models::{
    Currency, CustomerData, Fingerprint, Language, MerchantData, OrderData, ReturnMethod,
};
use crate::response::{
    ApplePayEchoResponse, GatewayResponse, GooglePayEchoResponse, PaymentStateResponse,
};
use crate::sealed::Sealed;
use crate::transport::HttpMethod;

use super::{check_pay_id, nested, RequestBody, RequestHeader};

/// Endpoint set of one wallet provider.
pub trait Wallet: Sealed + Send + Sync + 'static {
    const ECHO: &'static str;
    const INIT: &'static str;
    const PROCESS: &'static str;
    /// Response of the echo endpoint, carrying provider-specific init params.
    type EchoResponse: GatewayResponse;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GooglePay;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplePay;

impl Sealed for GooglePay {}
impl Sealed for ApplePay {}

impl Wallet for GooglePay {
    const ECHO: &'static str = "googlepay/echo";
    const INIT: &'static str = "googlepay/init";
    const PROCESS: &'static str = "googlepay/process";
    type EchoResponse = GooglePayEchoResponse;
}

impl Wallet for ApplePay {
    const ECHO: &'static str = "applepay/echo";
    const INIT: &'static str = "applepay/init";
    const PROCESS: &'static str = "applepay/process";
    type EchoResponse = ApplePayEchoResponse;
}

/// Fetch the wallet's merchant configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(bound = "")]
pub struct WalletEcho<W> {
    #[serde(skip)]
    wallet: PhantomData<W>,
}

impl<W> WalletEcho<W> {
    pub fn new() -> Self {
        Self { wallet: PhantomData }
    }
}

impl<W: Wallet> Sealed for WalletEcho<W> {}

impl<W: Wallet> RequestBody for WalletEcho<W> {
    const ENDPOINT: &'static str = W::ECHO;
    const METHOD: HttpMethod = HttpMethod::Post;
    type Response = W::EchoResponse;

    fn sign_fields(&self, header: &RequestHeader) -> Vec<Option<SignValue>> {
        vec![field(&header.merchant_id), field(header.dttm_wire())]
    }
}

/// Payment fields shared by both wallets' init calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInitData {
    order_no: String,
    client_ip: String,
    total_amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    close_payment: Option<bool>,
    payload: String,
    return_url: String,
    return_method: ReturnMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer: Option<CustomerData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<OrderData>,
    sdk_used: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_data: Option<MerchantData>,
    language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    ttl_sec: Option<u32>,
}

impl WalletInitData {
    /// `payload` is the token JSON returned by the wallet's JS/SDK, as-is.
    /// It is base64-encoded here.
    pub fn new(
        order_no: impl Into<String>,
        client_ip: impl Into<String>,
        total_amount: u64,
        payload: &str,
        return_url: impl Into<String>,
    ) -> Self {
        Self {
            order_no: order_no.into(),
            client_ip: client_ip.into(),
            total_amount,
            currency: None,
            close_payment: None,
            payload: STANDARD.encode(payload.as_bytes()),
            return_url: return_url.into(),
            return_method: ReturnMethod::Post,
            customer: None,
            order: None,
            sdk_used: false,
            merchant_data: None,
            language: Language::Cs,
            ttl_sec: None,
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn with_close_payment(mut self, close: bool) -> Self {
        self.close_payment = Some(close);
        self
    }

    pub fn with_return_method(mut self, method: ReturnMethod) -> Self {
        self.return_method = method;
        self
    }

    pub fn with_customer(mut self, customer: CustomerData) -> Self {
        self.customer = Some(customer);
        self
    }

    pub fn with_order(mut self, order: OrderData) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_sdk_used(mut self, sdk_used: bool) -> Self {
        self.sdk_used = sdk_used;
        self
    }

    pub fn with_merchant_data(mut self, data: MerchantData) -> Self {
        self.merchant_data = Some(data);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_ttl_sec(mut self, ttl_sec: u32) -> Self {
        self.ttl_sec = Some(ttl_sec);
        self
    }

    /// The base64-encoded wallet payload as sent.
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// Create a payment from a wallet token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound = "")]
pub struct WalletInit<W> {
    #[serde(flatten)]
    data: WalletInitData,
    #[serde(skip)]
    wallet: PhantomData<W>,
}

impl<W> WalletInit<W> {
    pub fn new(data: WalletInitData) -> Self {
        Self {
            data,
            wallet: PhantomData,
        }
    }

    pub fn data(&self) -> &WalletInitData {
        &self.data
    }
}

impl<W: Wallet> Sealed for WalletInit<W> {}

impl<W: Wallet> RequestBody for WalletInit<W> {
    const ENDPOINT: &'static str = W::INIT;
    const METHOD: HttpMethod = HttpMethod::Post;
    type Response = PaymentStateResponse;

    fn validate(&self) -> Result<(), ValidationError> {
        let d = &self.data;
        validate::non_empty_max_chars("orderNo", &d.order_no, 10)?;
        validate::non_empty_max_chars("clientIp", &d.client_ip, 45)?;
        validate::non_empty_max_chars("returnUrl", &d.return_url, 300)?;
        validate::optional(d.ttl_sec, |ttl| validate::in_range("ttlSec", ttl, 300, 1800))
    }

    fn sign_fields(&self, header: &RequestHeader) -> Vec<Option<SignValue>> {
        let d = &self.data;
        vec![
            field(&header.merchant_id),
            field(&d.order_no),
            field(header.dttm_wire()),
            field(&d.client_ip),
            field(d.total_amount),
            optional(d.currency),
            optional(d.close_payment),
            field(&d.payload),
            field(&d.return_url),
            field(d.return_method),
            nested(d.customer.as_ref()),
            nested(d.order.as_ref()),
            field(d.sdk_used),
            optional(d.merchant_data.as_ref()),
            field(d.language),
            optional(d.ttl_sec),
        ]
    }
}

/// Authorize a wallet payment, optionally with 3-D Secure fingerprint data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct WalletProcess<W> {
    pay_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fingerprint: Option<Fingerprint>,
    #[serde(skip)]
    wallet: PhantomData<W>,
}

impl<W> WalletProcess<W> {
    pub fn new(pay_id: impl Into<String>, fingerprint: Option<Fingerprint>) -> Self {
        Self {
            pay_id: pay_id.into(),
            fingerprint,
            wallet: PhantomData,
        }
    }
}

impl<W: Wallet> Sealed for WalletProcess<W> {}

impl<W: Wallet> RequestBody for WalletProcess<W> {
    const ENDPOINT: &'static str = W::PROCESS;
    const METHOD: HttpMethod = HttpMethod::Post;
    type Response = PaymentStateResponse;

    fn validate(&self) -> Result<(), ValidationError> {
        check_pay_id("payId", &self.pay_id)
    }

    fn sign_fields(&self, header: &RequestHeader) -> Vec<Option<SignValue>> {
        vec![
            field(&header.merchant_id),
            field(&self.pay_id),
            field(header.dttm_wire()),
            nested(self.fingerprint.as_ref()),
        ]
    }
}

pub type GooglePayEcho = WalletEcho<GooglePay>;
pub type GooglePayInit = WalletInit<GooglePay>;
pub type GooglePayProcess = WalletProcess<GooglePay>;
pub type ApplePayEcho = WalletEcho<ApplePay>;
pub type ApplePayInit = WalletInit<ApplePay>;
pub type ApplePayProcess = WalletProcess<ApplePay>;

#[cfg(test)]
mod tests {
    use super::super::Request;
    use super::*;
    use csob_core::{Dttm, Signable};
    use csob_crypto::MerchantKey;

    const MERCHANT_KEY: &str = include_str!("../../../../testdata/keys/merchant.key");

    fn dttm() -> Dttm {
        Dttm::parse("20240919164156").unwrap()
    }

    fn data() -> WalletInitData {
        WalletInitData::new("ORDER3", "10.0.0.1", 1500, "{\"token\":1}", "https://shop.example/r")
    }

    #[test]
    fn endpoints_follow_wallet_marker() {
        assert_eq!(GooglePayEcho::ENDPOINT, "googlepay/echo");
        assert_eq!(GooglePayInit::ENDPOINT, "googlepay/init");
        assert_eq!(ApplePayProcess::ENDPOINT, "applepay/process");
        assert_eq!(ApplePayInit::ENDPOINT, "applepay/init");
    }

    #[test]
    fn echo_body_is_header_only() {
        let key = MerchantKey::from_pem(MERCHANT_KEY).unwrap();
        let req = Request::new("M1", dttm(), ApplePayEcho::new()).unwrap();
        assert_eq!(req.sign_text().as_str(), "M1|20240919164156");
        let wire = req.to_wire_body(&key).unwrap();
        let mut keys: Vec<&str> = wire.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["dttm", "merchantId", "signature"]);
    }

    #[test]
    fn init_encodes_payload_and_signs_in_order() {
        let body = GooglePayInit::new(data().with_currency(Currency::Czk).with_close_payment(true));
        assert_eq!(body.data().payload(), "eyJ0b2tlbiI6MX0=");

        let req = Request::new("M1", dttm(), body).unwrap();
        assert_eq!(
            req.sign_text().as_str(),
            "M1|ORDER3|20240919164156|10.0.0.1|1500|CZK|true|eyJ0b2tlbiI6MX0=|\
             https://shop.example/r|POST|false|cs"
        );

        let key = MerchantKey::from_pem(MERCHANT_KEY).unwrap();
        let wire = req.to_wire_body(&key).unwrap();
        assert_eq!(wire["payload"], "eyJ0b2tlbiI6MX0=");
        assert_eq!(wire["clientIp"], "10.0.0.1");
        assert_eq!(wire["sdkUsed"], false);
    }

    #[test]
    fn apple_and_google_init_share_sign_text() {
        let google = Request::new("M1", dttm(), GooglePayInit::new(data())).unwrap();
        let apple = Request::new("M1", dttm(), ApplePayInit::new(data())).unwrap();
        assert_eq!(google.sign_text(), apple.sign_text());
    }

    #[test]
    fn init_requires_client_ip() {
        let body = GooglePayInit::new(WalletInitData::new("ORDER3", "", 1500, "{}", "https://x"));
        let err = Request::new("M1", dttm(), body).unwrap_err();
        assert_eq!(err.field, "clientIp");
    }

    #[test]
    fn process_sign_text() {
        let req = Request::new("M1", dttm(), GooglePayProcess::new("pid", None)).unwrap();
        assert_eq!(req.sign_text().as_str(), "M1|pid|20240919164156");
    }
}
