//! `oneclick/*` requests: repeat a payment from a saved card template.

use csob_core::{field, optional, validate, SignValue, ValidationError};
use serde::Serialize;

use crate::models::{
    Currency, CustomerData, Fingerprint, Language, MerchantData, OrderData, PayMethod, ReturnMethod,
};
use crate::response::{OneClickEchoResponse, OneClickInitResponse, OneClickProcessResponse};
use crate::sealed::Sealed;
use crate::transport::HttpMethod;

use super::{check_pay_id, nested, RequestBody, RequestHeader};

/// `oneclick/init`: create a payment from the template `orig_pay_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OneClickInit {
    orig_pay_id: String,
    order_no: String,
    pay_method: PayMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    close_payment: Option<bool>,
    return_url: String,
    return_method: ReturnMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer: Option<CustomerData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<OrderData>,
    client_initiated: bool,
    sdk_used: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_data: Option<MerchantData>,
    language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    ttl_sec: Option<u32>,
}

impl OneClickInit {
    /// Customer-initiated card payment with POST return and Czech pages.
    pub fn new(
        orig_pay_id: impl Into<String>,
        order_no: impl Into<String>,
        return_url: impl Into<String>,
    ) -> Self {
        Self {
            orig_pay_id: orig_pay_id.into(),
            order_no: order_no.into(),
            pay_method: PayMethod::Card,
            client_ip: None,
            total_amount: None,
            currency: None,
            close_payment: None,
            return_url: return_url.into(),
            return_method: ReturnMethod::Post,
            customer: None,
            order: None,
            client_initiated: true,
            sdk_used: false,
            merchant_data: None,
            language: Language::Cs,
            ttl_sec: None,
        }
    }

    /// Amount in hundredths; `None` reuses the template's amount.
    pub fn with_amount(mut self, total_amount: u64, currency: Currency) -> Self {
        self.total_amount = Some(total_amount);
        self.currency = Some(currency);
        self
    }

    pub fn with_client_ip(mut self, ip: impl Into<String>) -> Self {
        self.client_ip = Some(ip.into());
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

    /// `false` marks a merchant-initiated (recurring) charge.
    pub fn with_client_initiated(mut self, client_initiated: bool) -> Self {
        self.client_initiated = client_initiated;
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
}

impl Sealed for OneClickInit {}

impl RequestBody for OneClickInit {
    const ENDPOINT: &'static str = "oneclick/init";
    const METHOD: HttpMethod = HttpMethod::Post;
    type Response = OneClickInitResponse;

    fn validate(&self) -> Result<(), ValidationError> {
        check_pay_id("origPayId", &self.orig_pay_id)?;
        validate::non_empty_max_chars("orderNo", &self.order_no, 10)?;
        validate::non_empty_max_chars("returnUrl", &self.return_url, 300)?;
        validate::optional(self.client_ip.as_deref(), |ip| validate::max_chars("clientIp", ip, 45))?;
        validate::optional(self.ttl_sec, |ttl| validate::in_range("ttlSec", ttl, 300, 1800))
    }

    fn sign_fields(&self, header: &RequestHeader) -> Vec<Option<SignValue>> {
        vec![
            field(&header.merchant_id),
            field(&self.orig_pay_id),
            field(&self.order_no),
            field(header.dttm_wire()),
            field(self.pay_method),
            optional(self.client_ip.as_ref()),
            optional(self.total_amount),
            optional(self.currency),
            optional(self.close_payment),
            field(&self.return_url),
            field(self.return_method),
            nested(self.customer.as_ref()),
            nested(self.order.as_ref()),
            field(self.client_initiated),
            field(self.sdk_used),
            optional(self.merchant_data.as_ref()),
            field(self.language),
            optional(self.ttl_sec),
        ]
    }
}

/// `oneclick/process`: authorize a payment created by `oneclick/init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OneClickProcess {
    pay_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fingerprint: Option<Fingerprint>,
}

impl OneClickProcess {
    pub fn new(pay_id: impl Into<String>, fingerprint: Option<Fingerprint>) -> Self {
        Self {
            pay_id: pay_id.into(),
            fingerprint,
        }
    }
}

impl Sealed for OneClickProcess {}

impl RequestBody for OneClickProcess {
    const ENDPOINT: &'static str = "oneclick/process";
    const METHOD: HttpMethod = HttpMethod::Post;
    type Response = OneClickProcessResponse;

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

/// `oneclick/echo`: check that a template can still be charged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OneClickEcho {
    #[serde(rename = "origPayId")]
    template_id: String,
}

impl OneClickEcho {
    pub fn new(template_id: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
        }
    }
}

impl Sealed for OneClickEcho {}

impl RequestBody for OneClickEcho {
    const ENDPOINT: &'static str = "oneclick/echo";
    const METHOD: HttpMethod = HttpMethod::Post;
    type Response = OneClickEchoResponse;

    fn validate(&self) -> Result<(), ValidationError> {
        check_pay_id("origPayId", &self.template_id)
    }

    fn sign_fields(&self, header: &RequestHeader) -> Vec<Option<SignValue>> {
        vec![
            field(&header.merchant_id),
            field(&self.template_id),
            field(header.dttm_wire()),
        ]
    }
}
