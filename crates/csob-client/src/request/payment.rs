//! `payment/*` requests: init, status, process, reverse, close, refund.

use csob_core::{field, optional, validate, Dttm, SignValue, ValidationError};
use serde::Serialize;

use crate::models::{
    Cart, Currency, CustomerData, Language, MerchantData, OrderData, PayMethod, PayOperation,
    ReturnMethod,
};
use crate::response::{
    PaymentCloseResponse, PaymentInitResponse, PaymentProcessResponse, PaymentRefundResponse,
    PaymentReverseResponse, PaymentStatusResponse,
};
use crate::sealed::Sealed;
use crate::transport::HttpMethod;

use super::{check_pay_id, nested, nested_required, RequestBody, RequestHeader};

const DEFAULT_TTL_SEC: u32 = 600;

/// `payment/init`: create a payment and get a `payId` for the redirect.
///
/// Defaults: `payment` operation, `card` method, CZK, closed on
/// authorization, POST return, Czech language, 600 s lifetime, and a
/// one-line cart over the whole amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInit {
    order_no: String,
    pay_operation: PayOperation,
    pay_method: PayMethod,
    total_amount: u64,
    currency: Currency,
    close_payment: bool,
    return_url: String,
    return_method: ReturnMethod,
    cart: Cart,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer: Option<CustomerData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<OrderData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_data: Option<MerchantData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_id: Option<String>,
    language: Language,
    ttl_sec: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    logo_version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color_scheme_version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_expiry: Option<Dttm>,
}

impl PaymentInit {
    /// `total_amount` is in hundredths of the currency unit.
    pub fn new(order_no: impl Into<String>, total_amount: u64, return_url: impl Into<String>) -> Self {
        Self {
            order_no: order_no.into(),
            pay_operation: PayOperation::Payment,
            pay_method: PayMethod::Card,
            total_amount,
            currency: Currency::Czk,
            close_payment: true,
            return_url: return_url.into(),
            return_method: ReturnMethod::Post,
            cart: Cart::single(total_amount),
            customer: None,
            order: None,
            merchant_data: None,
            customer_id: None,
            language: Language::Cs,
            ttl_sec: DEFAULT_TTL_SEC,
            logo_version: None,
            color_scheme_version: None,
            custom_expiry: None,
        }
    }

    /// Replace the synthesized cart. Its total must equal the payment amount.
    pub fn with_cart(mut self, cart: Cart) -> Self {
        self.cart = cart;
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

    pub fn with_merchant_data(mut self, data: MerchantData) -> Self {
        self.merchant_data = Some(data);
        self
    }

    /// Merchant-side customer id; enables the saved-card picker.
    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_ttl_sec(mut self, ttl_sec: u32) -> Self {
        self.ttl_sec = ttl_sec;
        self
    }

    pub fn with_pay_operation(mut self, operation: PayOperation) -> Self {
        self.pay_operation = operation;
        self
    }

    pub fn with_pay_method(mut self, method: PayMethod) -> Self {
        self.pay_method = method;
        self
    }

    /// `false` leaves the payment authorized until `payment/close`.
    pub fn with_close_payment(mut self, close: bool) -> Self {
        self.close_payment = close;
        self
    }

    pub fn with_return_method(mut self, method: ReturnMethod) -> Self {
        self.return_method = method;
        self
    }

    pub fn with_logo_version(mut self, version: u32) -> Self {
        self.logo_version = Some(version);
        self
    }

    pub fn with_color_scheme_version(mut self, version: u32) -> Self {
        self.color_scheme_version = Some(version);
        self
    }

    /// Expiry of a `customPayment` link.
    pub fn with_custom_expiry(mut self, expiry: Dttm) -> Self {
        self.custom_expiry = Some(expiry);
        self
    }

    pub fn order_no(&self) -> &str {
        &self.order_no
    }

    pub fn total_amount(&self) -> u64 {
        self.total_amount
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }
}

impl Sealed for PaymentInit {}

impl RequestBody for PaymentInit {
    const ENDPOINT: &'static str = "payment/init";
    const METHOD: HttpMethod = HttpMethod::Post;
    type Response = PaymentInitResponse;

    fn validate(&self) -> Result<(), ValidationError> {
        validate::non_empty_max_chars("orderNo", &self.order_no, 10)?;
        validate::non_empty_max_chars("returnUrl", &self.return_url, 300)?;
        validate::in_range("ttlSec", self.ttl_sec, 300, 1800)?;
        validate::optional(self.customer_id.as_deref(), |id| {
            validate::max_chars("customerId", id, 50)
        })?;
        if self.cart.total_amount() != self.total_amount {
            return Err(ValidationError::new(
                "cart",
                format!(
                    "items total {} does not match totalAmount {}",
                    self.cart.total_amount(),
                    self.total_amount
                ),
            ));
        }
        if self.custom_expiry.is_some() && self.pay_operation != PayOperation::CustomPayment {
            return Err(ValidationError::new(
                "customExpiry",
                "only allowed with the customPayment operation",
            ));
        }
        Ok(())
    }

    fn sign_fields(&self, header: &RequestHeader) -> Vec<Option<SignValue>> {
        vec![
            field(&header.merchant_id),
            field(&self.order_no),
            field(header.dttm_wire()),
            field(self.pay_operation),
            field(self.pay_method),
            field(self.total_amount),
            field(self.currency),
            field(self.close_payment),
            field(&self.return_url),
            field(self.return_method),
            nested_required(&self.cart),
            nested(self.customer.as_ref()),
            nested(self.order.as_ref()),
            optional(self.merchant_data.as_ref()),
            optional(self.customer_id.as_ref()),
            field(self.language),
            field(self.ttl_sec),
            optional(self.logo_version),
            optional(self.color_scheme_version),
            optional(self.custom_expiry.as_ref().map(Dttm::to_wire)),
        ]
    }
}

macro_rules! pay_id_request {
    (
        $(#[$meta:meta])*
        $name:ident, $endpoint:literal, $method:ident, $response:ty
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pay_id: String,
        }

        impl $name {
            pub fn new(pay_id: impl Into<String>) -> Self {
                Self { pay_id: pay_id.into() }
            }

            pub fn pay_id(&self) -> &str {
                &self.pay_id
            }
        }

        impl Sealed for $name {}

        impl RequestBody for $name {
            const ENDPOINT: &'static str = $endpoint;
            const METHOD: HttpMethod = HttpMethod::$method;
            type Response = $response;

            fn validate(&self) -> Result<(), ValidationError> {
                check_pay_id("payId", &self.pay_id)
            }

            fn sign_fields(&self, header: &RequestHeader) -> Vec<Option<SignValue>> {
                vec![
                    field(&header.merchant_id),
                    field(&self.pay_id),
                    field(header.dttm_wire()),
                ]
            }

            fn path_segments(&self) -> Vec<&str> {
                if HttpMethod::$method == HttpMethod::Get {
                    vec![self.pay_id.as_str()]
                } else {
                    Vec::new()
                }
            }
        }
    };
}

pay_id_request! {
    /// `payment/status`: current state of a payment.
    PaymentStatusQuery, "payment/status", Get, PaymentStatusResponse
}

pay_id_request! {
    /// `payment/process`: the URL the customer's browser is redirected to.
    /// Never sent by the client itself.
    PaymentProcessUrl, "payment/process", Get, PaymentProcessResponse
}

pay_id_request! {
    /// `payment/reverse`: cancel an authorized, not yet settled payment.
    PaymentReverse, "payment/reverse", Put, PaymentReverseResponse
}

/// `payment/close`: confirm an authorized payment for settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentClose {
    pay_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_amount: Option<u64>,
}

impl PaymentClose {
    /// `total_amount` may be lower than the authorized amount; `None`
    /// settles the whole authorization.
    pub fn new(pay_id: impl Into<String>, total_amount: Option<u64>) -> Self {
        Self {
            pay_id: pay_id.into(),
            total_amount,
        }
    }
}

impl Sealed for PaymentClose {}

impl RequestBody for PaymentClose {
    const ENDPOINT: &'static str = "payment/close";
    const METHOD: HttpMethod = HttpMethod::Put;
    type Response = PaymentCloseResponse;

    fn validate(&self) -> Result<(), ValidationError> {
        check_pay_id("payId", &self.pay_id)
    }

    fn sign_fields(&self, header: &RequestHeader) -> Vec<Option<SignValue>> {
        vec![
            field(&header.merchant_id),
            field(&self.pay_id),
            field(header.dttm_wire()),
            optional(self.total_amount),
        ]
    }
}

/// `payment/refund`: return money for a settled payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRefund {
    pay_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<u64>,
}

impl PaymentRefund {
    /// `None` refunds the full amount.
    pub fn new(pay_id: impl Into<String>, amount: Option<u64>) -> Self {
        Self {
            pay_id: pay_id.into(),
            amount,
        }
    }
}

impl Sealed for PaymentRefund {}

impl RequestBody for PaymentRefund {
    const ENDPOINT: &'static str = "payment/refund";
    const METHOD: HttpMethod = HttpMethod::Put;
    type Response = PaymentRefundResponse;

    fn validate(&self) -> Result<(), ValidationError> {
        check_pay_id("payId", &self.pay_id)
    }

    fn sign_fields(&self, header: &RequestHeader) -> Vec<Option<SignValue>> {
        vec![
            field(&header.merchant_id),
            field(&self.pay_id),
            field(header.dttm_wire()),
            optional(self.amount),
        ]
    }
}
