//! The gateway client.
//!
//! Each operation builds one request body, stamps it with the merchant id
//! and the current time, signs it, sends it, and verifies the answer. There
//! is no retry and no state shared between calls beyond the keys.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use csob_core::Dttm;
use csob_crypto::{GatewayKey, MerchantKey};
use serde_json::{Map, Value};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::models::Fingerprint;
use crate::request::{
    ApplePayEcho, ApplePayInit, ApplePayProcess, Echo, GooglePayEcho, GooglePayInit,
    GooglePayProcess, OneClickEcho, OneClickInit, OneClickProcess, PaymentClose, PaymentInit,
    PaymentProcessUrl, PaymentRefund, PaymentReverse, PaymentStatusQuery, Request, RequestBody,
    WalletInitData,
};
use crate::response::{
    self, ApplePayEchoResponse, ApplePayInitResponse, ApplePayProcessResponse, EchoResponse,
    GooglePayEchoResponse, GooglePayInitResponse, GooglePayProcessResponse, OneClickEchoResponse,
    OneClickInitResponse, OneClickProcessResponse, PaymentCloseResponse, PaymentInitResponse,
    PaymentProcessResponse, PaymentRefundResponse, PaymentReverseResponse, PaymentStatusResponse,
};
use crate::transport::{HttpMethod, HttpTransport, ReqwestTransport};

const PROCESS_ENDPOINT: &str = "payment/process";

/// Client for the CSOB payment gateway eAPI v1.9.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct GatewayClient {
    merchant_id: String,
    merchant_key: MerchantKey,
    gateway_key: GatewayKey,
    base_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("merchant_id", &self.merchant_id)
            .field("merchant_key", &self.merchant_key)
            .field("gateway_key", &self.gateway_key)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GatewayClient {
    /// Load both keys and build a reqwest transport with the configured
    /// timeout.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))
            .map_err(|e| GatewayError::transport("client_init", e))?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Same as [`new`](Self::new) with a caller-supplied transport.
    pub fn with_transport(
        config: GatewayConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, GatewayError> {
        let merchant_key = MerchantKey::load(&config.private_key)
            .map_err(|e| GatewayError::crypto("client_init", e))?;
        let gateway_key = GatewayKey::load(&config.public_key)
            .map_err(|e| GatewayError::crypto("client_init", e))?;
        let base_url = config.base_url_trimmed();
        tracing::debug!(merchant_id = %config.merchant_id, base_url = %base_url, "gateway client ready");
        Ok(Self {
            merchant_id: config.merchant_id,
            merchant_key,
            gateway_key,
            base_url,
            transport,
        })
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stamp `body` with this merchant and the current time.
    pub fn request<B: RequestBody>(&self, body: B) -> Result<Request<B>, GatewayError> {
        Ok(Request::new(self.merchant_id.clone(), Dttm::now(), body)?)
    }

    /// Sign and send any operation, returning its verified response.
    pub async fn send<B: RequestBody>(&self, body: B) -> Result<B::Response, GatewayError> {
        let request = self.request(body)?;
        self.execute(&request).await
    }

    /// Send an already built request.
    pub async fn execute<B: RequestBody>(
        &self,
        request: &Request<B>,
    ) -> Result<B::Response, GatewayError> {
        let endpoint = B::ENDPOINT;
        let (url, body) = match B::METHOD {
            HttpMethod::Get => (self.url(&request.to_path(&self.merchant_key)?), None),
            HttpMethod::Post | HttpMethod::Put => (
                self.url(endpoint),
                Some(request.to_wire_body(&self.merchant_key)?),
            ),
        };

        let response = self
            .transport
            .request(B::METHOD, &url, body.as_ref())
            .await
            .map_err(|e| {
                tracing::warn!(endpoint, error = %e, "gateway call failed");
                GatewayError::transport(endpoint, e)
            })?;

        if !response.is_success() {
            tracing::warn!(endpoint, status = response.status, "gateway returned HTTP error");
            return Err(GatewayError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: response.status,
                body: body_text(response.body),
            });
        }

        response::parse(endpoint, response.body, &self.gateway_key)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    // ── payment/* ────────────────────────────────────────────────────

    pub async fn init_payment(&self, body: PaymentInit) -> Result<PaymentInitResponse, GatewayError> {
        tracing::info!(order_no = body.order_no(), total_amount = body.total_amount(), "payment/init");
        self.send(body).await
    }

    pub async fn payment_status(&self, pay_id: &str) -> Result<PaymentStatusResponse, GatewayError> {
        tracing::info!(pay_id, "payment/status");
        self.send(PaymentStatusQuery::new(pay_id)).await
    }

    pub async fn reverse_payment(&self, pay_id: &str) -> Result<PaymentReverseResponse, GatewayError> {
        tracing::info!(pay_id, "payment/reverse");
        self.send(PaymentReverse::new(pay_id)).await
    }

    /// `total_amount` of `None` settles the full authorized amount.
    pub async fn close_payment(
        &self,
        pay_id: &str,
        total_amount: Option<u64>,
    ) -> Result<PaymentCloseResponse, GatewayError> {
        tracing::info!(pay_id, ?total_amount, "payment/close");
        self.send(PaymentClose::new(pay_id, total_amount)).await
    }

    /// `amount` of `None` refunds in full.
    pub async fn refund_payment(
        &self,
        pay_id: &str,
        amount: Option<u64>,
    ) -> Result<PaymentRefundResponse, GatewayError> {
        tracing::info!(pay_id, ?amount, "payment/refund");
        self.send(PaymentRefund::new(pay_id, amount)).await
    }

    /// Signed URL of the payment page. Redirect the customer's browser here.
    pub fn payment_process_url(&self, pay_id: &str) -> Result<String, GatewayError> {
        let request = self.request(PaymentProcessUrl::new(pay_id))?;
        Ok(self.url(&request.to_path(&self.merchant_key)?))
    }

    /// Verify the parameters the gateway sent to the return URL, as
    /// received in the form body (POST) or query string (GET).
    pub fn process_gateway_return(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<PaymentProcessResponse, GatewayError> {
        let fields: Map<String, Value> = params
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        tracing::info!(pay_id = params.get("payId").map(String::as_str), "gateway return");
        response::parse(PROCESS_ENDPOINT, Some(Value::Object(fields)), &self.gateway_key)
    }

    pub async fn echo(&self) -> Result<EchoResponse, GatewayError> {
        tracing::info!("echo");
        self.send(Echo).await
    }

    // ── oneclick/* ───────────────────────────────────────────────────

    pub async fn oneclick_init(&self, body: OneClickInit) -> Result<OneClickInitResponse, GatewayError> {
        tracing::info!("oneclick/init");
        self.send(body).await
    }

    pub async fn oneclick_process(
        &self,
        pay_id: &str,
        fingerprint: Option<Fingerprint>,
    ) -> Result<OneClickProcessResponse, GatewayError> {
        tracing::info!(pay_id, "oneclick/process");
        self.send(OneClickProcess::new(pay_id, fingerprint)).await
    }

    pub async fn oneclick_echo(&self, template_id: &str) -> Result<OneClickEchoResponse, GatewayError> {
        tracing::info!(template_id, "oneclick/echo");
        self.send(OneClickEcho::new(template_id)).await
    }

    // ── googlepay/* ──────────────────────────────────────────────────

    pub async fn googlepay_echo(&self) -> Result<GooglePayEchoResponse, GatewayError> {
        tracing::info!("googlepay/echo");
        self.send(GooglePayEcho::new()).await
    }

    pub async fn googlepay_init(&self, data: WalletInitData) -> Result<GooglePayInitResponse, GatewayError> {
        tracing::info!("googlepay/init");
        self.send(GooglePayInit::new(data)).await
    }

    pub async fn googlepay_process(
        &self,
        pay_id: &str,
        fingerprint: Option<Fingerprint>,
    ) -> Result<GooglePayProcessResponse, GatewayError> {
        tracing::info!(pay_id, "googlepay/process");
        self.send(GooglePayProcess::new(pay_id, fingerprint)).await
    }

    // ── applepay/* ───────────────────────────────────────────────────

    pub async fn applepay_echo(&self) -> Result<ApplePayEchoResponse, GatewayError> {
        tracing::info!("applepay/echo");
        self.send(ApplePayEcho::new()).await
    }

    pub async fn applepay_init(&self, data: WalletInitData) -> Result<ApplePayInitResponse, GatewayError> {
        tracing::info!("applepay/init");
        self.send(ApplePayInit::new(data)).await
    }

    pub async fn applepay_process(
        &self,
        pay_id: &str,
        fingerprint: Option<Fingerprint>,
    ) -> Result<ApplePayProcessResponse, GatewayError> {
        tracing::info!(pay_id, "applepay/process");
        self.send(ApplePayProcess::new(pay_id, fingerprint)).await
    }
}

fn body_text(body: Option<Value>) -> String {
    match body {
        None => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    }
}
