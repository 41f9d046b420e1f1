//! End-to-end tests for GatewayClient against a wiremock gateway.
//!
//! Mock responses are signed with the test gateway key, and every request
//! the client sends is checked against the test merchant public key.
//!
//! | Method | Path (relative to `/api/v1.9`) | Test |
//! |--------|--------------------------------|------|
//! | POST   | `/echo` | `echo_*` |
//! | POST   | `/payment/init` | `init_payment_*` |
//! | GET    | `/payment/status/{mid}/{payId}/{dttm}/{sig}` | `payment_status_*` |
//! | PUT    | `/payment/close`, `/payment/refund` | `close_*`, `refund_*` |
//! | POST   | `/googlepay/echo` | `googlepay_echo_*` |
//! | POST   | `/oneclick/echo` | `oneclick_echo_*` |

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use csob_client::models::Currency;
use csob_client::request::PaymentInit;
use csob_client::{
    ErrorKind, GatewayClient, GatewayConfig, GatewayError, KeySource, ReqwestTransport, ResultCode,
    SignText, Signable,
};
use csob_core::field;
use csob_crypto::{GatewayKey, MerchantKey};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const MERCHANT_KEY: &str = include_str!("../../../testdata/keys/merchant.key");
const MERCHANT_PUB: &str = include_str!("../../../testdata/keys/merchant.pub");
const GATEWAY_KEY: &str = include_str!("../../../testdata/keys/gateway.key");
const GATEWAY_PUB: &str = include_str!("../../../testdata/keys/gateway.pub");

const DTTM: &str = "20240919164156";

fn config(mock_server: &MockServer, timeout_secs: u64) -> GatewayConfig {
    GatewayConfig::new("M1", KeySource::pem(MERCHANT_KEY), KeySource::pem(GATEWAY_PUB))
        .unwrap()
        .with_base_url(&format!("{}/api/v1.9", mock_server.uri()))
        .unwrap()
        .with_timeout_secs(timeout_secs)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn test_client(mock_server: &MockServer) -> GatewayClient {
    init_tracing();
    let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
    GatewayClient::with_transport(config(mock_server, 5), Arc::new(transport)).unwrap()
}

/// Attach the signature the gateway would compute for `body`.
fn gateway_signed<R: Signable + DeserializeOwned>(mut body: Value) -> Value {
    let response: R = serde_json::from_value(body.clone()).unwrap();
    let key = MerchantKey::from_pem(GATEWAY_KEY).unwrap();
    body["signature"] = Value::String(key.sign(&response.sign_text()).unwrap().to_base64());
    body
}

fn echo_body() -> Value {
    gateway_signed::<csob_client::response::EchoResponse>(json!({
        "dttm": DTTM,
        "resultCode": 0,
        "resultMessage": "OK"
    }))
}

fn payment_body(pay_id: &str, status: u8) -> Value {
    gateway_signed::<csob_client::response::PaymentResponse>(json!({
        "payId": pay_id,
        "dttm": DTTM,
        "resultCode": 0,
        "resultMessage": "OK",
        "paymentStatus": status,
        "authCode": "637413"
    }))
}

fn merchant_pub() -> GatewayKey {
    GatewayKey::from_pem(MERCHANT_PUB).unwrap()
}

fn only_request(requests: Vec<Request>) -> Request {
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.into_iter().next().unwrap()
}

// ── POST /echo ───────────────────────────────────────────────────────

#[tokio::test]
async fn echo_sends_signed_body_and_verifies_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.9/echo"))
        .and(body_partial_json(json!({"merchantId": "M1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(echo_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let resp = client.echo().await.unwrap();
    assert_eq!(resp.result_code, 0);
    assert_eq!(resp.result_message.as_deref(), Some("OK"));

    let sent: Value = only_request(mock_server.received_requests().await.unwrap())
        .body_json()
        .unwrap();
    let dttm = sent["dttm"].as_str().unwrap();
    assert_eq!(dttm.len(), 14);
    let text = SignText::from_fields([field("M1"), field(dttm)]);
    csob_crypto::verify(sent["signature"].as_str().unwrap(), &text, &merchant_pub()).unwrap();
}

#[tokio::test]
async fn echo_with_flipped_signature_is_rejected() {
    let mock_server = MockServer::start().await;

    let mut body = echo_body();
    let signature = body["signature"].as_str().unwrap().to_string();
    let flipped = if signature.starts_with('A') {
        format!("B{}", &signature[1..])
    } else {
        format!("A{}", &signature[1..])
    };
    body["signature"] = Value::String(flipped);

    Mock::given(method("POST"))
        .and(path("/api/v1.9/echo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).echo().await.unwrap_err();
    match err {
        GatewayError::InvalidSignature { endpoint, .. } => assert_eq!(endpoint, "echo"),
        other => panic!("expected InvalidSignature, got: {other:?}"),
    }
}

#[tokio::test]
async fn echo_with_empty_body_is_empty_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.9/echo"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).echo().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyResponse);
}

#[tokio::test]
async fn echo_http_401_is_transport_error_with_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.9/echo"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).echo().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    match err {
        GatewayError::HttpStatus { status, body, .. } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Unauthorized");
        }
        other => panic!("expected HttpStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn slow_gateway_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.9/echo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(echo_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = GatewayClient::new(config(&mock_server, 1)).unwrap();
    let err = client.echo().await.unwrap_err();
    match err {
        GatewayError::Timeout { endpoint, elapsed_ms } => {
            assert_eq!(endpoint, "echo");
            assert_eq!(elapsed_ms, 1000);
        }
        other => panic!("expected Timeout, got: {other:?}"),
    }
}

// ── POST /payment/init ───────────────────────────────────────────────

#[tokio::test]
async fn init_payment_posts_wire_body_and_returns_pay_id() {
    let mock_server = MockServer::start().await;

    let response = gateway_signed::<csob_client::response::PaymentInitResponse>(json!({
        "payId": "ff41e5f8a4a1@FA",
        "dttm": DTTM,
        "resultCode": 0,
        "resultMessage": "OK",
        "paymentStatus": 1
    }));

    Mock::given(method("POST"))
        .and(path("/api/v1.9/payment/init"))
        .and(body_partial_json(json!({
            "merchantId": "M1",
            "orderNo": "1001",
            "totalAmount": 15000,
            "currency": "EUR",
            "payOperation": "payment",
            "payMethod": "card",
            "closePayment": true,
            "returnMethod": "POST",
            "language": "cs",
            "ttlSec": 600
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let body = PaymentInit::new("1001", 15000, "https://shop.example/return").with_currency(Currency::Eur);
    let resp = client.init_payment(body).await.unwrap();
    assert_eq!(resp.pay_id, "ff41e5f8a4a1@FA");
    assert_eq!(resp.payment_status, Some(csob_client::models::PaymentStatus::Initiated));

    let sent: Value = only_request(mock_server.received_requests().await.unwrap())
        .body_json()
        .unwrap();
    assert_eq!(sent["cart"], json!([{"name": "Payment", "quantity": 1, "amount": 15000}]));
    assert!(sent.get("customer").is_none());
}

#[tokio::test]
async fn init_payment_result_code_is_reported_even_when_unsigned() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.9/payment/init"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dttm": DTTM,
            "resultCode": 100,
            "resultMessage": "Missing parameter orderNo",
            "signature": "bm90IGEgc2lnbmF0dXJl"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .init_payment(PaymentInit::new("1001", 100, "https://shop.example/return"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResultCode);
    assert_eq!(err.result_code(), Some(ResultCode::MissingParameter));
    match err {
        GatewayError::ResultCode { endpoint, error } => {
            assert_eq!(endpoint, "payment/init");
            assert_eq!(error.message, "Missing parameter orderNo");
        }
        other => panic!("expected ResultCode, got: {other:?}"),
    }
}

#[tokio::test]
async fn init_payment_validation_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .init_payment(PaymentInit::new("1001", 100, "https://x").with_ttl_sec(10))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

// ── GET /payment/status ──────────────────────────────────────────────

#[tokio::test]
async fn payment_status_uses_signed_get_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/api/v1\.9/payment/status/M1/abc123/\d{14}/[^/]+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_body("abc123", 4)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let resp = client.payment_status("abc123").await.unwrap();
    assert_eq!(resp.pay_id, "abc123");
    assert_eq!(resp.auth_code.as_deref(), Some("637413"));

    let sent = only_request(mock_server.received_requests().await.unwrap());
    let segments: Vec<&str> = sent.url.path().split('/').collect();
    let dttm = segments[segments.len() - 2];
    let signature = urlencoding::decode(segments[segments.len() - 1]).unwrap();
    let text = SignText::from_fields([field("M1"), field("abc123"), field(dttm)]);
    csob_crypto::verify(&signature, &text, &merchant_pub()).unwrap();
}

#[tokio::test]
async fn payment_status_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/api/v1\.9/payment/status/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payId": "abc123",
            "dttm": DTTM,
            "resultCode": "140",
            "resultMessage": "Payment not found",
            "signature": "x"
        })))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).payment_status("abc123").await.unwrap_err();
    assert_eq!(err.result_code(), Some(ResultCode::PaymentNotFound));
}

// ── PUT /payment/close, /payment/refund ──────────────────────────────

#[tokio::test]
async fn close_payment_puts_partial_amount() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1.9/payment/close"))
        .and(body_partial_json(json!({"payId": "abc123", "totalAmount": 500})))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_body("abc123", 7)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resp = test_client(&mock_server)
        .close_payment("abc123", Some(500))
        .await
        .unwrap();
    assert_eq!(
        resp.payment_status,
        Some(csob_client::models::PaymentStatus::WaitingForSettlement)
    );
}

#[tokio::test]
async fn refund_payment_without_amount_omits_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1.9/payment/refund"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_body("abc123", 10)))
        .expect(1)
        .mount(&mock_server)
        .await;

    test_client(&mock_server).refund_payment("abc123", None).await.unwrap();

    let sent: Value = only_request(mock_server.received_requests().await.unwrap())
        .body_json()
        .unwrap();
    assert!(sent.get("amount").is_none());
    let text = SignText::from_fields([
        field("M1"),
        field("abc123"),
        field(sent["dttm"].as_str().unwrap()),
    ]);
    csob_crypto::verify(sent["signature"].as_str().unwrap(), &text, &merchant_pub()).unwrap();
}

// ── wallet and one-click echo ────────────────────────────────────────

#[tokio::test]
async fn googlepay_echo_returns_verified_init_params() {
    let mock_server = MockServer::start().await;

    let body = gateway_signed::<csob_client::response::GooglePayEchoResponse>(json!({
        "dttm": DTTM,
        "resultCode": 0,
        "resultMessage": "OK",
        "initParams": {
            "apiVersion": 2,
            "apiVersionMinor": 0,
            "allowedCardNetworks": ["VISA", "MASTERCARD"],
            "merchantName": "Test shop",
            "environment": "TEST"
        }
    }));

    Mock::given(method("POST"))
        .and(path("/api/v1.9/googlepay/echo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resp = test_client(&mock_server).googlepay_echo().await.unwrap();
    let params = resp.init_params.unwrap();
    assert_eq!(params.merchant_name.as_deref(), Some("Test shop"));
    assert_eq!(
        params.allowed_card_networks,
        Some(vec!["VISA".to_string(), "MASTERCARD".to_string()])
    );
}

#[tokio::test]
async fn oneclick_echo_sends_template_id() {
    let mock_server = MockServer::start().await;

    let body = gateway_signed::<csob_client::response::OneClickEchoResponse>(json!({
        "origPayId": "tmpl01",
        "dttm": DTTM,
        "resultCode": 0,
        "resultMessage": "OK"
    }));

    Mock::given(method("POST"))
        .and(path("/api/v1.9/oneclick/echo"))
        .and(body_partial_json(json!({"origPayId": "tmpl01"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resp = test_client(&mock_server).oneclick_echo("tmpl01").await.unwrap();
    assert_eq!(resp.orig_pay_id, "tmpl01");
}

// ── return URL ───────────────────────────────────────────────────────

#[tokio::test]
async fn gateway_return_parameters_are_verified() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server);

    let signed = gateway_signed::<csob_client::response::PaymentProcessResponse>(json!({
        "payId": "abc123",
        "dttm": DTTM,
        "resultCode": "0",
        "resultMessage": "OK",
        "paymentStatus": "7",
        "authCode": "637413",
        "merchantData": "b3JkZXI9MQ=="
    }));
    let mut params: HashMap<String, String> = signed
        .as_object()
        .unwrap()
        .iter()
        .map(|(k, v)| (k.clone(), v.as_str().unwrap().to_string()))
        .collect();

    let resp = client.process_gateway_return(&params).unwrap();
    assert_eq!(resp.result_code, 0);
    assert_eq!(resp.merchant_data_bytes().unwrap().unwrap(), b"order=1");

    params.insert("paymentStatus".into(), "4".into());
    let err = client.process_gateway_return(&params).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSignature);
}
