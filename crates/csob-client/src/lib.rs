//! # csob-client: typed client for the CSOB payment gateway (eAPI v1.9)
//!
//! Every call to the gateway is signed with the merchant's RSA key, and
//! every answer is verified against the gateway's public key before it is
//! handed back. This crate provides:
//!
//! - **Request models** ([`request`]): one body type per operation, each
//!   declaring its endpoint, HTTP method, response type, and sign order.
//! - **Response models** ([`response`]): typed answers plus the
//!   parse → result-code check → verify pipeline.
//! - **Domain models** ([`models`]): cart, customer, order, fingerprint,
//!   merchant data, and the gateway's enum tables.
//! - **Transport** ([`transport`]): the [`HttpTransport`] seam and its
//!   reqwest implementation.
//! - **Client** ([`GatewayClient`]): one method per gateway operation.
//!
//! ## Example
//!
//! ```no_run
//! use csob_client::{GatewayClient, GatewayConfig};
//! use csob_client::request::PaymentInit;
//!
//! # async fn run() -> Result<(), csob_client::GatewayError> {
//! let client = GatewayClient::new(GatewayConfig::from_env()?)?;
//! let init = client
//!     .init_payment(PaymentInit::new("1001", 15000, "https://shop.example/return"))
//!     .await?;
//! let redirect = client.payment_process_url(&init.pay_id)?;
//! # let _ = redirect;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod transport;
mod wire;

mod sealed {
    /// Restricts request and response traits to this crate's types.
    pub trait Sealed {}
}

pub use client::GatewayClient;
pub use config::{ConfigError, GatewayConfig, INTEGRATION_URL, PRODUCTION_URL};
pub use error::{ErrorKind, GatewayError};
pub use request::{Request, RequestBody, RequestHeader};
pub use response::GatewayResponse;
pub use transport::{HttpMethod, HttpResponse, HttpTransport, ReqwestTransport, TransportError};

pub use csob_core::{Dttm, ResultCode, ResultCodeError, SignText, Signable, ValidationError};
pub use csob_crypto::KeySource;
