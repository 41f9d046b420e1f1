//! # Gateway Result Codes
//!
//! Every gateway response carries a numeric `resultCode`. Zero is success;
//! any other value is turned into a [`ResultCodeError`] whose `code` field
//! names the semantic outcome. Codes outside the table still surface, as
//! [`ResultCode::Other`], carrying the raw number.

use std::fmt;

use thiserror::Error;

/// Semantic meaning of a gateway `resultCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Ok,
    /// 100
    MissingParameter,
    /// 110
    InvalidParameter,
    /// 120
    MerchantBlocked,
    /// 130
    SessionExpired,
    /// 140
    PaymentNotFound,
    /// 150: the gateway could not verify the request signature.
    InvalidSignature,
    /// 160
    PaymentMethodDisabled,
    /// 170
    PaymentMethodUnavailable,
    /// 180
    OperationNotAllowed,
    /// 190
    PaymentMethodError,
    /// 230
    MerchantNotOnboarded,
    /// 500
    EetRejected,
    /// 600
    MallPayDeclined,
    /// 700
    TemplateNotFound,
    /// 710
    TemplateExpired,
    /// 720
    TemplateCardExpired,
    /// 730
    TemplateCustomerRejected,
    /// 740
    TemplateReversed,
    /// 750
    CardholderAccountClosed,
    /// 800
    CustomerNotFound,
    /// 810
    CustomerHasNoSavedCards,
    /// 820
    CustomerHasSavedCards,
    /// 900
    InternalError,
    /// Any code this client does not know about.
    Other(i64),
}

impl ResultCode {
    /// Look up a raw code.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Ok,
            100 => Self::MissingParameter,
            110 => Self::InvalidParameter,
            120 => Self::MerchantBlocked,
            130 => Self::SessionExpired,
            140 => Self::PaymentNotFound,
            150 => Self::InvalidSignature,
            160 => Self::PaymentMethodDisabled,
            170 => Self::PaymentMethodUnavailable,
            180 => Self::OperationNotAllowed,
            190 => Self::PaymentMethodError,
            230 => Self::MerchantNotOnboarded,
            500 => Self::EetRejected,
            600 => Self::MallPayDeclined,
            700 => Self::TemplateNotFound,
            710 => Self::TemplateExpired,
            720 => Self::TemplateCardExpired,
            730 => Self::TemplateCustomerRejected,
            740 => Self::TemplateReversed,
            750 => Self::CardholderAccountClosed,
            800 => Self::CustomerNotFound,
            810 => Self::CustomerHasNoSavedCards,
            820 => Self::CustomerHasSavedCards,
            900 => Self::InternalError,
            other => Self::Other(other),
        }
    }

    /// The raw numeric code.
    pub fn code(&self) -> i64 {
        match self {
            Self::Ok => 0,
            Self::MissingParameter => 100,
            Self::InvalidParameter => 110,
            Self::MerchantBlocked => 120,
            Self::SessionExpired => 130,
            Self::PaymentNotFound => 140,
            Self::InvalidSignature => 150,
            Self::PaymentMethodDisabled => 160,
            Self::PaymentMethodUnavailable => 170,
            Self::OperationNotAllowed => 180,
            Self::PaymentMethodError => 190,
            Self::MerchantNotOnboarded => 230,
            Self::EetRejected => 500,
            Self::MallPayDeclined => 600,
            Self::TemplateNotFound => 700,
            Self::TemplateExpired => 710,
            Self::TemplateCardExpired => 720,
            Self::TemplateCustomerRejected => 730,
            Self::TemplateReversed => 740,
            Self::CardholderAccountClosed => 750,
            Self::CustomerNotFound => 800,
            Self::CustomerHasNoSavedCards => 810,
            Self::CustomerHasSavedCards => 820,
            Self::InternalError => 900,
            Self::Other(code) => *code,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Short human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Ok => "operation succeeded",
            Self::MissingParameter => "missing mandatory parameter",
            Self::InvalidParameter => "invalid parameter",
            Self::MerchantBlocked => "merchant blocked",
            Self::SessionExpired => "session expired",
            Self::PaymentNotFound => "payment not found",
            Self::InvalidSignature => "invalid signature reported by the server",
            Self::PaymentMethodDisabled => "payment method disabled",
            Self::PaymentMethodUnavailable => "payment method unavailable",
            Self::OperationNotAllowed => "operation not allowed",
            Self::PaymentMethodError => "payment method error",
            Self::MerchantNotOnboarded => "merchant not onboarded for this payment method",
            Self::EetRejected => "EET rejected",
            Self::MallPayDeclined => "MallPay payment declined in precheck",
            Self::TemplateNotFound => "one-click template not found",
            Self::TemplateExpired => "one-click template payment expired",
            Self::TemplateCardExpired => "one-click template card expired",
            Self::TemplateCustomerRejected => "one-click template rejected by customer",
            Self::TemplateReversed => "one-click template payment reversed",
            Self::CardholderAccountClosed => "cardholder account closed",
            Self::CustomerNotFound => "customer not found",
            Self::CustomerHasNoSavedCards => "customer found, no saved cards",
            Self::CustomerHasSavedCards => "customer found, saved cards available",
            Self::InternalError => "gateway internal error",
            Self::Other(_) => "API error",
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}

/// The gateway rejected an operation with a non-zero `resultCode`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct ResultCodeError {
    pub code: ResultCode,
    /// `resultMessage` as sent by the gateway.
    pub message: String,
}

impl ResultCodeError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: ResultCode::from_code(code),
            message: message.into(),
        }
    }

    /// The raw numeric code.
    pub fn raw_code(&self) -> i64 {
        self.code.code()
    }
}

/// Map a raw code to `Ok(())` for zero or the matching error otherwise.
pub fn check(code: i64, message: &str) -> Result<(), ResultCodeError> {
    match ResultCode::from_code(code) {
        ResultCode::Ok => Ok(()),
        _ => Err(ResultCodeError::new(code, message)),
    }
}
