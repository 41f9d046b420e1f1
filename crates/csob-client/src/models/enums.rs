//! Wire value tables for the gateway's enumerated fields.
//!
//! Each enum serializes to the exact string the gateway expects and takes
//! part in sign texts with that same string.

use csob_core::SignValue;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Declares a string-valued wire enum with `as_str`, serde and sign text
/// support.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// Wire value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for SignValue {
            fn from(value: $name) -> Self {
                SignValue::Text(value.as_str().to_string())
            }
        }
    };
}

wire_enum! {
    /// ISO 4217 currencies accepted by the gateway.
    pub enum Currency {
        Czk => "CZK",
        Eur => "EUR",
        Usd => "USD",
        Gbp => "GBP",
        Huf => "HUF",
        Pln => "PLN",
        Ron => "RON",
        Nok => "NOK",
        Sek => "SEK",
    }
}

wire_enum! {
    pub enum PayOperation {
        Payment => "payment",
        OneClickPayment => "oneclickPayment",
        /// Payment link with a merchant-chosen expiry (`customExpiry`).
        CustomPayment => "customPayment",
    }
}

wire_enum! {
    pub enum PayMethod {
        Card => "card",
        /// Card payment with a low-value-payment exemption request.
        CardLvp => "card#LVP",
    }
}

wire_enum! {
    /// How the gateway redirects the customer back to `returnUrl`.
    pub enum ReturnMethod {
        Post => "POST",
        Get => "GET",
    }
}

wire_enum! {
    /// Payment page language.
    pub enum Language {
        Cs => "cs",
        En => "en",
        De => "de",
        Fr => "fr",
        Hu => "hu",
        It => "it",
        Ja => "ja",
        Pl => "pl",
        Pt => "pt",
        Ro => "ro",
        Ru => "ru",
        Sk => "sk",
        Es => "es",
        Tr => "tr",
        Vi => "vi",
        Hr => "hr",
        Sl => "sl",
        Sv => "sv",
    }
}

/// Payment lifecycle state reported by the gateway.
///
/// Numeric on the wire. Some gateway paths (the return URL redirect) deliver
/// it as a string, so deserialization accepts both forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Initiated,
    InProgress,
    Cancelled,
    Confirmed,
    Reversed,
    Denied,
    WaitingForSettlement,
    Settled,
    RefundProcessing,
    Refunded,
}

impl PaymentStatus {
    pub fn code(&self) -> u8 {
        match self {
            Self::Initiated => 1,
            Self::InProgress => 2,
            Self::Cancelled => 3,
            Self::Confirmed => 4,
            Self::Reversed => 5,
            Self::Denied => 6,
            Self::WaitingForSettlement => 7,
            Self::Settled => 8,
            Self::RefundProcessing => 9,
            Self::Refunded => 10,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            1 => Self::Initiated,
            2 => Self::InProgress,
            3 => Self::Cancelled,
            4 => Self::Confirmed,
            5 => Self::Reversed,
            6 => Self::Denied,
            7 => Self::WaitingForSettlement,
            8 => Self::Settled,
            9 => Self::RefundProcessing,
            10 => Self::Refunded,
            _ => return None,
        })
    }
}

impl From<PaymentStatus> for SignValue {
    fn from(value: PaymentStatus) -> Self {
        SignValue::UInt(u64::from(value.code()))
    }
}

impl Serialize for PaymentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = crate::wire::lenient_i64(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown paymentStatus {code}")))
    }
}
