//! # Sign text: the canonical signing payload
//!
//! Defines `SignText`, the only payload the SDK ever signs or verifies.
//!
//! ## Construction Rule
//!
//! A signable entity lists its fields as an ordered sequence of optional
//! values. `SignText::from_fields()` drops every absent value, renders the
//! rest (`true`/`false` for booleans, decimal for integers, strings as-is)
//! and joins them with `|`.
//!
//! The order of that sequence is part of the gateway wire contract: the
//! server recomputes the same text from the JSON it receives and rejects the
//! request if the two differ. Each entity therefore declares its order as an
//! explicit list literal in `Signable::sign_fields()`, never by iterating
//! struct fields.
//!
//! Nested entities (cart, customer, order, fingerprint) take part as a
//! single value carrying their own sign text.
//!
//! ## Security Invariant
//!
//! The inner `String` is private. Signing and verification in `csob-crypto`
//! accept only `&SignText`, so every signed byte sequence has gone through
//! this rule.

use std::fmt;

/// Separator between sign text segments.
pub const SEPARATOR: char = '|';

/// One scalar value that takes part in a sign text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SignValue {
    Text(String),
    Int(i64),
    UInt(u64),
    Bool(bool),
}

impl fmt::Display for SignValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Bool(true) => f.write_str("true"),
            Self::Bool(false) => f.write_str("false"),
        }
    }
}

impl From<&str> for SignValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SignValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for SignValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for SignValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for SignValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for SignValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u8> for SignValue {
    fn from(value: u8) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u16> for SignValue {
    fn from(value: u16) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u32> for SignValue {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u64> for SignValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<SignText> for SignValue {
    fn from(value: SignText) -> Self {
        Self::Text(value.0)
    }
}

impl From<&SignText> for SignValue {
    fn from(value: &SignText) -> Self {
        Self::Text(value.0.clone())
    }
}

/// A present sign text entry.
pub fn field(value: impl Into<SignValue>) -> Option<SignValue> {
    Some(value.into())
}

/// An entry that is skipped when `value` is `None`.
pub fn optional<T: Into<SignValue>>(value: Option<T>) -> Option<SignValue> {
    value.map(Into::into)
}

/// Canonical `|`-joined signing payload.
///
/// # Invariants
///
/// - The only constructor is `SignText::from_fields()`.
/// - Absent fields leave no segment behind.
/// - Equal field sequences always produce equal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SignText(String);

impl SignText {
    /// Build the sign text from an ordered sequence of optional values.
    ///
    /// An all-absent sequence yields the empty text, which is a valid
    /// signing payload.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = Option<SignValue>>,
    {
        let mut out = String::new();
        for (i, value) in fields.into_iter().flatten().enumerate() {
            if i > 0 {
                out.push(SEPARATOR);
            }
            out.push_str(&value.to_string());
        }
        Self(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// UTF-8 bytes fed to the signature digest.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for SignText {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for SignText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An entity with a fixed, server-agreed field order for signing.
pub trait Signable {
    /// The ordered field sequence. Absent values are `None`.
    fn sign_fields(&self) -> Vec<Option<SignValue>>;

    fn sign_text(&self) -> SignText {
        SignText::from_fields(self.sign_fields())
    }
}
