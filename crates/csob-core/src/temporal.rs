//! # Gateway Timestamps
//!
//! Every request and response carries a `dttm` field in the compact
//! `YYYYMMDDHHMMSS` form. The gateway works in Prague local time, so
//! [`Dttm::now()`] reads the local clock rather than UTC.
//!
//! Response timestamps are not parsed through this type: they are kept as
//! the exact string the server sent, because signature verification must
//! reproduce the server's text byte for byte.

use std::fmt;

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// `chrono` format string for the gateway timestamp.
pub const DTTM_FORMAT: &str = "%Y%m%d%H%M%S";

/// A request timestamp with seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dttm(NaiveDateTime);

impl Dttm {
    /// Current local time, truncated to seconds.
    pub fn now() -> Self {
        Self::from_naive(Local::now().naive_local())
    }

    /// Wrap a naive local datetime, dropping sub-second precision.
    pub fn from_naive(dt: NaiveDateTime) -> Self {
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }

    /// Parse a `YYYYMMDDHHMMSS` string.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.len() != 14 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::new("dttm", format!("expected YYYYMMDDHHMMSS, got {s:?}")));
        }
        NaiveDateTime::parse_from_str(s, DTTM_FORMAT)
            .map(Self)
            .map_err(|e| ValidationError::new("dttm", format!("invalid timestamp {s:?}: {e}")))
    }

    pub fn as_naive(&self) -> &NaiveDateTime {
        &self.0
    }

    /// Render in the wire form.
    pub fn to_wire(&self) -> String {
        self.0.format(DTTM_FORMAT).to_string()
    }
}

impl fmt::Display for Dttm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DTTM_FORMAT))
    }
}

impl Serialize for Dttm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for Dttm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn formats_compact_wire_form() {
        let dttm = Dttm::from_naive(at(2024, 9, 19, 16, 41, 56));
        assert_eq!(dttm.to_wire(), "20240919164156");
        assert_eq!(dttm.to_string(), "20240919164156");
    }

    #[test]
    fn midnight_pads_zeroes() {
        let dttm = Dttm::from_naive(at(1955, 11, 12, 0, 0, 0));
        assert_eq!(dttm.to_wire(), "19551112000000");
    }

    #[test]
    fn truncates_sub_seconds() {
        let dt = at(2024, 1, 2, 3, 4, 5).with_nanosecond(999_000_000).unwrap();
        let dttm = Dttm::from_naive(dt);
        assert_eq!(dttm.as_naive().nanosecond(), 0);
        assert_eq!(dttm.to_wire(), "20240102030405");
    }

    #[test]
    fn parse_round_trips() {
        let dttm = Dttm::parse("20240919164156").unwrap();
        assert_eq!(dttm, Dttm::from_naive(at(2024, 9, 19, 16, 41, 56)));
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let err = Dttm::parse("2024091916415").unwrap_err();
        assert_eq!(err.field, "dttm");
    }

    #[test]
    fn parse_rejects_non_digits() {
        assert!(Dttm::parse("2024-09-19T16:4").is_err());
    }

    #[test]
    fn parse_rejects_impossible_date() {
        assert!(Dttm::parse("20241399000000").is_err());
    }

    #[test]
    fn now_has_no_sub_seconds() {
        assert_eq!(Dttm::now().as_naive().nanosecond(), 0);
        assert_eq!(Dttm::now().to_wire().len(), 14);
    }

    #[test]
    fn serde_uses_wire_form() {
        let dttm = Dttm::parse("20240919164156").unwrap();
        let json = serde_json::to_string(&dttm).unwrap();
        assert_eq!(json, "\"20240919164156\"");
        let back: Dttm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dttm);
    }
}
