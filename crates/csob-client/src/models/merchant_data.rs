//! Opaque merchant data echoed back by the gateway on the return URL.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use csob_core::{SignValue, ValidationError};
use serde::{Serialize, Serializer};

/// Longest accepted base64 encoding.
pub const MAX_ENCODED_LEN: usize = 255;

/// Arbitrary bytes, carried base64-encoded on the wire and in sign texts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MerchantData(String);

impl MerchantData {
    /// # Errors
    ///
    /// Fails when the base64 encoding exceeds 255 characters.
    pub fn new(data: impl AsRef<[u8]>) -> Result<Self, ValidationError> {
        let encoded = STANDARD.encode(data.as_ref());
        if encoded.len() > MAX_ENCODED_LEN {
            return Err(ValidationError::new(
                "merchantData",
                format!(
                    "base64 form must be at most {MAX_ENCODED_LEN} characters, got {}",
                    encoded.len()
                ),
            ));
        }
        Ok(Self(encoded))
    }

    pub fn encoded(&self) -> &str {
        &self.0
    }

    /// Decode a `merchantData` value received from the gateway.
    pub fn decode(encoded: &str) -> Result<Vec<u8>, ValidationError> {
        STANDARD
            .decode(encoded)
            .map_err(|e| ValidationError::new("merchantData", format!("invalid base64: {e}")))
    }
}

impl Serialize for MerchantData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl From<&MerchantData> for SignValue {
    fn from(value: &MerchantData) -> Self {
        SignValue::Text(value.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_as_base64() {
        let data = MerchantData::new(b"hello").unwrap();
        assert_eq!(data.encoded(), "aGVsbG8=");
        assert_eq!(serde_json::to_value(&data).unwrap(), "aGVsbG8=");
        assert_eq!(SignValue::from(&data), SignValue::Text("aGVsbG8=".into()));
    }

    #[test]
    fn rejects_oversized_payload() {
        // 192 bytes encode to exactly 256 characters
        assert!(MerchantData::new([0u8; 192]).is_err());
        // 189 bytes encode to 252 characters
        assert!(MerchantData::new([0u8; 189]).is_ok());
    }

    #[test]
    fn decode_round_trips() {
        let data = MerchantData::new("order=1").unwrap();
        assert_eq!(MerchantData::decode(data.encoded()).unwrap(), b"order=1");
        assert!(MerchantData::decode("***").is_err());
    }
}
