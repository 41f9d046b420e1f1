//! Device fingerprint sent with one-click and wallet `process` calls so the
//! issuer can run 3-D Secure frictionless authentication.

use csob_core::validate;
use csob_core::{field, optional, SignValue, Signable, ValidationError};
use serde::Serialize;

/// Browser properties collected on the merchant's checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserFingerprint {
    pub user_agent: String,
    pub accept_header: String,
    pub language: String,
    pub javascript_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_depth: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_width: Option<u32>,
    /// UTC offset in minutes, as reported by `Date.getTimezoneOffset()`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge_window_size: Option<String>,
}

impl Signable for BrowserFingerprint {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            field(&self.user_agent),
            field(&self.accept_header),
            field(&self.language),
            field(self.javascript_enabled),
            optional(self.color_depth),
            optional(self.screen_height),
            optional(self.screen_width),
            optional(self.timezone),
            optional(self.java_enabled),
            optional(self.challenge_window_size.as_ref()),
        ]
    }
}

/// 3-D Secure SDK data for in-app payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SdkFingerprint {
    #[serde(rename = "appID")]
    pub app_id: String,
    #[serde(rename = "encData")]
    pub enc_data: String,
    #[serde(rename = "ephemPubKey")]
    pub ephem_pub_key: String,
    /// Minutes.
    #[serde(rename = "maxTimeout")]
    pub max_timeout: u32,
    #[serde(rename = "referenceNumber")]
    pub reference_number: String,
    #[serde(rename = "transID")]
    pub trans_id: String,
}

impl Signable for SdkFingerprint {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            field(&self.app_id),
            field(&self.enc_data),
            field(&self.ephem_pub_key),
            field(self.max_timeout),
            field(&self.reference_number),
            field(&self.trans_id),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fingerprint {
    #[serde(skip_serializing_if = "Option::is_none")]
    browser: Option<BrowserFingerprint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sdk: Option<SdkFingerprint>,
}

impl Fingerprint {
    /// # Errors
    ///
    /// Fails when the user agent or accept header exceeds 2048 characters.
    pub fn browser(browser: BrowserFingerprint) -> Result<Self, ValidationError> {
        validate::max_chars("userAgent", &browser.user_agent, 2048)?;
        validate::max_chars("acceptHeader", &browser.accept_header, 2048)?;
        validate::max_chars("language", &browser.language, 8)?;
        Ok(Self {
            browser: Some(browser),
            sdk: None,
        })
    }

    /// # Errors
    ///
    /// Fails when `maxTimeout` is below the 5 minute minimum.
    pub fn sdk(sdk: SdkFingerprint) -> Result<Self, ValidationError> {
        if sdk.max_timeout < 5 {
            return Err(ValidationError::new("maxTimeout", "must be at least 5 minutes"));
        }
        Ok(Self {
            browser: None,
            sdk: Some(sdk),
        })
    }
}

impl Signable for Fingerprint {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            optional(self.browser.as_ref().map(Signable::sign_text)),
            optional(self.sdk.as_ref().map(Signable::sign_text)),
        ]
    }
}
