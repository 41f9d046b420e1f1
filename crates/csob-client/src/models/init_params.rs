//! Wallet configuration returned by the `googlepay/echo` and
//! `applepay/echo` endpoints, used to initialise the wallet button on the
//! merchant's page.

use csob_core::{optional, SignValue, Signable};
use serde::Deserialize;

fn joined(list: &Option<Vec<String>>) -> Option<SignValue> {
    optional(list.as_ref().map(|items| items.join("|")))
}

/// Google Pay `PaymentDataRequest` parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GooglePayInitParams {
    pub allowed_card_auth_methods: Option<Vec<String>>,
    pub allowed_card_networks: Option<Vec<String>>,
    pub api_version: Option<i64>,
    pub api_version_minor: Option<i64>,
    pub assurance_details_required: Option<bool>,
    pub billing_address_parameters_format: Option<String>,
    pub billing_address_required: Option<bool>,
    pub country_code: Option<String>,
    pub environment: Option<String>,
    pub gateway: Option<String>,
    pub gateway_merchant_id: Option<String>,
    pub googlepay_merchant_id: Option<String>,
    pub merchant_name: Option<String>,
    pub payment_method_type: Option<String>,
    pub tokenization_specification_type: Option<String>,
    pub total_price_status: Option<String>,
}

impl Signable for GooglePayInitParams {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            joined(&self.allowed_card_auth_methods),
            joined(&self.allowed_card_networks),
            optional(self.api_version),
            optional(self.api_version_minor),
            optional(self.assurance_details_required),
            optional(self.billing_address_parameters_format.as_ref()),
            optional(self.billing_address_required),
            optional(self.country_code.as_ref()),
            optional(self.environment.as_ref()),
            optional(self.gateway.as_ref()),
            optional(self.gateway_merchant_id.as_ref()),
            optional(self.googlepay_merchant_id.as_ref()),
            optional(self.merchant_name.as_ref()),
            optional(self.payment_method_type.as_ref()),
            optional(self.tokenization_specification_type.as_ref()),
            optional(self.total_price_status.as_ref()),
        ]
    }
}

/// Apple Pay `ApplePayPaymentRequest` parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplePayInitParams {
    pub country_code: Option<String>,
    pub supported_networks: Option<Vec<String>>,
    pub merchant_capabilities: Option<Vec<String>>,
}

impl Signable for ApplePayInitParams {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            optional(self.country_code.as_ref()),
            joined(&self.supported_networks),
            joined(&self.merchant_capabilities),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn google_params_sign_order() {
        let params: GooglePayInitParams = serde_json::from_value(json!({
            "apiVersion": 2,
            "apiVersionMinor": 0,
            "paymentMethodType": "CARD",
            "allowedCardNetworks": ["MASTERCARD", "VISA"],
            "allowedCardAuthMethods": ["CRYPTOGRAM_3DS"],
            "assuranceDetailsRequired": true,
            "billingAddressRequired": false,
            "tokenizationSpecificationType": "PAYMENT_GATEWAY",
            "gateway": "csob",
            "gatewayMerchantId": "M1",
            "googlepayMerchantId": "G1",
            "merchantName": "Shop",
            "environment": "TEST",
            "totalPriceStatus": "FINAL",
            "countryCode": "CZ"
        }))
        .unwrap();
        assert_eq!(
            params.sign_text().as_str(),
            "CRYPTOGRAM_3DS|MASTERCARD|VISA|2|0|true|false|CZ|TEST|csob|M1|G1|Shop|CARD|PAYMENT_GATEWAY|FINAL"
        );
    }

    #[test]
    fn apple_params_sign_order() {
        let params: ApplePayInitParams = serde_json::from_value(json!({
            "countryCode": "CZ",
            "supportedNetworks": ["visa", "masterCard"],
            "merchantCapabilities": ["supports3DS"]
        }))
        .unwrap();
        assert_eq!(params.sign_text().as_str(), "CZ|visa|masterCard|supports3DS");
    }

    #[test]
    fn missing_fields_are_skipped() {
        let params: ApplePayInitParams = serde_json::from_value(json!({"countryCode": "CZ"})).unwrap();
        assert_eq!(params.sign_text().as_str(), "CZ");
    }
}
