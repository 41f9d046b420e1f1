//! Order details sent with payment init for 3-D Secure risk assessment.

use csob_core::validate;
use csob_core::{field, optional, SignValue, Signable, ValidationError};
use serde::{Serialize, Serializer};

use super::enums::Currency;

/// ISO 3166 alpha-3 country used when none is given.
pub const DEFAULT_COUNTRY: &str = "CZE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Purchase,
    Balance,
    Prepaid,
    Cash,
    Check,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Balance => "balance",
            Self::Prepaid => "prepaid",
            Self::Cash => "cash",
            Self::Check => "check",
        }
    }
}

/// When the goods become available.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderAvailability {
    Now,
    Preorder,
    /// Expected availability date, ISO 8601.
    Date(String),
}

impl OrderAvailability {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Now => "now",
            Self::Preorder => "preorder",
            Self::Date(date) => date,
        }
    }
}

impl Serialize for OrderAvailability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryIndicator {
    Shipping,
    ShippingVerified,
    Instore,
    Digital,
    Ticket,
    Other,
}

impl DeliveryIndicator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shipping => "shipping",
            Self::ShippingVerified => "shipping_verified",
            Self::Instore => "instore",
            Self::Digital => "digital",
            Self::Ticket => "ticket",
            Self::Other => "other",
        }
    }
}

/// Delivery speed. Numeric on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryMode {
    Electronic,
    SameDay,
    NextDay,
    Later,
}

impl DeliveryMode {
    pub fn code(&self) -> u8 {
        match self {
            Self::Electronic => 0,
            Self::SameDay => 1,
            Self::NextDay => 2,
            Self::Later => 3,
        }
    }
}

impl Serialize for DeliveryMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Billing or shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressData {
    address1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address3: Option<String>,
    city: String,
    zip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    country: String,
}

impl AddressData {
    /// Address in the default country.
    ///
    /// # Errors
    ///
    /// Fails when `address` or `city` is empty or longer than 50
    /// characters, or `zip` is empty or longer than 16.
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        zip: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let address1 = address.into();
        let city = city.into();
        let zip = zip.into();
        validate::non_empty_max_chars("address1", &address1, 50)?;
        validate::non_empty_max_chars("city", &city, 50)?;
        validate::non_empty_max_chars("zip", &zip, 16)?;
        Ok(Self {
            address1,
            address2: None,
            address3: None,
            city,
            zip,
            state: None,
            country: DEFAULT_COUNTRY.to_string(),
        })
    }

    pub fn with_address2(mut self, line: impl Into<String>) -> Result<Self, ValidationError> {
        let line = line.into();
        validate::max_chars("address2", &line, 50)?;
        self.address2 = Some(line);
        Ok(self)
    }

    pub fn with_address3(mut self, line: impl Into<String>) -> Result<Self, ValidationError> {
        let line = line.into();
        validate::max_chars("address3", &line, 50)?;
        self.address3 = Some(line);
        Ok(self)
    }

    /// ISO 3166-2 subdivision code.
    pub fn with_state(mut self, state: impl Into<String>) -> Result<Self, ValidationError> {
        let state = state.into();
        validate::max_chars("state", &state, 3)?;
        self.state = Some(state);
        Ok(self)
    }

    /// ISO 3166 alpha-3 country code.
    pub fn with_country(mut self, country: impl Into<String>) -> Result<Self, ValidationError> {
        let country = country.into();
        if country.len() != 3 || !country.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(ValidationError::new(
                "country",
                format!("expected ISO 3166 alpha-3 code, got {country:?}"),
            ));
        }
        self.country = country;
        Ok(self)
    }
}

impl Signable for AddressData {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            field(&self.address1),
            optional(self.address2.as_ref()),
            optional(self.address3.as_ref()),
            field(&self.city),
            field(&self.zip),
            optional(self.state.as_ref()),
            field(&self.country),
        ]
    }
}

/// Gift card purchase details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCardsData {
    #[serde(skip_serializing_if = "Option::is_none")]
    total_amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<u8>,
}

impl GiftCardsData {
    /// # Errors
    ///
    /// Fails when `quantity` is outside `1..=99`.
    pub fn new(
        total_amount: Option<u64>,
        currency: Option<Currency>,
        quantity: Option<u8>,
    ) -> Result<Self, ValidationError> {
        validate::optional(quantity, |q| validate::in_range("quantity", q, 1, 99))?;
        Ok(Self {
            total_amount,
            currency,
            quantity,
        })
    }
}

impl Signable for GiftCardsData {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            optional(self.total_amount),
            optional(self.currency),
            optional(self.quantity),
        ]
    }
}

/// Order details. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    order_type: Option<OrderType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    availability: Option<OrderAvailability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery: Option<DeliveryIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_mode: Option<DeliveryMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name_match: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address_match: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    billing: Option<AddressData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping: Option<AddressData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping_added_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reorder: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gift_cards: Option<GiftCardsData>,
}

impl OrderData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    pub fn with_availability(mut self, availability: OrderAvailability) -> Self {
        self.availability = Some(availability);
        self
    }

    pub fn with_delivery(mut self, delivery: DeliveryIndicator, mode: Option<DeliveryMode>) -> Self {
        self.delivery = Some(delivery);
        self.delivery_mode = mode;
        self
    }

    pub fn with_delivery_email(mut self, email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();
        validate::max_chars("deliveryEmail", &email, 100)?;
        self.delivery_email = Some(email);
        Ok(self)
    }

    /// Whether the cardholder name matches the shipping name.
    pub fn with_name_match(mut self, matches: bool) -> Self {
        self.name_match = Some(matches);
        self
    }

    /// Whether billing and shipping addresses match.
    pub fn with_address_match(mut self, matches: bool) -> Self {
        self.address_match = Some(matches);
        self
    }

    pub fn with_billing(mut self, address: AddressData) -> Self {
        self.billing = Some(address);
        self
    }

    pub fn with_shipping(mut self, address: AddressData, added_at: Option<String>) -> Self {
        self.shipping = Some(address);
        self.shipping_added_at = added_at;
        self
    }

    pub fn with_reorder(mut self, reorder: bool) -> Self {
        self.reorder = Some(reorder);
        self
    }

    pub fn with_gift_cards(mut self, gift_cards: GiftCardsData) -> Self {
        self.gift_cards = Some(gift_cards);
        self
    }
}

impl Signable for OrderData {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            optional(self.order_type.map(|t| t.as_str())),
            optional(self.availability.as_ref().map(|a| a.as_str())),
            optional(self.delivery.map(|d| d.as_str())),
            optional(self.delivery_mode.map(|m| m.code())),
            optional(self.delivery_email.as_ref()),
            optional(self.name_match),
            optional(self.address_match),
            optional(self.billing.as_ref().map(Signable::sign_text)),
            optional(self.shipping.as_ref().map(Signable::sign_text)),
            optional(self.shipping_added_at.as_ref()),
            optional(self.reorder),
            optional(self.gift_cards.as_ref().map(Signable::sign_text)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn address_sign_text_and_json() {
        let address = AddressData::new("Karlova 1", "Praha", "11000").unwrap();
        assert_eq!(address.sign_text().as_str(), "Karlova 1|Praha|11000|CZE");
        assert_eq!(
            serde_json::to_value(&address).unwrap(),
            json!({"address1": "Karlova 1", "city": "Praha", "zip": "11000", "country": "CZE"})
        );
    }

    #[test]
    fn address_full_sign_order() {
        let address = AddressData::new("Karlova 1", "Praha", "11000")
            .unwrap()
            .with_address2("Floor 2")
            .unwrap()
            .with_address3("Door 5")
            .unwrap()
            .with_state("10")
            .unwrap()
            .with_country("SVK")
            .unwrap();
        assert_eq!(
            address.sign_text().as_str(),
            "Karlova 1|Floor 2|Door 5|Praha|11000|10|SVK"
        );
    }

    #[test]
    fn address_limits() {
        assert!(AddressData::new("a".repeat(51), "Praha", "11000").is_err());
        assert!(AddressData::new("Karlova 1", "c".repeat(51), "11000").is_err());
        assert!(AddressData::new("Karlova 1", "Praha", "1".repeat(17)).is_err());
        let base = AddressData::new("Karlova 1", "Praha", "11000").unwrap();
        assert!(base.clone().with_address2("a".repeat(51)).is_err());
        assert!(base.clone().with_country("cz").is_err());
        assert!(base.with_country("CZ1").is_err());
    }

    #[test]
    fn gift_cards_quantity_range() {
        assert!(GiftCardsData::new(Some(100), Some(Currency::Czk), Some(0)).is_err());
        assert!(GiftCardsData::new(Some(100), Some(Currency::Czk), Some(100)).is_err());
        let cards = GiftCardsData::new(Some(100), Some(Currency::Czk), Some(2)).unwrap();
        assert_eq!(cards.sign_text().as_str(), "100|CZK|2");
        assert_eq!(
            serde_json::to_value(&cards).unwrap(),
            json!({"totalAmount": 100, "currency": "CZK", "quantity": 2})
        );
    }

    #[test]
    fn empty_order_signs_to_empty_text() {
        assert!(OrderData::new().sign_text().is_empty());
        assert_eq!(serde_json::to_value(OrderData::new()).unwrap(), json!({}));
    }

    #[test]
    fn order_sign_order_and_json_keys() {
        let order = OrderData::new()
            .with_type(OrderType::Purchase)
            .with_availability(OrderAvailability::Now)
            .with_delivery(DeliveryIndicator::Digital, Some(DeliveryMode::Electronic))
            .with_delivery_email("a@b.cz")
            .unwrap()
            .with_name_match(true)
            .with_billing(AddressData::new("Karlova 1", "Praha", "11000").unwrap())
            .with_reorder(false)
            .with_gift_cards(GiftCardsData::new(Some(500), Some(Currency::Eur), Some(1)).unwrap());
        assert_eq!(
            order.sign_text().as_str(),
            "purchase|now|digital|0|a@b.cz|true|Karlova 1|Praha|11000|CZE|false|500|EUR|1"
        );
        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!({
                "type": "purchase",
                "availability": "now",
                "delivery": "digital",
                "deliveryMode": 0,
                "deliveryEmail": "a@b.cz",
                "nameMatch": true,
                "billing": {"address1": "Karlova 1", "city": "Praha", "zip": "11000", "country": "CZE"},
                "reorder": false,
                "giftCards": {"totalAmount": 500, "currency": "EUR", "quantity": 1}
            })
        );
    }

    #[test]
    fn availability_date_passes_through() {
        let order = OrderData::new().with_availability(OrderAvailability::Date("2024-12-24".into()));
        assert_eq!(order.sign_text().as_str(), "2024-12-24");
    }

    #[test]
    fn delivery_indicator_wire_values() {
        assert_eq!(
            serde_json::to_value(DeliveryIndicator::ShippingVerified).unwrap(),
            DeliveryIndicator::ShippingVerified.as_str()
        );
    }
}
