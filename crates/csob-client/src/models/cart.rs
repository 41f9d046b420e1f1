//! Shopping cart shown on the payment page.
//!
//! The gateway accepts one or two cart lines. Amounts are in the smallest
//! currency unit (hundredths).

use csob_core::validate;
use csob_core::{field, optional, SignValue, Signable, ValidationError};
use serde::Serialize;

/// Name of the line synthesized when a payment is initialised without a
/// cart.
pub const DEFAULT_ITEM_NAME: &str = "Payment";

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    name: String,
    quantity: u32,
    amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl CartItem {
    /// # Errors
    ///
    /// Fails when `name` is empty or longer than 20 characters, or
    /// `quantity` is zero.
    pub fn new(name: impl Into<String>, quantity: u32, amount: u64) -> Result<Self, ValidationError> {
        let name = name.into();
        validate::non_empty_max_chars("name", &name, 20)?;
        if quantity < 1 {
            return Err(ValidationError::new("quantity", "must be at least 1"));
        }
        Ok(Self {
            name,
            quantity,
            amount,
            description: None,
        })
    }

    /// # Errors
    ///
    /// Fails when `description` is longer than 40 characters.
    pub fn with_description(mut self, description: impl Into<String>) -> Result<Self, ValidationError> {
        let description = description.into();
        validate::max_chars("description", &description, 40)?;
        self.description = Some(description);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Signable for CartItem {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            field(&self.name),
            field(self.quantity),
            field(self.amount),
            optional(self.description.as_ref()),
        ]
    }
}

/// Cart with one or two lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart(Vec<CartItem>);

impl Cart {
    /// # Errors
    ///
    /// Fails unless `items` has one or two entries.
    pub fn new(items: Vec<CartItem>) -> Result<Self, ValidationError> {
        if items.is_empty() || items.len() > 2 {
            return Err(ValidationError::new(
                "cart",
                format!("must contain 1 or 2 items, got {}", items.len()),
            ));
        }
        Ok(Self(items))
    }

    /// Single-line cart covering the whole amount.
    pub(crate) fn single(total_amount: u64) -> Self {
        Self(vec![CartItem {
            name: DEFAULT_ITEM_NAME.to_string(),
            quantity: 1,
            amount: total_amount,
            description: None,
        }])
    }

    pub fn items(&self) -> &[CartItem] {
        &self.0
    }

    /// Sum of `quantity * amount` over all lines.
    pub fn total_amount(&self) -> u64 {
        self.0
            .iter()
            .map(|item| u64::from(item.quantity).saturating_mul(item.amount))
            .fold(0u64, u64::saturating_add)
    }
}

impl Signable for Cart {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        self.0.iter().map(|item| field(item.sign_text())).collect()
    }
}
