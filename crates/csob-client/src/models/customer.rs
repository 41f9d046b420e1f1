//! Customer information sent with payment init for 3-D Secure risk
//! assessment.

use csob_core::validate;
use csob_core::{field, optional, SignValue, Signable, ValidationError};
use serde::Serialize;

/// How the customer authenticated at the merchant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginAuth {
    Guest,
    Account,
    Federated,
    Issuer,
    #[serde(rename = "thirdparty")]
    ThirdParty,
    Fido,
    FidoSigned,
    Api,
}

impl LoginAuth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Account => "account",
            Self::Federated => "federated",
            Self::Issuer => "issuer",
            Self::ThirdParty => "thirdparty",
            Self::Fido => "fido",
            Self::FidoSigned => "fido_signed",
            Self::Api => "api",
        }
    }
}

/// Customer account history at the merchant.
///
/// Timestamps are ISO 8601 strings (`2024-09-19T16:41:56+02:00`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_pwd_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_history: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payments_day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payments_year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oneclick_adds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspicious: Option<bool>,
}

impl Signable for AccountData {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            optional(self.created_at.as_ref()),
            optional(self.changed_at.as_ref()),
            optional(self.changed_pwd_at.as_ref()),
            optional(self.order_history),
            optional(self.payments_day),
            optional(self.payments_year),
            optional(self.oneclick_adds),
            optional(self.suspicious),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<LoginAuth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_data: Option<String>,
}

impl Signable for LoginData {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            optional(self.auth.map(|a| a.as_str())),
            optional(self.auth_at.as_ref()),
            optional(self.auth_data.as_ref()),
        ]
    }
}

/// Customer contact details and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerData {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    home_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    work_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mobile_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account: Option<AccountData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    login: Option<LoginData>,
}

impl CustomerData {
    /// # Errors
    ///
    /// Fails when `name` is empty or longer than 45 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        validate::non_empty_max_chars("name", &name, 45)?;
        Ok(Self {
            name,
            email: None,
            home_phone: None,
            work_phone: None,
            mobile_phone: None,
            account: None,
            login: None,
        })
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();
        validate::max_chars("email", &email, 100)?;
        if !email.contains('@') {
            return Err(ValidationError::new("email", "must contain '@'"));
        }
        self.email = Some(email);
        Ok(self)
    }

    pub fn with_home_phone(mut self, phone: impl Into<String>) -> Result<Self, ValidationError> {
        self.home_phone = Some(check_phone("homePhone", phone.into())?);
        Ok(self)
    }

    pub fn with_work_phone(mut self, phone: impl Into<String>) -> Result<Self, ValidationError> {
        self.work_phone = Some(check_phone("workPhone", phone.into())?);
        Ok(self)
    }

    pub fn with_mobile_phone(mut self, phone: impl Into<String>) -> Result<Self, ValidationError> {
        self.mobile_phone = Some(check_phone("mobilePhone", phone.into())?);
        Ok(self)
    }

    pub fn with_account(mut self, account: AccountData) -> Self {
        self.account = Some(account);
        self
    }

    pub fn with_login(mut self, login: LoginData) -> Self {
        self.login = Some(login);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Phone numbers use the `+{country}.{number}` form, e.g. `+420.800900900`.
fn check_phone(field_name: &str, phone: String) -> Result<String, ValidationError> {
    let valid = phone
        .strip_prefix('+')
        .and_then(|rest| rest.split_once('.'))
        .map(|(cc, number)| {
            (1..=3).contains(&cc.len())
                && (1..=15).contains(&number.len())
                && cc.bytes().all(|b| b.is_ascii_digit())
                && number.bytes().all(|b| b.is_ascii_digit())
        })
        .unwrap_or(false);
    if !valid {
        return Err(ValidationError::new(
            field_name,
            format!("expected +CC.NUMBER, got {phone:?}"),
        ));
    }
    Ok(phone)
}

impl Signable for CustomerData {
    fn sign_fields(&self) -> Vec<Option<SignValue>> {
        vec![
            field(&self.name),
            optional(self.email.as_ref()),
            optional(self.home_phone.as_ref()),
            optional(self.work_phone.as_ref()),
            optional(self.mobile_phone.as_ref()),
            optional(self.account.as_ref().map(Signable::sign_text)),
            optional(self.login.as_ref().map(Signable::sign_text)),
        ]
    }
}
