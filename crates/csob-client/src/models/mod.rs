//! Domain models embedded in requests and responses.

pub mod cart;
pub mod customer;
pub mod enums;
pub mod fingerprint;
pub mod init_params;
pub mod merchant_data;
pub mod order;

pub use cart::{Cart, CartItem};
pub use customer::{AccountData, CustomerData, LoginAuth, LoginData};
pub use enums::{Currency, Language, PayMethod, PayOperation, PaymentStatus, ReturnMethod};
pub use fingerprint::{BrowserFingerprint, Fingerprint, SdkFingerprint};
pub use init_params::{ApplePayInitParams, GooglePayInitParams};
pub use merchant_data::MerchantData;
pub use order::{
    AddressData, DeliveryIndicator, DeliveryMode, GiftCardsData, OrderAvailability, OrderData,
    OrderType,
};
