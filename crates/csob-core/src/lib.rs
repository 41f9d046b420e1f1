//! # csob-core: foundational types for the CSOB gateway SDK
//!
//! Leaf crate of the workspace. Defines the pieces every other crate builds
//! on and that carry the signing invariants:
//!
//! 1. **`SignText` newtype.** All signing and verification payloads are built
//!    through `SignText::from_fields()`. Absent fields are dropped, the rest
//!    are rendered and `|`-joined in the order the entity declares.
//!
//! 2. **`Dttm`.** The gateway's `YYYYMMDDHHMMSS` timestamp.
//!
//! 3. **`ResultCode`.** One closed table from numeric gateway result codes to
//!    semantic outcomes, with an `Other` catch-all.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `csob-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod result_code;
pub mod sign_text;
pub mod temporal;
pub mod validate;

pub use error::{CryptoError, ValidationError};
pub use result_code::{ResultCode, ResultCodeError};
pub use sign_text::{field, optional, SignText, SignValue, Signable};
pub use temporal::Dttm;
