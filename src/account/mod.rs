// Account module - Opaque account identifiers and the zero sentinel

mod address;

pub use address::{AccountId, AddressError, ACCOUNT_ID_LEN};
