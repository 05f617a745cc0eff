// Amount module - Exact fixed-point conversion at the crate boundary

mod units;

pub use units::{from_base_units, scale_factor, to_base_units, UnitsError, MAX_DECIMALS};
