// Fixed-point unit conversion
//
// Amounts inside the ledger are integers scaled by 10^decimals. External
// decimal input is converted exactly or rejected here, at the boundary.
// Floating point never enters: the input is parsed digit by digit.

use thiserror::Error;

/// Largest number of decimals whose scale factor fits in u64
pub const MAX_DECIMALS: u8 = 19;

#[derive(Error, Debug)]
pub enum UnitsError {
    #[error("Unsupported decimals: {0} exceeds the supported maximum")]
    DecimalsOutOfRange(u8),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Precision loss: {digits} fractional digits exceed the {decimals} supported")]
    PrecisionLoss { digits: usize, decimals: u8 },

    #[error("Amount overflows the representable range")]
    Overflow,
}

/// Scale factor for a given number of decimals (10^decimals)
pub fn scale_factor(decimals: u8) -> Result<u64, UnitsError> {
    if decimals > MAX_DECIMALS {
        return Err(UnitsError::DecimalsOutOfRange(decimals));
    }
    Ok(10u64.pow(decimals as u32))
}

/// Convert a decimal string (e.g. "1234.5678") to base units, exactly
///
/// Rejects input with more fractional digits than the ledger supports
/// (unless the excess digits are zeros) and values that do not fit in u64.
pub fn to_base_units(input: &str, decimals: u8) -> Result<u64, UnitsError> {
    let scale = scale_factor(decimals)?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UnitsError::InvalidAmount("amount cannot be empty".into()));
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(UnitsError::InvalidAmount(format!("'{}' has no digits", trimmed)));
    }

    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(UnitsError::InvalidAmount(format!(
            "'{}' is not an unsigned decimal number",
            trimmed
        )));
    }

    if fraction.len() > decimals as usize
        && fraction[decimals as usize..].chars().any(|c| c != '0')
    {
        return Err(UnitsError::PrecisionLoss {
            digits: fraction.len(),
            decimals,
        });
    }

    let mut units: u64 = 0;
    for c in whole.chars() {
        let digit = (c as u8 - b'0') as u64;
        units = units
            .checked_mul(10)
            .and_then(|u| u.checked_add(digit))
            .ok_or(UnitsError::Overflow)?;
    }
    units = units.checked_mul(scale).ok_or(UnitsError::Overflow)?;

    // Fraction digits sum to less than one whole unit, so this part
    // cannot overflow on its own.
    let mut frac_units: u64 = 0;
    let mut frac_scale = scale;
    for c in fraction.chars().take(decimals as usize) {
        let digit = (c as u8 - b'0') as u64;
        frac_scale /= 10;
        frac_units += digit * frac_scale;
    }

    units.checked_add(frac_units).ok_or(UnitsError::Overflow)
}

/// Render base units as a decimal string with the full fraction width
pub fn from_base_units(amount: u64, decimals: u8) -> Result<String, UnitsError> {
    let scale = scale_factor(decimals)?;

    if decimals == 0 {
        return Ok(amount.to_string());
    }

    let whole = amount / scale;
    let fraction = amount % scale;
    Ok(format!("{}.{:0width$}", whole, fraction, width = decimals as usize))
}
