use crate::error::{SupplyError, SupplyResult};

/// Fractional digits used when rendering smallest-unit amounts.
pub const DISPLAY_DECIMALS: u32 = 6;

/// Parses a chain amount into smallest units.
///
/// Accepts plain integers (`Coin`) and decimal strings (`DecCoin`), in which
/// case only the integer part is kept.
pub fn parse_amount(raw: &str) -> SupplyResult<u128> {
    let trimmed = raw.trim();
    let integer_part = trimmed.split('.').next().unwrap_or_default();

    if integer_part.is_empty() {
        return Err(SupplyError::decode("amount", format!("empty amount {:?}", raw)));
    }

    integer_part
        .parse::<u128>()
        .map_err(|e| SupplyError::decode("amount", format!("{:?}: {}", raw, e)))
}

pub fn parse_rate(raw: &str) -> SupplyResult<f64> {
    let rate = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| SupplyError::decode("rate", format!("{:?}: {}", raw, e)))?;

    if !rate.is_finite() {
        return Err(SupplyError::decode("rate", format!("{:?} is not finite", raw)));
    }

    Ok(rate)
}

/// Renders `atomics` as a decimal with `decimals` fractional digits,
/// dropping trailing zeros (`860000` with 6 digits is `0.86`).
pub fn format_atomics(atomics: u128, decimals: u32) -> String {
    let scale = 10u128.pow(decimals);
    let whole = atomics / scale;
    let fraction = atomics % scale;

    if fraction == 0 {
        return whole.to_string();
    }

    let fraction = format!("{:0width$}", fraction, width = decimals as usize);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

/// Display name of a base denomination: unit prefix dropped, upper-cased.
pub fn display_denom(denom: &str) -> String {
    let mut chars = denom.chars();
    chars.next();
    chars.as_str().to_uppercase()
}
