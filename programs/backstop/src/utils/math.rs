#[cfg(test)]
use super::{bn::U256, consts::DECIMAL_PRECISION, decimal::Decimal};

// f64 carries ~15 significant digits, keep 9 decimals and pad the rest
#[cfg(test)]
const F64_SCALE: f64 = 1_000_000_000.0;
#[cfg(test)]
const F64_PAD: u128 = 1_000_000_000;

#[cfg(test)]
pub fn decimal_from_f64(number: f64) -> Decimal {
    let scaled = (number * F64_SCALE).round() as u128;
    Decimal::from_scaled(U256::from(scaled) * U256::from(F64_PAD))
}

#[cfg(test)]
pub fn decimal_to_f64(number: Decimal) -> f64 {
    let raw = number.to_scaled_val();
    let integer = (raw / U256::from(DECIMAL_PRECISION)).low_u128() as f64;
    let fraction = (raw % U256::from(DECIMAL_PRECISION)).low_u128() as f64;
    integer + fraction / (DECIMAL_PRECISION as f64)
}
