//! Fixed point decimal backed by a 256 bit integer.
//!
//! The raw value is scaled by 10^18, so `Decimal::one()` holds
//! `1_000_000_000_000_000_000`. Every division truncates towards zero
//! unless the method name says otherwise.

use std::fmt;
use std::io;

use borsh::{BorshDeserialize, BorshSerialize};

use super::bn::U256;
use super::consts::DECIMAL_PRECISION;
use crate::BackstopError;

#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(pub U256);

impl Decimal {
    pub fn zero() -> Self {
        Decimal(U256::zero())
    }

    pub fn one() -> Self {
        Decimal(wad())
    }

    pub fn from_scaled_val(scaled_val: u128) -> Self {
        Decimal(U256::from(scaled_val))
    }

    pub fn from_scaled(scaled_val: U256) -> Self {
        Decimal(scaled_val)
    }

    pub fn to_scaled_val(&self) -> U256 {
        self.0
    }

    /// Whole units, `from_units(5)` is `5.0`
    pub fn from_units(units: u64) -> Self {
        // u64::MAX * 10^18 < 2^128, cannot overflow
        Decimal(U256::from(units) * wad())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn try_add(self, rhs: Self) -> Result<Self, BackstopError> {
        self.0
            .checked_add(rhs.0)
            .map(Decimal)
            .ok_or(BackstopError::MathOverflow)
    }

    pub fn try_sub(self, rhs: Self) -> Result<Self, BackstopError> {
        self.0
            .checked_sub(rhs.0)
            .map(Decimal)
            .ok_or(BackstopError::MathOverflow)
    }

    pub fn saturating_sub(self, rhs: Self) -> Self {
        Decimal(self.0.saturating_sub(rhs.0))
    }

    /// `self * rhs / 1e18`
    pub fn try_mul(self, rhs: Self) -> Result<Self, BackstopError> {
        self.try_mul_div_floor(rhs, Decimal::one())
    }

    /// `self * 1e18 / rhs`
    pub fn try_div(self, rhs: Self) -> Result<Self, BackstopError> {
        self.try_mul_div_floor(Decimal::one(), rhs)
    }

    /// `ceil(self * 1e18 / rhs)`
    pub fn try_div_ceil(self, rhs: Self) -> Result<Self, BackstopError> {
        self.try_mul_div_ceil(Decimal::one(), rhs)
    }

    /// Raw `floor(self * num / den)`, no rescaling
    pub fn try_mul_div_floor(self, num: Self, den: Self) -> Result<Self, BackstopError> {
        mul_div_floor(self.0, num.0, den.0)
            .map(Decimal)
            .ok_or(BackstopError::MathOverflow)
    }

    /// Raw `ceil(self * num / den)`, no rescaling
    pub fn try_mul_div_ceil(self, num: Self, den: Self) -> Result<Self, BackstopError> {
        let numerator = self.0.checked_mul(num.0).ok_or(BackstopError::MathOverflow)?;
        if den.0.is_zero() {
            return Err(BackstopError::MathOverflow);
        }
        let quotient = numerator / den.0;
        let rounded = if (quotient * den.0) == numerator {
            quotient
        } else {
            quotient
                .checked_add(U256::one())
                .ok_or(BackstopError::MathOverflow)?
        };
        Ok(Decimal(rounded))
    }

    pub fn min(self, rhs: Self) -> Self {
        if self <= rhs {
            self
        } else {
            rhs
        }
    }
}

pub fn wad() -> U256 {
    U256::from(DECIMAL_PRECISION)
}

pub fn mul_div_floor(a: U256, b: U256, c: U256) -> Option<U256> {
    a.checked_mul(b)?.checked_div(c)
}

impl From<u128> for Decimal {
    fn from(scaled_val: u128) -> Self {
        Decimal::from_scaled_val(scaled_val)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let integer = self.0 / wad();
        let fraction = (self.0 % wad()).to_string();
        let padding = "0".repeat(18 - fraction.len());
        write!(f, "{}.{}{}", integer, padding, fraction)
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({})", self)
    }
}

impl BorshSerialize for Decimal {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut bytes = [0_u8; 32];
        self.0.to_little_endian(&mut bytes);
        writer.write_all(&bytes)
    }
}

impl BorshDeserialize for Decimal {
    fn deserialize(buf: &mut &[u8]) -> io::Result<Self> {
        if buf.len() < 32 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Unexpected length of input",
            ));
        }
        let (head, rest) = buf.split_at(32);
        let value = U256::from_little_endian(head);
        *buf = rest;
        Ok(Decimal(value))
    }
}
