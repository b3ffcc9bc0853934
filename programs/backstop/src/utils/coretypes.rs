use super::decimal::Decimal;
use crate::BackstopError;

pub trait CheckedAssign {
    fn checked_add_assign(&mut self, rhs: Self) -> Result<(), BackstopError>;
    fn checked_sub_assign(&mut self, rhs: Self) -> Result<(), BackstopError>;
}

impl CheckedAssign for u64 {
    fn checked_add_assign(&mut self, rhs: Self) -> Result<(), BackstopError> {
        *self = self.checked_add(rhs).ok_or(BackstopError::MathOverflow)?;
        Ok(())
    }
    fn checked_sub_assign(&mut self, rhs: Self) -> Result<(), BackstopError> {
        *self = self.checked_sub(rhs).ok_or(BackstopError::MathOverflow)?;
        Ok(())
    }
}

impl CheckedAssign for Decimal {
    fn checked_add_assign(&mut self, rhs: Self) -> Result<(), BackstopError> {
        *self = self.try_add(rhs)?;
        Ok(())
    }
    fn checked_sub_assign(&mut self, rhs: Self) -> Result<(), BackstopError> {
        *self = self.try_sub(rhs)?;
        Ok(())
    }
}

#[cfg(test)]
pub struct USD;
#[cfg(test)]
pub struct COLL;
#[cfg(test)]
pub struct REWARD;

#[cfg(test)]
impl USD {
    pub fn from(amount: f64) -> Decimal {
        super::math::decimal_from_f64(amount)
    }
}

#[cfg(test)]
impl COLL {
    pub fn from(amount: f64) -> Decimal {
        super::math::decimal_from_f64(amount)
    }
}

#[cfg(test)]
impl REWARD {
    pub fn from(amount: f64) -> Decimal {
        super::math::decimal_from_f64(amount)
    }
}
