use super::{RewardSums, StabilityGains};
use crate::{BackstopError, Decimal};

impl RewardSums {
    pub fn new(collateral: Decimal, reward: Decimal) -> Self {
        Self { collateral, reward }
    }

    pub fn try_add(&self, other: &RewardSums) -> Result<Self, BackstopError> {
        Ok(Self {
            collateral: self.collateral.try_add(other.collateral)?,
            reward: self.reward.try_add(other.reward)?,
        })
    }

    pub fn try_sub(&self, other: &RewardSums) -> Result<Self, BackstopError> {
        Ok(Self {
            collateral: self.collateral.try_sub(other.collateral)?,
            reward: self.reward.try_sub(other.reward)?,
        })
    }

    /// Raw integer division, used to bring a next-scale sum back to the snapshot scale
    pub fn div_scalar(&self, scalar: u128) -> Result<Self, BackstopError> {
        let divisor = Decimal::from_scaled_val(scalar);
        Ok(Self {
            collateral: self
                .collateral
                .try_mul_div_floor(Decimal::from_scaled_val(1), divisor)?,
            reward: self
                .reward
                .try_mul_div_floor(Decimal::from_scaled_val(1), divisor)?,
        })
    }
}

impl StabilityGains {
    pub fn new(collateral: Decimal, reward: Decimal) -> Self {
        Self { collateral, reward }
    }

    pub fn is_zero(&self) -> bool {
        self.collateral.is_zero() && self.reward.is_zero()
    }
}
