use crate::{Decimal, StabilityGains};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvideStabilityEffects {
    pub stablecoin_to_stability_pool: Decimal,
    pub gains_to_depositor: StabilityGains,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawStabilityEffects {
    pub stablecoin_to_depositor: Decimal,
    pub gains_to_depositor: StabilityGains,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetEffects {
    pub stablecoin_to_burn: Decimal,
    pub collateral_received: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawGainToTroveEffects {
    pub collateral_to_trove: Decimal,
    pub reward_to_depositor: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardDistributionCalculation {
    pub collateral_gained_per_unit_staked: Decimal,
    pub stablecoin_loss_per_unit_staked: Decimal,
    pub last_collateral_error: Decimal,
}
