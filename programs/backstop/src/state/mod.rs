use borsh::{BorshDeserialize, BorshSerialize};
use num_derive::FromPrimitive;

use crate::Decimal;

mod address;
mod deposit_snapshot;
pub mod epoch_to_scale_to_sum;
mod global_config;
mod issuance_state;
mod reward_sums;
mod stability_pool_state;
mod stability_provider_state;

pub use address::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct StabilityPoolParams {
    // Administrator, the only one allowed to update the global config
    pub owner: Address,

    // Liquidation engine, the only caller allowed to offset debt
    pub trove_manager: Address,

    // Custody address the stablecoin deposits are moved to
    pub pool_address: Address,

    pub deployment_time: u64,
    pub issuance: IssuanceParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct IssuanceParams {
    // Total reward token allocated to the stability pool
    pub supply_cap: Decimal,

    // Per minute decay factor, 1e18 scaled
    pub issuance_factor: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct GlobalConfig {
    pub version: u8,
    pub is_provide_allowed: bool,

    // Max total deposits in whole stablecoin units, 0 means unlimited
    pub provide_limit: u64,
}

#[derive(FromPrimitive, PartialEq, Eq, Clone, Copy, Debug)]
pub enum GlobalConfigOption {
    IsProvideAllowed = 0,
    ProvideLimit = 1,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct StabilityPoolState {
    pub version: u8,
    pub num_users: u64,
    pub total_users_providing_stability: u64,

    // Face value of all deposits, compounding is applied at read time
    pub total_deposits: Decimal,

    // Collateral received from offsets and not yet paid out
    pub total_collateral: Decimal,

    // Product-sum
    pub p: Decimal,
    pub current_epoch: u64,
    pub current_scale: u64,

    // Precision errors carried to the next distribution
    pub last_collateral_error_offset: Decimal,
    pub last_reward_error_offset: Decimal,

    // Lifetime totals
    pub total_collateral_gains_paid: Decimal,
    pub total_reward_gains_paid: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct IssuanceState {
    pub deployment_time: u64,
    pub last_issuance_time: u64,
    pub total_issued: Decimal,
    pub supply_cap: Decimal,
    pub issuance_factor: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct StabilityProviderState {
    pub version: u8,
    pub owner: Address,

    // State
    pub user_id: u64,
    pub deposited_stablecoin: Decimal,
    pub user_deposit_snapshot: DepositSnapshot,

    // Lifetime gains already paid out
    pub cumulative_collateral_gain: Decimal,
    pub cumulative_reward_gain: Decimal,
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct DepositSnapshot {
    pub sum: RewardSums,
    pub product: Decimal,
    pub scale: u64,
    pub epoch: u64,
}

/// Per `(epoch, scale)` running sums: `S` for collateral, `G` for the reward token
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct RewardSums {
    pub collateral: Decimal,
    pub reward: Decimal,
}

/// Amounts owed to (or paid to) a depositor
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct StabilityGains {
    pub collateral: Decimal,
    pub reward: Decimal,
}
