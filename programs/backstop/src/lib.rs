use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use decimal_wad::error::DecimalError;
use num_derive::FromPrimitive;
use thiserror::Error;

pub mod events;
pub mod token_operations;
pub mod utils;

mod handler_initialize_stability_pool;
mod handler_offset;
mod handler_stability_provide;
mod handler_stability_withdraw;
mod handler_trigger_issuance;
mod handler_update_global_config;
mod handler_withdraw_gain_to_trove;
pub mod stability_pool;

pub mod state;

pub use events::PoolEvent;
pub use stability_pool::types::{
    OffsetEffects, ProvideStabilityEffects, WithdrawGainToTroveEffects, WithdrawStabilityEffects,
};
pub use state::*;
pub use token_operations::Context;
pub use utils::{bn::U256, decimal::Decimal};

use stability_pool::deposit_ledger;
use state::epoch_to_scale_to_sum::EpochToScaleToSum;

/// The stability pool service.
///
/// Owns every piece of pool state and is the single writer for all of it.
/// Mutating operations take `&mut self` and a per-call [`Context`] carrying
/// the caller identity, the current time and the external collaborators.
/// Each operation either commits completely or leaves the pool untouched.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct StabilityPool {
    pub(crate) params: StabilityPoolParams,
    pub(crate) config: GlobalConfig,
    pub(crate) state: StabilityPoolState,
    pub(crate) epoch_to_scale_to_sum: EpochToScaleToSum,
    pub(crate) issuance_state: IssuanceState,
    pub(crate) providers: BTreeMap<Address, StabilityProviderState>,

    #[borsh_skip]
    pub(crate) events: Vec<PoolEvent>,
}

impl StabilityPool {
    pub fn initialize(params: StabilityPoolParams) -> Result<Self, BackstopError> {
        handler_initialize_stability_pool::process(params)
    }

    /// Deposit `amount` stablecoin on behalf of `ctx.caller`, paying out
    /// pending gains.
    pub fn provide(
        &mut self,
        ctx: &mut Context<'_>,
        amount: Decimal,
    ) -> Result<ProvideStabilityEffects, BackstopError> {
        handler_stability_provide::process(self, ctx, amount)
    }

    /// Withdraw up to `amount` stablecoin, capped at the compounded deposit.
    /// `amount == 0` only claims gains.
    pub fn withdraw(
        &mut self,
        ctx: &mut Context<'_>,
        amount: Decimal,
    ) -> Result<WithdrawStabilityEffects, BackstopError> {
        handler_stability_withdraw::process(self, ctx, amount)
    }

    /// Cancel `debt_to_offset` against the pool deposits and credit
    /// `collateral_to_add` to the depositors. Trove manager only.
    pub fn offset(
        &mut self,
        ctx: &mut Context<'_>,
        debt_to_offset: Decimal,
        collateral_to_add: Decimal,
    ) -> Result<OffsetEffects, BackstopError> {
        handler_offset::process(self, ctx, debt_to_offset, collateral_to_add)
    }

    /// Move the caller's collateral gain into their trove instead of their wallet.
    pub fn withdraw_collateral_gain_to_trove(
        &mut self,
        ctx: &mut Context<'_>,
        position: Address,
    ) -> Result<WithdrawGainToTroveEffects, BackstopError> {
        handler_withdraw_gain_to_trove::process(self, ctx, position)
    }

    /// Pull the reward token issued since the last pull into `G`.
    pub fn trigger_issuance(&mut self, now_timestamp: u64) -> Result<Decimal, BackstopError> {
        handler_trigger_issuance::process(self, now_timestamp)
    }

    pub fn update_global_config(
        &mut self,
        ctx: &Context<'_>,
        key: u16,
        value: u64,
    ) -> Result<GlobalConfigOption, BackstopError> {
        handler_update_global_config::process(self, ctx, key, value)
    }

    pub fn take_events(&mut self) -> Vec<PoolEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pack(&self) -> Result<Vec<u8>, BackstopError> {
        self.try_to_vec()
            .map_err(|_| BackstopError::CannotSerializeState)
    }

    pub fn unpack(bytes: &[u8]) -> Result<Self, BackstopError> {
        StabilityPool::try_from_slice(bytes).map_err(|_| BackstopError::CannotDeserializeState)
    }

    // Queries

    pub fn params(&self) -> &StabilityPoolParams {
        &self.params
    }

    pub fn global_config(&self) -> &GlobalConfig {
        &self.config
    }

    pub fn pool_state(&self) -> &StabilityPoolState {
        &self.state
    }

    pub fn issuance_state(&self) -> &IssuanceState {
        &self.issuance_state
    }

    pub fn total_deposits(&self) -> Decimal {
        self.state.total_deposits
    }

    pub fn total_collateral(&self) -> Decimal {
        self.state.total_collateral
    }

    pub fn total_issued(&self) -> Decimal {
        self.issuance_state.total_issued
    }

    pub fn p(&self) -> Decimal {
        self.state.p
    }

    pub fn current_epoch(&self) -> u64 {
        self.state.current_epoch
    }

    pub fn current_scale(&self) -> u64 {
        self.state.current_scale
    }

    pub fn num_users(&self) -> u64 {
        self.state.num_users
    }

    pub fn total_users_providing_stability(&self) -> u64 {
        self.state.total_users_providing_stability
    }

    /// `(S, G)` of a bucket, zero if the bucket was never opened
    pub fn epoch_to_scale_to_sum(&self, epoch: u64, scale: u64) -> RewardSums {
        self.epoch_to_scale_to_sum.sum_or_zero(epoch, scale)
    }

    pub fn provider(&self, depositor: &Address) -> Option<&StabilityProviderState> {
        self.providers.get(depositor)
    }

    /// Face value recorded at the depositor's last interaction
    pub fn deposit(&self, depositor: &Address) -> Decimal {
        self.providers
            .get(depositor)
            .map(|provider| provider.deposited_stablecoin)
            .unwrap_or_default()
    }

    pub fn deposit_snapshot(&self, depositor: &Address) -> DepositSnapshot {
        self.providers
            .get(depositor)
            .map(|provider| provider.user_deposit_snapshot)
            .unwrap_or_default()
    }

    pub fn compounded_deposit(&self, depositor: &Address) -> Result<Decimal, BackstopError> {
        match self.providers.get(depositor) {
            Some(provider) => deposit_ledger::compounded_deposit(&self.state, provider),
            None => Ok(Decimal::zero()),
        }
    }

    pub fn depositor_collateral_gain(&self, depositor: &Address) -> Result<Decimal, BackstopError> {
        Ok(self.depositor_gains(depositor)?.collateral)
    }

    pub fn depositor_reward_gain(&self, depositor: &Address) -> Result<Decimal, BackstopError> {
        Ok(self.depositor_gains(depositor)?.reward)
    }

    fn depositor_gains(&self, depositor: &Address) -> Result<StabilityGains, BackstopError> {
        match self.providers.get(depositor) {
            Some(provider) => deposit_ledger::depositor_gains(
                &self.state,
                provider,
                &self.epoch_to_scale_to_sum,
            ),
            None => Ok(StabilityGains::default()),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum BackstopError {
    #[error("Cannot provide zero stability")]
    ZeroAmount = 300,

    #[error("Depositor has no active deposit")]
    NoActiveDeposit = 301,

    #[error("Cannot withdraw while there are undercollateralized troves")]
    UnsafeWithdrawalBlocked = 302,

    #[error("Caller is not allowed to perform this operation")]
    Unauthorized = 303,

    #[error("Stability pool cannot offset this much debt")]
    InsufficientPoolDeposits = 304,

    #[error("Stablecoin transfer failed")]
    TransferFailed = 305,

    #[error("Collateral transfer failed")]
    CollateralTransferFailed = 306,

    #[error("Reward token transfer failed")]
    RewardTransferFailed = 307,

    #[error("Depositor does not have an active trove")]
    NoActivePosition = 308,

    #[error("Depositor has no collateral gain to withdraw")]
    NoGainToWithdraw = 309,

    #[error("Mathematical operation with overflow")]
    MathOverflow = 310,

    #[error("Providing stability is currently disabled")]
    ProvideNotAllowed = 311,

    #[error("Deposit would exceed the stability pool limit")]
    ProvideLimitExceeded = 312,

    #[error("Key is not present in global config")]
    GlobalConfigKeyError = 313,

    #[error("Cannot deserialize stability pool state")]
    CannotDeserializeState = 314,

    #[error("Cannot serialize stability pool state")]
    CannotSerializeState = 315,

    #[error("Epoch and scale can only move forward one step at a time")]
    InvalidEpochScaleTransition = 316,

    #[error("Issuance factor must be below one")]
    InvalidIssuanceFactor = 317,
}

impl BackstopError {
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        num::FromPrimitive::from_u32(code)
    }
}

impl From<DecimalError> for BackstopError {
    fn from(err: DecimalError) -> BackstopError {
        match err {
            DecimalError::MathOverflow => BackstopError::MathOverflow,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::BackstopError;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(BackstopError::ZeroAmount.code(), 300);
        assert_eq!(BackstopError::NoGainToWithdraw.code(), 309);
        assert_eq!(
            BackstopError::from_code(304),
            Some(BackstopError::InsufficientPoolDeposits)
        );
        assert_eq!(BackstopError::from_code(9999), None);
        assert_eq!(
            BackstopError::UnsafeWithdrawalBlocked.to_string(),
            "Cannot withdraw while there are undercollateralized troves"
        );
    }
}
