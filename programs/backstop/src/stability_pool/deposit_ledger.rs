//! Read side of a deposit record: what a depositor owns right now, computed
//! from their snapshot and the current accumulator state alone.

use crate::{
    state::epoch_to_scale_to_sum::EpochToScaleToSum,
    utils::{consts::SCALE_FACTOR, decimal::wad},
    BackstopError, Decimal, DepositSnapshot, RewardSums, StabilityGains, StabilityPoolState,
    StabilityProviderState, U256,
};

pub fn compounded_deposit(
    stability_pool_state: &StabilityPoolState,
    stability_provider_state: &StabilityProviderState,
) -> Result<Decimal, BackstopError> {
    if !stability_provider_state.has_deposit() {
        return Ok(Decimal::zero());
    }

    compounded_stake_from_snapshot(
        stability_pool_state.p,
        stability_pool_state.current_scale,
        stability_pool_state.current_epoch,
        stability_provider_state.deposited_stablecoin,
        &stability_provider_state.user_deposit_snapshot,
    )
}

pub fn compounded_stake_from_snapshot(
    p: Decimal,
    current_scale: u64,
    current_epoch: u64,
    initial_stake: Decimal,
    snapshot: &DepositSnapshot,
) -> Result<Decimal, BackstopError> {
    // consumed by a full depletion since the snapshot
    if snapshot.epoch != current_epoch {
        return Ok(Decimal::zero());
    }

    let scale_diff = current_scale
        .checked_sub(snapshot.scale)
        .ok_or(BackstopError::MathOverflow)?;

    match scale_diff {
        0 => initial_stake.try_mul_div_floor(p, snapshot.product),
        1 => {
            let denominator = scaled_product(snapshot.product, U256::from(SCALE_FACTOR))?;
            initial_stake.try_mul_div_floor(p, denominator)
        }
        _ => Ok(Decimal::zero()),
    }
}

/// Collateral and reward token accrued since the snapshot.
///
/// A deposit wiped by a depletion has forfeited everything, including what
/// the depleting offset distributed.
pub fn depositor_gains(
    stability_pool_state: &StabilityPoolState,
    stability_provider_state: &StabilityProviderState,
    epoch_to_scale_to_sum: &EpochToScaleToSum,
) -> Result<StabilityGains, BackstopError> {
    if !stability_provider_state.has_deposit() {
        return Ok(StabilityGains::default());
    }

    gains_from_snapshot(
        stability_pool_state.current_epoch,
        stability_provider_state.deposited_stablecoin,
        &stability_provider_state.user_deposit_snapshot,
        epoch_to_scale_to_sum,
    )
}

pub fn gains_from_snapshot(
    current_epoch: u64,
    initial_deposit: Decimal,
    snapshot: &DepositSnapshot,
    epoch_to_scale_to_sum: &EpochToScaleToSum,
) -> Result<StabilityGains, BackstopError> {
    if snapshot.epoch != current_epoch {
        return Ok(StabilityGains::default());
    }

    let next_scale = snapshot
        .scale
        .checked_add(1)
        .ok_or(BackstopError::MathOverflow)?;

    let first_portion = epoch_to_scale_to_sum
        .sum_or_zero(snapshot.epoch, snapshot.scale)
        .try_sub(&snapshot.sum)?;

    let second_portion = epoch_to_scale_to_sum
        .sum_or_zero(snapshot.epoch, next_scale)
        .div_scalar(SCALE_FACTOR)?;

    let RewardSums { collateral, reward } = first_portion.try_add(&second_portion)?;

    // amount * delta / P_snapshot / 1e18
    let denominator = scaled_product(snapshot.product, wad())?;

    Ok(StabilityGains {
        collateral: initial_deposit.try_mul_div_floor(collateral, denominator)?,
        reward: initial_deposit.try_mul_div_floor(reward, denominator)?,
    })
}

/// Snapshot for a record now holding `deposit`, zeroed when empty
pub fn new_deposit_snapshot(
    stability_pool_state: &StabilityPoolState,
    epoch_to_scale_to_sum: &EpochToScaleToSum,
    deposit: Decimal,
) -> DepositSnapshot {
    if deposit.is_zero() {
        DepositSnapshot::zeroed()
    } else {
        DepositSnapshot::new(
            epoch_to_scale_to_sum.sum_or_zero(
                stability_pool_state.current_epoch,
                stability_pool_state.current_scale,
            ),
            stability_pool_state.p,
            stability_pool_state.current_scale,
            stability_pool_state.current_epoch,
        )
    }
}

fn scaled_product(value: Decimal, factor: U256) -> Result<Decimal, BackstopError> {
    value
        .to_scaled_val()
        .checked_mul(factor)
        .map(Decimal::from_scaled)
        .ok_or(BackstopError::MathOverflow)
}
