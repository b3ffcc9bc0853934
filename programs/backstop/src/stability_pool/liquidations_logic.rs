//! Product-sum accumulator.
//!
//! `P` tracks how much of a unit deposited at the start of the current
//! `(epoch, scale)` is left after all offsets since. `S` and `G` accumulate,
//! per bucket, `gain_per_unit_staked * P` for collateral and the reward token.
//! Sums are stored without dividing by `1e18`, the depositor ledger divides
//! once at read time.

use tracing::debug;

use crate::{
    fail,
    stability_pool::types::RewardDistributionCalculation,
    state::epoch_to_scale_to_sum::EpochToScaleToSum,
    utils::{
        consts::{DECIMAL_PRECISION, SCALE_FACTOR},
        decimal::wad,
    },
    BackstopError, Decimal, RewardSums, StabilityPoolState,
};

/// `(amount * 1e18 + last_error) / total_deposits` and the new remainder.
pub fn compute_gain_per_unit_staked(
    amount: Decimal,
    last_error: Decimal,
    total_deposits: Decimal,
) -> Result<(Decimal, Decimal), BackstopError> {
    let numerator = amount
        .to_scaled_val()
        .checked_mul(wad())
        .and_then(|n| n.checked_add(last_error.to_scaled_val()))
        .ok_or(BackstopError::MathOverflow)?;

    let gain_per_unit_staked = numerator
        .checked_div(total_deposits.to_scaled_val())
        .ok_or(BackstopError::MathOverflow)?;

    let error = gain_per_unit_staked
        .checked_mul(total_deposits.to_scaled_val())
        .and_then(|distributed| numerator.checked_sub(distributed))
        .ok_or(BackstopError::MathOverflow)?;

    Ok((
        Decimal::from_scaled(gain_per_unit_staked),
        Decimal::from_scaled(error),
    ))
}

/// Rounds up so the pool never cancels more debt than it deducts.
pub fn compute_stablecoin_loss_per_unit_staked(
    debt_to_offset: Decimal,
    total_deposits: Decimal,
) -> Result<Decimal, BackstopError> {
    if debt_to_offset > total_deposits {
        return Err(BackstopError::InsufficientPoolDeposits);
    }

    let loss_per_unit_staked = match debt_to_offset {
        // full depletion
        debt if debt == total_deposits => Decimal::one(),
        // only a reward
        debt if debt.is_zero() => Decimal::zero(),
        debt => debt.try_div_ceil(total_deposits)?.min(Decimal::one()),
    };

    Ok(loss_per_unit_staked)
}

pub fn compute_rewards_per_unit_staked(
    stability_pool_state: &StabilityPoolState,
    collateral_to_add: Decimal,
    debt_to_offset: Decimal,
) -> Result<RewardDistributionCalculation, BackstopError> {
    let total_deposits = stability_pool_state.total_deposits;

    let (collateral_gained_per_unit_staked, last_collateral_error) = compute_gain_per_unit_staked(
        collateral_to_add,
        stability_pool_state.last_collateral_error_offset,
        total_deposits,
    )?;

    let stablecoin_loss_per_unit_staked =
        compute_stablecoin_loss_per_unit_staked(debt_to_offset, total_deposits)?;

    Ok(RewardDistributionCalculation {
        collateral_gained_per_unit_staked,
        stablecoin_loss_per_unit_staked,
        last_collateral_error,
    })
}

/// `per_unit * P`, the increment of a bucket sum
fn marginal_sum(per_unit_staked: Decimal, p: Decimal) -> Result<Decimal, BackstopError> {
    per_unit_staked
        .to_scaled_val()
        .checked_mul(p.to_scaled_val())
        .map(Decimal::from_scaled)
        .ok_or(BackstopError::MathOverflow)
}

fn current_sum(
    stability_pool_state: &StabilityPoolState,
    epoch_to_scale_to_sum: &EpochToScaleToSum,
) -> RewardSums {
    epoch_to_scale_to_sum.sum_or_zero(
        stability_pool_state.current_epoch,
        stability_pool_state.current_scale,
    )
}

pub fn update_reward_sum_and_product(
    stability_pool_state: &mut StabilityPoolState,
    epoch_to_scale_to_sum: &mut EpochToScaleToSum,
    collateral_gained_per_unit_staked: Decimal,
    stablecoin_loss_per_unit_staked: Decimal,
) -> Result<(), BackstopError> {
    // current status
    let current_p = stability_pool_state.p;
    let current_epoch = stability_pool_state.current_epoch;
    let current_scale = stability_pool_state.current_scale;
    let current_s = current_sum(stability_pool_state, epoch_to_scale_to_sum);

    let new_product_factor = Decimal::one().try_sub(stablecoin_loss_per_unit_staked)?;

    // Calculate the new S first, weighted by P before this offset
    let new_sum = RewardSums {
        collateral: current_s
            .collateral
            .try_add(marginal_sum(collateral_gained_per_unit_staked, current_p)?)?,
        ..current_s
    };

    // Calculate new P
    let (new_p, new_epoch, new_scale) = if new_product_factor.is_zero() {
        // Stability pool depleted, new epoch
        (Decimal::one(), current_epoch + 1, 0)
    } else {
        let candidate_p = current_p.try_mul(new_product_factor)?;
        if candidate_p < Decimal::from_scaled_val(SCALE_FACTOR) {
            // P is too small, losing precision, increasing the scale (same epoch)
            // P * factor * SCALE_FACTOR / 1e18
            let rescaled_p = current_p.try_mul_div_floor(
                new_product_factor,
                Decimal::from_scaled_val(DECIMAL_PRECISION / SCALE_FACTOR),
            )?;
            (rescaled_p, current_epoch, current_scale + 1)
        } else {
            // most common case, just update P (same epoch, same scale)
            (candidate_p, current_epoch, current_scale)
        }
    };

    if new_p.is_zero() {
        fail!(BackstopError::MathOverflow);
    }

    // Update global states
    epoch_to_scale_to_sum.set_sum(current_epoch, current_scale, new_sum)?;

    update_stability_pool_snapshot(
        stability_pool_state,
        epoch_to_scale_to_sum,
        new_p,
        new_epoch,
        new_scale,
    )
}

pub fn update_reward_sum(
    stability_pool_state: &StabilityPoolState,
    epoch_to_scale_to_sum: &mut EpochToScaleToSum,
    reward_gained_per_unit_staked: Decimal,
) -> Result<(), BackstopError> {
    let current_g = current_sum(stability_pool_state, epoch_to_scale_to_sum);
    let marginal_g = marginal_sum(reward_gained_per_unit_staked, stability_pool_state.p)?;

    let new_sum = RewardSums {
        reward: current_g.reward.try_add(marginal_g)?,
        ..current_g
    };

    epoch_to_scale_to_sum.set_sum(
        stability_pool_state.current_epoch,
        stability_pool_state.current_scale,
        new_sum,
    )
}

fn update_stability_pool_snapshot(
    stability_pool_state: &mut StabilityPoolState,
    epoch_to_scale_to_sum: &mut EpochToScaleToSum,
    new_p: Decimal,
    new_epoch: u64,
    new_scale: u64,
) -> Result<(), BackstopError> {
    let current_epoch = stability_pool_state.current_epoch;
    let current_scale = stability_pool_state.current_scale;

    stability_pool_state.p = new_p;
    stability_pool_state.current_epoch = new_epoch;
    stability_pool_state.current_scale = new_scale;

    if current_epoch != new_epoch {
        debug!("Stability pool depleted, epoch {} starts", new_epoch);
    } else if current_scale != new_scale {
        debug!(
            "P rescaled to {} in epoch {}, scale {}",
            new_p, new_epoch, new_scale
        );
    }

    if current_epoch != new_epoch || current_scale != new_scale {
        epoch_to_scale_to_sum.set_sum(new_epoch, new_scale, RewardSums::default())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loss_per_unit_rounds_up() {
        let total = Decimal::from_units(3);
        let loss = compute_stablecoin_loss_per_unit_staked(Decimal::from_units(1), total).unwrap();
        assert_eq!(loss, Decimal::from_scaled_val(333_333_333_333_333_334));

        let full = compute_stablecoin_loss_per_unit_staked(total, total).unwrap();
        assert_eq!(full, Decimal::one());

        let none = compute_stablecoin_loss_per_unit_staked(Decimal::zero(), total).unwrap();
        assert_eq!(none, Decimal::zero());

        assert_eq!(
            compute_stablecoin_loss_per_unit_staked(Decimal::from_units(4), total),
            Err(BackstopError::InsufficientPoolDeposits)
        );
    }

    #[test]
    fn test_gain_per_unit_carries_error() {
        let total = Decimal::from_scaled_val(3);

        // 1 raw * 1e18 / 3 leaves 1 behind
        let (per_unit, error) =
            compute_gain_per_unit_staked(Decimal::from_scaled_val(1), Decimal::zero(), total)
                .unwrap();
        assert_eq!(per_unit, Decimal::from_scaled_val(333_333_333_333_333_333));
        assert_eq!(error, Decimal::from_scaled_val(1));

        let (per_unit, error) =
            compute_gain_per_unit_staked(Decimal::from_scaled_val(1), error, total).unwrap();
        assert_eq!(per_unit, Decimal::from_scaled_val(333_333_333_333_333_333));
        assert_eq!(error, Decimal::from_scaled_val(2));

        // the third call distributes the accumulated remainder
        let (per_unit, error) =
            compute_gain_per_unit_staked(Decimal::from_scaled_val(1), error, total).unwrap();
        assert_eq!(per_unit, Decimal::from_scaled_val(333_333_333_333_333_334));
        assert_eq!(error, Decimal::zero());
    }

    #[test]
    fn test_product_scales_up_when_too_small() {
        let mut state = StabilityPoolState::new(0, 0, Decimal::zero(), Decimal::zero(), 0, 0);
        let mut sums = EpochToScaleToSum::default();

        // P = 1e18 * 1e-10 / 1e18 = 1e8 < 1e9
        let loss = Decimal::one().try_sub(Decimal::from_scaled_val(100_000_000)).unwrap();
        update_reward_sum_and_product(&mut state, &mut sums, Decimal::zero(), loss).unwrap();

        assert_eq!(state.current_scale, 1);
        assert_eq!(state.current_epoch, 0);
        assert_eq!(state.p, Decimal::from_scaled_val(100_000_000_000_000_000));
        assert_eq!(sums.get_sum(0, 1), Some(RewardSums::default()));
    }

    #[test]
    fn test_full_loss_starts_new_epoch() {
        let mut state = StabilityPoolState::new(0, 0, Decimal::zero(), Decimal::zero(), 0, 0);
        let mut sums = EpochToScaleToSum::default();

        let per_unit = Decimal::from_units(2);
        update_reward_sum_and_product(&mut state, &mut sums, per_unit, Decimal::one()).unwrap();

        assert_eq!(state.current_epoch, 1);
        assert_eq!(state.current_scale, 0);
        assert_eq!(state.p, Decimal::one());

        // the depleting offset still lands in the old epoch
        let old = sums.get_sum(0, 0).unwrap();
        assert_eq!(
            old.collateral,
            Decimal::from_scaled(per_unit.to_scaled_val() * wad())
        );
        assert_eq!(sums.get_sum(1, 0), Some(RewardSums::default()));
    }
}
