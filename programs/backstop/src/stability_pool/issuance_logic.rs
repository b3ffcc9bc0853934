use decimal_wad::{common::TrySub, rate::Rate};
use tracing::debug;

use crate::{
    utils::consts::{MAX_ISSUANCE_MINUTES, SECONDS_PER_MINUTE},
    BackstopError, Decimal, IssuanceState,
};

/// `1 - F^minutes`, the share of the allocation released after `seconds_elapsed`.
pub fn cumulative_issuance_fraction(
    issuance_factor: u64,
    seconds_elapsed: u64,
) -> Result<Decimal, BackstopError> {
    // supply_cap * (1 - 0.5^year), halving yearly
    //
    // The issuance factor F determines the curvature of the issuance curve.
    // Minutes in one year: 60*24*365 = 525600
    // For 50% of remaining tokens issued each year, with minutes as time units:
    //
    // F ** 525600 = 0.5
    // F = 0.5 ** (1/525600)
    // F = 0.999998681227695000
    let minutes = u64::min(seconds_elapsed / SECONDS_PER_MINUTE, MAX_ISSUANCE_MINUTES);

    let factor = Rate::from_scaled_val(issuance_factor);
    let rate = factor.try_pow(minutes)?;
    let fraction = Rate::one().try_sub(rate)?;

    Ok(Decimal::from_scaled_val(fraction.to_scaled_val::<u128>()?))
}

pub fn issuable_amount(
    supply_cap: Decimal,
    issuance_factor: u64,
    seconds_elapsed: u64,
) -> Result<Decimal, BackstopError> {
    let fraction = cumulative_issuance_fraction(issuance_factor, seconds_elapsed)?;
    supply_cap.try_mul(fraction)
}

/// Release whatever the curve allows by `now_timestamp` and not released yet.
pub fn pull_pending_issuance(
    issuance_state: &mut IssuanceState,
    now_timestamp: u64,
) -> Result<Decimal, BackstopError> {
    let seconds_elapsed = now_timestamp.saturating_sub(issuance_state.deployment_time);
    let expected_issued_so_far = issuable_amount(
        issuance_state.supply_cap,
        issuance_state.issuance_factor,
        seconds_elapsed,
    )?;

    let issuance = expected_issued_so_far.saturating_sub(issuance_state.total_issued);

    issuance_state.total_issued = issuance_state.total_issued.try_add(issuance)?;
    issuance_state.last_issuance_time = u64::max(issuance_state.last_issuance_time, now_timestamp);

    if !issuance.is_zero() {
        debug!(
            "Issuing {} reward as of {}, total issued {}",
            issuance, now_timestamp, issuance_state.total_issued
        );
    }

    Ok(issuance)
}
