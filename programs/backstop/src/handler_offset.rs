use tracing::info;

use crate::{
    events, fail,
    stability_pool::{stability_pool_operations, types::OffsetEffects},
    state::epoch_to_scale_to_sum::StagedSums,
    token_operations::Context,
    BackstopError, Decimal, StabilityPool,
};

pub fn process(
    pool: &mut StabilityPool,
    ctx: &mut Context<'_>,
    debt_to_offset: Decimal,
    collateral_to_add: Decimal,
) -> Result<OffsetEffects, BackstopError> {
    info!(
        "ix=Offset debt {} collateral {}",
        debt_to_offset, collateral_to_add
    );

    if ctx.caller != pool.params.trove_manager {
        fail!(BackstopError::Unauthorized);
    }

    let mut stability_pool_state = pool.state.clone();
    let sum_before = pool
        .epoch_to_scale_to_sum
        .sum_or_zero(pool.state.current_epoch, pool.state.current_scale);
    let mut epoch_to_scale_to_sum = StagedSums::new(&mut pool.epoch_to_scale_to_sum);
    let mut issuance_state = pool.issuance_state.clone();

    let effects = stability_pool_operations::offset(
        &mut stability_pool_state,
        &mut epoch_to_scale_to_sum,
        &mut issuance_state,
        debt_to_offset,
        collateral_to_add,
        ctx.now_timestamp,
    )?;

    // The trove manager burns the offset stablecoin and moves the collateral
    // to the vault, both are reported back through the effects.
    let new_events = events::pool_events(
        &pool.state,
        &stability_pool_state,
        sum_before,
        &epoch_to_scale_to_sum,
        &pool.issuance_state,
        &issuance_state,
    );

    pool.state = stability_pool_state;
    epoch_to_scale_to_sum.commit();
    pool.issuance_state = issuance_state;
    pool.events.extend(new_events);

    Ok(effects)
}
