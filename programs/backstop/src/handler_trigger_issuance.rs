use tracing::info;

use crate::{
    events, stability_pool::stability_pool_operations,
    state::epoch_to_scale_to_sum::StagedSums, BackstopError, Decimal, StabilityPool,
};

pub fn process(pool: &mut StabilityPool, now_timestamp: u64) -> Result<Decimal, BackstopError> {
    info!("ix=TriggerIssuance at {}", now_timestamp);

    let mut stability_pool_state = pool.state.clone();
    let sum_before = pool
        .epoch_to_scale_to_sum
        .sum_or_zero(pool.state.current_epoch, pool.state.current_scale);
    let mut epoch_to_scale_to_sum = StagedSums::new(&mut pool.epoch_to_scale_to_sum);
    let mut issuance_state = pool.issuance_state.clone();

    let issuance = stability_pool_operations::trigger_issuance(
        &mut stability_pool_state,
        &mut epoch_to_scale_to_sum,
        &mut issuance_state,
        now_timestamp,
    )?;

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

    Ok(issuance)
}
