use tracing::info;

use crate::{
    events, fail,
    stability_pool::{stability_pool_operations, types::WithdrawStabilityEffects},
    state::epoch_to_scale_to_sum::StagedSums,
    token_operations::{collateral, reward_token, stablecoin, Context},
    BackstopError, Decimal, StabilityPool,
};

pub fn process(
    pool: &mut StabilityPool,
    ctx: &mut Context<'_>,
    amount: Decimal,
) -> Result<WithdrawStabilityEffects, BackstopError> {
    info!("ix=WithdrawStability {} by {:?}", amount, ctx.caller);

    let depositor = ctx.caller;
    let mut stability_provider_state = match pool.providers.get(&depositor) {
        Some(provider) => provider.clone(),
        None => {
            fail!(BackstopError::NoActiveDeposit);
        }
    };
    let mut stability_pool_state = pool.state.clone();
    let sum_before = pool
        .epoch_to_scale_to_sum
        .sum_or_zero(pool.state.current_epoch, pool.state.current_scale);
    let mut epoch_to_scale_to_sum = StagedSums::new(&mut pool.epoch_to_scale_to_sum);
    let mut issuance_state = pool.issuance_state.clone();
    let deposit_before = stability_provider_state.deposited_stablecoin;

    let effects = stability_pool_operations::withdraw_stability(
        &mut stability_pool_state,
        &mut stability_provider_state,
        &mut epoch_to_scale_to_sum,
        &mut issuance_state,
        amount,
        ctx.trove_manager.has_undercollateralized_troves(),
        ctx.now_timestamp,
    )?;

    stablecoin::transfer_from_stability_pool(
        ctx,
        effects.stablecoin_to_depositor,
        pool.params.pool_address,
        depositor,
    )?;
    collateral::send_collateral_gain(ctx, effects.gains_to_depositor.collateral, depositor)?;
    reward_token::send_reward_gain(ctx, effects.gains_to_depositor.reward, depositor)?;

    let mut new_events = events::pool_events(
        &pool.state,
        &stability_pool_state,
        sum_before,
        &epoch_to_scale_to_sum,
        &pool.issuance_state,
        &issuance_state,
    );
    let compounded_before = stability_provider_state
        .deposited_stablecoin
        .try_add(effects.stablecoin_to_depositor)?;
    new_events.extend(events::gain_events(
        depositor,
        effects.gains_to_depositor,
        deposit_before.saturating_sub(compounded_before),
    ));
    new_events.extend(events::deposit_events(&stability_provider_state));

    pool.state = stability_pool_state;
    epoch_to_scale_to_sum.commit();
    pool.issuance_state = issuance_state;
    pool.providers.insert(depositor, stability_provider_state);
    pool.events.extend(new_events);

    Ok(effects)
}
