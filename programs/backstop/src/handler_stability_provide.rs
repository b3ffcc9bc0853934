use tracing::info;

use crate::{
    events,
    stability_pool::{stability_pool_operations, types::ProvideStabilityEffects},
    state::epoch_to_scale_to_sum::StagedSums,
    token_operations::{collateral, reward_token, stablecoin, Context},
    BackstopError, Decimal, StabilityPool, StabilityProviderState,
};

pub fn process(
    pool: &mut StabilityPool,
    ctx: &mut Context<'_>,
    amount: Decimal,
) -> Result<ProvideStabilityEffects, BackstopError> {
    info!("ix=ProvideStability {} by {:?}", amount, ctx.caller);

    // 1. Stage working copies
    let mut stability_pool_state = pool.state.clone();
    let sum_before = pool
        .epoch_to_scale_to_sum
        .sum_or_zero(pool.state.current_epoch, pool.state.current_scale);
    let mut epoch_to_scale_to_sum = StagedSums::new(&mut pool.epoch_to_scale_to_sum);
    let mut issuance_state = pool.issuance_state.clone();
    let mut stability_provider_state = match pool.providers.get(&ctx.caller) {
        Some(provider) => provider.clone(),
        None => {
            let mut provider = StabilityProviderState::new(ctx.caller, 0);
            stability_pool_operations::approve_new_user(
                &mut stability_pool_state,
                &mut provider,
            )?;
            provider
        }
    };
    let deposit_before = stability_provider_state.deposited_stablecoin;

    // 2. Update state
    let effects = stability_pool_operations::provide_stability(
        &mut stability_pool_state,
        &mut stability_provider_state,
        &mut epoch_to_scale_to_sum,
        &mut issuance_state,
        &pool.config,
        amount,
        ctx.now_timestamp,
    )?;

    // 3. Run token transfers
    let depositor = ctx.caller;
    stablecoin::transfer_to_stability_pool(
        ctx,
        effects.stablecoin_to_stability_pool,
        depositor,
        pool.params.pool_address,
    )?;
    collateral::send_collateral_gain(ctx, effects.gains_to_depositor.collateral, depositor)?;
    reward_token::send_reward_gain(ctx, effects.gains_to_depositor.reward, depositor)?;

    // 4. Commit
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
        .try_sub(effects.stablecoin_to_stability_pool)?;
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
