use tracing::info;

use crate::{
    events::{self, PoolEvent},
    fail,
    stability_pool::{stability_pool_operations, types::WithdrawGainToTroveEffects},
    state::epoch_to_scale_to_sum::StagedSums,
    token_operations::{collateral, reward_token, Context},
    Address, BackstopError, StabilityPool,
};

pub fn process(
    pool: &mut StabilityPool,
    ctx: &mut Context<'_>,
    position: Address,
) -> Result<WithdrawGainToTroveEffects, BackstopError> {
    info!("ix=WithdrawCollateralGainToTrove {:?} to {:?}", ctx.caller, position);

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

    let effects = stability_pool_operations::withdraw_collateral_gain_to_trove(
        &mut stability_pool_state,
        &mut stability_provider_state,
        &mut epoch_to_scale_to_sum,
        &mut issuance_state,
        ctx.trove_manager.has_active_trove(depositor),
        ctx.now_timestamp,
    )?;

    collateral::move_collateral_gain_to_trove(
        ctx,
        effects.collateral_to_trove,
        depositor,
        position,
    )?;
    reward_token::send_reward_gain(ctx, effects.reward_to_depositor, depositor)?;

    let mut new_events = events::pool_events(
        &pool.state,
        &stability_pool_state,
        sum_before,
        &epoch_to_scale_to_sum,
        &pool.issuance_state,
        &issuance_state,
    );
    new_events.push(PoolEvent::CollateralGainMovedToPosition {
        depositor,
        position,
        collateral: effects.collateral_to_trove,
    });
    if !effects.reward_to_depositor.is_zero() {
        new_events.push(PoolEvent::RewardPaidToDepositor {
            depositor,
            reward: effects.reward_to_depositor,
        });
    }
    if stability_provider_state.deposited_stablecoin != deposit_before {
        new_events.extend(events::deposit_events(&stability_provider_state));
    } else {
        new_events.push(PoolEvent::DepositSnapshotUpdated {
            depositor,
            snapshot: stability_provider_state.user_deposit_snapshot,
        });
    }

    pool.state = stability_pool_state;
    epoch_to_scale_to_sum.commit();
    pool.issuance_state = issuance_state;
    pool.providers.insert(depositor, stability_provider_state);
    pool.events.extend(new_events);

    Ok(effects)
}
