use super::types::{
    OffsetEffects, ProvideStabilityEffects, WithdrawGainToTroveEffects, WithdrawStabilityEffects,
};
use super::{deposit_ledger, issuance_logic, liquidations_logic};
use crate::state::epoch_to_scale_to_sum::EpochToScaleToSum;
use crate::utils::coretypes::CheckedAssign;
use crate::{
    fail, BackstopError, Decimal, GlobalConfig, IssuanceParams, IssuanceState, StabilityGains,
    StabilityPoolState, StabilityProviderState,
};

pub fn initialize_stability_pool(
    stability_pool_state: &mut StabilityPoolState,
    epoch_to_scale_to_sum: &mut EpochToScaleToSum,
    issuance_state: &mut IssuanceState,
    issuance_params: &IssuanceParams,
    deployment_time: u64,
) {
    *stability_pool_state =
        StabilityPoolState::new(0, 0, Decimal::zero(), Decimal::zero(), 0, 0);
    *epoch_to_scale_to_sum = EpochToScaleToSum::default();
    *issuance_state = IssuanceState::new(issuance_params, deployment_time);
}

pub fn approve_new_user(
    stability_pool_state: &mut StabilityPoolState,
    stability_provider_state: &mut StabilityProviderState,
) -> Result<(), BackstopError> {
    stability_provider_state.user_id = stability_pool_state.num_users;
    stability_pool_state.num_users.checked_add_assign(1)
}

#[allow(clippy::too_many_arguments)]
pub fn provide_stability(
    stability_pool_state: &mut StabilityPoolState,
    stability_provider_state: &mut StabilityProviderState,
    epoch_to_scale_to_sum: &mut EpochToScaleToSum,
    issuance_state: &mut IssuanceState,
    global_config: &GlobalConfig,
    amount: Decimal,
    now_timestamp: u64,
) -> Result<ProvideStabilityEffects, BackstopError> {
    if amount.is_zero() {
        fail!(BackstopError::ZeroAmount);
    }
    if !global_config.is_provide_allowed {
        fail!(BackstopError::ProvideNotAllowed);
    }
    if let Some(limit) = global_config.provide_limit() {
        if stability_pool_state.total_deposits.try_add(amount)? > limit {
            fail!(BackstopError::ProvideLimitExceeded);
        }
    }

    trigger_issuance(
        stability_pool_state,
        epoch_to_scale_to_sum,
        issuance_state,
        now_timestamp,
    )?;

    // 1. Calculate compounded deposit and gains since the last snapshot
    let compounded_deposit =
        deposit_ledger::compounded_deposit(stability_pool_state, stability_provider_state)?;
    let gains = deposit_ledger::depositor_gains(
        stability_pool_state,
        stability_provider_state,
        epoch_to_scale_to_sum,
    )?;

    // 2. Move stablecoin into the pool
    stability_pool_state
        .total_deposits
        .checked_add_assign(amount)?;

    // 3. Pay out gains
    pay_out_gains(stability_pool_state, stability_provider_state, gains)?;

    // 4. Update user deposit and snapshot
    let new_deposit = compounded_deposit.try_add(amount)?;
    update_deposit_and_snapshot(
        stability_pool_state,
        stability_provider_state,
        epoch_to_scale_to_sum,
        new_deposit,
    )?;

    Ok(ProvideStabilityEffects {
        stablecoin_to_stability_pool: amount,
        gains_to_depositor: gains,
    })
}

pub fn withdraw_stability(
    stability_pool_state: &mut StabilityPoolState,
    stability_provider_state: &mut StabilityProviderState,
    epoch_to_scale_to_sum: &mut EpochToScaleToSum,
    issuance_state: &mut IssuanceState,
    amount: Decimal,
    has_undercollateralized_troves: bool,
    now_timestamp: u64,
) -> Result<WithdrawStabilityEffects, BackstopError> {
    if !stability_provider_state.has_deposit() {
        fail!(BackstopError::NoActiveDeposit);
    }
    if !amount.is_zero() && has_undercollateralized_troves {
        fail!(BackstopError::UnsafeWithdrawalBlocked);
    }

    trigger_issuance(
        stability_pool_state,
        epoch_to_scale_to_sum,
        issuance_state,
        now_timestamp,
    )?;

    // 1. Calculate compounded deposit and gains since the last snapshot
    let compounded_deposit =
        deposit_ledger::compounded_deposit(stability_pool_state, stability_provider_state)?;
    let gains = deposit_ledger::depositor_gains(
        stability_pool_state,
        stability_provider_state,
        epoch_to_scale_to_sum,
    )?;

    // 2. Send stablecoin back to depositor, never more than what's left
    let stablecoin_to_withdraw = amount.min(compounded_deposit);
    stability_pool_state
        .total_deposits
        .checked_sub_assign(stablecoin_to_withdraw)?;

    // 3. Pay out gains
    pay_out_gains(stability_pool_state, stability_provider_state, gains)?;

    // 4. Update user deposit and snapshot
    let new_deposit = compounded_deposit.try_sub(stablecoin_to_withdraw)?;
    update_deposit_and_snapshot(
        stability_pool_state,
        stability_provider_state,
        epoch_to_scale_to_sum,
        new_deposit,
    )?;

    Ok(WithdrawStabilityEffects {
        stablecoin_to_depositor: stablecoin_to_withdraw,
        gains_to_depositor: gains,
    })
}

pub fn withdraw_collateral_gain_to_trove(
    stability_pool_state: &mut StabilityPoolState,
    stability_provider_state: &mut StabilityProviderState,
    epoch_to_scale_to_sum: &mut EpochToScaleToSum,
    issuance_state: &mut IssuanceState,
    has_active_trove: bool,
    now_timestamp: u64,
) -> Result<WithdrawGainToTroveEffects, BackstopError> {
    if !stability_provider_state.has_deposit() {
        fail!(BackstopError::NoActiveDeposit);
    }
    if !has_active_trove {
        fail!(BackstopError::NoActivePosition);
    }

    let collateral_gain = deposit_ledger::depositor_gains(
        stability_pool_state,
        stability_provider_state,
        epoch_to_scale_to_sum,
    )?
    .collateral;
    if collateral_gain.is_zero() {
        fail!(BackstopError::NoGainToWithdraw);
    }

    trigger_issuance(
        stability_pool_state,
        epoch_to_scale_to_sum,
        issuance_state,
        now_timestamp,
    )?;

    let compounded_deposit =
        deposit_ledger::compounded_deposit(stability_pool_state, stability_provider_state)?;
    let gains = deposit_ledger::depositor_gains(
        stability_pool_state,
        stability_provider_state,
        epoch_to_scale_to_sum,
    )?;

    pay_out_gains(stability_pool_state, stability_provider_state, gains)?;

    // deposit stays where it is, only the snapshot moves
    update_deposit_and_snapshot(
        stability_pool_state,
        stability_provider_state,
        epoch_to_scale_to_sum,
        compounded_deposit,
    )?;

    Ok(WithdrawGainToTroveEffects {
        collateral_to_trove: gains.collateral,
        reward_to_depositor: gains.reward,
    })
}

pub fn offset(
    stability_pool_state: &mut StabilityPoolState,
    epoch_to_scale_to_sum: &mut EpochToScaleToSum,
    issuance_state: &mut IssuanceState,
    debt_to_offset: Decimal,
    collateral_to_add: Decimal,
    now_timestamp: u64,
) -> Result<OffsetEffects, BackstopError> {
    if debt_to_offset.is_zero() {
        return Ok(OffsetEffects {
            stablecoin_to_burn: Decimal::zero(),
            collateral_received: Decimal::zero(),
        });
    }

    let total_deposits = stability_pool_state.total_deposits;
    if total_deposits.is_zero() || debt_to_offset > total_deposits {
        fail!(BackstopError::InsufficientPoolDeposits);
    }

    trigger_issuance(
        stability_pool_state,
        epoch_to_scale_to_sum,
        issuance_state,
        now_timestamp,
    )?;

    add_rewards_and_loss(
        stability_pool_state,
        epoch_to_scale_to_sum,
        collateral_to_add,
        debt_to_offset,
    )?;

    Ok(OffsetEffects {
        stablecoin_to_burn: debt_to_offset,
        collateral_received: collateral_to_add,
    })
}

fn add_rewards_and_loss(
    stability_pool_state: &mut StabilityPoolState,
    epoch_to_scale_to_sum: &mut EpochToScaleToSum,
    collateral_to_add: Decimal,
    debt_to_offset: Decimal,
) -> Result<(), BackstopError> {
    let calculation = liquidations_logic::compute_rewards_per_unit_staked(
        stability_pool_state,
        collateral_to_add,
        debt_to_offset,
    )?;

    liquidations_logic::update_reward_sum_and_product(
        stability_pool_state,
        epoch_to_scale_to_sum,
        calculation.collateral_gained_per_unit_staked,
        calculation.stablecoin_loss_per_unit_staked,
    )?;

    stability_pool_state.last_collateral_error_offset = calculation.last_collateral_error;
    stability_pool_state
        .total_collateral
        .checked_add_assign(collateral_to_add)?;
    stability_pool_state
        .total_deposits
        .checked_sub_assign(debt_to_offset)?;

    Ok(())
}

/// Pull pending issuance into `G`. Lost when nobody is providing stability.
pub fn trigger_issuance(
    stability_pool_state: &mut StabilityPoolState,
    epoch_to_scale_to_sum: &mut EpochToScaleToSum,
    issuance_state: &mut IssuanceState,
    now_timestamp: u64,
) -> Result<Decimal, BackstopError> {
    let issuance = issuance_logic::pull_pending_issuance(issuance_state, now_timestamp)?;

    if issuance.is_zero() || stability_pool_state.total_deposits.is_zero() {
        return Ok(issuance);
    }

    let (reward_gained_per_unit_staked, last_reward_error) =
        liquidations_logic::compute_gain_per_unit_staked(
            issuance,
            stability_pool_state.last_reward_error_offset,
            stability_pool_state.total_deposits,
        )?;

    liquidations_logic::update_reward_sum(
        stability_pool_state,
        epoch_to_scale_to_sum,
        reward_gained_per_unit_staked,
    )?;
    stability_pool_state.last_reward_error_offset = last_reward_error;

    Ok(issuance)
}

fn pay_out_gains(
    stability_pool_state: &mut StabilityPoolState,
    stability_provider_state: &mut StabilityProviderState,
    gains: StabilityGains,
) -> Result<(), BackstopError> {
    stability_pool_state
        .total_collateral
        .checked_sub_assign(gains.collateral)?;
    stability_pool_state
        .total_collateral_gains_paid
        .checked_add_assign(gains.collateral)?;
    stability_pool_state
        .total_reward_gains_paid
        .checked_add_assign(gains.reward)?;

    stability_provider_state
        .cumulative_collateral_gain
        .checked_add_assign(gains.collateral)?;
    stability_provider_state
        .cumulative_reward_gain
        .checked_add_assign(gains.reward)?;

    Ok(())
}

fn update_deposit_and_snapshot(
    stability_pool_state: &mut StabilityPoolState,
    stability_provider_state: &mut StabilityProviderState,
    epoch_to_scale_to_sum: &EpochToScaleToSum,
    new_deposit: Decimal,
) -> Result<(), BackstopError> {
    let had_deposit = stability_provider_state.has_deposit();

    stability_provider_state.deposited_stablecoin = new_deposit;
    stability_provider_state.user_deposit_snapshot = deposit_ledger::new_deposit_snapshot(
        stability_pool_state,
        epoch_to_scale_to_sum,
        new_deposit,
    );

    match (had_deposit, stability_provider_state.has_deposit()) {
        (false, true) => stability_pool_state
            .total_users_providing_stability
            .checked_add_assign(1),
        (true, false) => stability_pool_state
            .total_users_providing_stability
            .checked_sub_assign(1),
        _ => Ok(()),
    }
}
