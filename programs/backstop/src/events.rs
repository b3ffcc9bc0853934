//! Observable pool events.
//!
//! Handlers append events only after an operation commits, the embedder
//! drains them with `StabilityPool::take_events`.

use crate::{
    state::epoch_to_scale_to_sum::EpochToScaleToSum, Address, Decimal, DepositSnapshot,
    IssuanceState, RewardSums, StabilityGains, StabilityPoolState, StabilityProviderState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolEvent {
    StabilityPoolDepositsUpdated {
        total_deposits: Decimal,
    },
    StabilityPoolCollateralUpdated {
        total_collateral: Decimal,
    },
    ProductUpdated {
        p: Decimal,
    },
    SumUpdated {
        epoch: u64,
        scale: u64,
        sum: Decimal,
    },
    RewardSumUpdated {
        epoch: u64,
        scale: u64,
        sum: Decimal,
    },
    EpochUpdated {
        epoch: u64,
    },
    ScaleUpdated {
        scale: u64,
    },
    DepositSnapshotUpdated {
        depositor: Address,
        snapshot: DepositSnapshot,
    },
    UserDepositChanged {
        depositor: Address,
        deposit: Decimal,
    },
    CollateralGainWithdrawn {
        depositor: Address,
        collateral: Decimal,
        stablecoin_loss: Decimal,
    },
    RewardPaidToDepositor {
        depositor: Address,
        reward: Decimal,
    },
    CollateralGainMovedToPosition {
        depositor: Address,
        position: Address,
        collateral: Decimal,
    },
    RewardIssued {
        amount: Decimal,
        total_issued: Decimal,
    },
}

/// Events describing how the shared pool state moved during one operation.
pub fn pool_events(
    before: &StabilityPoolState,
    after: &StabilityPoolState,
    old_sum: RewardSums,
    sums_after: &EpochToScaleToSum,
    issuance_before: &IssuanceState,
    issuance_after: &IssuanceState,
) -> Vec<PoolEvent> {
    let mut events = vec![];

    if issuance_after.total_issued != issuance_before.total_issued {
        events.push(PoolEvent::RewardIssued {
            amount: issuance_after
                .total_issued
                .saturating_sub(issuance_before.total_issued),
            total_issued: issuance_after.total_issued,
        });
    }

    // Only the bucket that was current before the operation accumulates,
    // buckets opened by a transition start at zero.
    let (epoch, scale) = (before.current_epoch, before.current_scale);
    let new_sum = sums_after.sum_or_zero(epoch, scale);
    if new_sum.collateral != old_sum.collateral {
        events.push(PoolEvent::SumUpdated {
            epoch,
            scale,
            sum: new_sum.collateral,
        });
    }
    if new_sum.reward != old_sum.reward {
        events.push(PoolEvent::RewardSumUpdated {
            epoch,
            scale,
            sum: new_sum.reward,
        });
    }

    if after.p != before.p {
        events.push(PoolEvent::ProductUpdated { p: after.p });
    }
    if after.current_epoch != before.current_epoch {
        events.push(PoolEvent::EpochUpdated {
            epoch: after.current_epoch,
        });
    }
    if after.current_scale != before.current_scale {
        events.push(PoolEvent::ScaleUpdated {
            scale: after.current_scale,
        });
    }
    if after.total_deposits != before.total_deposits {
        events.push(PoolEvent::StabilityPoolDepositsUpdated {
            total_deposits: after.total_deposits,
        });
    }
    if after.total_collateral != before.total_collateral {
        events.push(PoolEvent::StabilityPoolCollateralUpdated {
            total_collateral: after.total_collateral,
        });
    }

    events
}

pub fn deposit_events(provider: &StabilityProviderState) -> Vec<PoolEvent> {
    vec![
        PoolEvent::DepositSnapshotUpdated {
            depositor: provider.owner,
            snapshot: provider.user_deposit_snapshot,
        },
        PoolEvent::UserDepositChanged {
            depositor: provider.owner,
            deposit: provider.deposited_stablecoin,
        },
    ]
}

/// Gains paid to a depositor and the part of their deposit absorbed by offsets
pub fn gain_events(
    depositor: Address,
    gains: StabilityGains,
    stablecoin_loss: Decimal,
) -> Vec<PoolEvent> {
    let mut events = vec![];
    if !gains.collateral.is_zero() || !stablecoin_loss.is_zero() {
        events.push(PoolEvent::CollateralGainWithdrawn {
            depositor,
            collateral: gains.collateral,
            stablecoin_loss,
        });
    }
    if !gains.reward.is_zero() {
        events.push(PoolEvent::RewardPaidToDepositor {
            depositor,
            reward: gains.reward,
        });
    }
    events
}
