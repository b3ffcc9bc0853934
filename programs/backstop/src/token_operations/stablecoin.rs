use tracing::debug;

use crate::{token_operations::Context, Address, BackstopError, Decimal};

pub fn transfer_to_stability_pool(
    ctx: &mut Context<'_>,
    amount: Decimal,
    depositor: Address,
    pool_address: Address,
) -> Result<(), BackstopError> {
    if amount.is_zero() {
        return Ok(());
    }
    debug!(
        "Transferring {} stablecoin from {} to the stability pool",
        amount, depositor
    );
    ctx.stablecoin
        .transfer_from(depositor, pool_address, amount)
        .map_err(|err| {
            tracing::warn!("Stablecoin transfer failed {}", err);
            BackstopError::TransferFailed
        })
}

pub fn transfer_from_stability_pool(
    ctx: &mut Context<'_>,
    amount: Decimal,
    pool_address: Address,
    depositor: Address,
) -> Result<(), BackstopError> {
    if amount.is_zero() {
        return Ok(());
    }
    debug!(
        "Transferring {} stablecoin from the stability pool to {}",
        amount, depositor
    );
    ctx.stablecoin
        .transfer(pool_address, depositor, amount)
        .map_err(|err| {
            tracing::warn!("Stablecoin transfer failed {}", err);
            BackstopError::TransferFailed
        })
}
