use tracing::debug;

use crate::{token_operations::Context, Address, BackstopError, Decimal};

pub fn send_collateral_gain(
    ctx: &mut Context<'_>,
    amount: Decimal,
    depositor: Address,
) -> Result<(), BackstopError> {
    if amount.is_zero() {
        return Ok(());
    }
    debug!("Sending {} collateral gain to {}", amount, depositor);
    ctx.collateral_vault
        .send_collateral(depositor, amount)
        .map_err(|err| {
            tracing::warn!("Collateral transfer failed {}", err);
            BackstopError::CollateralTransferFailed
        })
}

pub fn move_collateral_gain_to_trove(
    ctx: &mut Context<'_>,
    amount: Decimal,
    depositor: Address,
    position: Address,
) -> Result<(), BackstopError> {
    debug!(
        "Moving {} collateral gain of {} to trove {}",
        amount, depositor, position
    );
    ctx.borrower_operations
        .move_collateral_gain_to_trove(depositor, position, amount)
        .map_err(|err| {
            tracing::warn!("Collateral transfer to trove failed {}", err);
            BackstopError::CollateralTransferFailed
        })
}
