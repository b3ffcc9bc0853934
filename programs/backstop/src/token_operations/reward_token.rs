use tracing::debug;

use crate::{token_operations::Context, Address, BackstopError, Decimal};

pub fn send_reward_gain(
    ctx: &mut Context<'_>,
    amount: Decimal,
    depositor: Address,
) -> Result<(), BackstopError> {
    if amount.is_zero() {
        return Ok(());
    }
    debug!("Paying {} reward token to {}", amount, depositor);
    ctx.reward_token.transfer(depositor, amount).map_err(|err| {
        tracing::warn!("Reward token transfer failed {}", err);
        BackstopError::RewardTransferFailed
    })
}
