use tracing::info;

use crate::{fail, token_operations::Context, BackstopError, GlobalConfigOption, StabilityPool};

pub fn process(
    pool: &mut StabilityPool,
    ctx: &Context<'_>,
    key: u16,
    value: u64,
) -> Result<GlobalConfigOption, BackstopError> {
    info!("ix=UpdateGlobalConfig key {} value {}", key, value);

    if ctx.caller != pool.params.owner {
        fail!(BackstopError::Unauthorized);
    }

    pool.config.update(key, value)
}
