use std::collections::BTreeMap;

use tracing::info;

use crate::{
    fail, stability_pool::stability_pool_operations,
    state::epoch_to_scale_to_sum::EpochToScaleToSum, utils::consts::DECIMAL_PRECISION,
    BackstopError, GlobalConfig, IssuanceState, StabilityPool, StabilityPoolParams,
    StabilityPoolState,
};

pub fn process(params: StabilityPoolParams) -> Result<StabilityPool, BackstopError> {
    info!("Initializing stability pool!");

    if u128::from(params.issuance.issuance_factor) >= DECIMAL_PRECISION {
        fail!(BackstopError::InvalidIssuanceFactor);
    }

    let mut stability_pool_state = StabilityPoolState::default();
    let mut epoch_to_scale_to_sum = EpochToScaleToSum::default();
    let mut issuance_state = IssuanceState::default();

    stability_pool_operations::initialize_stability_pool(
        &mut stability_pool_state,
        &mut epoch_to_scale_to_sum,
        &mut issuance_state,
        &params.issuance,
        params.deployment_time,
    );

    Ok(StabilityPool {
        params,
        config: GlobalConfig::default(),
        state: stability_pool_state,
        epoch_to_scale_to_sum,
        issuance_state,
        providers: BTreeMap::new(),
        events: vec![],
    })
}
