use crate::{
    utils::consts::{REWARD_ISSUANCE_FACTOR, TOTAL_REWARD_TO_STABILITY_POOL},
    Decimal, IssuanceParams, IssuanceState,
};

impl IssuanceState {
    pub fn new(params: &IssuanceParams, deployment_time: u64) -> Self {
        Self {
            deployment_time,
            last_issuance_time: deployment_time,
            total_issued: Decimal::zero(),
            supply_cap: params.supply_cap,
            issuance_factor: params.issuance_factor,
        }
    }
}

impl Default for IssuanceParams {
    fn default() -> Self {
        Self {
            supply_cap: Decimal::from_units(TOTAL_REWARD_TO_STABILITY_POOL),
            issuance_factor: REWARD_ISSUANCE_FACTOR,
        }
    }
}
