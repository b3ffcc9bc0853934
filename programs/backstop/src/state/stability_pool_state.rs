use crate::{Decimal, StabilityPoolState};

impl StabilityPoolState {
    pub fn new(
        num_users: u64,
        total_users_providing_stability: u64,
        total_deposits: Decimal,
        total_collateral: Decimal,
        current_epoch: u64,
        current_scale: u64,
    ) -> StabilityPoolState {
        StabilityPoolState {
            num_users,
            total_users_providing_stability,
            total_deposits,
            total_collateral,
            current_epoch,
            current_scale,
            p: Decimal::one(),
            ..Default::default()
        }
    }

    #[cfg(test)]
    pub fn to_state_string(&self) -> String {
        format!(
            "StabilityPoolState {{
    num_users: {},
    p: {},
    current_epoch: {:?},
    current_scale: {:?},
    total_deposits: {},
    total_collateral: {},
    last_collateral_error: {},
    last_reward_error: {}
}}
",
            self.num_users,
            self.p,
            self.current_epoch,
            self.current_scale,
            self.total_deposits,
            self.total_collateral,
            self.last_collateral_error_offset,
            self.last_reward_error_offset,
        )
    }
}
