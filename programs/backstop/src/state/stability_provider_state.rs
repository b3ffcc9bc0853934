use crate::{Address, Decimal, DepositSnapshot, StabilityProviderState};

impl StabilityProviderState {
    pub fn new(owner: Address, user_id: u64) -> Self {
        Self {
            version: 0,
            owner,
            user_id,
            deposited_stablecoin: Decimal::zero(),
            user_deposit_snapshot: DepositSnapshot::zeroed(),
            cumulative_collateral_gain: Decimal::zero(),
            cumulative_reward_gain: Decimal::zero(),
        }
    }

    pub fn has_deposit(&self) -> bool {
        !self.deposited_stablecoin.is_zero()
    }

    pub fn to_state_string(&self) -> String {
        format!(
            "StabilityProviderState {{
    user_id: {},
    owner: {:?},
    deposited_stablecoin: {},
    user_deposit_snapshot: {:?},
    cumulative_collateral_gain: {},
    cumulative_reward_gain: {},
}}
",
            self.user_id,
            self.owner,
            self.deposited_stablecoin,
            self.user_deposit_snapshot,
            self.cumulative_collateral_gain,
            self.cumulative_reward_gain,
        )
    }
}
