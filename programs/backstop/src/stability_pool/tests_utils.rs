#[cfg(test)]
pub mod utils {

    use crate::{
        assert_fuzzy_eq_decimal,
        stability_pool::{
            deposit_ledger, stability_pool_operations,
            types::{OffsetEffects, ProvideStabilityEffects, WithdrawStabilityEffects},
        },
        state::epoch_to_scale_to_sum::EpochToScaleToSum,
        utils::coretypes::USD,
        Address, BackstopError, Decimal, GlobalConfig, IssuanceParams, IssuanceState,
        StabilityGains, StabilityPoolState, StabilityProviderState,
    };

    /// Pool state threaded through the pure operations, like the handlers do
    pub struct TestPool {
        pub stability_pool_state: StabilityPoolState,
        pub epoch_to_scale_to_sum: EpochToScaleToSum,
        pub issuance_state: IssuanceState,
        pub global_config: GlobalConfig,
        pub now_timestamp: u64,
    }

    impl TestPool {
        pub fn new() -> Self {
            let mut pool = TestPool {
                stability_pool_state: StabilityPoolState::default(),
                epoch_to_scale_to_sum: EpochToScaleToSum::default(),
                issuance_state: IssuanceState::default(),
                global_config: GlobalConfig::default(),
                now_timestamp: 0,
            };
            stability_pool_operations::initialize_stability_pool(
                &mut pool.stability_pool_state,
                &mut pool.epoch_to_scale_to_sum,
                &mut pool.issuance_state,
                &IssuanceParams::default(),
                0,
            );
            pool
        }

        pub fn new_user(&mut self) -> StabilityProviderState {
            let mut user = StabilityProviderState::new(Address::new_unique(), 0);
            stability_pool_operations::approve_new_user(&mut self.stability_pool_state, &mut user)
                .unwrap();
            user
        }

        pub fn try_provide(
            &mut self,
            user: &mut StabilityProviderState,
            amount: Decimal,
        ) -> Result<ProvideStabilityEffects, BackstopError> {
            stability_pool_operations::provide_stability(
                &mut self.stability_pool_state,
                user,
                &mut self.epoch_to_scale_to_sum,
                &mut self.issuance_state,
                &self.global_config,
                amount,
                self.now_timestamp,
            )
        }

        pub fn provide(
            &mut self,
            user: &mut StabilityProviderState,
            amount: Decimal,
        ) -> ProvideStabilityEffects {
            self.try_provide(user, amount).unwrap()
        }

        pub fn try_withdraw(
            &mut self,
            user: &mut StabilityProviderState,
            amount: Decimal,
        ) -> Result<WithdrawStabilityEffects, BackstopError> {
            stability_pool_operations::withdraw_stability(
                &mut self.stability_pool_state,
                user,
                &mut self.epoch_to_scale_to_sum,
                &mut self.issuance_state,
                amount,
                false,
                self.now_timestamp,
            )
        }

        pub fn withdraw(
            &mut self,
            user: &mut StabilityProviderState,
            amount: Decimal,
        ) -> WithdrawStabilityEffects {
            self.try_withdraw(user, amount).unwrap()
        }

        pub fn try_offset(
            &mut self,
            debt: Decimal,
            collateral: Decimal,
        ) -> Result<OffsetEffects, BackstopError> {
            stability_pool_operations::offset(
                &mut self.stability_pool_state,
                &mut self.epoch_to_scale_to_sum,
                &mut self.issuance_state,
                debt,
                collateral,
                self.now_timestamp,
            )
        }

        pub fn offset(&mut self, debt: Decimal, collateral: Decimal) -> OffsetEffects {
            self.try_offset(debt, collateral).unwrap()
        }

        pub fn trigger_issuance(&mut self) -> Decimal {
            stability_pool_operations::trigger_issuance(
                &mut self.stability_pool_state,
                &mut self.epoch_to_scale_to_sum,
                &mut self.issuance_state,
                self.now_timestamp,
            )
            .unwrap()
        }

        pub fn compounded(&self, user: &StabilityProviderState) -> Decimal {
            deposit_ledger::compounded_deposit(&self.stability_pool_state, user).unwrap()
        }

        pub fn gains(&self, user: &StabilityProviderState) -> StabilityGains {
            deposit_ledger::depositor_gains(
                &self.stability_pool_state,
                user,
                &self.epoch_to_scale_to_sum,
            )
            .unwrap()
        }

        pub fn total_deposits(&self) -> Decimal {
            self.stability_pool_state.total_deposits
        }
    }

    pub fn new_stability_users(
        pool: &mut TestPool,
        count: usize,
        stability_to_provide: f64,
    ) -> Vec<StabilityProviderState> {
        (0..count)
            .map(|_| {
                let mut user = pool.new_user();
                pool.provide(&mut user, USD::from(stability_to_provide));
                user
            })
            .collect()
    }

    /// Compounded deposits never exceed the pool total and trail it by at
    /// most `epsilon` raw units
    pub fn assert_deposits_match(pool: &TestPool, users: &[StabilityProviderState], epsilon: u128) {
        let mut sum_compounded = Decimal::zero();
        for user in users {
            sum_compounded = sum_compounded.try_add(pool.compounded(user)).unwrap();
        }
        let total = pool.total_deposits();
        assert!(
            sum_compounded <= total,
            "compounded {} above total {}",
            sum_compounded,
            total
        );
        assert_fuzzy_eq_decimal!(sum_compounded, total, epsilon);
    }

    /// Pending collateral is always backed by what the pool holds
    pub fn assert_collateral_backed(pool: &TestPool, users: &[StabilityProviderState]) {
        let mut pending = Decimal::zero();
        for user in users {
            pending = pending.try_add(pool.gains(user).collateral).unwrap();
        }
        let held = pool.stability_pool_state.total_collateral;
        assert!(
            pending <= held,
            "pending collateral {} above held {}",
            pending,
            held
        );
    }
}
