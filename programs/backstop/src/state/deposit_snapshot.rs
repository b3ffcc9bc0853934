use crate::{Decimal, DepositSnapshot, RewardSums};

impl DepositSnapshot {
    pub fn new(sum: RewardSums, product: Decimal, scale: u64, epoch: u64) -> Self {
        Self {
            sum,
            product,
            scale,
            epoch,
        }
    }

    /// Snapshot of a record without a deposit
    pub fn zeroed() -> Self {
        Self::default()
    }
}
