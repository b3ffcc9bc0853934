//! Collaborators the pool moves funds through.
//!
//! The pool never holds token balances itself, it asks these services to
//! move them. Production embeddings implement the traits over their token
//! ledgers, tests use the in-memory mocks.

use thiserror::Error;

use crate::{Address, Decimal};

pub mod collateral;
#[cfg(test)]
pub mod mock;
pub mod reward_token;
pub mod stablecoin;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("insufficient balance: {available} available, {requested} requested")]
    InsufficientBalance {
        available: Decimal,
        requested: Decimal,
    },

    #[error("recipient {0} cannot receive funds")]
    RecipientRejected(Address),

    #[error("transfer failed: {0}")]
    Failed(String),
}

pub trait StableToken {
    /// Move `amount` from `owner` to `recipient` on the owner's behalf
    fn transfer_from(
        &mut self,
        owner: Address,
        recipient: Address,
        amount: Decimal,
    ) -> Result<(), TransferError>;

    fn transfer(
        &mut self,
        sender: Address,
        recipient: Address,
        amount: Decimal,
    ) -> Result<(), TransferError>;
}

/// Custody of the collateral received from offsets
pub trait CollateralVault {
    fn send_collateral(&mut self, recipient: Address, amount: Decimal) -> Result<(), TransferError>;
}

/// Pre-funded allocation of the reward token
pub trait RewardToken {
    fn transfer(&mut self, recipient: Address, amount: Decimal) -> Result<(), TransferError>;
}

pub trait TroveManager {
    fn has_undercollateralized_troves(&self) -> bool;
    fn has_active_trove(&self, owner: Address) -> bool;
}

pub trait BorrowerOperations {
    /// Credit `amount` collateral to the trove `position` owned by `owner`
    fn move_collateral_gain_to_trove(
        &mut self,
        owner: Address,
        position: Address,
        amount: Decimal,
    ) -> Result<(), TransferError>;
}

/// Everything one call needs besides the pool itself.
pub struct Context<'a> {
    pub caller: Address,
    pub now_timestamp: u64,
    pub stablecoin: &'a mut dyn StableToken,
    pub collateral_vault: &'a mut dyn CollateralVault,
    pub reward_token: &'a mut dyn RewardToken,
    pub trove_manager: &'a dyn TroveManager,
    pub borrower_operations: &'a mut dyn BorrowerOperations,
}
