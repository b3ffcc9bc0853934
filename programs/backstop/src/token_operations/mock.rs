use std::collections::{BTreeMap, BTreeSet};

use super::{
    BorrowerOperations, CollateralVault, Context, RewardToken, StableToken, TransferError,
    TroveManager,
};
use crate::{Address, Decimal};

fn debit(
    balances: &mut BTreeMap<Address, Decimal>,
    owner: Address,
    amount: Decimal,
) -> Result<(), TransferError> {
    let available = balances.get(&owner).copied().unwrap_or_default();
    if available < amount {
        return Err(TransferError::InsufficientBalance {
            available,
            requested: amount,
        });
    }
    balances.insert(owner, available.try_sub(amount).unwrap());
    Ok(())
}

fn credit(balances: &mut BTreeMap<Address, Decimal>, owner: Address, amount: Decimal) {
    let entry = balances.entry(owner).or_default();
    *entry = entry.try_add(amount).unwrap();
}

#[derive(Debug, Default)]
pub struct MockStableToken {
    pub balances: BTreeMap<Address, Decimal>,
    pub fail_transfers: bool,
}

impl MockStableToken {
    pub fn balance_of(&self, owner: &Address) -> Decimal {
        self.balances.get(owner).copied().unwrap_or_default()
    }
}

impl StableToken for MockStableToken {
    fn transfer_from(
        &mut self,
        owner: Address,
        recipient: Address,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        if self.fail_transfers {
            return Err(TransferError::Failed("stablecoin paused".to_string()));
        }
        debit(&mut self.balances, owner, amount)?;
        credit(&mut self.balances, recipient, amount);
        Ok(())
    }

    fn transfer(
        &mut self,
        sender: Address,
        recipient: Address,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        self.transfer_from(sender, recipient, amount)
    }
}

/// Vault with unlimited collateral that records what it paid out
#[derive(Debug, Default)]
pub struct MockCollateralVault {
    pub paid: BTreeMap<Address, Decimal>,
    pub rejecting: BTreeSet<Address>,
}

impl MockCollateralVault {
    pub fn paid_to(&self, recipient: &Address) -> Decimal {
        self.paid.get(recipient).copied().unwrap_or_default()
    }
}

impl CollateralVault for MockCollateralVault {
    fn send_collateral(
        &mut self,
        recipient: Address,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        if self.rejecting.contains(&recipient) {
            return Err(TransferError::RecipientRejected(recipient));
        }
        credit(&mut self.paid, recipient, amount);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockRewardToken {
    pub paid: BTreeMap<Address, Decimal>,
    pub fail_transfers: bool,
}

impl MockRewardToken {
    pub fn paid_to(&self, recipient: &Address) -> Decimal {
        self.paid.get(recipient).copied().unwrap_or_default()
    }
}

impl RewardToken for MockRewardToken {
    fn transfer(&mut self, recipient: Address, amount: Decimal) -> Result<(), TransferError> {
        if self.fail_transfers {
            return Err(TransferError::Failed("reward allocation locked".to_string()));
        }
        credit(&mut self.paid, recipient, amount);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockTroveManager {
    pub undercollateralized: bool,
    pub active_troves: BTreeSet<Address>,
}

impl TroveManager for MockTroveManager {
    fn has_undercollateralized_troves(&self) -> bool {
        self.undercollateralized
    }

    fn has_active_trove(&self, owner: Address) -> bool {
        self.active_troves.contains(&owner)
    }
}

#[derive(Debug, Default)]
pub struct MockBorrowerOperations {
    pub moved: BTreeMap<Address, Decimal>,
    pub fail_transfers: bool,
}

impl BorrowerOperations for MockBorrowerOperations {
    fn move_collateral_gain_to_trove(
        &mut self,
        _owner: Address,
        position: Address,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        if self.fail_transfers {
            return Err(TransferError::Failed("trove is closing".to_string()));
        }
        credit(&mut self.moved, position, amount);
        Ok(())
    }
}

/// All collaborators of one test protocol
#[derive(Debug, Default)]
pub struct MockProtocol {
    pub stablecoin: MockStableToken,
    pub collateral_vault: MockCollateralVault,
    pub reward_token: MockRewardToken,
    pub trove_manager: MockTroveManager,
    pub borrower_operations: MockBorrowerOperations,
}

impl MockProtocol {
    pub fn ctx(&mut self, caller: Address, now_timestamp: u64) -> Context<'_> {
        Context {
            caller,
            now_timestamp,
            stablecoin: &mut self.stablecoin,
            collateral_vault: &mut self.collateral_vault,
            reward_token: &mut self.reward_token,
            trove_manager: &self.trove_manager,
            borrower_operations: &mut self.borrower_operations,
        }
    }

    pub fn mint_stablecoin(&mut self, owner: Address, amount: Decimal) {
        credit(&mut self.stablecoin.balances, owner, amount);
    }
}
