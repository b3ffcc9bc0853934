pub mod deposit_ledger;
pub mod issuance_logic;
pub mod liquidations_logic;
pub mod stability_pool_operations;
pub mod types;

mod tests_utils;
