use soroban_sdk::{Address, Env, Symbol};

use crate::types::CollateralEntry;

/// Emitted when a collateral instrument is registered.
///
/// # Topics
/// * `Symbol` - "collateral_added"
/// * `Address` - The collateral asset
///
/// # Data
/// * `Address` - The collateral asset
/// * `Option<Address>` - First paired asset
/// * `Option<Address>` - Second paired asset
/// * `bool` - Whether the collateral is active
/// * `u32` - Discount in basis points
pub fn emit_collateral_added(e: &Env, entry: &CollateralEntry) {
    let topics = (Symbol::new(e, "collateral_added"), entry.asset.clone());
    let data = (
        entry.asset.clone(),
        entry.paired_a.clone(),
        entry.paired_b.clone(),
        entry.active,
        entry.discount_bps,
    );
    e.events().publish(topics, data);
}

/// Emitted when vested reward tokens are claimed from a bond.
///
/// # Topics
/// * `Symbol` - "bond_claimed"
/// * `Address` - The claiming account
///
/// # Data
/// * `Address` - The claiming account
/// * `i128` - The amount paid
/// * `u64` - Ledger timestamp of the claim
/// * `bool` - Whether the position was fully vested
pub fn emit_bond_claimed(
    e: &Env,
    account: &Address,
    amount: i128,
    timestamp: u64,
    fully_vested: bool,
) {
    let topics = (Symbol::new(e, "bond_claimed"), account.clone());
    let data = (account.clone(), amount, timestamp, fully_vested);
    e.events().publish(topics, data);
}
