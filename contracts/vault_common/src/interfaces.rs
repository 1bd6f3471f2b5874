//! Cross-contract interfaces.
//!
//! The bond market never links the staking contract or the price adapter
//! directly; it calls them through the clients generated here.

use soroban_sdk::{contractclient, contracttype, Address, Env};

use crate::errors::VaultError;

/// Price direction a staker wagers on.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Bonus when the price rises by at least 1 % within a slot.
    Long,
    /// Bonus when the price falls by at least 1 % within a slot.
    Short,
}

/// Quote source converting a collateral amount into reward-token value.
///
/// Implementations own the pool/AMM pricing; the bond market only applies the
/// discount on top of the returned value.
#[contractclient(name = "PriceAdapterClient")]
pub trait PriceAdapter {
    /// Reward-token-equivalent value of `amount` units of `asset`.
    fn quote(env: Env, asset: Address, amount: i128) -> i128;
}

/// Entry point the bond market uses to credit auto-staked bond proceeds.
#[contractclient(name = "StakingBridgeClient")]
pub trait StakingBridge {
    /// Credit `amount` to `beneficiary`'s position in `currency`. With
    /// `is_internal` set the caller must be the configured bond market and no
    /// tokens are pulled; returns the position's new staked amount.
    #[allow(clippy::too_many_arguments)]
    fn stake(
        env: Env,
        caller: Address,
        amount: i128,
        beneficiary: Address,
        currency: Address,
        direction: Direction,
        lockup_id: u32,
        is_internal: bool,
    ) -> Result<i128, VaultError>;
}
