//! Collateral and reward token movements for the bond market.
//!
//! The bond market must be the admin of the reward token: it mints every
//! bond's reward when the bond is bought.

use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env};

use crate::types::BondConfig;

/// Move `amount` of `asset` from `owner` straight to the treasury.
/// Requires prior approval for the bond market as spender.
pub fn transfer_collateral(
    e: &Env,
    config: &BondConfig,
    asset: &Address,
    owner: &Address,
    amount: i128,
) {
    let contract = e.current_contract_address();
    TokenClient::new(e, asset).transfer_from(&contract, owner, &config.treasury, &amount);
}

pub fn mint_reward(e: &Env, config: &BondConfig, to: &Address, amount: i128) {
    if amount == 0 {
        return;
    }
    StellarAssetClient::new(e, &config.reward_token).mint(to, &amount);
}

/// Pay `amount` reward tokens held by the bond market to `recipient`.
pub fn transfer_reward(e: &Env, config: &BondConfig, recipient: &Address, amount: i128) {
    if amount == 0 {
        return;
    }
    let contract = e.current_contract_address();
    TokenClient::new(e, &config.reward_token).transfer(&contract, recipient, &amount);
}
