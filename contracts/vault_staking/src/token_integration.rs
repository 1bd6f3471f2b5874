//! Reward and receipt token movements for the staking engine.
//!
//! The engine holds staked principal and the reward reserve in its own
//! balance. It must be the admin of the receipt token to mint it.

use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env};

use crate::types::StakingConfig;

/// Pull `amount` reward tokens from `owner` into the engine.
/// Requires prior approval for the engine as spender.
pub fn transfer_into_contract(e: &Env, config: &StakingConfig, owner: &Address, amount: i128) {
    if amount == 0 {
        return;
    }
    let contract = e.current_contract_address();
    TokenClient::new(e, &config.reward_token).transfer_from(&contract, owner, &contract, &amount);
}

/// Pay `amount` reward tokens from the engine to `recipient`.
pub fn transfer_from_contract(
    e: &Env,
    config: &StakingConfig,
    recipient: &Address,
    amount: i128,
) {
    if amount == 0 {
        return;
    }
    let contract = e.current_contract_address();
    TokenClient::new(e, &config.reward_token).transfer(&contract, recipient, &amount);
}

pub fn mint_receipt(e: &Env, config: &StakingConfig, to: &Address, amount: i128) {
    if amount == 0 {
        return;
    }
    StellarAssetClient::new(e, &config.receipt_token).mint(to, &amount);
}

/// Burn `amount` receipt tokens held by `from`.
pub fn burn_receipt(e: &Env, config: &StakingConfig, from: &Address, amount: i128) {
    if amount == 0 {
        return;
    }
    TokenClient::new(e, &config.receipt_token).burn(from, &amount);
}
