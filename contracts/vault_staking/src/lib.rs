//! # Vault Staking Contract
//!
//! Ledger of stake positions per (account, wager currency). A position earns
//! a base reward per elapsed slot at its lockup tier's rate, plus a bonus for
//! every slot in which the currency's price moved at least 1 % in the
//! direction the staker wagered on.
//!
//! Unstaking moves principal, together with the whole reward accrued so far,
//! into a per-account vesting queue that becomes claimable once the tier's
//! lockup has elapsed. The reward clock then restarts on the remainder.
//!
//! Stakes credited by the bond market (auto-stake) are not pulled from the
//! caller and unlock for unstaking in three slot-sized steps.

#![no_std]

mod events;
mod positions;
mod rewards;
mod storage;
mod token_integration;
mod types;
mod vesting;

pub use types::{
    LockupTier, PriceSample, RewardBreakdown, StakePosition, StakingConfig, VestingEntry,
    WagerCurrency,
};
pub use vault_common::{Direction, VaultError};

use positions::Credit;
use soroban_sdk::{contract, contractimpl, log, Address, Env, Vec};
use storage::StoredPrices;
use vault_common::{math, StakingBridge};


#[cfg(test)]
mod test_unstake;

fn validate_config(config: &StakingConfig) -> Result<(), VaultError> {
    if config.slot_duration == 0
        || config.reward_scale <= 0
        || config.lockup_unit_secs == 0
        || config.bonus_reward_bps as i128 > vault_common::BPS_DENOMINATOR
    {
        return Err(VaultError::InvalidConfig);
    }
    Ok(())
}

/// Most samples returned by one `price_history` page.
const MAX_PRICE_PAGE: u32 = 100;

/// Latest price of `currency`, 0 when no sample exists yet.
fn reference_price(e: &Env, currency: &Address) -> Result<i128, VaultError> {
    Ok(rewards::latest(&StoredPrices::new(e, currency))?.unwrap_or(0))
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct VaultStaking;

#[contractimpl]
impl VaultStaking {
    // ── Admin setup ────────────────────────────────────────────────────────

    /// One-time initialization.
    pub fn initialize(e: Env, admin: Address, config: StakingConfig) -> Result<(), VaultError> {
        if storage::is_initialized(&e) {
            return Err(VaultError::AlreadyInitialized);
        }
        validate_config(&config)?;
        storage::write_admin(&e, &admin);
        storage::write_config(&e, &config);
        storage::bump_instance(&e);
        Ok(())
    }

    /// Bond market allowed to credit internal (auto-stake) stakes.
    pub fn set_bond_market(e: Env, admin: Address, bond_market: Address) -> Result<(), VaultError> {
        storage::require_admin(&e, &admin)?;
        storage::write_bond_market(&e, &bond_market);
        storage::bump_instance(&e);
        Ok(())
    }

    /// Address allowed to append price samples besides the admin.
    pub fn set_price_setter(e: Env, admin: Address, setter: Address) -> Result<(), VaultError> {
        storage::require_admin(&e, &admin)?;
        storage::write_price_setter(&e, &setter);
        storage::bump_instance(&e);
        Ok(())
    }

    pub fn set_bonus_reward_bps(e: Env, admin: Address, bps: u32) -> Result<(), VaultError> {
        storage::require_admin(&e, &admin)?;
        let mut config = storage::read_config(&e)?;
        config.bonus_reward_bps = bps;
        validate_config(&config)?;
        storage::write_config(&e, &config);
        storage::bump_instance(&e);
        Ok(())
    }

    pub fn get_config(e: Env) -> Result<StakingConfig, VaultError> {
        storage::read_config(&e)
    }

    pub fn get_admin(e: Env) -> Result<Address, VaultError> {
        storage::read_admin(&e)
    }

    pub fn get_bond_market(e: Env) -> Option<Address> {
        storage::read_bond_market(&e)
    }

    // ── Lockup tiers ───────────────────────────────────────────────────────

    /// Insert or overwrite tier `id`, deriving its per-slot reward rate.
    pub fn register_lockup_tier(
        e: Env,
        admin: Address,
        id: u32,
        nominal_duration: u64,
        annual_rate_bps: u32,
    ) -> Result<LockupTier, VaultError> {
        storage::require_admin(&e, &admin)?;
        if nominal_duration == 0 {
            return Err(VaultError::InvalidLockup);
        }
        let config = storage::read_config(&e)?;
        let tier = LockupTier {
            id,
            nominal_duration,
            annual_rate_bps,
            slot_reward_rate: rewards::slot_reward_rate(annual_rate_bps, config.reward_scale)?,
        };
        storage::save_lockup(&e, &tier);
        storage::bump_instance(&e);
        Ok(tier)
    }

    pub fn get_lockup(e: Env, id: u32) -> Result<LockupTier, VaultError> {
        storage::load_lockup(&e, id)
    }

    // ── Wager currencies ───────────────────────────────────────────────────

    /// Register `asset` as an active wager currency. Returns its id.
    pub fn register_currency(
        e: Env,
        admin: Address,
        asset: Address,
        price_reference: Address,
    ) -> Result<u32, VaultError> {
        storage::require_admin(&e, &admin)?;
        if storage::has_currency(&e, &asset) {
            return Err(VaultError::CurrencyExists);
        }
        let currency = WagerCurrency {
            id: storage::next_currency_id(&e)?,
            asset,
            price_reference,
            active: true,
        };
        storage::save_currency(&e, &currency);
        storage::bump_instance(&e);
        events::emit_currency_added(&e, &currency);
        Ok(currency.id)
    }

    /// Toggle the active flag of `asset`. Returns the new state.
    pub fn set_currency_active(e: Env, admin: Address, asset: Address) -> Result<bool, VaultError> {
        storage::require_admin(&e, &admin)?;
        let mut currency = storage::load_currency_by_asset(&e, &asset)?;
        currency.active = !currency.active;
        storage::save_currency(&e, &currency);
        storage::bump_instance(&e);
        events::emit_currency_updated(&e, &currency);
        Ok(currency.active)
    }

    pub fn get_currency(e: Env, id: u32) -> Result<WagerCurrency, VaultError> {
        storage::load_currency(&e, id)
    }

    pub fn get_currency_by_asset(e: Env, asset: Address) -> Result<WagerCurrency, VaultError> {
        storage::load_currency_by_asset(&e, &asset)
    }

    pub fn currency_count(e: Env) -> u32 {
        storage::currency_count(&e)
    }

    // ── Prices ─────────────────────────────────────────────────────────────

    /// Append one sample per (asset, price) pair at the current time.
    pub fn set_price(
        e: Env,
        caller: Address,
        assets: Vec<Address>,
        prices: Vec<i128>,
    ) -> Result<(), VaultError> {
        caller.require_auth();
        let is_admin = storage::read_admin(&e)? == caller;
        let is_setter = storage::read_price_setter(&e).is_some_and(|s| s == caller);
        if !is_admin && !is_setter {
            return Err(VaultError::NotPriceSetter);
        }
        if assets.len() != prices.len() {
            return Err(VaultError::PriceLengthMismatch);
        }

        let now = e.ledger().timestamp();
        for (asset, price) in assets.iter().zip(prices.iter()) {
            if price <= 0 {
                return Err(VaultError::InvalidPrice);
            }
            if !storage::has_currency(&e, &asset) {
                return Err(VaultError::CurrencyNotFound);
            }
            storage::append_price(
                &e,
                &asset,
                &PriceSample {
                    timestamp: now,
                    price,
                },
            )?;
        }
        storage::bump_instance(&e);
        Ok(())
    }

    pub fn latest_price(e: Env, currency: Address) -> Result<Option<i128>, VaultError> {
        rewards::latest(&StoredPrices::new(&e, &currency))
    }

    pub fn price_count(e: Env, currency: Address) -> u32 {
        storage::price_count(&e, &currency)
    }

    pub fn get_price_sample(e: Env, currency: Address, index: u32) -> Option<PriceSample> {
        storage::load_price_sample(&e, &currency, index)
    }

    /// Up to `limit` samples starting at index `start`, oldest first. Pages
    /// are capped at 100 samples.
    pub fn price_history(
        e: Env,
        currency: Address,
        start: u32,
        limit: u32,
    ) -> Result<Vec<PriceSample>, VaultError> {
        let count = storage::price_count(&e, &currency);
        let end = start
            .saturating_add(limit.min(MAX_PRICE_PAGE))
            .min(count);
        let mut page = Vec::new(&e);
        for idx in start..end {
            page.push_back(
                storage::load_price_sample(&e, &currency, idx)
                    .ok_or(VaultError::PriceSampleMissing)?,
            );
        }
        Ok(page)
    }

    // ── Staking ────────────────────────────────────────────────────────────

    /// Reward accrued on the position at the current time.
    pub fn calculate_rewards(
        e: Env,
        account: Address,
        currency: Address,
    ) -> Result<RewardBreakdown, VaultError> {
        let Some(position) = storage::load_position(&e, &account, &currency) else {
            return Ok(RewardBreakdown {
                total: 0,
                base: 0,
                bonus: 0,
                evaluated_slots: 0,
                qualifying_slots: 0,
            });
        };
        let config = storage::read_config(&e)?;
        let tier = storage::load_lockup(&e, position.lockup_id)?;
        let history = StoredPrices::new(&e, &currency);
        rewards::calculate(&config, &tier, &position, &history, e.ledger().timestamp())
    }

    /// Bonus the account's stake would earn if the latest price were compared
    /// against `base_price` under `direction`.
    pub fn user_bet_rewards(
        e: Env,
        direction: Direction,
        base_price: i128,
        account: Address,
        currency: Address,
    ) -> Result<i128, VaultError> {
        let config = storage::read_config(&e)?;
        let staked = storage::load_position(&e, &account, &currency)
            .map(|p| p.staked_amount)
            .unwrap_or(0);
        let current = rewards::latest(&StoredPrices::new(&e, &currency))?;
        rewards::single_slot_bonus(&config, staked, direction, base_price, current)
    }

    /// Amount of the position that may be unstaked now.
    pub fn available_to_unstake(
        e: Env,
        account: Address,
        currency: Address,
        lockup_id: u32,
    ) -> Result<i128, VaultError> {
        let config = storage::read_config(&e)?;
        storage::load_lockup(&e, lockup_id)?;
        match storage::load_position(&e, &account, &currency) {
            Some(position) => {
                positions::available(&position, e.ledger().timestamp(), config.slot_duration)
            }
            None => Ok(0),
        }
    }

    /// Move `amount` of principal plus the full accrued reward into a new
    /// vesting entry and restart the reward clock on the remainder.
    pub fn unstake(
        e: Env,
        account: Address,
        currency: Address,
        amount: i128,
    ) -> Result<VestingEntry, VaultError> {
        account.require_auth();
        let config = storage::read_config(&e)?;
        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        let mut position = storage::load_position(&e, &account, &currency)
            .ok_or(VaultError::InsufficientAvailable)?;

        let now = e.ledger().timestamp();
        let limit = positions::available(&position, now, config.slot_duration)?;
        if amount > limit {
            log!(&e, "unstake exceeds available", amount, limit);
            return Err(VaultError::InsufficientAvailable);
        }

        // Settle the whole accrued reward before touching the position.
        let tier = storage::load_lockup(&e, position.lockup_id)?;
        let history = StoredPrices::new(&e, &currency);
        let reward = rewards::calculate(&config, &tier, &position, &history, now)?.total;

        let lockup_secs = math::mul_u64(tier.nominal_duration, config.lockup_unit_secs)?;
        let entry = vesting::append(
            &e,
            &account,
            &currency,
            amount,
            reward,
            math::add_u64(now, lockup_secs)?,
        )?;

        let latest = rewards::latest(&history)?.unwrap_or(0);
        let burn = positions::debit(&mut position, amount, now, latest)?;
        storage::save_position(&e, &account, &currency, &position);
        storage::bump_instance(&e);
        token_integration::burn_receipt(&e, &config, &account, burn);

        log!(&e, "unstake settled", entry.id, amount, reward);
        Ok(entry)
    }

    /// Pay out vesting entry `entry_id`. Returns `principal + reward`.
    pub fn claim_vested(
        e: Env,
        account: Address,
        currency: Address,
        entry_id: u32,
    ) -> Result<i128, VaultError> {
        account.require_auth();
        let config = storage::read_config(&e)?;
        let entry = vesting::claim(&e, &account, &currency, entry_id, e.ledger().timestamp())?;
        let payout = math::add_i128(entry.principal, entry.reward)?;
        storage::bump_instance(&e);
        token_integration::transfer_from_contract(&e, &config, &account, payout);
        Ok(payout)
    }

    // ── Views ──────────────────────────────────────────────────────────────

    pub fn get_position(e: Env, account: Address, currency: Address) -> Option<StakePosition> {
        storage::load_position(&e, &account, &currency)
    }

    pub fn get_vesting_entry(
        e: Env,
        account: Address,
        currency: Address,
        entry_id: u32,
    ) -> Option<VestingEntry> {
        storage::load_vesting(&e, &account, &currency, entry_id)
    }

    pub fn vesting_count(e: Env, account: Address, currency: Address) -> u32 {
        storage::vesting_count(&e, &account, &currency)
    }
}

#[contractimpl]
impl StakingBridge for VaultStaking {
    /// Credit `amount` to `beneficiary`'s position in `currency`.
    ///
    /// External stakes pull `amount` reward tokens from `caller` and mint the
    /// same amount of receipt token to `beneficiary`. Internal stakes may
    /// only come from the configured bond market, which has already minted
    /// the tokens to this contract.
    ///
    /// Returns the position's new staked amount.
    #[allow(clippy::too_many_arguments)]
    fn stake(
        e: Env,
        caller: Address,
        amount: i128,
        beneficiary: Address,
        currency: Address,
        direction: Direction,
        lockup_id: u32,
        is_internal: bool,
    ) -> Result<i128, VaultError> {
        caller.require_auth();
        let config = storage::read_config(&e)?;

        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        if is_internal && storage::read_bond_market(&e).as_ref() != Some(&caller) {
            log!(&e, "internal stake rejected", caller);
            return Err(VaultError::NotBondMarket);
        }
        if !storage::load_currency_by_asset(&e, &currency)?.active {
            return Err(VaultError::CurrencyInactive);
        }
        storage::load_lockup(&e, lockup_id)?;

        let now = e.ledger().timestamp();
        let position = positions::credit(
            storage::load_position(&e, &beneficiary, &currency),
            &Credit {
                amount,
                direction,
                lockup_id,
                is_internal,
                reference_price: reference_price(&e, &currency)?,
                now,
            },
            config.slot_duration,
        )?;
        storage::save_position(&e, &beneficiary, &currency, &position);
        storage::bump_instance(&e);

        if !is_internal {
            token_integration::transfer_into_contract(&e, &config, &caller, amount);
            token_integration::mint_receipt(&e, &config, &beneficiary, amount);
        }
        Ok(position.staked_amount)
    }
}
