//! Storage access for the staking engine.
//!
//! | Key                               | Tier           |
//! |-----------------------------------|----------------|
//! | `Admin`, `Config`, `BondMarket`   | `instance()`   |
//! | `PriceSetter`, `Lockup(id)`       | `instance()`   |
//! | `Currency*`                       | `instance()`   |
//! | `PriceCount(asset)`               | `persistent()` |
//! | `PriceSample(asset, idx)`         | `persistent()` |
//! | `Position(account, asset)`        | `persistent()` |
//! | `Vesting*`                        | `persistent()` |
//!
//! Registries are small and read on almost every call; ledger rows grow with
//! the number of accounts and carry their own TTL. Price samples are stored
//! one per entry under a running count, so appending never rewrites history.

use soroban_sdk::{Address, Env};
use vault_common::VaultError;

use crate::rewards::PriceSeries;
use crate::types::{
    DataKey, LockupTier, PriceSample, StakePosition, StakingConfig, VestingEntry, WagerCurrency,
};

/// Minimum ledger TTL before a bump is requested (~1 day at 5 s/ledger).
const BUMP_THRESHOLD: u32 = 17_280;
/// Target TTL after a bump (~30 days).
const BUMP_TARGET: u32 = 518_400;

fn bump(e: &Env, key: &DataKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, BUMP_THRESHOLD, BUMP_TARGET);
}

/// Keep config, admin and registries alive. Called by every mutating entry point.
pub fn bump_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
}

// ── Admin & config ─────────────────────────────────────────────────────────

pub fn is_initialized(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Admin)
}

pub fn read_admin(e: &Env) -> Result<Address, VaultError> {
    e.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(VaultError::NotInitialized)
}

/// `require_auth` on `caller`, then check it is the stored admin.
pub fn require_admin(e: &Env, caller: &Address) -> Result<(), VaultError> {
    caller.require_auth();
    if read_admin(e)? != *caller {
        return Err(VaultError::NotAdmin);
    }
    Ok(())
}

pub fn write_admin(e: &Env, admin: &Address) {
    e.storage().instance().set(&DataKey::Admin, admin);
}

pub fn read_config(e: &Env) -> Result<StakingConfig, VaultError> {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(VaultError::NotInitialized)
}

pub fn write_config(e: &Env, config: &StakingConfig) {
    e.storage().instance().set(&DataKey::Config, config);
}

pub fn read_bond_market(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::BondMarket)
}

pub fn write_bond_market(e: &Env, bond_market: &Address) {
    e.storage().instance().set(&DataKey::BondMarket, bond_market);
}

pub fn read_price_setter(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::PriceSetter)
}

pub fn write_price_setter(e: &Env, setter: &Address) {
    e.storage().instance().set(&DataKey::PriceSetter, setter);
}

// ── Lockup tiers ───────────────────────────────────────────────────────────

pub fn load_lockup(e: &Env, id: u32) -> Result<LockupTier, VaultError> {
    e.storage()
        .instance()
        .get(&DataKey::Lockup(id))
        .ok_or(VaultError::LockupNotFound)
}

pub fn save_lockup(e: &Env, tier: &LockupTier) {
    e.storage().instance().set(&DataKey::Lockup(tier.id), tier);
}

// ── Currencies ─────────────────────────────────────────────────────────────

pub fn currency_count(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&DataKey::CurrencyCounter)
        .unwrap_or(0)
}

/// Allocate the next sequential currency id (ids start at 1).
pub fn next_currency_id(e: &Env) -> Result<u32, VaultError> {
    let id = currency_count(e)
        .checked_add(1)
        .ok_or(VaultError::Overflow)?;
    e.storage().instance().set(&DataKey::CurrencyCounter, &id);
    Ok(id)
}

pub fn has_currency(e: &Env, asset: &Address) -> bool {
    e.storage()
        .instance()
        .has(&DataKey::CurrencyId(asset.clone()))
}

pub fn load_currency(e: &Env, id: u32) -> Result<WagerCurrency, VaultError> {
    e.storage()
        .instance()
        .get(&DataKey::Currency(id))
        .ok_or(VaultError::CurrencyNotFound)
}

pub fn load_currency_by_asset(e: &Env, asset: &Address) -> Result<WagerCurrency, VaultError> {
    let id: u32 = e
        .storage()
        .instance()
        .get(&DataKey::CurrencyId(asset.clone()))
        .ok_or(VaultError::CurrencyNotFound)?;
    load_currency(e, id)
}

pub fn save_currency(e: &Env, currency: &WagerCurrency) {
    let storage = e.storage().instance();
    storage.set(&DataKey::Currency(currency.id), currency);
    storage.set(&DataKey::CurrencyId(currency.asset.clone()), &currency.id);
}

// ── Price history ──────────────────────────────────────────────────────────

pub fn price_count(e: &Env, asset: &Address) -> u32 {
    e.storage()
        .persistent()
        .get(&DataKey::PriceCount(asset.clone()))
        .unwrap_or(0)
}

pub fn load_price_sample(e: &Env, asset: &Address, idx: u32) -> Option<PriceSample> {
    let key = DataKey::PriceSample(asset.clone(), idx);
    let sample = e.storage().persistent().get(&key);
    if sample.is_some() {
        bump(e, &key);
    }
    sample
}

/// Store `sample` at index `count` and advance the count.
pub fn append_price(e: &Env, asset: &Address, sample: &PriceSample) -> Result<u32, VaultError> {
    let idx = price_count(e, asset);
    let next = idx.checked_add(1).ok_or(VaultError::Overflow)?;

    let sample_key = DataKey::PriceSample(asset.clone(), idx);
    e.storage().persistent().set(&sample_key, sample);
    bump(e, &sample_key);

    let count_key = DataKey::PriceCount(asset.clone());
    e.storage().persistent().set(&count_key, &next);
    bump(e, &count_key);
    Ok(idx)
}

/// Price history of one asset read sample by sample from storage.
pub struct StoredPrices<'a> {
    e: &'a Env,
    asset: Address,
    count: u32,
}

impl<'a> StoredPrices<'a> {
    pub fn new(e: &'a Env, asset: &Address) -> Self {
        Self {
            e,
            asset: asset.clone(),
            count: price_count(e, asset),
        }
    }
}

impl PriceSeries for StoredPrices<'_> {
    fn count(&self) -> u32 {
        self.count
    }

    fn sample(&self, idx: u32) -> Result<PriceSample, VaultError> {
        load_price_sample(self.e, &self.asset, idx).ok_or(VaultError::PriceSampleMissing)
    }
}

// ── Positions ──────────────────────────────────────────────────────────────

pub fn load_position(e: &Env, account: &Address, asset: &Address) -> Option<StakePosition> {
    let key = DataKey::Position(account.clone(), asset.clone());
    let position = e.storage().persistent().get(&key);
    if position.is_some() {
        bump(e, &key);
    }
    position
}

pub fn save_position(e: &Env, account: &Address, asset: &Address, position: &StakePosition) {
    let key = DataKey::Position(account.clone(), asset.clone());
    e.storage().persistent().set(&key, position);
    bump(e, &key);
}

// ── Vesting queue ──────────────────────────────────────────────────────────

pub fn vesting_count(e: &Env, account: &Address, asset: &Address) -> u32 {
    e.storage()
        .persistent()
        .get(&DataKey::VestingCounter(account.clone(), asset.clone()))
        .unwrap_or(0)
}

/// Allocate the next local vesting id for (account, asset); ids start at 1.
pub fn next_vesting_id(e: &Env, account: &Address, asset: &Address) -> Result<u32, VaultError> {
    let id = vesting_count(e, account, asset)
        .checked_add(1)
        .ok_or(VaultError::Overflow)?;
    let key = DataKey::VestingCounter(account.clone(), asset.clone());
    e.storage().persistent().set(&key, &id);
    bump(e, &key);
    Ok(id)
}

pub fn load_vesting(e: &Env, account: &Address, asset: &Address, id: u32) -> Option<VestingEntry> {
    let key = DataKey::Vesting(account.clone(), asset.clone(), id);
    let entry = e.storage().persistent().get(&key);
    if entry.is_some() {
        bump(e, &key);
    }
    entry
}

pub fn save_vesting(e: &Env, account: &Address, asset: &Address, entry: &VestingEntry) {
    let key = DataKey::Vesting(account.clone(), asset.clone(), entry.id);
    e.storage().persistent().set(&key, entry);
    bump(e, &key);
}
