use soroban_sdk::{Address, Env};
use vault_common::VaultError;

use crate::types::{BondConfig, BondPosition, CollateralEntry, DataKey};

/// Minimum ledger TTL before a bump is requested (~1 day at 5 s/ledger).
const BUMP_THRESHOLD: u32 = 17_280;
/// Target TTL after a bump (~30 days).
const BUMP_TARGET: u32 = 518_400;

/// Keep config, admin and the collateral registry alive. Called by every
/// mutating entry point.
pub fn bump_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
}

pub fn is_initialized(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Admin)
}

pub fn read_admin(e: &Env) -> Result<Address, VaultError> {
    e.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(VaultError::NotInitialized)
}

pub fn write_admin(e: &Env, admin: &Address) {
    e.storage().instance().set(&DataKey::Admin, admin);
}

pub fn require_admin(e: &Env, caller: &Address) -> Result<(), VaultError> {
    caller.require_auth();
    if read_admin(e)? != *caller {
        return Err(VaultError::NotAdmin);
    }
    Ok(())
}

pub fn read_config(e: &Env) -> Result<BondConfig, VaultError> {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(VaultError::NotInitialized)
}

pub fn write_config(e: &Env, config: &BondConfig) {
    e.storage().instance().set(&DataKey::Config, config);
}

// ── Collateral registry ────────────────────────────────────────────────────

pub fn collateral_count(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&DataKey::CollateralCounter)
        .unwrap_or(0)
}

pub fn next_collateral_id(e: &Env) -> Result<u32, VaultError> {
    let id = collateral_count(e)
        .checked_add(1)
        .ok_or(VaultError::Overflow)?;
    e.storage().instance().set(&DataKey::CollateralCounter, &id);
    Ok(id)
}

pub fn has_collateral(e: &Env, asset: &Address) -> bool {
    e.storage()
        .instance()
        .has(&DataKey::CollateralId(asset.clone()))
}

pub fn load_collateral(e: &Env, id: u32) -> Option<CollateralEntry> {
    e.storage().instance().get(&DataKey::Collateral(id))
}

pub fn load_collateral_by_asset(e: &Env, asset: &Address) -> Option<CollateralEntry> {
    let id: u32 = e
        .storage()
        .instance()
        .get(&DataKey::CollateralId(asset.clone()))?;
    load_collateral(e, id)
}

/// Registered and active collateral for `asset`.
pub fn active_collateral(e: &Env, asset: &Address) -> Result<CollateralEntry, VaultError> {
    match load_collateral_by_asset(e, asset) {
        Some(entry) if entry.active => Ok(entry),
        _ => Err(VaultError::UnknownOrInactiveCollateral),
    }
}

pub fn save_collateral(e: &Env, entry: &CollateralEntry) {
    let storage = e.storage().instance();
    storage.set(&DataKey::Collateral(entry.id), entry);
    storage.set(&DataKey::CollateralId(entry.asset.clone()), &entry.id);
}

// ── Positions ──────────────────────────────────────────────────────────────

pub fn load_position(e: &Env, account: &Address, asset: &Address) -> Option<BondPosition> {
    let key = DataKey::Position(account.clone(), asset.clone());
    let position = e.storage().persistent().get(&key);
    if position.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
    }
    position
}

pub fn save_position(e: &Env, account: &Address, asset: &Address, position: &BondPosition) {
    let key = DataKey::Position(account.clone(), asset.clone());
    e.storage().persistent().set(&key, position);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}
