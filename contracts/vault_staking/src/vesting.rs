//! Vesting queue for unstaked principal.

use soroban_sdk::{Address, Env};
use vault_common::VaultError;

use crate::storage;
use crate::types::VestingEntry;

/// Append a fresh entry for (account, currency) with the next local id.
pub fn append(
    e: &Env,
    account: &Address,
    currency: &Address,
    principal: i128,
    reward: i128,
    unlock_timestamp: u64,
) -> Result<VestingEntry, VaultError> {
    let entry = VestingEntry {
        id: storage::next_vesting_id(e, account, currency)?,
        principal,
        reward,
        unlock_timestamp,
        claimed: false,
    };
    storage::save_vesting(e, account, currency, &entry);
    Ok(entry)
}

/// Mark entry `id` claimed and return it. Order of checks: unknown id,
/// unlock time, then double claim.
pub fn claim(
    e: &Env,
    account: &Address,
    currency: &Address,
    id: u32,
    now: u64,
) -> Result<VestingEntry, VaultError> {
    let mut entry =
        storage::load_vesting(e, account, currency, id).ok_or(VaultError::NothingToClaim)?;
    if now < entry.unlock_timestamp {
        return Err(VaultError::StillVesting);
    }
    if entry.claimed {
        return Err(VaultError::AlreadyClaimed);
    }
    entry.claimed = true;
    storage::save_vesting(e, account, currency, &entry);
    Ok(entry)
}
