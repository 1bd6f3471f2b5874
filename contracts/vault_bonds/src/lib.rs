//! # Vault Bonds Contract
//!
//! Sells the reward token at a discount against registered collateral.
//! Deposited collateral goes to the treasury; the reward bought is minted and
//! vests linearly to the buyer, or is credited straight into the staking
//! engine when bought with auto-stake.
//!
//! ## Re-purchase
//!
//! Buying again on an existing position first pays out whatever has vested
//! (settle), then adds the new reward and restarts the schedule (merge).
//!
//! ## Storage Layout
//!
//! | Key                                   | Tier           |
//! |---------------------------------------|----------------|
//! | `Admin`, `Config`                     | `instance()`   |
//! | `CollateralCounter`, `Collateral*`    | `instance()`   |
//! | `Position(account, asset)`            | `persistent()` |

#![no_std]

mod events;
mod settlement;
mod storage;
mod token_integration;
mod types;

pub use types::{BondConfig, BondPosition, ClaimPreview, CollateralEntry, DEFAULT_DISCOUNT_BPS};
pub use vault_common::{Direction, VaultError};

use soroban_sdk::{contract, contractimpl, log, Address, Env};
use vault_common::{math, PriceAdapterClient, StakingBridgeClient, BPS_DENOMINATOR};

#[cfg(test)]
mod test_helpers;

#[cfg(test)]
mod test_collateral;

/// `floor(market_value * 10_000 / (10_000 - discount_bps))`.
fn apply_discount(market_value: i128, discount_bps: u32) -> Result<i128, VaultError> {
    let denominator = math::sub_i128(BPS_DENOMINATOR, discount_bps as i128)?;
    math::mul_div(market_value.max(0), BPS_DENOMINATOR, denominator)
}

fn quote(e: &Env, config: &BondConfig, asset: &Address, amount: i128) -> Result<i128, VaultError> {
    let entry = storage::active_collateral(e, asset)?;
    let market_value = PriceAdapterClient::new(e, &config.price_adapter).quote(asset, &amount);
    apply_discount(market_value, entry.discount_bps)
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct VaultBonds;

#[contractimpl]
impl VaultBonds {
    // ── Admin setup ────────────────────────────────────────────────────────

    /// One-time initialization. The staking engine is configured separately.
    pub fn initialize(
        e: Env,
        admin: Address,
        reward_token: Address,
        price_adapter: Address,
        treasury: Address,
        base_vesting_secs: u64,
    ) -> Result<(), VaultError> {
        if storage::is_initialized(&e) {
            return Err(VaultError::AlreadyInitialized);
        }
        if base_vesting_secs == 0 {
            return Err(VaultError::InvalidConfig);
        }
        storage::write_admin(&e, &admin);
        storage::write_config(
            &e,
            &BondConfig {
                reward_token,
                price_adapter,
                treasury,
                base_vesting_secs,
                staking: None,
            },
        );
        storage::bump_instance(&e);
        Ok(())
    }

    pub fn set_staking_contract(e: Env, admin: Address, staking: Address) -> Result<(), VaultError> {
        storage::require_admin(&e, &admin)?;
        let mut config = storage::read_config(&e)?;
        config.staking = Some(staking);
        storage::write_config(&e, &config);
        storage::bump_instance(&e);
        Ok(())
    }

    /// Applies to positions opened after the change.
    pub fn set_base_vesting(e: Env, admin: Address, secs: u64) -> Result<(), VaultError> {
        storage::require_admin(&e, &admin)?;
        if secs == 0 {
            return Err(VaultError::InvalidConfig);
        }
        let mut config = storage::read_config(&e)?;
        config.base_vesting_secs = secs;
        storage::write_config(&e, &config);
        storage::bump_instance(&e);
        Ok(())
    }

    pub fn set_treasury(e: Env, admin: Address, treasury: Address) -> Result<(), VaultError> {
        storage::require_admin(&e, &admin)?;
        let mut config = storage::read_config(&e)?;
        config.treasury = treasury;
        storage::write_config(&e, &config);
        storage::bump_instance(&e);
        Ok(())
    }

    pub fn set_price_adapter(e: Env, admin: Address, adapter: Address) -> Result<(), VaultError> {
        storage::require_admin(&e, &admin)?;
        let mut config = storage::read_config(&e)?;
        config.price_adapter = adapter;
        storage::write_config(&e, &config);
        storage::bump_instance(&e);
        Ok(())
    }

    pub fn get_config(e: Env) -> Result<BondConfig, VaultError> {
        storage::read_config(&e)
    }

    pub fn get_admin(e: Env) -> Result<Address, VaultError> {
        storage::read_admin(&e)
    }

    // ── Collateral registry ────────────────────────────────────────────────

    /// Register `asset` as active collateral at the default discount.
    /// Returns the new id.
    pub fn register_collateral(
        e: Env,
        admin: Address,
        asset: Address,
        paired_a: Option<Address>,
        paired_b: Option<Address>,
    ) -> Result<u32, VaultError> {
        storage::require_admin(&e, &admin)?;
        if storage::has_collateral(&e, &asset) {
            return Err(VaultError::CollateralExists);
        }
        let entry = CollateralEntry {
            id: storage::next_collateral_id(&e)?,
            asset,
            paired_a,
            paired_b,
            active: true,
            discount_bps: DEFAULT_DISCOUNT_BPS,
        };
        storage::save_collateral(&e, &entry);
        storage::bump_instance(&e);
        events::emit_collateral_added(&e, &entry);
        Ok(entry.id)
    }

    /// Toggle the active flag of `asset`. Returns the new state.
    pub fn set_collateral_active(e: Env, admin: Address, asset: Address) -> Result<bool, VaultError> {
        storage::require_admin(&e, &admin)?;
        let mut entry = storage::load_collateral_by_asset(&e, &asset)
            .ok_or(VaultError::UnknownOrInactiveCollateral)?;
        entry.active = !entry.active;
        storage::save_collateral(&e, &entry);
        storage::bump_instance(&e);
        Ok(entry.active)
    }

    pub fn set_discount(
        e: Env,
        admin: Address,
        asset: Address,
        discount_bps: u32,
    ) -> Result<(), VaultError> {
        storage::require_admin(&e, &admin)?;
        if discount_bps as i128 >= BPS_DENOMINATOR {
            return Err(VaultError::InvalidDiscount);
        }
        let mut entry = storage::load_collateral_by_asset(&e, &asset)
            .ok_or(VaultError::UnknownOrInactiveCollateral)?;
        entry.discount_bps = discount_bps;
        storage::save_collateral(&e, &entry);
        storage::bump_instance(&e);
        Ok(())
    }

    pub fn get_collateral(e: Env, id: u32) -> Option<CollateralEntry> {
        storage::load_collateral(&e, id)
    }

    pub fn get_collateral_by_asset(e: Env, asset: Address) -> Option<CollateralEntry> {
        storage::load_collateral_by_asset(&e, &asset)
    }

    pub fn collateral_count(e: Env) -> u32 {
        storage::collateral_count(&e)
    }

    // ── Pricing ────────────────────────────────────────────────────────────

    /// Reward tokens bought by depositing `amount` of `asset`.
    pub fn quote_discounted_reward(e: Env, asset: Address, amount: i128) -> Result<i128, VaultError> {
        let config = storage::read_config(&e)?;
        quote(&e, &config, &asset, amount)
    }

    // ── Purchases ──────────────────────────────────────────────────────────

    /// Deposit `amount` of `asset` and receive a vesting bond.
    ///
    /// On an existing position the vested part is paid out first and the
    /// schedule restarts on the merged principal. A new position vests over
    /// twice the base vesting period.
    pub fn purchase_bond(
        e: Env,
        buyer: Address,
        asset: Address,
        amount: i128,
    ) -> Result<BondPosition, VaultError> {
        buyer.require_auth();
        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        let config = storage::read_config(&e)?;
        let reward = quote(&e, &config, &asset, amount)?;
        let now = e.ledger().timestamp();

        let (position, settled) = match storage::load_position(&e, &buyer, &asset) {
            Some(mut position) => {
                let settled = settlement::settle(&mut position, now)?.available;
                settlement::merge(&mut position, reward, now)?;
                (position, settled)
            }
            None => {
                let vesting = math::mul_u64(config.base_vesting_secs, 2)?;
                (settlement::open(reward, now, vesting), 0)
            }
        };
        storage::save_position(&e, &buyer, &asset, &position);
        storage::bump_instance(&e);

        token_integration::transfer_collateral(&e, &config, &asset, &buyer, amount);
        let contract = e.current_contract_address();
        token_integration::mint_reward(&e, &config, &contract, reward);
        token_integration::transfer_reward(&e, &config, &buyer, settled);

        log!(&e, "bond purchased", buyer, reward, settled);
        Ok(position)
    }

    /// Deposit `amount` of `asset` and stake the bought reward in `currency`
    /// on the buyer's behalf. Returns the reward credited.
    pub fn purchase_bond_auto_stake(
        e: Env,
        buyer: Address,
        asset: Address,
        amount: i128,
        currency: Address,
        lockup_id: u32,
        direction: Direction,
    ) -> Result<i128, VaultError> {
        buyer.require_auth();
        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        let config = storage::read_config(&e)?;
        let staking = config.staking.clone().ok_or(VaultError::StakingNotConfigured)?;
        let reward = quote(&e, &config, &asset, amount)?;
        storage::bump_instance(&e);

        token_integration::transfer_collateral(&e, &config, &asset, &buyer, amount);
        token_integration::mint_reward(&e, &config, &staking, reward);

        let contract = e.current_contract_address();
        let credited = StakingBridgeClient::new(&e, &staking).try_stake(
            &contract,
            &reward,
            &buyer,
            &currency,
            &direction,
            &lockup_id,
            &true,
        );
        match credited {
            Ok(Ok(_)) => Ok(reward),
            Err(Ok(err)) => Err(err),
            _ => {
                log!(&e, "staking bridge failed", staking);
                Err(VaultError::BridgeFailed)
            }
        }
    }

    // ── Claims ─────────────────────────────────────────────────────────────

    /// Amount claimable at `now` on a linear schedule. Pure.
    pub fn preview_claim(
        _e: Env,
        principal_remaining: i128,
        already_claimed: i128,
        clock_start: u64,
        vesting_seconds: u64,
        now: u64,
    ) -> Result<ClaimPreview, VaultError> {
        settlement::preview_claim(
            principal_remaining,
            already_claimed,
            clock_start,
            vesting_seconds,
            now,
        )
    }

    /// `preview_claim` on the stored position at the current time.
    pub fn claimable(e: Env, account: Address, asset: Address) -> Result<ClaimPreview, VaultError> {
        match storage::load_position(&e, &account, &asset) {
            Some(position) => settlement::preview_position(&position, e.ledger().timestamp()),
            None => Ok(ClaimPreview {
                available: 0,
                fully_vested: false,
            }),
        }
    }

    /// Pay out the vested part of the caller's bond. Returns the amount paid.
    pub fn claim_bond(e: Env, account: Address, asset: Address) -> Result<i128, VaultError> {
        account.require_auth();
        let config = storage::read_config(&e)?;
        let mut position =
            storage::load_position(&e, &account, &asset).ok_or(VaultError::NothingToClaim)?;

        let now = e.ledger().timestamp();
        let preview = settlement::settle(&mut position, now)?;
        if preview.available == 0 {
            return Err(VaultError::NothingToClaim);
        }
        storage::save_position(&e, &account, &asset, &position);
        storage::bump_instance(&e);
        token_integration::transfer_reward(&e, &config, &account, preview.available);

        events::emit_bond_claimed(&e, &account, preview.available, now, preview.fully_vested);
        Ok(preview.available)
    }

    pub fn get_position(e: Env, account: Address, asset: Address) -> Option<BondPosition> {
        storage::load_position(&e, &account, &asset)
    }
}
