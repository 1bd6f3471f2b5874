use soroban_sdk::{contracttype, Address};
use vault_common::Direction;

// ─── Configuration ─────────────────────────────────────────────────────────

/// Engine-wide parameters written at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    /// Token staked, rewarded and paid out of the vesting queue.
    pub reward_token: Address,
    /// Receipt token minted 1:1 for externally funded stakes.
    pub receipt_token: Address,
    /// Length of one reward/bet-evaluation slot, in seconds.
    pub slot_duration: u64,
    /// Bet bonus per qualifying slot, in basis points of the staked amount.
    pub bonus_reward_bps: u32,
    /// Smallest-unit scale of the reward token (e.g. 1e8).
    pub reward_scale: i128,
    /// Seconds per lockup duration unit.
    pub lockup_unit_secs: u64,
}

// ─── Registries ────────────────────────────────────────────────────────────

/// Reward-rate / duration profile selected at stake time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockupTier {
    pub id: u32,
    /// Vesting delay applied to unstaked principal, in lockup units.
    pub nominal_duration: u64,
    pub annual_rate_bps: u32,
    /// `floor(annual_rate_bps * reward_scale / (365 * 3))`.
    pub slot_reward_rate: i128,
}

/// Asset a staker can wager on, with the feed it is priced from.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WagerCurrency {
    pub id: u32,
    pub asset: Address,
    pub price_reference: Address,
    pub active: bool,
}

/// One entry of a currency's append-only price history.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceSample {
    pub timestamp: u64,
    pub price: i128,
}

// ─── Positions ─────────────────────────────────────────────────────────────

/// Per (account, currency) staking ledger row.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    /// Live principal earning rewards.
    pub staked_amount: i128,
    pub direction: Direction,
    pub lockup_id: u32,
    /// Price the first slot's bet is measured against.
    pub reference_price_at_start: i128,
    /// Start of the reward clock; reset on every unstake.
    pub clock_start: u64,
    /// Set once any amount arrived through the bond market's auto-stake.
    pub is_auto_stake_sourced: bool,
    /// Cumulative amount ever credited.
    pub total_staked: i128,
    /// Cumulative amount ever moved into the vesting queue.
    pub total_unstaked: i128,
    /// Receipt tokens minted for this row and not yet burned.
    pub receipt_outstanding: i128,
    /// Start of the stepped auto-stake release window.
    pub release_start: u64,
    /// Auto-staked amount governed by the release window at `release_start`.
    pub release_locked: i128,
}

/// Unstaked principal (plus settled reward) waiting for its unlock time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingEntry {
    pub id: u32,
    pub principal: i128,
    pub reward: i128,
    pub unlock_timestamp: u64,
    pub claimed: bool,
}

/// Result of a reward evaluation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardBreakdown {
    /// `base + bonus`.
    pub total: i128,
    pub base: i128,
    pub bonus: i128,
    /// Whole slots elapsed since `clock_start`.
    pub evaluated_slots: u64,
    /// Slots whose price move satisfied the wagered direction.
    pub qualifying_slots: u32,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Contract admin address.
    Admin,
    /// StakingConfig.
    Config,
    /// Bond market allowed to credit internal (auto-stake) stakes.
    BondMarket,
    /// Address allowed to append price samples besides the admin.
    PriceSetter,
    /// LockupTier by id.
    Lockup(u32),
    /// Last allocated currency id.
    CurrencyCounter,
    /// WagerCurrency by id.
    Currency(u32),
    /// Currency id by asset.
    CurrencyId(Address),
    /// Number of price samples recorded for a currency asset. Stored in `persistent()`.
    PriceCount(Address),
    /// PriceSample by (currency asset, 0-based index). Stored in `persistent()`.
    PriceSample(Address, u32),
    /// StakePosition by (account, currency asset). Stored in `persistent()`.
    Position(Address, Address),
    /// Last vesting entry id by (account, currency asset). Stored in `persistent()`.
    VestingCounter(Address, Address),
    /// VestingEntry by (account, currency asset, id). Stored in `persistent()`.
    Vesting(Address, Address, u32),
}
