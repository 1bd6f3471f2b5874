use soroban_sdk::{contracttype, Address};

/// Discount applied to newly registered collateral (10 %).
pub const DEFAULT_DISCOUNT_BPS: u32 = 1_000;

// ─── Configuration ─────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondConfig {
    /// Token minted to back bonds.
    pub reward_token: Address,
    /// `PriceAdapter` contract quoting collateral in reward-token value.
    pub price_adapter: Address,
    /// Receiver of every deposited collateral amount.
    pub treasury: Address,
    /// Nominal vesting; standalone purchases vest over twice this.
    pub base_vesting_secs: u64,
    /// Staking engine credited by auto-stake purchases.
    pub staking: Option<Address>,
}

// ─── Registry ──────────────────────────────────────────────────────────────

/// Accepted deposit instrument. Never deleted; ids are stable history.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateralEntry {
    pub id: u32,
    pub asset: Address,
    /// Pool constituents when `asset` is a liquidity-pool share.
    pub paired_a: Option<Address>,
    pub paired_b: Option<Address>,
    pub active: bool,
    pub discount_bps: u32,
}

// ─── Positions ─────────────────────────────────────────────────────────────

/// Per (account, collateral asset) bond ledger row.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondPosition {
    /// Reward tokens still owed to the holder.
    pub outstanding_principal: i128,
    /// Lifetime amount paid out.
    pub claimed_total: i128,
    /// Amount paid out since `clock_start`.
    pub claimed_since_start: i128,
    /// Start of the current vesting schedule.
    pub clock_start: u64,
    pub vesting_seconds: u64,
}

/// Result of `preview_claim`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimPreview {
    pub available: i128,
    pub fully_vested: bool,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    /// BondConfig.
    Config,
    /// Last allocated collateral id.
    CollateralCounter,
    /// CollateralEntry by id.
    Collateral(u32),
    /// Collateral id by asset.
    CollateralId(Address),
    /// BondPosition by (account, collateral asset). Stored in `persistent()`.
    Position(Address, Address),
}
