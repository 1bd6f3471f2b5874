//! Shared test helpers for vault_bonds tests.
//! Deploys the bond market with a mock price adapter, and optionally a real
//! staking engine wired up for auto-stake.

#![cfg(test)]

use crate::{VaultBonds, VaultBondsClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{contract, contractimpl, contracttype, vec, Address, Env};
use vault_staking::{StakingConfig, VaultStaking, VaultStakingClient};

/// Collateral minted to the buyer.
pub const DEFAULT_MINT: i128 = 100_000_000_000_000;
pub const BASE_VESTING: u64 = 360;
/// Standalone purchases vest over twice the base.
pub const BOND_VESTING: u64 = 2 * BASE_VESTING;
pub const START: u64 = 1_000;
pub const SLOT: u64 = 120;

/// Deposit that buys exactly `REWARD` at the default 10 % discount and a 1:1 quote.
pub const DEPOSIT: i128 = 900_000;
pub const REWARD: i128 = 1_000_000;

// ─── Mock price adapter ────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
enum AdapterKey {
    Rate(Address),
}

/// Quotes `amount * numerator / denominator`, 1:1 unless configured.
#[contract]
pub struct MockPriceAdapter;

#[contractimpl]
impl MockPriceAdapter {
    pub fn set_rate(e: Env, asset: Address, numerator: i128, denominator: i128) {
        e.storage()
            .instance()
            .set(&AdapterKey::Rate(asset), &(numerator, denominator));
    }

    pub fn quote(e: Env, asset: Address, amount: i128) -> i128 {
        let (numerator, denominator): (i128, i128) = e
            .storage()
            .instance()
            .get(&AdapterKey::Rate(asset))
            .unwrap_or((1, 1));
        amount * numerator / denominator
    }
}

// ─── Setup ─────────────────────────────────────────────────────────────────

pub struct BondTest<'a> {
    pub client: VaultBondsClient<'a>,
    pub contract_id: Address,
    pub admin: Address,
    pub buyer: Address,
    pub treasury: Address,
    pub reward_token: Address,
    /// Registered, active collateral the buyer holds and has approved.
    pub collateral: Address,
    pub adapter: MockPriceAdapterClient<'a>,
}

impl BondTest<'_> {
    pub fn reward(&self) -> TokenClient<'_> {
        TokenClient::new(&self.client.env, &self.reward_token)
    }

    pub fn collateral_token(&self) -> TokenClient<'_> {
        TokenClient::new(&self.client.env, &self.collateral)
    }

    pub fn buy(&self, amount: i128) {
        self.client.purchase_bond(&self.buyer, &self.collateral, &amount);
    }
}

pub struct StakingSide<'a> {
    pub client: VaultStakingClient<'a>,
    pub contract_id: Address,
    /// Registered wager currency priced at 10_000.
    pub currency: Address,
}

pub fn set_time(e: &Env, timestamp: u64) {
    e.ledger().with_mut(|li| li.timestamp = timestamp);
}

pub fn advance(e: &Env, secs: u64) {
    let now = e.ledger().timestamp();
    set_time(e, now + secs);
}

pub fn setup(e: &Env) -> BondTest<'_> {
    e.mock_all_auths();
    set_time(e, START);

    let contract_id = e.register(VaultBonds, ());
    let client = VaultBondsClient::new(e, &contract_id);
    let admin = Address::generate(e);
    let buyer = Address::generate(e);
    let treasury = Address::generate(e);

    let reward_token = e
        .register_stellar_asset_contract_v2(admin.clone())
        .address();
    StellarAssetClient::new(e, &reward_token).set_admin(&contract_id);

    let collateral = e
        .register_stellar_asset_contract_v2(admin.clone())
        .address();
    StellarAssetClient::new(e, &collateral).mint(&buyer, &DEFAULT_MINT);
    let expiry_ledger = e.ledger().sequence().saturating_add(10_000);
    TokenClient::new(e, &collateral).approve(&buyer, &contract_id, &DEFAULT_MINT, &expiry_ledger);

    let adapter_id = e.register(MockPriceAdapter, ());
    let adapter = MockPriceAdapterClient::new(e, &adapter_id);

    client.initialize(&admin, &reward_token, &adapter_id, &treasury, &BASE_VESTING);
    client.register_collateral(&admin, &collateral, &None, &None);

    BondTest {
        client,
        contract_id,
        admin,
        buyer,
        treasury,
        reward_token,
        collateral,
        adapter,
    }
}

/// Deploy a staking engine sharing the bond market's reward token and
/// authorize the bond market to credit it.
pub fn with_staking<'a>(e: &'a Env, t: &BondTest<'a>) -> StakingSide<'a> {
    let contract_id = e.register(VaultStaking, ());
    let client = VaultStakingClient::new(e, &contract_id);
    let receipt_token = e
        .register_stellar_asset_contract_v2(contract_id.clone())
        .address();

    client.initialize(
        &t.admin,
        &StakingConfig {
            reward_token: t.reward_token.clone(),
            receipt_token,
            slot_duration: SLOT,
            bonus_reward_bps: 100,
            reward_scale: 100_000_000,
            lockup_unit_secs: 1,
        },
    );
    client.register_lockup_tier(&t.admin, &1, &100, &100);
    client.register_lockup_tier(&t.admin, &2, &200, &200);
    client.register_lockup_tier(&t.admin, &3, &300, &300);

    let currency = Address::generate(e);
    client.register_currency(&t.admin, &currency, &Address::generate(e));
    client.set_price(&t.admin, &vec![e, currency.clone()], &vec![e, 10_000_i128]);

    client.set_bond_market(&t.admin, &t.contract_id);
    t.client.set_staking_contract(&t.admin, &contract_id);

    StakingSide {
        client,
        contract_id,
        currency,
    }
}
