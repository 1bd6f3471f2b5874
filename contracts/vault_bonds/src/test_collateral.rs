//! Collateral registry, discounts and quoting.

#![cfg(test)]

use crate::test_helpers::*;
use crate::{VaultBonds, VaultBondsClient, VaultError, DEFAULT_DISCOUNT_BPS};
use soroban_sdk::testutils::storage::Instance as _;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, Env};

#[test]
fn test_initialize_twice_fails() {
    let e = Env::default();
    let t = setup(&e);
    let config = t.client.get_config();
    assert_eq!(
        t.client.try_initialize(
            &t.admin,
            &config.reward_token,
            &config.price_adapter,
            &config.treasury,
            &BASE_VESTING
        ),
        Err(Ok(VaultError::AlreadyInitialized))
    );
}

#[test]
fn test_initialize_rejects_zero_vesting() {
    let e = Env::default();
    e.mock_all_auths();
    let client = VaultBondsClient::new(&e, &e.register(VaultBonds, ()));
    let a = Address::generate(&e);
    assert_eq!(
        client.try_initialize(&a, &a, &a, &a, &0),
        Err(Ok(VaultError::InvalidConfig))
    );
}

#[test]
fn test_register_collateral_defaults() {
    let e = Env::default();
    let t = setup(&e);
    let entry = t.client.get_collateral(&1).unwrap();
    assert_eq!(entry.asset, t.collateral);
    assert!(entry.active);
    assert_eq!(entry.discount_bps, DEFAULT_DISCOUNT_BPS);
    assert_eq!(entry.paired_a, None);
    assert_eq!(t.client.collateral_count(), 1);
}

#[test]
fn test_pool_collateral_records_pair() {
    let e = Env::default();
    let t = setup(&e);
    let pool = Address::generate(&e);
    let a = Address::generate(&e);
    let b = Address::generate(&e);
    let id = t
        .client
        .register_collateral(&t.admin, &pool, &Some(a.clone()), &Some(b.clone()));
    assert_eq!(id, 2);
    let entry = t.client.get_collateral_by_asset(&pool).unwrap();
    assert_eq!(entry.paired_a, Some(a));
    assert_eq!(entry.paired_b, Some(b));
}

#[test]
fn test_duplicate_collateral_rejected() {
    let e = Env::default();
    let t = setup(&e);
    assert_eq!(
        t.client
            .try_register_collateral(&t.admin, &t.collateral, &None, &None),
        Err(Ok(VaultError::CollateralExists))
    );
}

#[test]
fn test_non_admin_cannot_register() {
    let e = Env::default();
    let t = setup(&e);
    let stranger = Address::generate(&e);
    assert_eq!(
        t.client
            .try_register_collateral(&stranger, &Address::generate(&e), &None, &None),
        Err(Ok(VaultError::NotAdmin))
    );
}

#[test]
fn test_quote_applies_default_discount() {
    let e = Env::default();
    let t = setup(&e);
    assert_eq!(t.client.quote_discounted_reward(&t.collateral, &DEPOSIT), REWARD);
    // 1000 * 10000 / 9000 = 1111.1..
    assert_eq!(t.client.quote_discounted_reward(&t.collateral, &1_000), 1_111);
}

#[test]
fn test_quote_follows_adapter_rate() {
    let e = Env::default();
    let t = setup(&e);
    t.adapter.set_rate(&t.collateral, &3, &2);
    assert_eq!(
        t.client.quote_discounted_reward(&t.collateral, &DEPOSIT),
        REWARD * 3 / 2
    );
}

#[test]
fn test_set_discount() {
    let e = Env::default();
    let t = setup(&e);
    t.client.set_discount(&t.admin, &t.collateral, &5_000);
    assert_eq!(t.client.quote_discounted_reward(&t.collateral, &500), 1_000);

    t.client.set_discount(&t.admin, &t.collateral, &0);
    assert_eq!(t.client.quote_discounted_reward(&t.collateral, &500), 500);

    assert_eq!(
        t.client.try_set_discount(&t.admin, &t.collateral, &10_000),
        Err(Ok(VaultError::InvalidDiscount))
    );
}

#[test]
fn test_quote_unknown_collateral() {
    let e = Env::default();
    let t = setup(&e);
    assert_eq!(
        t.client
            .try_quote_discounted_reward(&Address::generate(&e), &100),
        Err(Ok(VaultError::UnknownOrInactiveCollateral))
    );
}

#[test]
fn test_toggle_collateral_blocks_and_restores_quotes() {
    let e = Env::default();
    let t = setup(&e);

    assert!(!t.client.set_collateral_active(&t.admin, &t.collateral));
    assert_eq!(
        t.client.try_quote_discounted_reward(&t.collateral, &100),
        Err(Ok(VaultError::UnknownOrInactiveCollateral))
    );
    assert_eq!(
        t.client
            .try_purchase_bond(&t.buyer, &t.collateral, &DEPOSIT),
        Err(Ok(VaultError::UnknownOrInactiveCollateral))
    );

    assert!(t.client.set_collateral_active(&t.admin, &t.collateral));
    assert_eq!(t.client.quote_discounted_reward(&t.collateral, &DEPOSIT), REWARD);
}

#[test]
fn test_toggle_unknown_collateral() {
    let e = Env::default();
    let t = setup(&e);
    assert_eq!(
        t.client
            .try_set_collateral_active(&t.admin, &Address::generate(&e)),
        Err(Ok(VaultError::UnknownOrInactiveCollateral))
    );
}

#[test]
fn test_admin_mutations_extend_instance_ttl() {
    let e = Env::default();
    let t = setup(&e);
    let ttl = || e.as_contract(&t.contract_id, || e.storage().instance().get_ttl());
    assert_eq!(ttl(), 518_400);

    e.ledger().with_mut(|li| li.sequence_number += 510_000);
    assert_eq!(ttl(), 8_400);
    t.client.set_discount(&t.admin, &t.collateral, &500);
    assert_eq!(ttl(), 518_400);

    e.ledger().with_mut(|li| li.sequence_number += 510_000);
    t.client.set_treasury(&t.admin, &Address::generate(&e));
    assert_eq!(ttl(), 518_400);
}
