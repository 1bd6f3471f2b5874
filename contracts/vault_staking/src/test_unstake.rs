//! Unstaking: limit checks, full reward settlement and clock restart.

#![cfg(test)]

use crate::test_helpers::*;
use crate::{Direction, VaultError};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};

const STAKE: i128 = 1_000_000_000;

#[test]
fn test_unstake_half_settles_entire_reward() {
    let e = Env::default();
    let t = setup(&e);
    t.stake(STAKE, Direction::Long, 1);
    advance(&e, 2 * SLOT);
    t.set_price(10_100);

    let accrued = t.client.calculate_rewards(&t.staker, &t.currency).total;
    assert!(accrued > 0);

    let entry = t.client.unstake(&t.staker, &t.currency, &(STAKE / 2));
    assert_eq!(entry.id, 1);
    assert_eq!(entry.principal, STAKE / 2);
    assert_eq!(entry.reward, accrued);
    assert_eq!(entry.unlock_timestamp, START + 2 * SLOT + 100);
    assert!(!entry.claimed);

    let position = t.client.get_position(&t.staker, &t.currency).unwrap();
    assert_eq!(position.staked_amount, STAKE / 2);
    assert_eq!(position.clock_start, START + 2 * SLOT);
    assert_eq!(position.reference_price_at_start, 10_100);
    assert_eq!(position.total_unstaked, STAKE / 2);

    // Accrual restarts from zero on the remainder.
    assert_eq!(t.client.calculate_rewards(&t.staker, &t.currency).total, 0);
    advance(&e, SLOT);
    let r = t.client.calculate_rewards(&t.staker, &t.currency);
    assert_eq!(r.total, (STAKE / 2) * TIER1_RATE / SCALE);
}

#[test]
fn test_unstake_burns_receipt() {
    let e = Env::default();
    let t = setup(&e);
    t.stake(STAKE, Direction::Long, 1);
    t.client.unstake(&t.staker, &t.currency, &400);

    assert_eq!(t.receipt().balance(&t.staker), STAKE - 400);
    let position = t.client.get_position(&t.staker, &t.currency).unwrap();
    assert_eq!(position.receipt_outstanding, STAKE - 400);
}

#[test]
fn test_unstake_more_than_staked_fails() {
    let e = Env::default();
    let t = setup(&e);
    t.stake(1_000, Direction::Long, 1);
    assert_eq!(
        t.client.try_unstake(&t.staker, &t.currency, &1_001),
        Err(Ok(VaultError::InsufficientAvailable))
    );
    assert_eq!(
        t.client
            .get_position(&t.staker, &t.currency)
            .unwrap()
            .staked_amount,
        1_000
    );
}

#[test]
fn test_unstake_without_position_fails() {
    let e = Env::default();
    let t = setup(&e);
    assert_eq!(
        t.client
            .try_unstake(&Address::generate(&e), &t.currency, &1),
        Err(Ok(VaultError::InsufficientAvailable))
    );
}

#[test]
fn test_unstake_rejects_non_positive_amount() {
    let e = Env::default();
    let t = setup(&e);
    t.stake(1_000, Direction::Long, 1);
    assert_eq!(
        t.client.try_unstake(&t.staker, &t.currency, &0),
        Err(Ok(VaultError::InvalidAmount))
    );
}

#[test]
fn test_auto_staked_unstake_is_gated() {
    let e = Env::default();
    let t = setup(&e);
    let bond_market = Address::generate(&e);
    t.client.set_bond_market(&t.admin, &bond_market);
    t.client.stake(
        &bond_market,
        &900,
        &t.staker,
        &t.currency,
        &Direction::Long,
        &1,
        &true,
    );

    assert_eq!(
        t.client.try_unstake(&t.staker, &t.currency, &1),
        Err(Ok(VaultError::InsufficientAvailable))
    );

    advance(&e, SLOT);
    assert_eq!(
        t.client.try_unstake(&t.staker, &t.currency, &301),
        Err(Ok(VaultError::InsufficientAvailable))
    );
    t.client.unstake(&t.staker, &t.currency, &300);
    assert_eq!(
        t.client.available_to_unstake(&t.staker, &t.currency, &1),
        0
    );

    advance(&e, SLOT);
    assert_eq!(
        t.client.available_to_unstake(&t.staker, &t.currency, &1),
        300
    );
}

#[test]
fn test_vesting_ids_are_sequential() {
    let e = Env::default();
    let t = setup(&e);
    t.stake(1_000, Direction::Long, 1);
    assert_eq!(t.client.unstake(&t.staker, &t.currency, &100).id, 1);
    assert_eq!(t.client.unstake(&t.staker, &t.currency, &100).id, 2);
    assert_eq!(t.client.unstake(&t.staker, &t.currency, &100).id, 3);
    assert_eq!(t.client.vesting_count(&t.staker, &t.currency), 3);
}

#[test]
fn test_unlock_uses_position_tier() {
    let e = Env::default();
    let t = setup(&e);
    t.stake(1_000, Direction::Long, 3);
    let entry = t.client.unstake(&t.staker, &t.currency, &1_000);
    assert_eq!(entry.unlock_timestamp, START + 300);
}

#[test]
fn test_full_unstake_then_restake_starts_fresh() {
    let e = Env::default();
    let t = setup(&e);
    t.stake(1_000, Direction::Long, 1);
    advance(&e, SLOT);
    t.client.unstake(&t.staker, &t.currency, &1_000);

    advance(&e, 5 * SLOT);
    t.set_price(11_000);
    t.stake(2_000, Direction::Short, 2);

    let position = t.client.get_position(&t.staker, &t.currency).unwrap();
    assert_eq!(position.staked_amount, 2_000);
    assert_eq!(position.clock_start, START + 6 * SLOT);
    assert_eq!(position.reference_price_at_start, 11_000);
    assert_eq!(position.total_staked, 3_000);
    assert_eq!(position.total_unstaked, 1_000);
}

#[test]
fn test_unstake_after_long_price_history() {
    let e = Env::default();
    let t = setup(&e);
    t.stake(STAKE, Direction::Long, 1);

    // Alternate up and down once per slot: every up-move is a 1 % rise.
    for k in 1..=200_u64 {
        e.cost_estimate().budget().reset_default();
        advance(&e, SLOT);
        t.set_price(if k % 2 == 1 { 10_100 } else { 10_000 });
    }
    t.set_price(10_000);
    assert_eq!(t.client.price_count(&t.currency), 202);
    assert_eq!(t.client.latest_price(&t.currency), Some(10_000));

    e.cost_estimate().budget().reset_default();
    let r = t.client.calculate_rewards(&t.staker, &t.currency);
    assert_eq!(r.evaluated_slots, 200);
    assert_eq!(r.qualifying_slots, 100);

    e.cost_estimate().budget().reset_default();
    let entry = t.client.unstake(&t.staker, &t.currency, &STAKE);
    // `STAKE * BONUS_BPS / 10_000` per qualifying slot.
    assert_eq!(entry.reward, STAKE * TIER1_RATE * 200 / SCALE + 100 * 10_000_000);

    let position = t.client.get_position(&t.staker, &t.currency).unwrap();
    assert_eq!(position.staked_amount, 0);
    assert_eq!(position.reference_price_at_start, 10_000);
}
