//! Stake position bookkeeping.
//!
//! Crediting and debiting a position are kept apart from reward settlement:
//! `unstake` first settles the accrued reward into a vesting entry and only
//! then calls [`debit`] on the position.

use vault_common::{math, Direction, UnlockCurve, VaultError};

use crate::types::StakePosition;

/// Parameters of one credit to a position.
pub struct Credit {
    pub amount: i128,
    pub direction: Direction,
    pub lockup_id: u32,
    pub is_internal: bool,
    /// Latest price of the currency at credit time (0 without history).
    pub reference_price: i128,
    pub now: u64,
}

fn empty(direction: Direction, lockup_id: u32) -> StakePosition {
    StakePosition {
        staked_amount: 0,
        direction,
        lockup_id,
        reference_price_at_start: 0,
        clock_start: 0,
        is_auto_stake_sourced: false,
        total_staked: 0,
        total_unstaked: 0,
        receipt_outstanding: 0,
        release_start: 0,
        release_locked: 0,
    }
}

/// Auto-stake release schedule for a position.
fn release_curve(slot_duration: u64) -> UnlockCurve {
    UnlockCurve::SteppedThirds {
        step: slot_duration,
    }
}

/// Apply a stake to `existing` (or a new row).
///
/// An empty position starts over: clock, reference price and auto-stake
/// marker are reset while the cumulative counters are kept. A live position
/// keeps its clock and reference price; direction and lockup are replaced.
pub fn credit(
    existing: Option<StakePosition>,
    incoming: &Credit,
    slot_duration: u64,
) -> Result<StakePosition, VaultError> {
    let mut position =
        existing.unwrap_or_else(|| empty(incoming.direction, incoming.lockup_id));

    if position.staked_amount == 0 {
        position.clock_start = incoming.now;
        position.reference_price_at_start = incoming.reference_price;
        position.is_auto_stake_sourced = false;
        position.release_start = incoming.now;
        position.release_locked = 0;
    }

    position.direction = incoming.direction;
    position.lockup_id = incoming.lockup_id;
    position.staked_amount = math::add_i128(position.staked_amount, incoming.amount)?;
    position.total_staked = math::add_i128(position.total_staked, incoming.amount)?;

    if incoming.is_internal {
        let still_locked = locked(&position, incoming.now, slot_duration)?;
        position.release_locked = math::add_i128(still_locked, incoming.amount)?;
        position.release_start = incoming.now;
        position.is_auto_stake_sourced = true;
    } else {
        position.receipt_outstanding =
            math::add_i128(position.receipt_outstanding, incoming.amount)?;
    }
    Ok(position)
}

/// Auto-staked amount not yet released at `now`.
fn locked(position: &StakePosition, now: u64, slot_duration: u64) -> Result<i128, VaultError> {
    release_curve(slot_duration).locked(
        position.release_locked,
        math::elapsed(now, position.release_start),
    )
}

/// Amount that may be unstaked at `now`.
///
/// Ordinary stakes are never gated. Auto-staked amounts unlock a third at
/// the end of each of the three slots following their credit.
pub fn available(
    position: &StakePosition,
    now: u64,
    slot_duration: u64,
) -> Result<i128, VaultError> {
    if !position.is_auto_stake_sourced {
        return Ok(position.staked_amount);
    }
    let gated = locked(position, now, slot_duration)?;
    Ok(math::sub_i128(position.staked_amount, gated)?.max(0))
}

/// Remove `amount` from the live stake and restart the reward clock on the
/// remainder. Returns the receipt amount to burn.
pub fn debit(
    position: &mut StakePosition,
    amount: i128,
    now: u64,
    reference_price: i128,
) -> Result<i128, VaultError> {
    position.staked_amount = math::sub_i128(position.staked_amount, amount)?;
    position.total_unstaked = math::add_i128(position.total_unstaked, amount)?;
    position.clock_start = now;
    position.reference_price_at_start = reference_price;

    let burn = amount.min(position.receipt_outstanding);
    position.receipt_outstanding = math::sub_i128(position.receipt_outstanding, burn)?;
    Ok(burn)
}
