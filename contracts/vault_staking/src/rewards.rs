//! Slot-based reward accrual and directional bet bonus.
//!
//! A position accrues a base reward per whole slot elapsed since its
//! `clock_start`, plus a bonus for every slot in which the currency's price
//! moved at least 1 % in the wagered direction.
//!
//! The bonus is evaluated from the price history in a single pass over the
//! samples inside the evaluated window instead of scanning every slot: a slot
//! with no sample in `(start, end]` has `price_after == price_before` and can
//! never qualify, so only slots that received samples are inspected.
//! Lookups go through [`PriceSeries`], which the contract backs with one
//! storage entry per sample.

use soroban_sdk::Vec;
use vault_common::{math, Direction, VaultError};

use crate::types::{LockupTier, PriceSample, RewardBreakdown, StakePosition, StakingConfig};

/// `365 * 3`: divisor turning an annual bps rate into a per-slot rate.
pub const SLOT_RATE_DIVISOR: i128 = 1_095;

/// Price move threshold, as a percentage of the slot's opening price.
const MOVE_PERCENT: i128 = 1;

/// `floor(annual_rate_bps * reward_scale / (365 * 3))`.
pub fn slot_reward_rate(annual_rate_bps: u32, reward_scale: i128) -> Result<i128, VaultError> {
    math::mul_div(annual_rate_bps as i128, reward_scale, SLOT_RATE_DIVISOR)
}

/// Whole slots elapsed since `clock_start`.
#[must_use]
pub fn slots_elapsed(clock_start: u64, now: u64, slot_duration: u64) -> u64 {
    if slot_duration == 0 {
        return 0;
    }
    math::elapsed(now, clock_start) / slot_duration
}

/// True when `after` moved at least 1 % away from `before` in `direction`.
///
/// Boundary inclusive. Compared by cross-multiplication so no precision is
/// lost to integer division.
pub fn qualifies(direction: Direction, before: i128, after: i128) -> Result<bool, VaultError> {
    if before <= 0 {
        return Ok(false);
    }
    let after_scaled = math::mul_i128(after, 100)?;
    Ok(match direction {
        Direction::Long => after_scaled >= math::mul_i128(before, 100 + MOVE_PERCENT)?,
        Direction::Short => after_scaled <= math::mul_i128(before, 100 - MOVE_PERCENT)?,
    })
}

/// Time-ordered price samples addressed by index.
pub trait PriceSeries {
    fn count(&self) -> u32;
    fn sample(&self, idx: u32) -> Result<PriceSample, VaultError>;
}

impl PriceSeries for Vec<PriceSample> {
    fn count(&self) -> u32 {
        self.len()
    }

    fn sample(&self, idx: u32) -> Result<PriceSample, VaultError> {
        self.get(idx).ok_or(VaultError::PriceSampleMissing)
    }
}

/// Index of the first sample with `timestamp > ts`.
fn upper_bound(history: &impl PriceSeries, ts: u64) -> Result<u32, VaultError> {
    let mut lo = 0_u32;
    let mut hi = history.count();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if history.sample(mid)?.timestamp <= ts {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    Ok(lo)
}

/// Latest sample at or before `ts`. Samples sharing a timestamp resolve to
/// the last one appended.
pub fn price_at_or_before(
    history: &impl PriceSeries,
    ts: u64,
) -> Result<Option<i128>, VaultError> {
    match upper_bound(history, ts)? {
        0 => Ok(None),
        idx => Ok(Some(history.sample(idx - 1)?.price)),
    }
}

/// Latest sample overall, if any.
pub fn latest(history: &impl PriceSeries) -> Result<Option<i128>, VaultError> {
    match history.count() {
        0 => Ok(None),
        len => Ok(Some(history.sample(len - 1)?.price)),
    }
}

/// Number of slots in `[0, slots)` whose price move qualifies for the bonus.
pub fn qualifying_slots(
    position: &StakePosition,
    history: &impl PriceSeries,
    slot_duration: u64,
    slots: u64,
) -> Result<u32, VaultError> {
    if slots == 0 || slot_duration == 0 {
        return Ok(0);
    }
    let start = position.clock_start;
    let window_end = math::add_u64(start, math::mul_u64(slots, slot_duration)?)?;
    let mut count = 0_u32;

    // Slot 0 opens at the snapshot taken when the clock started.
    let first_end = math::add_u64(start, slot_duration)?;
    if let Some(after) = price_at_or_before(history, first_end)? {
        if qualifies(position.direction, position.reference_price_at_start, after)? {
            count += 1;
        }
    }

    // Slots 1.. : walk the samples strictly inside (first_end, window_end],
    // grouped by the slot they land in.
    let mut idx = upper_bound(history, first_end)?;
    let len = history.count();
    let mut before = if idx == 0 {
        position.reference_price_at_start
    } else {
        history.sample(idx - 1)?.price
    };
    while idx < len {
        let sample = history.sample(idx)?;
        if sample.timestamp > window_end {
            break;
        }
        let slot = (sample.timestamp - start - 1) / slot_duration;

        let mut after = sample.price;
        idx += 1;
        while idx < len {
            let next = history.sample(idx)?;
            if next.timestamp > window_end || (next.timestamp - start - 1) / slot_duration != slot {
                break;
            }
            after = next.price;
            idx += 1;
        }

        if qualifies(position.direction, before, after)? {
            count += 1;
        }
        before = after;
    }
    Ok(count)
}

/// Reward accrued by `position` at `now`. Pure in its inputs.
pub fn calculate(
    config: &StakingConfig,
    tier: &LockupTier,
    position: &StakePosition,
    history: &impl PriceSeries,
    now: u64,
) -> Result<RewardBreakdown, VaultError> {
    let slots = slots_elapsed(position.clock_start, now, config.slot_duration);
    if position.staked_amount <= 0 || slots == 0 {
        return Ok(RewardBreakdown {
            total: 0,
            base: 0,
            bonus: 0,
            evaluated_slots: slots,
            qualifying_slots: 0,
        });
    }

    let base = math::mul_div(
        math::mul_i128(position.staked_amount, tier.slot_reward_rate)?,
        slots as i128,
        config.reward_scale,
    )?;

    let qualifying = qualifying_slots(position, history, config.slot_duration, slots)?;
    let per_slot = math::bps(position.staked_amount, config.bonus_reward_bps)?;
    let bonus = math::mul_i128(per_slot, qualifying as i128)?;

    Ok(RewardBreakdown {
        total: math::add_i128(base, bonus)?,
        base,
        bonus,
        evaluated_slots: slots,
        qualifying_slots: qualifying,
    })
}

/// Single-slot bonus test of `current` against a caller-supplied base price.
pub fn single_slot_bonus(
    config: &StakingConfig,
    staked_amount: i128,
    direction: Direction,
    base_price: i128,
    current: Option<i128>,
) -> Result<i128, VaultError> {
    match current {
        Some(after) if qualifies(direction, base_price, after)? => {
            math::bps(staked_amount, config.bonus_reward_bps)
        }
        _ => Ok(0),
    }
}
