//! Linear bond vesting and the settle-then-merge re-purchase.
//!
//! A position vests `outstanding_principal + claimed_since_start` linearly
//! over `vesting_seconds` from `clock_start`. Claims made since the clock
//! last started are subtracted, so a claim never pays the same slice twice.

use vault_common::{math, UnlockCurve, VaultError};

use crate::types::{BondPosition, ClaimPreview};

/// Amount claimable at `now` on a schedule holding `principal_remaining`
/// after `already_claimed` has been paid since `clock_start`.
///
/// Non-decreasing in `now`, capped at `principal_remaining`, and equal to it
/// once `vesting_seconds` have elapsed.
pub fn preview_claim(
    principal_remaining: i128,
    already_claimed: i128,
    clock_start: u64,
    vesting_seconds: u64,
    now: u64,
) -> Result<ClaimPreview, VaultError> {
    let remaining = principal_remaining.max(0);
    let elapsed = math::elapsed(now, clock_start);
    let curve = UnlockCurve::Linear {
        duration: vesting_seconds,
    };
    if curve.is_complete(elapsed) {
        return Ok(ClaimPreview {
            available: remaining,
            fully_vested: true,
        });
    }

    let claimed = already_claimed.max(0);
    let vested = curve.unlocked(math::add_i128(remaining, claimed)?, elapsed)?;
    let available = math::sub_i128(vested, claimed)?.clamp(0, remaining);
    Ok(ClaimPreview {
        available,
        fully_vested: false,
    })
}

/// `preview_claim` on a stored position.
pub fn preview_position(position: &BondPosition, now: u64) -> Result<ClaimPreview, VaultError> {
    preview_claim(
        position.outstanding_principal,
        position.claimed_since_start,
        position.clock_start,
        position.vesting_seconds,
        now,
    )
}

/// Move the currently vested amount out of `position`. The caller pays
/// the returned `available` to the holder.
pub fn settle(position: &mut BondPosition, now: u64) -> Result<ClaimPreview, VaultError> {
    let preview = preview_position(position, now)?;
    if preview.available > 0 {
        position.outstanding_principal =
            math::sub_i128(position.outstanding_principal, preview.available)?;
        position.claimed_total = math::add_i128(position.claimed_total, preview.available)?;
        position.claimed_since_start =
            math::add_i128(position.claimed_since_start, preview.available)?;
    }
    Ok(preview)
}

/// Add a fresh reward to a settled position and restart its schedule.
pub fn merge(position: &mut BondPosition, reward: i128, now: u64) -> Result<(), VaultError> {
    position.outstanding_principal = math::add_i128(position.outstanding_principal, reward)?;
    position.claimed_since_start = 0;
    position.clock_start = now;
    Ok(())
}

pub fn open(reward: i128, now: u64, vesting_seconds: u64) -> BondPosition {
    BondPosition {
        outstanding_principal: reward,
        claimed_total: 0,
        claimed_since_start: 0,
        clock_start: now,
        vesting_seconds,
    }
}
