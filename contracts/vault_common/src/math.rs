//! Overflow-safe arithmetic helpers for ledger calculations.
//!
//! Every helper uses checked arithmetic and reports failure as a
//! [`VaultError`] so contract entry points can propagate it with `?`.

use crate::errors::VaultError;
use crate::BPS_DENOMINATOR;

/// Checked `i128` addition.
#[inline]
pub fn add_i128(a: i128, b: i128) -> Result<i128, VaultError> {
    a.checked_add(b).ok_or(VaultError::Overflow)
}

/// Checked `i128` subtraction.
#[inline]
pub fn sub_i128(a: i128, b: i128) -> Result<i128, VaultError> {
    a.checked_sub(b).ok_or(VaultError::Underflow)
}

/// Checked `i128` multiplication.
#[inline]
pub fn mul_i128(a: i128, b: i128) -> Result<i128, VaultError> {
    a.checked_mul(b).ok_or(VaultError::Overflow)
}

/// Checked `i128` division. Division by zero reports `Overflow`.
#[inline]
pub fn div_i128(a: i128, b: i128) -> Result<i128, VaultError> {
    a.checked_div(b).ok_or(VaultError::Overflow)
}

/// `floor(a * b / c)` with a checked intermediate product.
#[inline]
pub fn mul_div(a: i128, b: i128, c: i128) -> Result<i128, VaultError> {
    div_i128(mul_i128(a, b)?, c)
}

/// Basis-point share of an amount: `amount * bps / 10_000`.
#[inline]
pub fn bps(amount: i128, bps: u32) -> Result<i128, VaultError> {
    mul_div(amount, bps as i128, BPS_DENOMINATOR)
}

/// Checked `u64` addition, used for timestamps.
#[inline]
pub fn add_u64(a: u64, b: u64) -> Result<u64, VaultError> {
    a.checked_add(b).ok_or(VaultError::Overflow)
}

/// Checked `u64` multiplication, used for slot offsets.
#[inline]
pub fn mul_u64(a: u64, b: u64) -> Result<u64, VaultError> {
    a.checked_mul(b).ok_or(VaultError::Overflow)
}

/// Seconds elapsed since `start`; zero when the clock reads earlier than `start`.
#[inline]
#[must_use]
pub fn elapsed(now: u64, start: u64) -> u64 {
    now.saturating_sub(start)
}
