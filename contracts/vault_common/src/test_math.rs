//! Tests for overflow-safe arithmetic helpers.

#![cfg(test)]

use crate::errors::VaultError;
use crate::math;

#[test]
fn test_bps_basic() {
    assert_eq!(math::bps(10_000, 100), Ok(100));
    assert_eq!(math::bps(1_000_000_000, 1_000), Ok(100_000_000));
}

#[test]
fn test_bps_overflow_is_reported() {
    assert_eq!(math::bps(i128::MAX, 10_000), Err(VaultError::Overflow));
}

#[test]
fn test_mul_div_floors() {
    assert_eq!(math::mul_div(10, 2, 3), Ok(6));
    assert_eq!(math::mul_div(7, 1, 0), Err(VaultError::Overflow));
}

#[test]
fn test_sub_underflow_is_reported() {
    assert_eq!(math::sub_i128(i128::MIN, 1), Err(VaultError::Underflow));
}

#[test]
fn test_add_overflow_is_reported() {
    assert_eq!(math::add_i128(i128::MAX, 1), Err(VaultError::Overflow));
    assert_eq!(math::add_u64(u64::MAX, 1), Err(VaultError::Overflow));
}

#[test]
fn test_elapsed_saturates() {
    assert_eq!(math::elapsed(100, 40), 60);
    assert_eq!(math::elapsed(40, 100), 0);
}
