//! Primitives shared by the `vault_bonds` and `vault_staking` contracts.
//!
//! - [`errors`]: the wire-stable [`VaultError`] enum and its categories.
//! - [`curve`]: the [`UnlockCurve`] used by linear bond vesting and the
//!   stepped auto-stake release.
//! - [`math`]: checked arithmetic returning [`VaultError`] instead of panicking.
//! - [`interfaces`]: client traits for the price adapter and the staking bridge.

#![no_std]

pub mod curve;
pub mod errors;
pub mod interfaces;
pub mod math;

pub use curve::UnlockCurve;
pub use errors::{ErrorCategory, ErrorExt, VaultError};
pub use interfaces::{
    Direction, PriceAdapter, PriceAdapterClient, StakingBridge, StakingBridgeClient,
};

/// Basis-point denominator (10_000 bps = 100 %).
pub const BPS_DENOMINATOR: i128 = 10_000;

#[cfg(test)]
mod test_math;
