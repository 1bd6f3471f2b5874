//! Unlock curves.
//!
//! Bond vesting and the auto-stake release schedule are two shapes of the same
//! question: given a total and the seconds elapsed since the schedule started,
//! how much is unlocked? Both contracts answer it through [`UnlockCurve`].

use crate::errors::VaultError;
use crate::math;

/// Number of equal slices released by [`UnlockCurve::SteppedThirds`].
pub const RELEASE_STEPS: u64 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnlockCurve {
    /// Pro-rata release over `duration` seconds.
    Linear { duration: u64 },
    /// One third released at the end of each of three `step`-second slots.
    SteppedThirds { step: u64 },
}

impl UnlockCurve {
    /// True once the whole total is unlocked.
    #[must_use]
    pub fn is_complete(&self, elapsed: u64) -> bool {
        match *self {
            UnlockCurve::Linear { duration } => elapsed >= duration,
            UnlockCurve::SteppedThirds { step } => step == 0 || elapsed / step >= RELEASE_STEPS,
        }
    }

    /// Amount of `total` unlocked after `elapsed` seconds. Non-decreasing in
    /// `elapsed` and capped at `total`.
    pub fn unlocked(&self, total: i128, elapsed: u64) -> Result<i128, VaultError> {
        if total <= 0 {
            return Ok(0);
        }
        if self.is_complete(elapsed) {
            return Ok(total);
        }
        match *self {
            UnlockCurve::Linear { duration } => {
                math::mul_div(total, elapsed as i128, duration as i128)
            }
            UnlockCurve::SteppedThirds { step } => {
                let steps = elapsed / step;
                math::mul_div(total, steps as i128, RELEASE_STEPS as i128)
            }
        }
    }

    /// Amount of `total` still locked after `elapsed` seconds.
    pub fn locked(&self, total: i128, elapsed: u64) -> Result<i128, VaultError> {
        math::sub_i128(total.max(0), self.unlocked(total, elapsed)?)
    }
}
