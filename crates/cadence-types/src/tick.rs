//! Tick/duration conversions.
//!
//! The core itself is clocked by the host and never looks at wall time,
//! but hosts that tick at the conventional 20 Hz cadence (one tick every
//! 50 ms) can express phase delays as durations with these helpers.
//!
//! Durations shorter than one tick are not representable; conversions
//! truncate toward zero.

use std::time::Duration;

/// Ticks per second at the conventional host cadence.
pub const TICKS_PER_SECOND: u64 = 20;

/// Length of one tick at the conventional host cadence.
pub const TICK: Duration = Duration::from_millis(1000 / TICKS_PER_SECOND);

/// Converts a [`Duration`] to whole ticks, truncating sub-tick remainder.
///
/// # Example
///
/// ```
/// use cadence_types::tick::to_ticks;
/// use std::time::Duration;
///
/// assert_eq!(to_ticks(Duration::from_secs(5)), 100);
/// assert_eq!(to_ticks(Duration::from_millis(49)), 0);
/// ```
#[must_use]
pub fn to_ticks(duration: Duration) -> u64 {
    duration.as_millis() as u64 / TICK.as_millis() as u64
}

/// Converts a tick count to a [`Duration`].
///
/// # Example
///
/// ```
/// use cadence_types::tick::from_ticks;
/// use std::time::Duration;
///
/// assert_eq!(from_ticks(100), Duration::from_secs(5));
/// ```
#[must_use]
pub fn from_ticks(ticks: u64) -> Duration {
    TICK * ticks as u32
}
