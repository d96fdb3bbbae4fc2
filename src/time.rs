//! Time abstraction traits for pacing and bounding generator runs.

use core::time::Duration;

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Calculates duration since an earlier instant, saturating at zero.
    fn duration_since(&self, earlier: Self) -> Duration;
}

/// Trait for abstracting wall-clock time and blocking waits.
///
/// Generators read [`now`](Clock::now) to bound random walks and call
/// [`sleep`](Clock::sleep) between emissions. Test clocks can advance virtual
/// time inside `sleep` instead of blocking.
pub trait Clock {
    /// Instant type returned by this clock.
    type Instant: TimeInstant;

    /// Returns the current time instant.
    fn now(&self) -> Self::Instant;

    /// Blocks for the given duration.
    fn sleep(&self, duration: Duration);
}

#[cfg(feature = "std")]
impl TimeInstant for std::time::Instant {
    fn duration_since(&self, earlier: Self) -> Duration {
        self.saturating_duration_since(earlier)
    }
}

/// Wall-clock time backed by `std::time::Instant` and `std::thread::sleep`.
///
/// Sleeps are best effort; no drift compensation is applied.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StdClock;

#[cfg(feature = "std")]
impl Clock for StdClock {
    type Instant = std::time::Instant;

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
