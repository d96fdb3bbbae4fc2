//! Shared test infrastructure for pwm-rgb-strip integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use pwm_rgb_strip::{Channel, Clock, ColorSink, ColorState, PwmController, TimeInstant, UniformSampler};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock instant type for testing (virtual time since clock creation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub Duration);

impl TimeInstant for TestInstant {
    fn duration_since(&self, earlier: Self) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

/// Mock clock whose `sleep` advances virtual time instead of blocking
pub struct MockClock {
    current_time: Cell<Duration>,
    sleeps: Cell<usize>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(Duration::ZERO),
            sleeps: Cell::new(0),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: Duration) {
        self.current_time.set(self.current_time.get() + duration);
    }

    /// Total virtual time elapsed
    pub fn elapsed(&self) -> Duration {
        self.current_time.get()
    }

    /// Number of `sleep` calls so far
    pub fn sleep_count(&self) -> usize {
        self.sleeps.get()
    }
}

impl Clock for MockClock {
    type Instant = TestInstant;

    fn now(&self) -> TestInstant {
        TestInstant(self.current_time.get())
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.set(self.sleeps.get() + 1);
        self.advance(duration);
    }
}

/// Mock clock that raises a stop flag once it has slept a given number of times
pub struct StoppingClock<'a> {
    pub clock: MockClock,
    stop: &'a AtomicBool,
    after: usize,
}

impl<'a> StoppingClock<'a> {
    pub fn new(stop: &'a AtomicBool, after: usize) -> Self {
        Self {
            clock: MockClock::new(),
            stop,
            after,
        }
    }
}

impl Clock for StoppingClock<'_> {
    type Instant = TestInstant;

    fn now(&self) -> TestInstant {
        self.clock.now()
    }

    fn sleep(&self, duration: Duration) {
        self.clock.sleep(duration);
        if self.clock.sleep_count() >= self.after {
            self.stop.store(true, Ordering::Relaxed);
        }
    }
}

// ============================================================================
// Mock Sinks
// ============================================================================

/// Sink error raised by a `RecordingSink` configured to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError;

impl core::fmt::Display for BusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "bus error")
    }
}

impl std::error::Error for BusError {}

/// Mock sink that records every color written
pub struct RecordingSink {
    history: heapless::Vec<ColorState, 4096>,
    fail_at: Option<usize>,
    attempts: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            history: heapless::Vec::new(),
            fail_at: None,
            attempts: 0,
        }
    }

    /// Sink that rejects the write with the given zero-based index
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::new()
        }
    }

    pub fn history(&self) -> &[ColorState] {
        &self.history
    }

    pub fn last_color(&self) -> Option<ColorState> {
        self.history.last().copied()
    }
}

impl ColorSink for RecordingSink {
    type Error = BusError;

    fn set_color(&mut self, color: ColorState) -> Result<(), BusError> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_at == Some(attempt) {
            return Err(BusError);
        }
        let _ = self.history.push(color);
        Ok(())
    }
}

// ============================================================================
// Mock PWM Controller
// ============================================================================

/// Mock controller that records frequency changes and channel writes
pub struct MockPwm {
    pub frequency: Option<u16>,
    pub writes: heapless::Vec<(u8, u16, u16), 256>,
    fail_on_channel: Option<u8>,
}

impl MockPwm {
    pub fn new() -> Self {
        Self {
            frequency: None,
            writes: heapless::Vec::new(),
            fail_on_channel: None,
        }
    }

    /// Controller that fails every write to the given output
    pub fn failing_on(channel: u8) -> Self {
        Self {
            fail_on_channel: Some(channel),
            ..Self::new()
        }
    }
}

impl PwmController for MockPwm {
    type Error = BusError;

    fn set_frequency(&mut self, hz: u16) -> Result<(), BusError> {
        self.frequency = Some(hz);
        Ok(())
    }

    fn set_pwm(&mut self, channel: Channel, on: u16, off: u16) -> Result<(), BusError> {
        if self.fail_on_channel == Some(channel.index()) {
            return Err(BusError);
        }
        let _ = self.writes.push((channel.index(), on, off));
        Ok(())
    }
}

// ============================================================================
// Scripted Samplers
// ============================================================================

/// Always draws the lowest allowed value
pub struct FloorSampler;

impl UniformSampler for FloorSampler {
    fn sample(&mut self, low: u16, _high: u16) -> u16 {
        low
    }
}

/// Always draws the highest allowed value
pub struct CeilingSampler;

impl UniformSampler for CeilingSampler {
    fn sample(&mut self, _low: u16, high: u16) -> u16 {
        high
    }
}

/// Records every requested window and answers with its upper end
pub struct WindowRecorder {
    pub windows: heapless::Vec<(u16, u16), 1024>,
}

impl WindowRecorder {
    pub fn new() -> Self {
        Self {
            windows: heapless::Vec::new(),
        }
    }
}

impl UniformSampler for WindowRecorder {
    fn sample(&mut self, low: u16, high: u16) -> u16 {
        let _ = self.windows.push((low, high));
        high
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// True if every channel of every sample is `<=` the same channel of the next
pub fn non_decreasing(samples: &[ColorState]) -> bool {
    samples.windows(2).all(|pair| {
        pair[0]
            .channels()
            .iter()
            .zip(pair[1].channels())
            .all(|(prev, next)| *prev <= next)
    })
}

/// Largest per-channel difference between two colors
pub fn max_channel_delta(a: ColorState, b: ColorState) -> u16 {
    a.channels()
        .iter()
        .zip(b.channels())
        .map(|(x, y)| x.abs_diff(y))
        .max()
        .unwrap_or(0)
}
