//! Time-bounded random walks across a per-channel color box.
//!
//! A walk seeds each channel uniformly inside its bounds, then repeatedly
//! nudges every channel by at most `max_walk` in either direction, never
//! leaving the bounds, until the requested duration has elapsed.

use crate::duty::MAX_DUTY;
use crate::strip::ColorSink;
use crate::time::{Clock, TimeInstant};
use crate::types::{ColorChannel, ColorState, ConfigError};
use core::time::Duration;

/// Largest per-sample change used when none is given.
pub const DEFAULT_MAX_WALK: u16 = 10;

/// Walk length used when none is given.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(10);

/// Delay between samples used when none is given.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(5);

/// Source of uniformly distributed integers.
///
/// Injected into [`random_walk`] so runs can be made reproducible with a
/// seeded generator or scripted entirely in tests.
pub trait UniformSampler {
    /// Draws a value from `low..=high`.
    ///
    /// Callers guarantee `low <= high`. When `low == high` implementations
    /// return `low` without drawing.
    fn sample(&mut self, low: u16, high: u16) -> u16;
}

impl UniformSampler for fastrand::Rng {
    fn sample(&mut self, low: u16, high: u16) -> u16 {
        if low >= high {
            low
        } else {
            self.u16(low..=high)
        }
    }
}

impl<R: UniformSampler + ?Sized> UniformSampler for &mut R {
    fn sample(&mut self, low: u16, high: u16) -> u16 {
        (**self).sample(low, high)
    }
}

/// Inclusive range a channel may wander in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelBounds {
    min: u16,
    max: u16,
}

impl ChannelBounds {
    /// Returns the lower bound.
    #[inline]
    pub fn min(&self) -> u16 {
        self.min
    }

    /// Returns the upper bound.
    #[inline]
    pub fn max(&self) -> u16 {
        self.max
    }

    /// Returns true if `value` lies within the bounds.
    #[inline]
    pub fn contains(&self, value: u16) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// A validated random walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkSpec {
    bounds: [ChannelBounds; 3],
    max_walk: u16,
    duration: Duration,
    delay: Duration,
}

impl WalkSpec {
    /// Creates a walk builder between per-channel minimum and maximum colors.
    pub fn builder(min: ColorState, max: ColorState) -> WalkBuilder {
        WalkBuilder::new(min, max)
    }

    /// Creates a walk builder from two corner colors in any order.
    ///
    /// Each channel's pair is sorted, so the resulting bounds are never
    /// inverted.
    pub fn normalized(a: ColorState, b: ColorState) -> WalkBuilder {
        let a = a.channels();
        let b = b.channels();
        let min = ColorState::from_channels([a[0].min(b[0]), a[1].min(b[1]), a[2].min(b[2])]);
        let max = ColorState::from_channels([a[0].max(b[0]), a[1].max(b[1]), a[2].max(b[2])]);
        WalkBuilder::new(min, max)
    }

    /// Returns the bounds of one channel.
    pub fn bounds(&self, channel: ColorChannel) -> ChannelBounds {
        self.bounds[channel.index()]
    }

    /// Returns the largest per-sample change of any channel.
    pub fn max_walk(&self) -> u16 {
        self.max_walk
    }

    /// Returns how long the walk runs.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the delay after each sample.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns true if every channel of `color` lies within its bounds.
    pub fn contains(&self, color: ColorState) -> bool {
        self.bounds
            .iter()
            .zip(color.channels())
            .all(|(bounds, value)| bounds.contains(value))
    }

    /// Draws the first sample uniformly inside the bounds.
    pub fn seed<R: UniformSampler>(&self, sampler: &mut R) -> ColorState {
        ColorState::from_channels(self.bounds.map(|b| sampler.sample(b.min, b.max)))
    }

    /// Draws the sample that follows `current`.
    pub fn step<R: UniformSampler>(&self, current: ColorState, sampler: &mut R) -> ColorState {
        let current = current.channels();
        ColorState::from_channels([
            next_value(current[0], self.bounds[0], self.max_walk, sampler),
            next_value(current[1], self.bounds[1], self.max_walk, sampler),
            next_value(current[2], self.bounds[2], self.max_walk, sampler),
        ])
    }
}

/// Builder for constructing validated walks.
#[derive(Debug, Clone, Copy)]
pub struct WalkBuilder {
    min: ColorState,
    max: ColorState,
    max_walk: u16,
    duration: Duration,
    delay: Duration,
}

impl WalkBuilder {
    fn new(min: ColorState, max: ColorState) -> Self {
        Self {
            min,
            max,
            max_walk: DEFAULT_MAX_WALK,
            duration: DEFAULT_DURATION,
            delay: DEFAULT_DELAY,
        }
    }

    /// Sets the largest per-sample change. Default is 10.
    pub fn max_walk(mut self, max_walk: u16) -> Self {
        self.max_walk = max_walk;
        self
    }

    /// Sets how long the walk runs. Default is 10 seconds.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the delay after each sample. Default is 5 ms.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Builds and validates the walk.
    ///
    /// # Errors
    /// * `InvertedBounds` - A channel's minimum exceeds its maximum
    pub fn build(self) -> Result<WalkSpec, ConfigError> {
        let mut bounds = [ChannelBounds { min: 0, max: 0 }; 3];
        for channel in ColorChannel::ALL {
            let min = self.min.channel(channel);
            let max = self.max.channel(channel);
            if min > max {
                return Err(ConfigError::InvertedBounds { channel, min, max });
            }
            bounds[channel.index()] = ChannelBounds { min, max };
        }

        Ok(WalkSpec {
            bounds,
            max_walk: self.max_walk,
            duration: self.duration,
            delay: self.delay,
        })
    }
}

/// Draws the next value of one channel.
///
/// The draw window is `current ± max_walk`, cut to the channel bounds and to
/// `0..=4095`. A window of width zero yields its single value. A `current`
/// outside the bounds is first pulled onto the nearest bound, so the result
/// is always inside them.
pub fn next_value<R: UniformSampler>(
    current: u16,
    bounds: ChannelBounds,
    max_walk: u16,
    sampler: &mut R,
) -> u16 {
    let current = current.clamp(bounds.min, bounds.max);
    let low = current.saturating_sub(max_walk).max(bounds.min);
    let high = current.saturating_add(max_walk).min(bounds.max).min(MAX_DUTY);
    sampler.sample(low, high)
}

/// Runs a random walk, writing every sample to the sink.
///
/// The seed sample is written immediately, then samples follow until the
/// walk's duration has elapsed since the walk began. Elapsed time is only
/// checked after each delay, so a run may overshoot by up to one delay.
///
/// Returns the number of samples written. The first sink error aborts the
/// walk and is returned.
pub fn random_walk<S, C, R>(
    sink: &mut S,
    clock: &C,
    sampler: &mut R,
    spec: &WalkSpec,
) -> Result<usize, S::Error>
where
    S: ColorSink,
    C: Clock,
    R: UniformSampler,
{
    let begin = clock.now();
    log::debug!(
        "random walk for {:?}, max walk {}, {:?} apart",
        spec.duration,
        spec.max_walk,
        spec.delay
    );

    let mut color = spec.seed(sampler);
    log::trace!("walk seed {}", color);
    sink.set_color(color)?;
    clock.sleep(spec.delay);
    let mut emitted = 1;

    while clock.now().duration_since(begin) < spec.duration {
        color = spec.step(color, sampler);
        log::trace!("walk sample {}", color);
        sink.set_color(color)?;
        clock.sleep(spec.delay);
        emitted += 1;
    }

    log::debug!("random walk finished after {} samples", emitted);
    Ok(emitted)
}
