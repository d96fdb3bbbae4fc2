//! Deterministic linear fades between two colors.

use crate::duty::clamp_12;
use crate::strip::ColorSink;
use crate::time::Clock;
use crate::types::{ColorState, ConfigError};
use core::iter::FusedIterator;
use core::time::Duration;

/// Step count used when none is given.
pub const DEFAULT_STEPS: u32 = 100;

/// Delay between samples used when none is given.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(5);

/// A validated linear fade.
///
/// A fade with `steps` steps emits `steps + 1` samples, both endpoints
/// included. Interpolation is per channel in linear 12-bit space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeSpec {
    from: ColorState,
    to: ColorState,
    steps: u32,
    delay: Duration,
}

impl FadeSpec {
    /// Creates a fade builder with default step count and delay.
    pub fn builder(from: ColorState, to: ColorState) -> FadeBuilder {
        FadeBuilder::new(from, to)
    }

    /// Creates a fade.
    ///
    /// # Errors
    /// * `ZeroSteps` - `steps` is 0
    pub fn new(
        from: ColorState,
        to: ColorState,
        steps: u32,
        delay: Duration,
    ) -> Result<Self, ConfigError> {
        Self::builder(from, to).steps(steps).delay(delay).build()
    }

    /// Returns the same fade running in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            ..*self
        }
    }

    /// Returns the starting color.
    pub fn start_color(&self) -> ColorState {
        self.from
    }

    /// Returns the final color.
    pub fn end_color(&self) -> ColorState {
        self.to
    }

    /// Returns the number of steps (one less than the number of samples).
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Returns the delay after each sample.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns the sample trajectory without touching any hardware.
    pub fn samples(&self) -> FadeSamples {
        let from = self.from.channels().map(f64::from);
        let to = self.to.channels().map(f64::from);
        let steps = f64::from(self.steps);

        FadeSamples {
            from,
            step_size: [
                (to[0] - from[0]) / steps,
                (to[1] - from[1]) / steps,
                (to[2] - from[2]) / steps,
            ],
            next: 0,
            steps: u64::from(self.steps),
        }
    }
}

/// Builder for constructing validated fades.
#[derive(Debug, Clone, Copy)]
pub struct FadeBuilder {
    from: ColorState,
    to: ColorState,
    steps: u32,
    delay: Duration,
}

impl FadeBuilder {
    fn new(from: ColorState, to: ColorState) -> Self {
        Self {
            from,
            to,
            steps: DEFAULT_STEPS,
            delay: DEFAULT_DELAY,
        }
    }

    /// Sets the number of steps. Default is 100.
    pub fn steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    /// Sets the delay after each sample. Default is 5 ms.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Builds and validates the fade.
    ///
    /// # Errors
    /// * `ZeroSteps` - Step count is 0
    pub fn build(self) -> Result<FadeSpec, ConfigError> {
        if self.steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }

        Ok(FadeSpec {
            from: self.from,
            to: self.to,
            steps: self.steps,
            delay: self.delay,
        })
    }
}

/// Iterator over the samples of a fade.
///
/// Sample `i` is `from + (to - from) / steps * i` per channel, clamped to
/// the 12-bit range.
#[derive(Debug, Clone)]
pub struct FadeSamples {
    from: [f64; 3],
    step_size: [f64; 3],
    next: u64,
    steps: u64,
}

impl Iterator for FadeSamples {
    type Item = ColorState;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.steps {
            return None;
        }

        let i = self.next as f64;
        self.next += 1;

        Some(ColorState::new(
            clamp_12(self.from[0] + self.step_size[0] * i),
            clamp_12(self.from[1] + self.step_size[1] * i),
            clamp_12(self.from[2] + self.step_size[2] * i),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Up to 2^32 samples remain, more than usize holds on 32-bit targets
        match usize::try_from(self.steps + 1 - self.next) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for FadeSamples {}

/// Runs a fade, writing every sample to the sink.
///
/// Sleeps for the fade's delay after every sample, the last one included.
/// The first sink error aborts the fade and is returned; the strip keeps the
/// last color that was written successfully.
pub fn fade<S: ColorSink, C: Clock>(
    sink: &mut S,
    clock: &C,
    spec: &FadeSpec,
) -> Result<(), S::Error> {
    log::debug!(
        "fade {} -> {} in {} steps, {:?} apart",
        spec.from,
        spec.to,
        spec.steps,
        spec.delay
    );

    for color in spec.samples() {
        log::trace!("fade sample {}", color);
        sink.set_color(color)?;
        clock.sleep(spec.delay);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_defaults() {
        let spec = FadeSpec::builder(ColorState::OFF, ColorState::FULL).build().unwrap();
        assert_eq!(spec.steps(), DEFAULT_STEPS);
        assert_eq!(spec.delay(), DEFAULT_DELAY);
    }

    #[test]
    fn zero_steps_is_rejected() {
        let result = FadeSpec::new(ColorState::OFF, ColorState::FULL, 0, Duration::ZERO);
        assert_eq!(result, Err(ConfigError::ZeroSteps));
    }

    #[test]
    fn samples_report_exact_length() {
        let spec = FadeSpec::new(ColorState::OFF, ColorState::FULL, 7, Duration::ZERO).unwrap();
        let mut samples = spec.samples();
        assert_eq!(samples.size_hint(), (8, Some(8)));
        samples.next();
        assert_eq!(samples.size_hint(), (7, Some(7)));
        assert_eq!(samples.count(), 7);
    }

    #[test]
    fn largest_fade_size_hint_never_truncates() {
        let spec = FadeSpec::new(ColorState::OFF, ColorState::FULL, u32::MAX, Duration::ZERO).unwrap();
        let total = u64::from(u32::MAX) + 1;
        let expected = match usize::try_from(total) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        };
        assert_eq!(spec.samples().size_hint(), expected);
    }

    #[test]
    fn single_step_emits_both_endpoints() {
        let from = ColorState::new(10, 20, 30);
        let to = ColorState::new(4000, 0, 30);
        let spec = FadeSpec::new(from, to, 1, Duration::ZERO).unwrap();
        let mut samples = spec.samples();
        assert_eq!(samples.next(), Some(from));
        assert_eq!(samples.next(), Some(to));
        assert_eq!(samples.next(), None);
        assert_eq!(samples.next(), None);
    }

    #[test]
    fn reversed_swaps_endpoints_only() {
        let spec = FadeSpec::new(
            ColorState::new(1, 2, 3),
            ColorState::new(4, 5, 6),
            9,
            Duration::from_millis(3),
        )
        .unwrap();
        let reversed = spec.reversed();
        assert_eq!(reversed.start_color(), spec.end_color());
        assert_eq!(reversed.end_color(), spec.start_color());
        assert_eq!(reversed.steps(), 9);
        assert_eq!(reversed.delay(), Duration::from_millis(3));
    }
}
