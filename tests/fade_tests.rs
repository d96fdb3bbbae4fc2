//! Integration tests for linear fades

mod common;
use common::*;

use core::time::Duration;
use pwm_rgb_strip::{ColorState, ConfigError, FadeSpec, fade};

fn spec(from: ColorState, to: ColorState, steps: u32) -> FadeSpec {
    FadeSpec::new(from, to, steps, Duration::ZERO).unwrap()
}

#[test]
fn full_range_fade_emits_steps_plus_one_samples() {
    let clock = MockClock::new();
    let mut sink = RecordingSink::new();

    fade(&mut sink, &clock, &spec(ColorState::OFF, ColorState::FULL, 10)).unwrap();

    let history = sink.history();
    assert_eq!(history.len(), 11);
    assert_eq!(history[0], ColorState::new(0, 0, 0));
    assert_eq!(history[10], ColorState::new(4095, 4095, 4095));
}

#[test]
fn full_range_fade_interpolates_linearly() {
    let samples: Vec<_> = spec(ColorState::OFF, ColorState::FULL, 10).samples().collect();

    // 409.5 per step, truncated
    assert_eq!(samples[1], ColorState::new(409, 409, 409));
    assert_eq!(samples[5], ColorState::new(2047, 2047, 2047));
    assert_eq!(samples[9], ColorState::new(3685, 3685, 3685));
}

#[test]
fn rising_fade_is_non_decreasing_per_channel() {
    let from = ColorState::new(0, 1000, 4000);
    let to = ColorState::new(4095, 1003, 4000);
    let samples: Vec<_> = spec(from, to, 97).samples().collect();

    assert_eq!(samples.len(), 98);
    assert!(non_decreasing(&samples));
}

#[test]
fn channels_fade_independently() {
    let from = ColorState::new(4095, 0, 2000);
    let to = ColorState::new(0, 4095, 2000);
    let samples: Vec<_> = spec(from, to, 4).samples().collect();

    assert_eq!(samples.first(), Some(&from));
    assert_eq!(samples.last(), Some(&to));
    for sample in &samples {
        assert_eq!(sample.blue(), 2000);
    }
    // Falling red: 4095 - 1023.75 * i
    assert_eq!(samples[1].red(), 3071);
    assert_eq!(samples[1].green(), 1023);
}

#[test]
fn fade_there_and_back_returns_to_start() {
    let a = ColorState::new(100, 2000, 4000);
    let b = ColorState::new(3000, 50, 1234);

    for steps in [1, 3, 7, 10, 33, 100, 255] {
        let forward = spec(a, b, steps);
        let backward = forward.reversed();

        let reached = forward.samples().last().unwrap();
        let returned = backward.samples().last().unwrap();

        assert!(max_channel_delta(reached, b) <= 1, "steps {steps}: reached {reached}");
        assert!(max_channel_delta(returned, a) <= 1, "steps {steps}: returned {returned}");
    }
}

#[test]
fn identical_inputs_give_identical_samples() {
    let fade_spec = spec(ColorState::new(12, 345, 678), ColorState::new(4000, 3, 1900), 50);
    let first: Vec<_> = fade_spec.samples().collect();
    let second: Vec<_> = fade_spec.samples().collect();
    assert_eq!(first, second);
}

#[test]
fn constant_fade_repeats_color() {
    let color = ColorState::new(7, 8, 9);
    let samples: Vec<_> = spec(color, color, 5).samples().collect();
    assert_eq!(samples, vec![color; 6]);
}

#[test]
fn fade_sleeps_after_every_sample() {
    let clock = MockClock::new();
    let mut sink = RecordingSink::new();
    let fade_spec = FadeSpec::new(
        ColorState::OFF,
        ColorState::FULL,
        20,
        Duration::from_millis(5),
    )
    .unwrap();

    fade(&mut sink, &clock, &fade_spec).unwrap();

    assert_eq!(clock.sleep_count(), 21);
    assert_eq!(clock.elapsed(), Duration::from_millis(105));
}

#[test]
fn zero_steps_is_rejected() {
    let result = FadeSpec::new(ColorState::OFF, ColorState::FULL, 0, Duration::ZERO);
    assert_eq!(result, Err(ConfigError::ZeroSteps));

    let result = FadeSpec::builder(ColorState::OFF, ColorState::FULL).steps(0).build();
    assert_eq!(result, Err(ConfigError::ZeroSteps));
}

#[test]
fn sink_error_aborts_fade() {
    let clock = MockClock::new();
    let mut sink = RecordingSink::failing_at(3);

    let result = fade(&mut sink, &clock, &spec(ColorState::OFF, ColorState::FULL, 10));

    assert_eq!(result, Err(BusError));
    assert_eq!(sink.history().len(), 3);
    assert_eq!(sink.last_color(), Some(ColorState::new(819, 819, 819)));
    // No sleep after the failed write
    assert_eq!(clock.sleep_count(), 3);
}
