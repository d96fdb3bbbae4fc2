#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ColorState`**: A strip color as three 12-bit duty values (0-4095)
//! - **`ChannelMapping`**: Which controller outputs carry red, green and blue
//! - **`PwmController`**: Trait to implement for your PWM hardware (a PCA9685 driver is included)
//! - **`ColorSink`** / **`RgbStrip`**: Writes a `ColorState` to the mapped outputs
//! - **`Interruptible`**: Sink wrapper that stops a running fade or walk when a flag is raised
//! - **`Clock`**: Trait to implement for your timing system (`StdClock` with `std`)
//! - **`FadeSpec`**: A linear fade between two colors in a fixed number of steps
//! - **`WalkSpec`**: A time-bounded random walk inside per-channel bounds
//! - **`UniformSampler`**: Injectable randomness for walks (implemented for `fastrand::Rng`)
//! - **`RgbDriver`**: Runs fades, walks and direct writes against one strip
//! - **`StripAction`**: Commands that can be sent to a driver
//!
//! Every sample is clamped with [`duty::clamp_12`] before it reaches the
//! hardware. Interpolation is linear in 12-bit space; there is no gamma
//! correction.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod colors;
pub mod command;
pub mod driver;
pub mod duty;
pub mod fade;
pub mod pca9685;
pub mod pwm;
#[cfg(feature = "rppal")]
pub mod rpi;
pub mod strip;
pub mod time;
pub mod types;
pub mod walk;

pub use command::{FadeRoutine, FadeRoutineBuilder, StripAction};
pub use driver::RgbDriver;
pub use duty::{MAX_DUTY, clamp_12, scale_8_to_12};
pub use fade::{FadeBuilder, FadeSpec, fade};
pub use pca9685::{Pca9685, Pca9685Error};
pub use pwm::PwmController;
pub use strip::{ColorSink, InterruptError, Interruptible, RgbStrip};
#[cfg(feature = "std")]
pub use time::StdClock;
pub use time::{Clock, TimeInstant};
pub use types::{Channel, ChannelMapping, ColorChannel, ColorState, ConfigError};
pub use walk::{ChannelBounds, UniformSampler, WalkBuilder, WalkSpec, random_walk};

pub const COLOR_OFF: ColorState = ColorState::OFF;
