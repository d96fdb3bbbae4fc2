//! Strip driver exposing the fade, random walk and direct color operations.
//!
//! Provides [`RgbDriver`], which owns a [`ColorSink`] for its whole life and
//! runs one generator at a time against it, remembering the last color that
//! reached the hardware.

use crate::command::StripAction;
use crate::fade::{self, FadeSpec};
use crate::strip::ColorSink;
use crate::time::Clock;
use crate::types::ColorState;
use crate::walk::{self, UniformSampler, WalkSpec};

/// Drives a single strip through fades, random walks and direct writes.
///
/// # Type Parameters
/// * `'t` - Lifetime of the clock reference
/// * `S` - Output sink type
/// * `C` - Clock implementation type
pub struct RgbDriver<'t, S: ColorSink, C: Clock> {
    sink: S,
    clock: &'t C,
    current_color: Option<ColorState>,
}

impl<'t, S: ColorSink, C: Clock> RgbDriver<'t, S, C> {
    /// Creates a driver. Nothing is written until the first operation.
    pub fn new(sink: S, clock: &'t C) -> Self {
        Self {
            sink,
            clock,
            current_color: None,
        }
    }

    /// Writes a color directly.
    pub fn set_color(&mut self, color: ColorState) -> Result<(), S::Error> {
        self.tracked().set_color(color)
    }

    /// Turns every channel off.
    pub fn turn_off(&mut self) -> Result<(), S::Error> {
        log::debug!("turning strip off");
        self.set_color(ColorState::OFF)
    }

    /// Runs a linear fade to completion.
    pub fn fade(&mut self, spec: &FadeSpec) -> Result<(), S::Error> {
        let clock = self.clock;
        fade::fade(&mut self.tracked(), clock, spec)
    }

    /// Runs a random walk to completion, returning the number of samples
    /// written.
    pub fn random_walk<R: UniformSampler>(
        &mut self,
        spec: &WalkSpec,
        sampler: &mut R,
    ) -> Result<usize, S::Error> {
        let clock = self.clock;
        walk::random_walk(&mut self.tracked(), clock, sampler, spec)
    }

    /// Runs a single action.
    pub fn handle_action<R: UniformSampler>(
        &mut self,
        action: StripAction,
        sampler: &mut R,
    ) -> Result<(), S::Error> {
        match action {
            StripAction::SetColor(color) => self.set_color(color),
            StripAction::Fade(spec) => self.fade(&spec),
            StripAction::RandomWalk(spec) => self.random_walk(&spec, sampler).map(|_| ()),
            StripAction::TurnOff => self.turn_off(),
        }
    }

    /// Returns the last color written successfully, if any.
    pub fn current_color(&self) -> Option<ColorState> {
        self.current_color
    }

    /// Returns a reference to the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns a mutable reference to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the driver and returns the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn tracked(&mut self) -> Tracked<'_, S> {
        Tracked {
            sink: &mut self.sink,
            current_color: &mut self.current_color,
        }
    }
}

// Records each color once the inner sink accepted it
struct Tracked<'a, S: ColorSink> {
    sink: &'a mut S,
    current_color: &'a mut Option<ColorState>,
}

impl<S: ColorSink> ColorSink for Tracked<'_, S> {
    type Error = S::Error;

    fn set_color(&mut self, color: ColorState) -> Result<(), Self::Error> {
        self.sink.set_color(color)?;
        *self.current_color = Some(color);
        Ok(())
    }
}
