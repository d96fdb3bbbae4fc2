//! Command-based control for strip drivers.

use crate::fade::FadeSpec;
use crate::types::ColorState;
use crate::walk::WalkSpec;

/// Actions for controlling a strip driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripAction {
    /// Write a color directly.
    SetColor(ColorState),
    /// Run a linear fade.
    Fade(FadeSpec),
    /// Run a random walk.
    RandomWalk(WalkSpec),
    /// Turn every channel off.
    TurnOff,
}

/// A fade repeated a number of times, optionally returning to its start
/// after every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeRoutine {
    spec: FadeSpec,
    repeat: u32,
    reverse: bool,
}

impl FadeRoutine {
    /// Creates a routine builder. Without further settings the fade runs
    /// once, forward only.
    pub fn builder(spec: FadeSpec) -> FadeRoutineBuilder {
        FadeRoutineBuilder {
            spec,
            repeat: 1,
            reverse: false,
        }
    }

    /// Returns the forward fade.
    #[inline]
    pub fn spec(&self) -> FadeSpec {
        self.spec
    }

    /// Returns the number of passes.
    #[inline]
    pub fn repeat(&self) -> u32 {
        self.repeat
    }

    /// Returns true if every forward fade is followed by the reversed fade.
    #[inline]
    pub fn reverse(&self) -> bool {
        self.reverse
    }

    /// Returns the actions of every pass, in order.
    pub fn actions(&self) -> impl Iterator<Item = StripAction> + use<> {
        let forward = StripAction::Fade(self.spec);
        let backward = self.reverse.then(|| StripAction::Fade(self.spec.reversed()));

        (0..self.repeat).flat_map(move |_| core::iter::once(forward).chain(backward))
    }

    /// Returns the actions of one pass.
    pub fn pass(&self) -> impl Iterator<Item = StripAction> + use<> {
        let forward = StripAction::Fade(self.spec);
        let backward = self.reverse.then(|| StripAction::Fade(self.spec.reversed()));

        core::iter::once(forward).chain(backward)
    }
}

/// Builder for [`FadeRoutine`].
#[derive(Debug, Clone, Copy)]
pub struct FadeRoutineBuilder {
    spec: FadeSpec,
    repeat: u32,
    reverse: bool,
}

impl FadeRoutineBuilder {
    /// Sets how many passes to run. Zero passes yield no actions.
    pub fn repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    /// Follows every forward pass with the reversed fade.
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Builds the routine.
    pub fn build(self) -> FadeRoutine {
        FadeRoutine {
            spec: self.spec,
            repeat: self.repeat,
            reverse: self.reverse,
        }
    }
}
