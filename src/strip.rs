//! Output sink for tri-channel analog LED strips.
//!
//! Provides [`RgbStrip`], which maps a [`ColorState`] onto three controller
//! outputs, and the [`ColorSink`] trait the generators drive.

use crate::pwm::PwmController;
use crate::types::{ChannelMapping, ColorChannel, ColorState};
use core::sync::atomic::{AtomicBool, Ordering};

/// Trait for abstracting whatever displays a color.
///
/// Implement this to drive the generators into something other than a PWM
/// controller, such as a recorder in tests.
pub trait ColorSink {
    /// Error raised when the color could not be written.
    type Error;

    /// Writes all three components. Values are already in `0..=4095`.
    fn set_color(&mut self, color: ColorState) -> Result<(), Self::Error>;
}

impl<S: ColorSink + ?Sized> ColorSink for &mut S {
    type Error = S::Error;

    fn set_color(&mut self, color: ColorState) -> Result<(), Self::Error> {
        (**self).set_color(color)
    }
}

/// An analog RGB strip wired to three outputs of a PWM controller.
///
/// Writes red, then green, then blue, each with an on-tick of 0 and an
/// off-tick equal to the component's duty value. Values are not re-clamped
/// here; [`ColorState`] already guarantees the range. The first failing write
/// aborts the update and leaves the remaining components untouched.
pub struct RgbStrip<P: PwmController> {
    pwm: P,
    mapping: ChannelMapping,
}

impl<P: PwmController> RgbStrip<P> {
    /// Creates a strip over an already configured controller.
    pub fn new(pwm: P, mapping: ChannelMapping) -> Self {
        Self { pwm, mapping }
    }

    /// Returns the channel mapping.
    pub fn mapping(&self) -> ChannelMapping {
        self.mapping
    }

    /// Returns a reference to the controller.
    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    /// Returns a mutable reference to the controller.
    pub fn pwm_mut(&mut self) -> &mut P {
        &mut self.pwm
    }

    /// Consumes the strip and returns the controller.
    pub fn into_inner(self) -> P {
        self.pwm
    }
}

impl<P: PwmController> ColorSink for RgbStrip<P> {
    type Error = P::Error;

    fn set_color(&mut self, color: ColorState) -> Result<(), Self::Error> {
        for component in ColorChannel::ALL {
            let channel = self.mapping.channel(component);
            self.pwm.set_pwm(channel, 0, color.channel(component))?;
        }
        Ok(())
    }
}

/// Errors from an [`Interruptible`] sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptError<E> {
    /// The stop flag was raised; nothing was written.
    Interrupted,

    /// The wrapped sink failed.
    Sink(E),
}

impl<E: core::fmt::Display> core::fmt::Display for InterruptError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InterruptError::Interrupted => write!(f, "interrupted"),
            InterruptError::Sink(err) => write!(f, "{}", err),
        }
    }
}

#[cfg(feature = "std")]
impl<E: std::error::Error + 'static> std::error::Error for InterruptError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InterruptError::Interrupted => None,
            InterruptError::Sink(err) => Some(err),
        }
    }
}

/// Sink wrapper that refuses writes once a stop flag is raised.
///
/// The flag is typically set from a signal handler. A fade or walk running
/// into this sink then ends at its next emission with
/// [`InterruptError::Interrupted`], leaving the caller free to clear the flag
/// and turn the strip off.
pub struct Interruptible<'a, S> {
    sink: S,
    stop: &'a AtomicBool,
}

impl<'a, S: ColorSink> Interruptible<'a, S> {
    /// Wraps `sink`, watching `stop`.
    pub fn new(sink: S, stop: &'a AtomicBool) -> Self {
        Self { sink, stop }
    }

    /// Returns true if the stop flag is raised.
    #[inline]
    pub fn is_interrupted(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Returns a reference to the wrapped sink.
    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    /// Returns a mutable reference to the wrapped sink.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the wrapper and returns the sink.
    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<S: ColorSink> ColorSink for Interruptible<'_, S> {
    type Error = InterruptError<S::Error>;

    fn set_color(&mut self, color: ColorState) -> Result<(), Self::Error> {
        if self.is_interrupted() {
            return Err(InterruptError::Interrupted);
        }
        self.sink.set_color(color).map_err(InterruptError::Sink)
    }
}
