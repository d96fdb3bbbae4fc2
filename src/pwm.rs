//! Hardware interface for 16-channel, 12-bit PWM controllers.

use crate::types::Channel;

/// Trait for abstracting the PWM controller hardware.
///
/// Implemented by [`Pca9685`](crate::pca9685::Pca9685); tests can implement it
/// to record writes instead of touching a bus. Errors are passed through the
/// strip and the generators untouched.
pub trait PwmController {
    /// Error raised by the underlying bus or device.
    type Error;

    /// Sets the PWM switching frequency in Hz. Called once at startup.
    fn set_frequency(&mut self, hz: u16) -> Result<(), Self::Error>;

    /// Programs one output: high from tick `on`, low from tick `off` (`0..=4095`).
    fn set_pwm(&mut self, channel: Channel, on: u16, off: u16) -> Result<(), Self::Error>;
}

impl<P: PwmController + ?Sized> PwmController for &mut P {
    type Error = P::Error;

    fn set_frequency(&mut self, hz: u16) -> Result<(), Self::Error> {
        (**self).set_frequency(hz)
    }

    fn set_pwm(&mut self, channel: Channel, on: u16, off: u16) -> Result<(), Self::Error> {
        (**self).set_pwm(channel, on, off)
    }
}
