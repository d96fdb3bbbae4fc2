//! Color conversion helpers.
//!
//! Convenience functions for callers holding colors in 8-bit or float form,
//! or thinking in HSV. Every function returns a [`ColorState`] ready for the
//! strip. No gamma or perceptual correction is applied.

use crate::duty::{MAX_DUTY, clamp_12, scale_8_to_12};
use crate::types::ColorState;
use palette::{FromColor, Hsv, Srgb};

/// Converts an 8-bit RGB color (full scale lands on 4080).
#[inline]
pub fn from_srgb8(color: Srgb<u8>) -> ColorState {
    ColorState::new(
        scale_8_to_12(color.red),
        scale_8_to_12(color.green),
        scale_8_to_12(color.blue),
    )
}

/// Converts a float RGB color (0.0-1.0 per component, clamped).
#[inline]
pub fn from_srgb(color: Srgb) -> ColorState {
    let scale = f64::from(MAX_DUTY);
    ColorState::new(
        clamp_12(f64::from(color.red) * scale),
        clamp_12(f64::from(color.green) * scale),
        clamp_12(f64::from(color.blue) * scale),
    )
}

/// Creates a color from HSV (Hue, Saturation, Value) components.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> ColorState {
    let hsv = Hsv::new(hue, saturation, value);
    from_srgb(Srgb::from_color(hsv))
}

/// Creates a color from hue only (full saturation and value).
#[inline]
pub fn hue(hue: f32) -> ColorState {
    hsv(hue, 1.0, 1.0)
}

impl From<Srgb<u8>> for ColorState {
    fn from(color: Srgb<u8>) -> Self {
        from_srgb8(color)
    }
}
