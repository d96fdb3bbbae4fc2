//! 12-bit duty cycle helpers.
//!
//! The PCA9685 counts 4096 ticks per PWM period, so every value written to an
//! output channel must fit in `0..=4095`. [`clamp_12`] is the last line between
//! computed trajectories and the hardware.

/// Largest duty value the controller accepts (always-on within a period).
pub const MAX_DUTY: u16 = 4095;

/// Clamps a computed sample to the 12-bit duty range.
///
/// Negative values become 0, values above 4095 become 4095, everything in
/// between is truncated toward zero. NaN maps to 0.
///
/// ```
/// use pwm_rgb_strip::duty::clamp_12;
///
/// assert_eq!(clamp_12(-5.0), 0);
/// assert_eq!(clamp_12(5000.0), 4095);
/// assert_eq!(clamp_12(2048.7), 2048);
/// ```
#[inline]
pub fn clamp_12(x: f64) -> u16 {
    if x < 0.0 {
        0
    } else if x > f64::from(MAX_DUTY) {
        MAX_DUTY
    } else {
        // `as` truncates toward zero and sends NaN to 0
        x as u16
    }
}

/// Maps an 8-bit channel value onto the 12-bit duty range (`v << 4`).
///
/// Full scale lands on 4080, not 4095.
#[inline]
pub const fn scale_8_to_12(v: u8) -> u16 {
    (v as u16) << 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_stays_in_range_for_extremes() {
        for x in [f64::MIN, -1e9, -0.5, 0.0, 4094.99, 4095.0, 4095.01, 1e12, f64::MAX] {
            assert!(clamp_12(x) <= MAX_DUTY);
        }
        assert_eq!(clamp_12(f64::NAN), 0);
        assert_eq!(clamp_12(f64::INFINITY), MAX_DUTY);
        assert_eq!(clamp_12(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn clamp_truncates_toward_zero() {
        assert_eq!(clamp_12(0.999), 0);
        assert_eq!(clamp_12(4094.9), 4094);
    }

    #[test]
    fn scale_is_a_four_bit_shift() {
        assert_eq!(scale_8_to_12(1), 16);
        assert_eq!(scale_8_to_12(15), 240);
    }
}
