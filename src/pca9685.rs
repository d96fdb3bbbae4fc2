//! PCA9685 16-channel, 12-bit PWM controller over I2C.
//!
//! Generic over any `embedded-hal` 1.0 I2C bus and delay provider. The register
//! sequence matches the chip's datasheet power-up and prescale procedure:
//! outputs off, totem-pole drive, oscillator woken, then the prescaler written
//! while the oscillator sleeps.

use crate::pwm::PwmController;
use crate::types::Channel;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Default I2C address with all address pins low.
pub const DEFAULT_ADDRESS: u8 = 0x40;

/// Default switching frequency in Hz.
pub const DEFAULT_FREQUENCY: u16 = 200;

const OSCILLATOR_HZ: u32 = 25_000_000;
const PRESCALE_MIN: u32 = 3;
const PRESCALE_MAX: u32 = 255;

// Registers
const MODE1: u8 = 0x00;
const MODE2: u8 = 0x01;
const LED0_ON_L: u8 = 0x06;
const ALL_LED_ON_L: u8 = 0xFA;
const ALL_LED_ON_H: u8 = 0xFB;
const ALL_LED_OFF_L: u8 = 0xFC;
const ALL_LED_OFF_H: u8 = 0xFD;
const PRESCALE: u8 = 0xFE;

// MODE1 / MODE2 bits
const RESTART: u8 = 0x80;
const SLEEP: u8 = 0x10;
const ALLCALL: u8 = 0x01;
const OUTDRV: u8 = 0x04;

const OSCILLATOR_SETTLE_MS: u32 = 5;

/// Errors raised by the PCA9685 driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pca9685Error<E> {
    /// The I2C transfer failed.
    I2c(E),

    /// Requested frequency needs a prescale outside `3..=255`
    /// (roughly 24-1526 Hz).
    FrequencyOutOfRange(u16),
}

impl<E: core::fmt::Debug> core::fmt::Display for Pca9685Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Pca9685Error::I2c(err) => write!(f, "i2c transfer failed: {:?}", err),
            Pca9685Error::FrequencyOutOfRange(hz) => {
                write!(f, "pwm frequency {} Hz outside the supported 24-1526 Hz", hz)
            }
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for Pca9685Error<E> {}

/// Computes the prescale register value for a frequency.
///
/// `round(25 MHz / (4096 * hz)) - 1`, or `None` when the result falls outside
/// what the chip accepts.
pub fn prescale_for(hz: u16) -> Option<u8> {
    if hz == 0 {
        return None;
    }
    let period_ticks = 4096 * u32::from(hz);
    let rounded = (OSCILLATOR_HZ + period_ticks / 2) / period_ticks;
    let prescale = rounded.checked_sub(1)?;
    if (PRESCALE_MIN..=PRESCALE_MAX).contains(&prescale) {
        u8::try_from(prescale).ok()
    } else {
        None
    }
}

/// PCA9685 driver owning its bus and delay provider.
pub struct Pca9685<I, D> {
    i2c: I,
    delay: D,
    address: u8,
}

impl<I: I2c, D: DelayNs> Pca9685<I, D> {
    /// Initializes the controller: all outputs off, totem-pole outputs,
    /// oscillator running.
    pub fn init(i2c: I, delay: D, address: u8) -> Result<Self, Pca9685Error<I::Error>> {
        let mut pca = Self { i2c, delay, address };

        pca.set_all_pwm(0, 0)?;
        pca.write_register(MODE2, OUTDRV)?;
        pca.write_register(MODE1, ALLCALL)?;
        pca.delay.delay_ms(OSCILLATOR_SETTLE_MS);

        let mode1 = pca.read_register(MODE1)? & !SLEEP;
        pca.write_register(MODE1, mode1)?;
        pca.delay.delay_ms(OSCILLATOR_SETTLE_MS);

        log::debug!("PCA9685 initialized at address {:#04x}", address);
        Ok(pca)
    }

    /// Programs every output at once.
    pub fn set_all_pwm(&mut self, on: u16, off: u16) -> Result<(), Pca9685Error<I::Error>> {
        let [on_l, on_h] = on.to_le_bytes();
        let [off_l, off_h] = off.to_le_bytes();
        self.write_register(ALL_LED_ON_L, on_l)?;
        self.write_register(ALL_LED_ON_H, on_h)?;
        self.write_register(ALL_LED_OFF_L, off_l)?;
        self.write_register(ALL_LED_OFF_H, off_h)?;
        Ok(())
    }

    /// Returns the configured I2C address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Releases the bus and delay provider.
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Pca9685Error<I::Error>> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(Pca9685Error::I2c)
    }

    fn read_register(&mut self, register: u8) -> Result<u8, Pca9685Error<I::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .map_err(Pca9685Error::I2c)?;
        Ok(buf[0])
    }
}

impl<I: I2c, D: DelayNs> PwmController for Pca9685<I, D> {
    type Error = Pca9685Error<I::Error>;

    fn set_frequency(&mut self, hz: u16) -> Result<(), Self::Error> {
        let prescale = prescale_for(hz).ok_or(Pca9685Error::FrequencyOutOfRange(hz))?;

        // Prescale can only be written while the oscillator sleeps
        let old_mode = self.read_register(MODE1)?;
        self.write_register(MODE1, (old_mode & 0x7F) | SLEEP)?;
        self.write_register(PRESCALE, prescale)?;
        self.write_register(MODE1, old_mode)?;
        self.delay.delay_ms(OSCILLATOR_SETTLE_MS);
        self.write_register(MODE1, old_mode | RESTART)?;

        log::debug!("PCA9685 frequency set to {} Hz (prescale {})", hz, prescale);
        Ok(())
    }

    fn set_pwm(&mut self, channel: Channel, on: u16, off: u16) -> Result<(), Self::Error> {
        let base = LED0_ON_L + 4 * channel.index();
        let [on_l, on_h] = on.to_le_bytes();
        let [off_l, off_h] = off.to_le_bytes();
        self.write_register(base, on_l)?;
        self.write_register(base + 1, on_h)?;
        self.write_register(base + 2, off_l)?;
        self.write_register(base + 3, off_h)?;
        Ok(())
    }
}
