//! Raspberry Pi wiring: a PCA9685 on one of the SoC's I2C buses.

use crate::pca9685::{Pca9685, Pca9685Error};
use rppal::hal::Delay;
use rppal::i2c::I2c;

/// PCA9685 driver on a Raspberry Pi I2C bus.
pub type RpiPca9685 = Pca9685<I2c, Delay>;

/// Errors opening the controller.
#[derive(Debug)]
pub enum OpenError {
    /// The I2C bus could not be opened.
    Bus(rppal::i2c::Error),

    /// The controller did not respond to initialization.
    Init(Pca9685Error<rppal::i2c::Error>),
}

impl core::fmt::Display for OpenError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OpenError::Bus(err) => write!(f, "failed to open i2c bus: {}", err),
            OpenError::Init(err) => write!(f, "failed to initialize pca9685: {}", err),
        }
    }
}

impl std::error::Error for OpenError {}

/// Opens I2C bus `bus` and initializes the PCA9685 at `address`.
///
/// Bus 1 is the one exposed on the 40-pin header of current boards.
pub fn open(bus: u8, address: u8) -> Result<RpiPca9685, OpenError> {
    let i2c = I2c::with_bus(bus).map_err(OpenError::Bus)?;
    log::info!("I2C bus {} opened", bus);

    let pca = Pca9685::init(i2c, Delay::new(), address).map_err(OpenError::Init)?;
    log::info!("PCA9685 initialized on I2C bus {}, address {:#04x}", bus, address);
    Ok(pca)
}
