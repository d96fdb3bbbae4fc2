//! Core value types shared by the output sink and both generators.

use crate::duty::MAX_DUTY;

/// One of the three color components of a strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorChannel {
    /// Red component.
    Red,

    /// Green component.
    Green,

    /// Blue component.
    Blue,
}

impl ColorChannel {
    /// All components in write order.
    pub const ALL: [ColorChannel; 3] = [ColorChannel::Red, ColorChannel::Green, ColorChannel::Blue];

    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            ColorChannel::Red => 0,
            ColorChannel::Green => 1,
            ColorChannel::Blue => 2,
        }
    }
}

impl core::fmt::Display for ColorChannel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ColorChannel::Red => write!(f, "red"),
            ColorChannel::Green => write!(f, "green"),
            ColorChannel::Blue => write!(f, "blue"),
        }
    }
}

/// A strip color as three 12-bit duty values.
///
/// Every component is kept in `0..=4095`; constructors saturate anything
/// larger at 4095.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorState {
    red: u16,
    green: u16,
    blue: u16,
}

impl ColorState {
    /// All channels off.
    pub const OFF: ColorState = ColorState::new(0, 0, 0);

    /// All channels at full duty.
    pub const FULL: ColorState = ColorState::new(MAX_DUTY, MAX_DUTY, MAX_DUTY);

    /// Creates a color, saturating each component at 4095.
    #[inline]
    pub const fn new(red: u16, green: u16, blue: u16) -> Self {
        Self {
            red: saturate(red),
            green: saturate(green),
            blue: saturate(blue),
        }
    }

    /// Creates a color from `[red, green, blue]`.
    #[inline]
    pub const fn from_channels(channels: [u16; 3]) -> Self {
        Self::new(channels[0], channels[1], channels[2])
    }

    #[inline]
    pub const fn red(&self) -> u16 {
        self.red
    }

    #[inline]
    pub const fn green(&self) -> u16 {
        self.green
    }

    #[inline]
    pub const fn blue(&self) -> u16 {
        self.blue
    }

    /// Returns the value of a single component.
    #[inline]
    pub const fn channel(&self, channel: ColorChannel) -> u16 {
        self.channels()[channel.index()]
    }

    /// Returns `[red, green, blue]`.
    #[inline]
    pub const fn channels(&self) -> [u16; 3] {
        [self.red, self.green, self.blue]
    }
}

impl core::fmt::Display for ColorState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.red, self.green, self.blue)
    }
}

#[inline]
const fn saturate(value: u16) -> u16 {
    if value > MAX_DUTY { MAX_DUTY } else { value }
}

/// A PCA9685 output index (`0..=15`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel(u8);

impl Channel {
    /// Number of outputs on the controller.
    pub const COUNT: u8 = 16;

    /// Validates an output index.
    ///
    /// # Errors
    /// * `InvalidChannel` - Index is 16 or above
    pub const fn new(index: u8) -> Result<Self, ConfigError> {
        if index < Self::COUNT {
            Ok(Channel(index))
        } else {
            Err(ConfigError::InvalidChannel(index))
        }
    }

    /// Returns the raw output index.
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Channel {
    type Error = ConfigError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Channel::new(index)
    }
}

impl From<Channel> for u8 {
    fn from(channel: Channel) -> Self {
        channel.0
    }
}

/// Assignment of red, green and blue to three distinct controller outputs.
///
/// Fixed once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelMapping {
    red: Channel,
    green: Channel,
    blue: Channel,
}

impl ChannelMapping {
    /// Builds a mapping from raw output indices.
    ///
    /// # Errors
    /// * `InvalidChannel` - An index is 16 or above
    /// * `DuplicateChannel` - Two components share an output
    pub fn new(red: u8, green: u8, blue: u8) -> Result<Self, ConfigError> {
        Self::from_channels(Channel::new(red)?, Channel::new(green)?, Channel::new(blue)?)
    }

    /// Builds a mapping from validated channels.
    ///
    /// # Errors
    /// * `DuplicateChannel` - Two components share an output
    pub fn from_channels(red: Channel, green: Channel, blue: Channel) -> Result<Self, ConfigError> {
        if red == green || red == blue {
            return Err(ConfigError::DuplicateChannel(red));
        }
        if green == blue {
            return Err(ConfigError::DuplicateChannel(green));
        }

        Ok(Self { red, green, blue })
    }

    /// Returns the output assigned to a component.
    #[inline]
    pub const fn channel(&self, component: ColorChannel) -> Channel {
        match component {
            ColorChannel::Red => self.red,
            ColorChannel::Green => self.green,
            ColorChannel::Blue => self.blue,
        }
    }
}

impl Default for ChannelMapping {
    /// Red on output 0, green on 1, blue on 2.
    fn default() -> Self {
        Self {
            red: Channel(0),
            green: Channel(1),
            blue: Channel(2),
        }
    }
}

/// Rejected driver or generator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Output index outside `0..=15`.
    InvalidChannel(u8),

    /// Two color components mapped to the same output.
    DuplicateChannel(Channel),

    /// A fade needs at least one step.
    ZeroSteps,

    /// Walk bounds with `min > max`.
    InvertedBounds {
        channel: ColorChannel,
        min: u16,
        max: u16,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidChannel(index) => {
                write!(f, "channel {} out of range, must be 0-15", index)
            }
            ConfigError::DuplicateChannel(channel) => {
                write!(f, "channel {} assigned to more than one color", channel.0)
            }
            ConfigError::ZeroSteps => {
                write!(f, "fade step count must be at least 1")
            }
            ConfigError::InvertedBounds { channel, min, max } => {
                write!(
                    f,
                    "{} bounds inverted: min {} is greater than max {}",
                    channel, min, max
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
