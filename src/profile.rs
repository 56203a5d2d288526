//! Per-family timing table
//!
//! Pulse widths are in nanoseconds and taken from the chip datasheets.
//! They are assumed to sit inside each receiver's tolerance window.

use crate::error::ArgumentError;

const DEVICE_NAME_WS2812: &str = "ws2812";
const DEVICE_NAME_SK6812: &str = "sk6812";
const DEVICE_NAME_APA106: &str = "apa106";
const DEVICE_NAME_SM16703: &str = "sm16703";

const DEVICE_ID_WS2812: u8 = 0;
const DEVICE_ID_SK6812: u8 = 1;
const DEVICE_ID_APA106: u8 = 2;
const DEVICE_ID_SM16703: u8 = 3;

/// Byte order a device expects for the color channels of one pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    /// Green, red, blue
    Grb,
    /// Red, green, blue
    Rgb,
}

impl ChannelOrder {
    /// Arrange color components in wire order
    pub const fn arrange(self, r: u8, g: u8, b: u8) -> [u8; 3] {
        match self {
            Self::Grb => [g, r, b],
            Self::Rgb => [r, g, b],
        }
    }
}

/// Timing and channel layout constants for one LED family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    /// High time of a logical 0
    pub t0_high_ns: u32,
    /// Low time of a logical 0
    pub t0_low_ns: u32,
    /// High time of a logical 1
    pub t1_high_ns: u32,
    /// Low time of a logical 1
    pub t1_low_ns: u32,
    /// Channel order on the wire
    pub order: ChannelOrder,
}

const WS2812_PROFILE: DeviceProfile = DeviceProfile {
    t0_high_ns: 400,
    t0_low_ns: 1000,
    t1_high_ns: 1000,
    t1_low_ns: 400,
    order: ChannelOrder::Grb,
};

const SK6812_PROFILE: DeviceProfile = DeviceProfile {
    t0_high_ns: 300,
    t0_low_ns: 900,
    t1_high_ns: 600,
    t1_low_ns: 600,
    order: ChannelOrder::Grb,
};

const APA106_PROFILE: DeviceProfile = DeviceProfile {
    t0_high_ns: 350,
    t0_low_ns: 1360,
    t1_high_ns: 1360,
    t1_low_ns: 350,
    order: ChannelOrder::Rgb,
};

const SM16703_PROFILE: DeviceProfile = DeviceProfile {
    t0_high_ns: 300,
    t0_low_ns: 900,
    t1_high_ns: 1360,
    t1_low_ns: 350,
    order: ChannelOrder::Rgb,
};

/// Supported LED families
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum DeviceType {
    Ws2812 = DEVICE_ID_WS2812,
    Sk6812 = DEVICE_ID_SK6812,
    Apa106 = DEVICE_ID_APA106,
    Sm16703 = DEVICE_ID_SM16703,
}

impl DeviceType {
    /// Every supported family, in raw id order
    pub const ALL: [Self; 4] = [Self::Ws2812, Self::Sk6812, Self::Apa106, Self::Sm16703];

    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            DEVICE_ID_WS2812 => Self::Ws2812,
            DEVICE_ID_SK6812 => Self::Sk6812,
            DEVICE_ID_APA106 => Self::Apa106,
            DEVICE_ID_SM16703 => Self::Sm16703,
            _ => return None,
        })
    }

    pub const fn profile(self) -> &'static DeviceProfile {
        match self {
            Self::Ws2812 => &WS2812_PROFILE,
            Self::Sk6812 => &SK6812_PROFILE,
            Self::Apa106 => &APA106_PROFILE,
            Self::Sm16703 => &SM16703_PROFILE,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ws2812 => DEVICE_NAME_WS2812,
            Self::Sk6812 => DEVICE_NAME_SK6812,
            Self::Apa106 => DEVICE_NAME_APA106,
            Self::Sm16703 => DEVICE_NAME_SM16703,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            DEVICE_NAME_WS2812 => Some(Self::Ws2812),
            DEVICE_NAME_SK6812 => Some(Self::Sk6812),
            DEVICE_NAME_APA106 => Some(Self::Apa106),
            DEVICE_NAME_SM16703 => Some(Self::Sm16703),
            _ => None,
        }
    }
}

impl TryFrom<u8> for DeviceType {
    type Error = ArgumentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_raw(value).ok_or(ArgumentError::UnsupportedDevice(value))
    }
}
