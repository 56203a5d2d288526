//! Waveform symbols and their compilation from a timing profile
//!
//! A symbol is one encoded bit: a high segment followed by a low segment,
//! both measured in ticks of the pulse engine clock.

use embassy_time::Duration;

use crate::error::ArgumentError;
use crate::profile::DeviceProfile;

/// Default source clock (ESP32 APB, 80 MHz)
pub const DEFAULT_SOURCE_HZ: u32 = 80_000_000;

/// Default clock divider, giving 25 ns per tick
pub const DEFAULT_DIVIDER: u8 = 2;

/// Largest duration an RMT item field can hold (15 bits)
pub const MAX_DURATION: u16 = 0x7FFF;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Output level of one symbol segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    const fn bit(self) -> u32 {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }
}

/// Two-segment pulse expressed in clock ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseSymbol {
    pub level_a: Level,
    pub duration_a: u16,
    pub level_b: Level,
    pub duration_b: u16,
}

impl PulseSymbol {
    /// Symbol that idles the line
    pub const EMPTY: Self = Self {
        level_a: Level::Low,
        duration_a: 0,
        level_b: Level::Low,
        duration_b: 0,
    };

    /// High for `high` ticks, then low for `low` ticks
    pub const fn high_low(high: u16, low: u16) -> Self {
        Self {
            level_a: Level::High,
            duration_a: high,
            level_b: Level::Low,
            duration_b: low,
        }
    }

    /// Total length of the symbol in ticks
    pub const fn ticks(self) -> u32 {
        self.duration_a as u32 + self.duration_b as u32
    }

    /// Pack into the 32-bit RMT item layout
    ///
    /// Bits 0..15 hold the first duration, bit 15 its level, bits 16..31
    /// the second duration and bit 31 its level.
    pub const fn to_rmt_word(self) -> u32 {
        (self.duration_a & MAX_DURATION) as u32
            | (self.level_a.bit() << 15)
            | (((self.duration_b & MAX_DURATION) as u32) << 16)
            | (self.level_b.bit() << 31)
    }
}

/// Symbols for a logical 0 and a logical 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolPair {
    pub zero: PulseSymbol,
    pub one: PulseSymbol,
}

impl SymbolPair {
    /// Symbol encoding `bit`
    #[inline]
    pub const fn for_bit(&self, bit: bool) -> PulseSymbol {
        if bit { self.one } else { self.zero }
    }

    /// Bit value a symbol encodes, if it is one of the pair
    pub fn decode(&self, symbol: PulseSymbol) -> Option<bool> {
        if symbol == self.one {
            Some(true)
        } else if symbol == self.zero {
            Some(false)
        } else {
            None
        }
    }
}

/// Pulse engine clock setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    /// Frequency of the clock feeding the pulse engine
    pub source_hz: u32,
    /// Divider applied before the tick counter
    pub divider: u8,
}

impl ClockConfig {
    pub const fn new(source_hz: u32, divider: u8) -> Self {
        Self { source_hz, divider }
    }

    /// Tick rate for this clock
    pub const fn tick_rate(self) -> Result<TickRate, ArgumentError> {
        if self.source_hz == 0 || self.divider == 0 {
            return Err(ArgumentError::InvalidClock);
        }
        Ok(TickRate {
            source_hz: self.source_hz,
            divider: self.divider,
        })
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_HZ, DEFAULT_DIVIDER)
    }
}

/// Validated tick frequency of the pulse engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRate {
    source_hz: u32,
    divider: u8,
}

impl TickRate {
    /// Ticks per second
    pub fn hz(self) -> f64 {
        f64::from(self.source_hz) / f64::from(self.divider)
    }

    /// Ticks per nanosecond
    pub fn per_ns(self) -> f64 {
        self.hz() / NANOS_PER_SECOND
    }

    /// Nearest tick count for a width in nanoseconds
    ///
    /// Clamped to `1..=MAX_DURATION`: a zero duration ends an RMT stream.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn ticks(self, width_ns: u32) -> u16 {
        let ticks = libm::round(f64::from(width_ns) * self.per_ns());
        ticks.clamp(1.0, f64::from(MAX_DURATION)) as u16
    }

    /// Wall time covered by `ticks`, rounded up to the next nanosecond
    #[allow(clippy::cast_possible_truncation)]
    pub fn duration_of(self, ticks: u64) -> Duration {
        let scaled = u128::from(ticks) * u128::from(self.divider) * 1_000_000_000;
        let nanos = scaled.div_ceil(u128::from(self.source_hz));
        Duration::from_nanos(nanos.min(u128::from(u64::MAX)) as u64)
    }
}

/// Derive the 0 and 1 symbols of a device profile for a tick rate
///
/// Must be called again whenever the tick rate changes.
pub fn compile_symbols(profile: &DeviceProfile, tick_rate: TickRate) -> SymbolPair {
    SymbolPair {
        zero: PulseSymbol::high_low(
            tick_rate.ticks(profile.t0_high_ns),
            tick_rate.ticks(profile.t0_low_ns),
        ),
        one: PulseSymbol::high_low(
            tick_rate.ticks(profile.t1_high_ns),
            tick_rate.ticks(profile.t1_low_ns),
        ),
    }
}
