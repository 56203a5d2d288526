use embassy_time::{Duration, TICK_HZ};
use embedded_hal::delay::DelayNs;
use smart_leds::SmartLedsWrite;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::channel::{ChannelConfig, PulseChannel};
use crate::color::Rgb;
use crate::error::{ArgumentError, Error, Result};
use crate::pixel_buffer::{PixelBuffer, PixelLayout};
use crate::profile::DeviceType;
use crate::symbol::ClockConfig;
use crate::translator::Translator;

/// Default bound on the wait for a previous frame
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_millis(1000);

/// Default idle time between frames, the latch period most devices need
pub const DEFAULT_RESET_PAUSE: Duration = Duration::from_micros(50);

/// Timings applied by [`Strip::flush`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushTimings {
    /// How long to wait for the previous frame to finish
    pub flush_timeout: Duration,
    /// Line idle time held before every frame
    pub reset_pause: Duration,
}

impl Default for FlushTimings {
    fn default() -> Self {
        Self {
            flush_timeout: DEFAULT_FLUSH_TIMEOUT,
            reset_pause: DEFAULT_RESET_PAUSE,
        }
    }
}

/// Description of one physical LED chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripConfig {
    pub device: DeviceType,
    /// Four bytes per pixel (RGBW) instead of three
    pub rgbw: bool,
    pub pixel_count: usize,
    /// Data GPIO number
    pub gpio: u8,
    pub clock: ClockConfig,
    pub timings: FlushTimings,
}

impl StripConfig {
    /// Three-channel strip on the default clock and timings
    pub fn new(device: DeviceType, pixel_count: usize, gpio: u8) -> Self {
        Self {
            device,
            rgbw: false,
            pixel_count,
            gpio,
            clock: ClockConfig::default(),
            timings: FlushTimings::default(),
        }
    }

    #[must_use]
    pub fn with_rgbw(mut self) -> Self {
        self.rgbw = true;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: ClockConfig) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_timings(mut self, timings: FlushTimings) -> Self {
        self.timings = timings;
        self
    }
}

/// Transmission state of a strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripState {
    /// Buffer may be written
    Idle,
    /// A frame read from the buffer is on the wire
    Transmitting,
}

/// One LED chain bound to one pulse channel
///
/// Owns the pixel buffer (`CAPACITY` bytes of storage) and serializes
/// frames on the channel. The buffer is locked while a frame is in flight.
pub struct Strip<C, D, const CAPACITY: usize> {
    channel: C,
    delay: D,
    buffer: PixelBuffer<CAPACITY>,
    translator: Translator,
    config: StripConfig,
    state: StripState,
}

impl<C, D, const CAPACITY: usize> Strip<C, D, CAPACITY>
where
    C: PulseChannel,
    D: DelayNs,
{
    /// Allocate the buffer, bind the channel and install the translator
    pub fn init(config: StripConfig, mut channel: C, delay: D) -> Result<Self, C::Error> {
        if config.pixel_count == 0 {
            return Err(ArgumentError::ZeroLength.into());
        }
        let tick_rate = config.clock.tick_rate()?;

        let layout = PixelLayout::new(config.device.profile().order, config.rgbw);
        let buffer = PixelBuffer::new(layout, config.pixel_count).map_err(|err| {
            #[cfg(feature = "esp32-log")]
            println!("[led_strip] not enough memory: {} > {}", err.requested, err.capacity);
            Error::OutOfMemory {
                requested: err.requested,
                capacity: err.capacity,
            }
        })?;

        let translator = Translator::new(config.device, tick_rate);
        channel
            .configure(ChannelConfig {
                gpio: config.gpio,
                clock_divider: config.clock.divider,
            })
            .map_err(Error::Hardware)?;
        channel
            .install_translator(translator)
            .map_err(Error::Hardware)?;

        #[cfg(feature = "esp32-log")]
        println!(
            "[led_strip] {} x{} on gpio {}",
            config.device.as_str(),
            config.pixel_count,
            config.gpio
        );

        Ok(Self {
            channel,
            delay,
            buffer,
            translator,
            config,
            state: StripState::Idle,
        })
    }

    /// Write one pixel into the buffer
    ///
    /// Never transmits. Refused while the previous frame is still on the
    /// wire.
    pub fn set_pixel(&mut self, index: usize, r: u8, g: u8, b: u8, w: u8) -> Result<(), C::Error> {
        self.ensure_writable()?;
        self.buffer.set(index, r, g, b, w)?;
        Ok(())
    }

    /// Write one RGB pixel, white stays zero
    pub fn set_rgb(&mut self, index: usize, color: Rgb) -> Result<(), C::Error> {
        self.set_pixel(index, color.r, color.g, color.b, 0)
    }

    /// Zero the whole buffer
    pub fn clear(&mut self) -> Result<(), C::Error> {
        self.ensure_writable()?;
        self.buffer.clear();
        Ok(())
    }

    /// Send the buffer to the strip
    ///
    /// Waits for the previous frame (bounded by the flush timeout), holds the
    /// reset pause, then submits the frame and returns without waiting for
    /// it to finish.
    ///
    /// # Errors
    ///
    /// `Timeout` if the previous frame is still on the wire when the flush
    /// timeout expires. Nothing is submitted and the state stays
    /// `Transmitting`. A channel rejection is returned as `Hardware` with the
    /// strip left `Idle`.
    pub fn flush(&mut self) -> Result<(), C::Error> {
        if self
            .channel
            .wait_idle(self.config.timings.flush_timeout)
            .is_err()
        {
            #[cfg(feature = "esp32-log")]
            println!("[led_strip] previous frame did not finish");
            return Err(Error::Timeout);
        }
        self.state = StripState::Idle;

        self.delay.delay_ns(pause_nanos(self.config.timings.reset_pause));

        self.channel
            .submit(self.buffer.as_bytes())
            .map_err(|err| {
                #[cfg(feature = "esp32-log")]
                println!("[led_strip] submit rejected: {:?}", err);
                Error::Hardware(err)
            })?;
        self.state = StripState::Transmitting;
        Ok(())
    }

    /// Block until the frame in flight has finished
    pub fn wait_done(&mut self, timeout: Duration) -> Result<(), C::Error> {
        if self.state == StripState::Idle {
            return Ok(());
        }
        self.channel.wait_idle(timeout).map_err(|_| Error::Timeout)?;
        self.state = StripState::Idle;
        Ok(())
    }

    /// Check for completion without blocking
    pub fn poll(&mut self) -> StripState {
        if self.state == StripState::Transmitting && self.channel.is_idle() {
            self.state = StripState::Idle;
        }
        self.state
    }

    /// Switch to another pulse engine clock
    ///
    /// Reconfigures the channel and recompiles the symbols. Only allowed
    /// while idle.
    pub fn reclock(&mut self, clock: ClockConfig) -> Result<(), C::Error> {
        self.ensure_writable()?;
        let tick_rate = clock.tick_rate()?;
        let translator = Translator::new(self.config.device, tick_rate);

        self.channel
            .configure(ChannelConfig {
                gpio: self.config.gpio,
                clock_divider: clock.divider,
            })
            .map_err(Error::Hardware)?;
        self.channel
            .install_translator(translator)
            .map_err(Error::Hardware)?;

        #[cfg(feature = "esp32-log")]
        println!("[led_strip] reclocked to {} Hz / {}", clock.source_hz, clock.divider);

        self.translator = translator;
        self.config.clock = clock;
        Ok(())
    }

    pub const fn state(&self) -> StripState {
        self.state
    }

    pub const fn config(&self) -> &StripConfig {
        &self.config
    }

    pub const fn translator(&self) -> &Translator {
        &self.translator
    }

    pub const fn pixel_count(&self) -> usize {
        self.buffer.pixel_count()
    }

    /// Bytes per pixel (3 or 4)
    pub const fn channel_size(&self) -> usize {
        self.buffer.layout().channel_size()
    }

    /// Frame bytes in wire order
    pub fn bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    pub const fn channel(&self) -> &C {
        &self.channel
    }

    /// Tear down the strip, handing back its channel and delay
    pub fn release(self) -> (C, D) {
        (self.channel, self.delay)
    }

    fn ensure_writable(&mut self) -> Result<(), C::Error> {
        match self.poll() {
            StripState::Idle => Ok(()),
            StripState::Transmitting => Err(Error::TransmissionInProgress),
        }
    }
}

impl<C, D, const CAPACITY: usize> SmartLedsWrite for Strip<C, D, CAPACITY>
where
    C: PulseChannel,
    D: DelayNs,
{
    type Error = Error<C::Error>;
    type Color = Rgb;

    /// Write colors from pixel 0 upward, then flush
    ///
    /// An iterator whose size hint already exceeds the strip is rejected
    /// before any pixel changes. Otherwise the colors before the first
    /// out-of-range index stay written and nothing is flushed.
    fn write<T, I>(&mut self, iterator: T) -> core::result::Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let iterator = iterator.into_iter();
        let len = self.pixel_count();
        if iterator.size_hint().0 > len {
            return Err(ArgumentError::IndexOutOfRange { index: len, len }.into());
        }
        for (index, color) in iterator.enumerate() {
            self.set_rgb(index, color.into())?;
        }
        self.flush()
    }
}

fn pause_nanos(pause: Duration) -> u32 {
    let nanos = u128::from(pause.as_ticks()) * 1_000_000_000 / u128::from(TICK_HZ);
    u32::try_from(nanos).unwrap_or(u32::MAX)
}
