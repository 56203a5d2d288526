//! Hardware transmit channel abstraction
//!
//! One strip binds to exactly one channel for its lifetime. At most one
//! frame is in flight per channel.

use embassy_time::{Duration, Instant};

use crate::translator::Translator;

/// Pin and clock setup handed to a channel at strip initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Data GPIO number
    pub gpio: u8,
    /// Divider applied to the channel's source clock
    pub clock_divider: u8,
}

/// Channel stayed busy past the allowed wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitTimeout;

/// Pulse-train peripheral driving one GPIO
///
/// Implement this trait to support a hardware platform. The strip is
/// generic over it.
pub trait PulseChannel {
    /// Error reported by the peripheral
    type Error: core::fmt::Debug;

    /// Bind the channel to a pin and clock divider
    fn configure(&mut self, config: ChannelConfig) -> Result<(), Self::Error>;

    /// Install the translator used for every following submission
    fn install_translator(&mut self, translator: Translator) -> Result<(), Self::Error>;

    /// Whether the last submitted frame has finished, without blocking
    fn is_idle(&mut self) -> bool;

    /// Start sending `frame` without waiting for it to finish
    fn submit(&mut self, frame: &[u8]) -> Result<(), Self::Error>;

    /// Block until the channel is idle or `timeout` elapses
    fn wait_idle(&mut self, timeout: Duration) -> Result<(), WaitTimeout> {
        let deadline = Instant::now() + timeout;
        while !self.is_idle() {
            if Instant::now() >= deadline {
                return Err(WaitTimeout);
            }
        }
        Ok(())
    }
}
