//! Software pulse channel
//!
//! Behaves like one RMT transmit channel: frames are drained through the
//! installed translator one memory block at a time and the resulting
//! waveform is kept for inspection. The channel reports busy for as long
//! as the waveform would take on the wire.

use embassy_time::Instant;
use heapless::Vec;

use crate::channel::{ChannelConfig, PulseChannel};
use crate::symbol::PulseSymbol;
use crate::translator::Translator;

/// Symbols per refill, one RMT memory block
pub const BLOCK_SYMBOLS: usize = 64;

/// Recorder rejected a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderError {
    /// `submit` before `configure`
    NotConfigured,
    /// `submit` before `install_translator`
    NoTranslator,
    /// Waveform does not fit the recording capacity
    Overflow,
}

/// Pulse channel that records up to `CAPACITY` symbols per frame
#[derive(Debug)]
pub struct PulseRecorder<const CAPACITY: usize> {
    config: Option<ChannelConfig>,
    translator: Option<Translator>,
    symbols: Vec<PulseSymbol, CAPACITY>,
    busy_until: Instant,
    refills: usize,
    transmissions: usize,
}

impl<const CAPACITY: usize> PulseRecorder<CAPACITY> {
    pub const fn new() -> Self {
        Self {
            config: None,
            translator: None,
            symbols: Vec::new(),
            busy_until: Instant::from_millis(0),
            refills: 0,
            transmissions: 0,
        }
    }

    /// Configuration received from the strip
    pub const fn config(&self) -> Option<ChannelConfig> {
        self.config
    }

    pub const fn translator(&self) -> Option<&Translator> {
        self.translator.as_ref()
    }

    /// Waveform of the last submitted frame
    pub fn symbols(&self) -> &[PulseSymbol] {
        &self.symbols
    }

    /// Block refills used by the last frame
    pub const fn refills(&self) -> usize {
        self.refills
    }

    /// Frames submitted so far
    pub const fn transmissions(&self) -> usize {
        self.transmissions
    }

    /// Instant the last frame leaves the wire
    pub const fn busy_until(&self) -> Instant {
        self.busy_until
    }

    /// Bits of the last frame, decoded back into bytes
    ///
    /// Returns `None` if a symbol is not part of the translator's pair.
    pub fn decode<const N: usize>(&self) -> Option<Vec<u8, N>> {
        let translator = self.translator?;
        let symbols = translator.symbols();
        let mut bytes = Vec::new();
        for chunk in self.symbols.chunks(8) {
            let mut byte = 0u8;
            for symbol in chunk {
                byte = (byte << 1) | u8::from(symbols.decode(*symbol)?);
            }
            bytes.push(byte).ok()?;
        }
        Some(bytes)
    }
}

impl<const CAPACITY: usize> Default for PulseRecorder<CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAPACITY: usize> PulseChannel for PulseRecorder<CAPACITY> {
    type Error = RecorderError;

    fn configure(&mut self, config: ChannelConfig) -> Result<(), Self::Error> {
        self.config = Some(config);
        Ok(())
    }

    fn install_translator(&mut self, translator: Translator) -> Result<(), Self::Error> {
        self.translator = Some(translator);
        Ok(())
    }

    fn is_idle(&mut self) -> bool {
        Instant::now() >= self.busy_until
    }

    fn submit(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        if self.config.is_none() {
            return Err(RecorderError::NotConfigured);
        }
        let translator = self.translator.ok_or(RecorderError::NoTranslator)?;

        self.symbols.clear();
        self.refills = 0;

        let mut block = [PulseSymbol::EMPTY; BLOCK_SYMBOLS];
        let mut encoder = translator.encode(frame);
        let mut ticks = 0u64;
        while !encoder.is_done() {
            let emitted = encoder.fill(&mut block);
            self.refills += 1;
            for symbol in &block[..emitted] {
                ticks += u64::from(symbol.ticks());
                self.symbols
                    .push(*symbol)
                    .map_err(|_| RecorderError::Overflow)?;
            }
        }

        self.busy_until = Instant::now() + translator.tick_rate().duration_of(ticks);
        self.transmissions += 1;
        Ok(())
    }
}
