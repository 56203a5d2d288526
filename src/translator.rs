//! Byte-to-waveform translation
//!
//! The pulse engine memory holds far fewer symbols than a full frame, so a
//! frame is translated in pieces. Every call consumes whole bytes only,
//! most significant bit first, and reports how far it got so the caller
//! can resume from there.

use crate::profile::DeviceType;
use crate::symbol::{PulseSymbol, SymbolPair, TickRate, compile_symbols};

/// Symbols emitted per source byte
pub const SYMBOLS_PER_BYTE: usize = 8;

/// Outcome of one translation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Translation {
    /// Source bytes fully translated
    pub bytes_consumed: usize,
    /// Symbols written to the output
    pub symbols_emitted: usize,
}

/// Translate bytes from the start of `src` into `dest`
///
/// Stops when `src` is exhausted or fewer than 8 output slots remain, so a
/// byte is never split across calls.
pub fn translate(symbols: &SymbolPair, src: &[u8], dest: &mut [PulseSymbol]) -> Translation {
    let mut translation = Translation::default();

    for (&byte, slots) in src.iter().zip(dest.chunks_exact_mut(SYMBOLS_PER_BYTE)) {
        for (bit, slot) in slots.iter_mut().enumerate() {
            *slot = symbols.for_bit(byte & (0x80 >> bit) != 0);
        }
        translation.bytes_consumed += 1;
        translation.symbols_emitted += SYMBOLS_PER_BYTE;
    }

    translation
}

/// Translator bound to one device family
///
/// Selected once when a strip is initialized; carries its own symbol pair
/// so no shared table is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translator {
    device: DeviceType,
    tick_rate: TickRate,
    symbols: SymbolPair,
}

impl Translator {
    /// Compile the symbols of `device` for `tick_rate`
    pub fn new(device: DeviceType, tick_rate: TickRate) -> Self {
        Self {
            device,
            tick_rate,
            symbols: compile_symbols(device.profile(), tick_rate),
        }
    }

    pub const fn device(&self) -> DeviceType {
        self.device
    }

    pub const fn tick_rate(&self) -> TickRate {
        self.tick_rate
    }

    pub const fn symbols(&self) -> &SymbolPair {
        &self.symbols
    }

    /// See [`translate`]
    pub fn translate(&self, src: &[u8], dest: &mut [PulseSymbol]) -> Translation {
        translate(&self.symbols, src, dest)
    }

    /// Start a resumable translation of a whole frame
    pub const fn encode<'a>(&self, frame: &'a [u8]) -> FrameEncoder<'a> {
        FrameEncoder {
            translator: *self,
            frame,
            offset: 0,
        }
    }
}

/// Resumable translation of one frame
///
/// Tracks the offset of the next untranslated byte between refills of the
/// pulse memory.
#[derive(Debug, Clone)]
pub struct FrameEncoder<'a> {
    translator: Translator,
    frame: &'a [u8],
    offset: usize,
}

impl FrameEncoder<'_> {
    /// Translate the next bytes into `block`
    ///
    /// Returns the number of symbols written. Zero means either the frame is
    /// done or `block` is shorter than one byte's worth of symbols.
    pub fn fill(&mut self, block: &mut [PulseSymbol]) -> usize {
        let translation = self.translator.translate(&self.frame[self.offset..], block);
        self.offset += translation.bytes_consumed;
        translation.symbols_emitted
    }

    pub const fn is_done(&self) -> bool {
        self.offset >= self.frame.len()
    }

    /// Bytes not yet translated
    pub const fn remaining(&self) -> usize {
        self.frame.len() - self.offset
    }

    /// Offset of the next byte to translate
    pub const fn offset(&self) -> usize {
        self.offset
    }
}
