#![no_std]

pub mod channel;
pub mod color;
pub mod command;
pub mod error;
pub mod pixel_buffer;
pub mod profile;
pub mod recorder;
pub mod strip;
pub mod symbol;
pub mod translator;

pub use channel::{ChannelConfig, PulseChannel, WaitTimeout};
pub use color::{Rgb, Rgbw};
pub use command::{
    CommandProcessor, CommandQueue, CommandReceiver, CommandSender, PixelUpdate, ProcessError,
    ProcessReport, QueueFull, StripCommand,
};
pub use error::{ArgumentError, Error, Result};
pub use pixel_buffer::{PixelBuffer, PixelLayout};
pub use profile::{ChannelOrder, DeviceProfile, DeviceType};
pub use recorder::{PulseRecorder, RecorderError};
pub use strip::{FlushTimings, Strip, StripConfig, StripState};
pub use symbol::{ClockConfig, Level, PulseSymbol, SymbolPair, TickRate, compile_symbols};
pub use translator::{FrameEncoder, Translation, Translator, translate};

pub use embassy_time::{Delay, Duration, Instant};
