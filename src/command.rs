//! Frame requests handed from the application to the LED task
//!
//! Request handlers (network, sensors) push pixel updates and flushes from
//! any context; the task that owns the strip drains them. The queue is
//! built on `critical-section` and `heapless::Deque`, so it is safe to
//! share between threads and interrupts.

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::delay::DelayNs;
use heapless::Deque;

use crate::channel::PulseChannel;
use crate::color::Rgbw;
use crate::error::Error;
use crate::strip::Strip;

/// One pixel write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelUpdate {
    pub index: u16,
    pub color: Rgbw,
}

impl PixelUpdate {
    pub const fn new(index: u16, r: u8, g: u8, b: u8, w: u8) -> Self {
        Self {
            index,
            color: Rgbw::new(r, g, b, w),
        }
    }
}

/// Work item for the strip owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripCommand {
    /// Write one pixel into the buffer
    SetPixel(PixelUpdate),
    /// Transmit the buffer
    Flush,
}

/// Returned when the queue cannot take the whole request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull;

/// Bounded queue of strip commands
pub struct CommandQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<StripCommand, SIZE>>>,
}

impl<const SIZE: usize> CommandQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn sender(&self) -> CommandSender<'_, SIZE> {
        CommandSender { queue: self }
    }

    pub const fn receiver(&self) -> CommandReceiver<'_, SIZE> {
        CommandReceiver { queue: self }
    }

    /// Queue a single command
    pub fn try_send(&self, command: StripCommand) -> core::result::Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(command).map_err(|_| QueueFull)
        })
    }

    /// Queue every update followed by a flush
    ///
    /// Either the whole frame is queued or nothing is.
    pub fn push_frame(&self, updates: &[PixelUpdate]) -> core::result::Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            let free_slots = queue.capacity() - queue.len();
            if free_slots < updates.len() + 1 {
                return Err(QueueFull);
            }
            for update in updates {
                queue
                    .push_back(StripCommand::SetPixel(*update))
                    .map_err(|_| QueueFull)?;
            }
            queue.push_back(StripCommand::Flush).map_err(|_| QueueFull)
        })
    }

    pub fn try_receive(&self) -> Option<StripCommand> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Head of the queue, left in place
    fn peek(&self) -> Option<StripCommand> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().front().copied())
    }

    /// Drop the head once it has been handled
    ///
    /// Producers only append, so with a single consumer the head is still
    /// the command returned by the last `peek`.
    fn discard_front(&self) {
        critical_section::with(|cs| {
            self.inner.borrow(cs).borrow_mut().pop_front();
        });
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for CommandQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle for a [`CommandQueue`]
#[derive(Clone, Copy)]
pub struct CommandSender<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> CommandSender<'_, SIZE> {
    pub fn try_send(&self, command: StripCommand) -> core::result::Result<(), QueueFull> {
        self.queue.try_send(command)
    }

    pub fn push_frame(&self, updates: &[PixelUpdate]) -> core::result::Result<(), QueueFull> {
        self.queue.push_frame(updates)
    }
}

/// Consumer handle for a [`CommandQueue`]
#[derive(Clone, Copy)]
pub struct CommandReceiver<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> CommandReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Option<StripCommand> {
        self.queue.try_receive()
    }
}

/// What one drain of the queue applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessReport {
    pub pixels_written: usize,
    pub flushes: usize,
}

/// A drain that stopped early
///
/// `report` counts what was applied before `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessError<E> {
    pub report: ProcessReport,
    pub error: Error<E>,
}

/// Applies queued commands to a strip
///
/// Must be the only consumer of its queue.
pub struct CommandProcessor<'a, const SIZE: usize> {
    commands: CommandReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> CommandProcessor<'a, SIZE> {
    pub const fn new(commands: CommandReceiver<'a, SIZE>) -> Self {
        Self { commands }
    }

    /// Drain all pending commands
    ///
    /// A pixel write that follows a flush from the same drain first waits
    /// for that frame to leave the wire, so back-to-back frames are applied
    /// in one call. A frame already in flight when the drain starts is not
    /// waited for.
    ///
    /// Stops at the first failing command. A command refused because a frame
    /// is still in flight (`TransmissionInProgress` or `Timeout`) stays at
    /// the head of the queue; any other failed command is dropped.
    pub fn process_pending<C, D, const CAPACITY: usize>(
        &mut self,
        strip: &mut Strip<C, D, CAPACITY>,
    ) -> Result<ProcessReport, ProcessError<C::Error>>
    where
        C: PulseChannel,
        D: DelayNs,
    {
        let queue = self.commands.queue;
        let timeout = strip.config().timings.flush_timeout;
        let mut report = ProcessReport::default();
        let mut flushed = false;

        while let Some(command) = queue.peek() {
            let applied = match command {
                StripCommand::SetPixel(update) => {
                    let color = update.color;
                    let ready = if flushed { strip.wait_done(timeout) } else { Ok(()) };
                    ready
                        .and_then(|()| {
                            strip.set_pixel(
                                usize::from(update.index),
                                color.r,
                                color.g,
                                color.b,
                                color.w,
                            )
                        })
                        .map(|()| report.pixels_written += 1)
                }
                StripCommand::Flush => strip.flush().map(|()| {
                    report.flushes += 1;
                    flushed = true;
                }),
            };
            match applied {
                Ok(()) => queue.discard_front(),
                Err(error) => {
                    if !matches!(error, Error::TransmissionInProgress | Error::Timeout) {
                        queue.discard_front();
                    }
                    return Err(ProcessError { report, error });
                }
            }
        }

        Ok(report)
    }
}
