//! Core decoder state machine.
//!
//! The [`Decoder`] is a single fixed-size state object advanced exclusively
//! by two notification entry points: [`Decoder::edge`], called on every
//! transition of the receiver line, and [`Decoder::tick`], called on every
//! timer expiry. The platform must guarantee the two never run concurrently
//! or nest; under that guarantee no locking is needed and every transition
//! completes before a handler returns.
//!
//! Decoding proceeds through three top-level phases. In [`State::Synchronizing`]
//! the [`sync`] detector measures the leading header burst and calibrates the
//! per-device sample clock from it. In [`State::ReceivingCommand`] the
//! [`sample`] stage fills a 96-slot bitmap with oversampled line readings,
//! and the [`frame`] decoder interprets the completed bitmap. In
//! [`State::WaitRepeat`] the [`repeat`] detector watches for the short bursts
//! a held button produces, under a millisecond watchdog that is the sole path
//! back to the initial state after a successful decode.
//!
//! Every malformed pulse, bit pattern, or checksum funnels into [`Decoder::reset`];
//! no failure is surfaced to the caller and none is fatal.

pub mod frame;
pub mod repeat;
pub mod sample;
pub mod sync;

use crate::hw::{Line, Timer};
use crate::timings;

use repeat::Repeat;
use sample::Bitmap;
use sync::Sync;

/// A decoded remote-control command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Event {
    /// 16-bit device address.
    pub address: u16,
    /// 8-bit command code.
    pub command: u8,
    /// Whether this event came from a repeat burst rather than a full frame.
    pub repeat: bool,
}

/// Receiver of decoded command events.
///
/// [`Consumer::accept`] is invoked synchronously from interrupt context. It
/// must return promptly, must not block, and must not call back into the
/// decoder. The event is a snapshot owned for the duration of the call only.
pub trait Consumer {
    /// Accept a decoded command.
    fn accept(&mut self, event: Event);
}

impl<F: FnMut(Event)> Consumer for F {
    fn accept(&mut self, event: Event) {
        self(event)
    }
}

/// A single-slot consumer holding the most recent event.
///
/// For applications that prefer not to run command logic inside the interrupt
/// handlers, a `Latch` decouples them: the handler deposits the event and a
/// non-interrupt context drains it with [`Latch::take`]. A newer event
/// overwrites an undrained one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Latch(Option<Event>);

impl Latch {
    /// Create an empty latch.
    pub const fn new() -> Self {
        Self(None)
    }

    /// Take the most recent event, leaving the latch empty.
    pub fn take(&mut self) -> Option<Event> {
        self.0.take()
    }
}

impl Consumer for Latch {
    fn accept(&mut self, event: Event) {
        self.0 = Some(event);
    }
}

/// Top-level decoding phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Waiting for a synchronization header.
    #[default]
    Synchronizing,
    /// Sampling the 96 raw bits of a frame.
    ReceivingCommand,
    /// Frame decoded; watching for repeat bursts.
    WaitRepeat,
}

/// Protocol state for one receiver line.
///
/// Constructed once, mutated only by [`Decoder::edge`] and [`Decoder::tick`],
/// and never deallocated during operation: reset means re-entering
/// [`State::Synchronizing`] with all fields zeroed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoder {
    // Output.
    bitmap: Bitmap,
    last_address: u16,
    last_command: u8,
    command_received: bool,

    // Measurement.
    shift_ticks: u32,
    sample_interval: u32,
    rearm: bool,
    bits_received: u8,
    oversamples: u32,
    oversample_count: u32,
    elapsed_ms: u32,

    // State. Exactly one of `sync` and `repeat` is live at a time,
    // selected by `state`.
    sync: Sync,
    repeat: Repeat,
    state: State,
}

impl Decoder {
    /// Create a decoder in its initial synchronizing state.
    pub const fn new() -> Self {
        Self {
            bitmap: Bitmap::new(),
            last_address: 0,
            last_command: 0,
            command_received: false,
            shift_ticks: 0,
            sample_interval: 0,
            rearm: false,
            bits_received: 0,
            oversamples: 0,
            oversample_count: 0,
            elapsed_ms: 0,
            sync: Sync::WaitRise,
            repeat: Repeat::WaitRise,
            state: State::Synchronizing,
        }
    }

    /// Notification entry point for an edge on the receiver line.
    ///
    /// The interrupt carries no direction, so the current level is re-read
    /// from `line`.
    pub fn edge(
        &mut self,
        timer: &mut impl Timer,
        line: &impl Line,
        consumer: &mut dyn Consumer,
    ) {
        match self.state {
            State::Synchronizing => self.sync_edge(timer, line),
            State::ReceivingCommand => {
                // Re-phase the sample clock to each data mark.
                if line.level() {
                    self.arm_sampling(timer);
                }
            }
            State::WaitRepeat => self.repeat_edge(timer, line, consumer),
        }
    }

    /// Notification entry point for a timer expiry.
    pub fn tick(
        &mut self,
        timer: &mut impl Timer,
        line: &impl Line,
        consumer: &mut dyn Consumer,
    ) {
        if self.rearm {
            // First expiry after an edge: switch from the one-shot phase
            // shift to the free-running sample clock.
            self.rearm = false;
            timer.stop();
            timer.start_continuous(self.sample_interval);
        }

        match self.state {
            State::Synchronizing => {}
            State::ReceivingCommand => {
                self.sample(line);

                if self.bits_received == timings::RAW_BITS {
                    self.finish_frame(timer, consumer);
                }
            }
            State::WaitRepeat => self.repeat_tick(timer),
        }
    }

    /// Return the decoder to its initial synchronizing state, stopping the
    /// timer and discarding any in-flight frame.
    pub fn reset(&mut self, timer: &mut impl Timer) {
        timer.stop();
        *self = Self::new();
    }

    /// Current top-level phase.
    pub fn state(&self) -> State {
        self.state
    }

    /// Raw sample slots filled so far in the current frame.
    pub fn bits_received(&self) -> u8 {
        self.bits_received
    }

    /// The raw sample bitmap. Only meaningful while receiving a command.
    pub fn samples(&self) -> &Bitmap {
        &self.bitmap
    }

    /// Whether a full frame has been decoded since the last reset.
    pub fn command_received(&self) -> bool {
        self.command_received
    }

    /// Address of the last fully decoded frame.
    pub fn last_address(&self) -> u16 {
        self.last_address
    }

    /// Command of the last fully decoded frame.
    pub fn last_command(&self) -> u8 {
        self.last_command
    }

    /// Arm the one-shot phase shift toward the first sample of the next
    /// mark, flagging the switch to continuous mode on its expiry.
    fn arm_sampling(&mut self, timer: &mut impl Timer) {
        timer.stop();
        timer.start_one_shot(self.shift_ticks);
        self.rearm = true;
    }

    /// Interpret the completed bitmap and hand off a valid command.
    fn finish_frame(&mut self, timer: &mut impl Timer, consumer: &mut dyn Consumer) {
        match frame::decode(&self.bitmap) {
            Ok(frame) => {
                self.last_address = frame.address;
                self.last_command = frame.command;
                self.command_received = true;

                self.state = State::WaitRepeat;
                timer.stop();
                timer.start_continuous(timings::HOUSEKEEPING_TICKS);
                // The frame itself outlasts the repeat pause, so the
                // watchdog starts partway into its window.
                self.elapsed_ms = timings::FRAME_LEAD_MS;

                consumer.accept(Event {
                    address: frame.address,
                    command: frame.command,
                    repeat: false,
                });
            }
            Err(_) => self.reset(timer),
        }
    }
}
