//! Convenience wrapper owning the decoder and its hardware.
//!
//! A [`Receiver`] bundles the state machine with its timer, line, and
//! consumer so platform glue only has to route the two interrupt sources.
//! Applications with unusual interrupt layouts can drive
//! [`crate::decode::Decoder`] directly instead.

use core::mem;

use crate::decode::{Consumer, Decoder};
use crate::hw::{Line, Timer};

/// An infrared receiver: decoder state plus its exclusively owned hardware.
///
/// The platform must configure the line for edge interrupts on both
/// transitions and the timer to tick at [`crate::timings::TICK_HZ`] before
/// constructing the receiver, and must then route the pin interrupt to
/// [`Receiver::on_edge`] and the timer expiry to [`Receiver::on_tick`]. The
/// two handlers must not run concurrently or nest; interrupt masking at a
/// shared priority level satisfies this.
#[derive(Debug)]
pub struct Receiver<T, L, C> {
    decoder: Decoder,
    timer: T,
    line: L,
    consumer: C,
}

impl<T: Timer, L: Line, C: Consumer> Receiver<T, L, C> {
    /// Take ownership of the timer and line, installing the consumer.
    ///
    /// The decoder starts in its synchronizing state with the timer stopped.
    pub fn new(mut timer: T, line: L, consumer: C) -> Self {
        timer.stop();

        Self {
            decoder: Decoder::new(),
            timer,
            line,
            consumer,
        }
    }

    /// Edge interrupt entry point. Must be called on both rising and falling
    /// transitions of the line.
    pub fn on_edge(&mut self) {
        self.decoder
            .edge(&mut self.timer, &self.line, &mut self.consumer);
    }

    /// Timer expiry entry point.
    pub fn on_tick(&mut self) {
        self.decoder
            .tick(&mut self.timer, &self.line, &mut self.consumer);
    }

    /// Replace the installed consumer, returning the previous one.
    ///
    /// Not safe against concurrent decode activity: call before interrupts
    /// are enabled, or while both handlers are masked.
    pub fn set_consumer(&mut self, consumer: C) -> C {
        mem::replace(&mut self.consumer, consumer)
    }

    /// Inspect the decoder state.
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Stop the timer and release the hardware and consumer.
    pub fn release(mut self) -> (T, L, C) {
        self.timer.stop();
        (self.timer, self.line, self.consumer)
    }
}
