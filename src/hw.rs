//! Hardware collaborator interfaces.
//!
//! The decoder owns exactly two pieces of hardware: a countdown timer and the
//! demodulated receiver line. Both are abstracted behind minimal traits so
//! the core can run against any platform's peripherals, or against simulated
//! implementations in tests.
//!
//! Once the decoder is active it is the sole owner of the timer's
//! configuration; nothing else may rearm or stop it concurrently.

/// A free-running hardware countdown timer.
///
/// The timer is expected to tick at [`crate::timings::TICK_HZ`]. Implementors
/// must count upward from zero on every start, and [`Timer::counter`] must
/// return the ticks elapsed since the most recent start.
pub trait Timer {
    /// Arm the timer to expire once after `ticks`.
    fn start_one_shot(&mut self, ticks: u32);

    /// Arm the timer to expire every `interval` ticks until stopped.
    fn start_continuous(&mut self, interval: u32);

    /// Stop the timer without expiring.
    fn stop(&mut self);

    /// Read the ticks elapsed since the timer was last started.
    fn counter(&self) -> u32;
}

/// The demodulated infrared receiver line.
///
/// Edge interrupts carry no direction, so the decoder re-reads the level
/// inside each handler. Implementations should return `true` while a mark
/// (carrier burst) is present; receivers with active-low outputs must invert
/// in this method.
pub trait Line {
    /// Read the current line level synchronously.
    fn level(&self) -> bool;
}

impl<L: Line> Line for &L {
    fn level(&self) -> bool {
        (*self).level()
    }
}
