//! Repeat burst detection and the staleness watchdog.
//!
//! While a button is held the remote does not resend the frame; it sends a
//! short mark/gap burst meaning "repeat the last command". The detector
//! mirrors the synchronization detector with tighter gap bounds, re-emitting
//! the stored address and command on each confirmed burst.
//!
//! Between bursts a 10 ms housekeeping timer accumulates elapsed time. Once
//! it passes the repeat timeout the whole decoder resets; this watchdog is
//! the only path back to synchronization after a successful decode, and the
//! sole self-healing mechanism against a stalled line.

use crate::hw::{Line, Timer};
use crate::timings;

use super::{Consumer, Decoder, Event};

/// Repeat detector state, driven by edge and timer notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Repeat {
    /// Waiting for the line to rise into a burst mark.
    #[default]
    WaitRise,
    /// Mark in progress; waiting for the line to fall.
    WaitFall,
    /// Gap in progress; waiting for the confirming rise.
    WaitRiseEnd,
    /// Corrupt burst; edges are ignored until the watchdog fires.
    Fault,
}

impl Decoder {
    pub(super) fn repeat_edge(
        &mut self,
        timer: &mut impl Timer,
        line: &impl Line,
        consumer: &mut dyn Consumer,
    ) {
        match self.repeat {
            Repeat::WaitRise => {
                if line.level() {
                    timer.stop();
                    timer.start_one_shot(timings::REPEAT_PULSE_MAX);
                    self.repeat = Repeat::WaitFall;
                }
            }
            Repeat::WaitFall => {
                if !line.level() {
                    let pulse = timer.counter();
                    if pulse > timings::REPEAT_PULSE_MIN {
                        self.repeat = Repeat::WaitRiseEnd;
                        timer.stop();
                        timer.start_one_shot(timings::REPEAT_GAP_MAX);
                    } else {
                        self.fault(timer);
                    }
                }
            }
            Repeat::WaitRiseEnd => {
                if line.level() {
                    let gap = timer.counter();
                    if gap > timings::REPEAT_GAP_MIN {
                        consumer.accept(Event {
                            address: self.last_address,
                            command: self.last_command,
                            repeat: true,
                        });

                        self.elapsed_ms = 0;
                        self.repeat = Repeat::WaitRise;
                        timer.stop();
                        timer.start_continuous(timings::HOUSEKEEPING_TICKS);
                    } else {
                        self.fault(timer);
                    }
                }
            }
            Repeat::Fault => {}
        }
    }

    /// Housekeeping expiry: account elapsed time and reset once stale.
    pub(super) fn repeat_tick(&mut self, timer: &mut impl Timer) {
        self.elapsed_ms += timings::HOUSEKEEPING_MS;
        if self.elapsed_ms > timings::REPEAT_TIMEOUT_MS {
            self.reset(timer);
        }
    }

    /// Suppress further edge-driven work for this window, leaving only the
    /// watchdog running.
    fn fault(&mut self, timer: &mut impl Timer) {
        timer.stop();
        timer.start_continuous(timings::HOUSEKEEPING_TICKS);
        self.repeat = Repeat::Fault;
    }
}
