//! Synchronization header detection and timing calibration.
//!
//! A frame opens with a long mark followed by a long space. Beyond marking
//! the start of a frame, the header is the timing reference: the mark spans
//! sixteen nominal unit widths, so dividing its measured width by sixteen
//! (and again by the oversampling factor) yields this remote's sample
//! interval without assuming a carrier timing constant.

use crate::hw::{Line, Timer};
use crate::timings;

use super::{Decoder, State};

/// Synchronization detector state, driven by edge notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sync {
    /// Waiting for the line to rise into the header mark.
    #[default]
    WaitRise,
    /// Mark in progress; waiting for the line to fall.
    WaitFall,
    /// Gap in progress; waiting for the line to rise into the first data
    /// mark.
    WaitRiseEnd,
    /// Header recognized; sampling has taken over.
    Done,
}

impl Decoder {
    pub(super) fn sync_edge(&mut self, timer: &mut impl Timer, line: &impl Line) {
        match self.sync {
            Sync::WaitRise => {
                if line.level() {
                    timer.stop();
                    timer.start_one_shot(timings::SYNC_PULSE_MAX);
                    self.sync = Sync::WaitFall;
                }
            }
            Sync::WaitFall => {
                if !line.level() {
                    let pulse = timer.counter();
                    if pulse > timings::SYNC_PULSE_MIN {
                        self.sample_interval =
                            pulse / timings::HEADER_UNITS / timings::OVERSAMPLE;
                        self.shift_ticks = self.sample_interval / 2;

                        self.sync = Sync::WaitRiseEnd;
                        timer.stop();
                        timer.start_one_shot(timings::SYNC_GAP_MAX);
                    } else {
                        // Too short to be a header mark; treat as noise.
                        self.reset(timer);
                    }
                }
            }
            Sync::WaitRiseEnd => {
                if line.level() {
                    let gap = timer.counter();
                    if gap > timings::SYNC_GAP_MIN {
                        self.sync = Sync::Done;
                        self.state = State::ReceivingCommand;
                        self.arm_sampling(timer);
                    } else {
                        self.reset(timer);
                    }
                }
            }
            Sync::Done => {}
        }
    }
}
