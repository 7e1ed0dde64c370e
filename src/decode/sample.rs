//! Raw bit sampling and the fixed-capacity sample bitmap.
//!
//! While a frame is being received the timer free-runs at the interval
//! calibrated from the header, and every expiry contributes one line reading.
//! Readings are grouped in threes and resolved by strict majority: a raw bit
//! is `1` only when all three oversamples were high, so a single noise
//! dropout within a mark forces the slot low rather than inventing a mark.

use crate::hw::Line;
use crate::timings;

use super::Decoder;

/// A fixed-capacity bit-addressable buffer of raw samples.
///
/// Holds [`Bitmap::CAPACITY`] bits, indexed from zero in arrival order.
/// Reads past the end return `false` and writes past the end are ignored,
/// so a decode cursor running off the tail sees only empty slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bitmap([u8; timings::RAW_BITS as usize / 8]);

impl Bitmap {
    /// Number of raw sample slots.
    pub const CAPACITY: u8 = timings::RAW_BITS;

    /// Create an empty bitmap.
    pub const fn new() -> Self {
        Self([0; timings::RAW_BITS as usize / 8])
    }

    /// Read the bit at `index`, or `false` if out of range.
    pub fn get(&self, index: u8) -> bool {
        if index >= Self::CAPACITY {
            return false;
        }
        self.0[usize::from(index / 8)] & (1 << (index % 8)) != 0
    }

    /// Write the bit at `index`, ignoring indices out of range.
    pub fn set(&mut self, index: u8, value: bool) {
        if index >= Self::CAPACITY {
            return;
        }
        if value {
            self.0[usize::from(index / 8)] |= 1 << (index % 8);
        } else {
            self.0[usize::from(index / 8)] &= !(1 << (index % 8));
        }
    }
}

impl Decoder {
    /// Take one oversample of the line, resolving a raw bit into the bitmap
    /// every [`timings::OVERSAMPLE`] readings.
    pub(super) fn sample(&mut self, line: &impl Line) {
        self.oversamples <<= 1;
        if line.level() {
            self.oversamples |= 1;
        }
        self.oversample_count += 1;

        if self.oversample_count == timings::OVERSAMPLE {
            let bit = self.oversamples.count_ones() == timings::OVERSAMPLE;
            self.bitmap.set(self.bits_received, bit);

            self.oversamples = 0;
            self.oversample_count = 0;
            self.bits_received += 1;
        }
    }
}
