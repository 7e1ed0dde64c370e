//! Protocol timing constants.
//!
//! All tick values assume the timer frequency in [`TICK_HZ`] (0.25 µs per
//! tick). The bounds gate plausibility only; the per-bit sample interval is
//! derived from each frame's own header rather than from these constants.

/// Required timer tick frequency, in hertz.
pub const TICK_HZ: u32 = 4_000_000;

/// Raw sample slots captured per frame.
pub const RAW_BITS: u8 = 96;

/// Nominal unit widths spanned by the synchronization header pulse.
pub const HEADER_UNITS: u32 = 16;

/// Samples taken per raw bit. Bounded by the width of the sample accumulator.
pub const OVERSAMPLE: u32 = 3;

/// Longest plausible synchronization header pulse, in ticks (10 ms).
pub const SYNC_PULSE_MAX: u32 = 40_000;

/// Shortest valid synchronization header pulse, in ticks (8 ms).
pub const SYNC_PULSE_MIN: u32 = 32_000;

/// Longest plausible synchronization header gap, in ticks (5 ms).
pub const SYNC_GAP_MAX: u32 = 20_000;

/// Shortest valid synchronization header gap, in ticks (4 ms).
pub const SYNC_GAP_MIN: u32 = 16_000;

/// Longest plausible repeat burst pulse, in ticks (10 ms).
pub const REPEAT_PULSE_MAX: u32 = 40_000;

/// Shortest valid repeat burst pulse, in ticks (8 ms).
pub const REPEAT_PULSE_MIN: u32 = 32_000;

/// Longest plausible repeat burst gap, in ticks (2.5 ms).
pub const REPEAT_GAP_MAX: u32 = 10_000;

/// Shortest valid repeat burst gap, in ticks (2 ms).
pub const REPEAT_GAP_MIN: u32 = 8_000;

/// Housekeeping timer period while waiting for repeats, in ticks (10 ms).
pub const HOUSEKEEPING_TICKS: u32 = 40_000;

/// Housekeeping timer period, in milliseconds.
pub const HOUSEKEEPING_MS: u32 = 10;

/// Milliseconds without a repeat burst before the decoder resets.
pub const REPEAT_TIMEOUT_MS: u32 = 120;

/// Elapsed-time preset applied after a full frame, in milliseconds.
///
/// A full frame takes longer than the pause between repeat bursts, so the
/// watchdog starts partway into its window.
pub const FRAME_LEAD_MS: u32 = 50;
