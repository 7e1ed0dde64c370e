#![no_std]

//! An interrupt-driven decoder for NEC-family infrared remote protocols.
//!
//! Clicker recovers (address, command, repeat) events from raw edge timing on
//! a single demodulated receiver line, using nothing but a hardware countdown
//! timer. All protocol state lives in one fixed-size object, no allocation is
//! performed, and both entry points are bounded and non-blocking, so they can
//! run directly inside interrupt handlers.
//!
//! Most users should begin with [`receiver::Receiver`], which owns the
//! decoder together with its timer and input line. Applications wiring the
//! decoder into an existing interrupt layout can drive the underlying
//! [`decode::Decoder`] directly.
//!
//! Bit timing is calibrated from each frame's own synchronization header
//! rather than from fixed constants, tolerating oscillator drift between
//! remotes and carrier modules. The timer is expected to tick at
//! [`timings::TICK_HZ`].
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `defmt`: derive `defmt::Format` on public types.

pub mod decode;
pub mod hw;
pub mod receiver;
pub mod timings;

pub use decode::{Consumer, Decoder, Event, Latch};
pub use receiver::Receiver;
