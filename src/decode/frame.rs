//! Pulse-distance interpretation of a completed sample bitmap.
//!
//! Each logical bit occupies a variable run of raw slots: a mark slot, a
//! space slot, and for a logical `1` two further space slots. The cursor
//! therefore advances by two or four depending on the data itself, which is
//! why 96 raw slots do not map to a fixed logical bit count.
//!
//! Bytes assemble from the least-significant bit upward and the 16-bit
//! address is little-endian, matching the on-air NEC ordering; consumers
//! depend on the byte values coming out unchanged.

use thiserror::Error;

use super::sample::Bitmap;

/// An error interpreting a sample bitmap.
///
/// Never surfaced past the decoder: any variant discards the frame and
/// returns the state machine to synchronization.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Invalid mark/space pattern.
    #[error("Invalid mark/space pattern at raw bit {0}.")]
    Pattern(u8),
    /// Command and inverted command do not sum to 0xFF.
    #[error("Command checksum mismatch ({command:#04x} against {check:#04x}).")]
    Check { command: u8, check: u8 },
}

/// A validated frame payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// 16-bit device address.
    pub address: u16,
    /// 8-bit command code.
    pub command: u8,
}

/// Decode and validate a completed sample bitmap.
pub fn decode(bits: &Bitmap) -> Result<Frame, FrameError> {
    let cursor = &mut 0;

    let address = word(bits, cursor)?;
    let command = byte(bits, cursor)?;
    let check = byte(bits, cursor)?;

    if command.wrapping_add(check) != 0xFF {
        Err(FrameError::Check { command, check })?;
    }

    Ok(Frame { address, command })
}

/// Decode one logical bit at the cursor, advancing it by the width consumed.
fn bit(bits: &Bitmap, cursor: &mut u8) -> Result<bool, FrameError> {
    // A logical bit always opens with a mark slot and a space slot.
    if !bits.get(*cursor) || bits.get(*cursor + 1) {
        Err(FrameError::Pattern(*cursor))?;
    }

    // A mark in the third slot already belongs to the next bit.
    if bits.get(*cursor + 2) {
        *cursor += 2;
        return Ok(false);
    }

    if bits.get(*cursor + 3) {
        Err(FrameError::Pattern(*cursor))?;
    }

    *cursor += 4;
    Ok(true)
}

/// Decode eight logical bits, least-significant first.
fn byte(bits: &Bitmap, cursor: &mut u8) -> Result<u8, FrameError> {
    let mut value = 0;

    for _ in 0..8 {
        value >>= 1;
        if bit(bits, cursor)? {
            value |= 0x80;
        }
    }

    Ok(value)
}

/// Decode a little-endian 16-bit word.
fn word(bits: &Bitmap, cursor: &mut u8) -> Result<u16, FrameError> {
    let low = byte(bits, cursor)?;
    let high = byte(bits, cursor)?;

    Ok(u16::from_le_bytes([low, high]))
}
