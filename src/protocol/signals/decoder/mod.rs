//! Pure signal decoder: resolve a (PGN, SPN) pair through [`SIGNAL_TABLE`],
//! pull the raw value out of the payload and apply `raw * resolution + offset`.
//!
//! The decoder keeps no state; the same inputs always produce the same
//! output.
//!
//! [`SIGNAL_TABLE`]: super::SIGNAL_TABLE
use crate::core::{Extraction, SignalDescriptor, FRAME_DATA_LEN};
use crate::error::DecodeError;
use crate::protocol::signals::{find_pgn, find_signal};
use crate::protocol::transport::can_frame::CanFrame;

/// One decoded signal, as produced by [`decode_all`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalReading {
    pub spn: u32,
    pub value: i16,
}

/// Decode `spn` out of a payload belonging to `pgn`.
///
/// The payload must hold a full classic CAN frame (8 bytes); bytes beyond the
/// eighth are ignored. Values are truncated toward zero and saturated to the
/// `i16` range.
///
/// # Errors
///
/// - [`DecodeError::InvalidDataLength`] when `payload` is shorter than 8 bytes.
/// - [`DecodeError::UnsupportedSignal`] when the PGN is unknown or does not carry `spn`.
///
/// # Example
///
/// ```
/// use korri_j1939::protocol::signals::{decode, pgn, spn};
///
/// let payload = [0x00, 0xC8, 0, 0, 0, 0, 0x64, 0];
/// assert_eq!(decode(pgn::FUEL_ECONOMY, spn::ENGINE_FUEL_RATE, &payload), Ok(10));
/// assert_eq!(decode(pgn::FUEL_ECONOMY, spn::ENGINE_THROTTLE_POSITION, &payload), Ok(40));
/// ```
pub fn decode(pgn: u32, spn: u32, payload: &[u8]) -> Result<i16, DecodeError> {
    let data = full_frame(payload)?;
    let signal = find_signal(pgn, spn).ok_or(DecodeError::UnsupportedSignal { pgn, spn })?;
    Ok(apply(signal, data))
}

/// Decode `spn` from the valid bytes of a received frame.
pub fn decode_frame(pgn: u32, spn: u32, frame: &CanFrame) -> Result<i16, DecodeError> {
    decode(pgn, spn, frame.payload())
}

/// Decode every signal declared for `pgn` into `out`, in table order.
///
/// Returns the number of readings written: `0` for a PGN missing from the
/// table. Readings that do not fit in `out` are dropped.
pub fn decode_all(
    pgn: u32,
    payload: &[u8],
    out: &mut [SignalReading],
) -> Result<usize, DecodeError> {
    let data = full_frame(payload)?;
    let Some(descriptor) = find_pgn(pgn) else {
        return Ok(0);
    };

    let mut written = 0;
    for (slot, signal) in out.iter_mut().zip(descriptor.signals.iter()) {
        *slot = SignalReading {
            spn: signal.spn,
            value: apply(signal, data),
        };
        written += 1;
    }
    Ok(written)
}

/// Check the payload length and borrow it as a fixed-size frame.
fn full_frame(payload: &[u8]) -> Result<&[u8; FRAME_DATA_LEN], DecodeError> {
    payload
        .get(..FRAME_DATA_LEN)
        .and_then(|data| data.try_into().ok())
        .ok_or(DecodeError::InvalidDataLength {
            expected: FRAME_DATA_LEN,
            actual: payload.len(),
        })
}

/// Extract and scale one signal. Offsets in the table always fit in 8 bytes.
fn apply(signal: &SignalDescriptor, data: &[u8; FRAME_DATA_LEN]) -> i16 {
    let raw: u16 = match signal.extraction {
        Extraction::Byte(offset) => data[offset] as u16,
        // High byte first, as transmitted by the engine controllers this table targets.
        Extraction::WordHighFirst(offset) => ((data[offset] as u16) << 8) | data[offset + 1] as u16,
        Extraction::Inert => return signal.spn as i16,
    };
    // `as` truncates toward zero and saturates at the i16 bounds.
    (raw as f64 * signal.resolution + signal.offset) as i16
}
