//! Request frames (PGN 59904) asking a node, or every node, to transmit a PGN.
//!
//! ```text
//! Byte 0 : requested PGN, bits 0-7
//! Byte 1 : requested PGN, bits 8-15
//! Byte 2 : requested PGN, bits 16-17 (0 for every PGN this crate decodes)
//! ```
use crate::error::CanIdBuildError;
use crate::protocol::signals::pgn;
use crate::protocol::transport::{can_frame::CanFrame, can_id::CanId};

/// Number of meaningful bytes in a request payload.
pub const REQUEST_LEN: usize = 3;

/// Build a request for `requested_pgn`.
///
/// Bytes past the third are padded with `0xFF` (not available).
pub fn build_request_frame(
    requested_pgn: u32,
    source_address: u8,
    destination: u8,
    priority: u8,
) -> Result<CanFrame, CanIdBuildError> {
    let mut data = [0xFFu8; 8];
    let pgn_bytes = requested_pgn.to_le_bytes();
    data[0] = pgn_bytes[0];
    data[1] = pgn_bytes[1];
    data[2] = pgn_bytes[2] & 0x03;

    let id = CanId::builder(pgn::REQUEST, source_address)
        .to_destination(destination)
        .with_priority(priority)
        .build()?;

    Ok(CanFrame {
        id,
        data,
        len: REQUEST_LEN,
    })
}

/// Read the PGN asked for by a request frame, if `frame` is one.
pub fn requested_pgn(frame: &CanFrame) -> Option<u32> {
    if frame.id.pgn() != pgn::REQUEST || frame.len < REQUEST_LEN {
        return None;
    }
    Some(u32::from_le_bytes([frame.data[0], frame.data[1], frame.data[2] & 0x03, 0]))
}
