//! In-memory representation of an SAE J1939 CAN frame.
use crate::protocol::transport::can_id::CanId;
use embedded_can::{ExtendedId, Id};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Raw J1939 frame as read from the CAN bus.
pub struct CanFrame {
    /// Full 29-bit CAN identifier stored inside a `u32`.
    pub id: CanId,
    /// Payload buffer. Classic CAN frames always provide eight bytes.
    pub data: [u8; 8],
    /// Number of valid payload bytes (Data Length Code, 0 to 8).
    pub len: usize,
}

impl CanFrame {
    /// Valid part of the payload, as announced by the DLC.
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len.min(self.data.len())]
    }
}

/// Bridge to HAL drivers built on `embedded-can`. Only extended data frames
/// carry J1939 traffic.
impl embedded_can::Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        let Id::Extended(id) = id.into() else {
            return None;
        };
        if data.len() > 8 {
            return None;
        }
        let mut buffer = [0u8; 8];
        buffer[..data.len()].copy_from_slice(data);
        Some(Self {
            id: CanId(id.as_raw()),
            data: buffer,
            len: data.len(),
        })
    }

    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        true
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        // CanId only keeps the lower 29 bits meaningful.
        match ExtendedId::new(self.id.0 & ExtendedId::MAX.as_raw()) {
            Some(id) => Id::Extended(id),
            None => Id::Extended(ExtendedId::ZERO),
        }
    }

    fn dlc(&self) -> usize {
        self.len
    }

    fn data(&self) -> &[u8] {
        self.payload()
    }
}
