//! Defines the "data contract" between the static signal table and the
//! decoder that interprets it.
//!
//! Each PGN is described once by a [`PgnDescriptor`] listing the signals it
//! carries. The decoder walks these descriptors instead of hard-coding one
//! branch per signal, so supporting a new SPN means adding a table row.

/// Size of a classic CAN payload. Every supported PGN fits in a single frame.
pub const FRAME_DATA_LEN: usize = 8;

/// How the raw value of a signal is laid out in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Extraction {
    /// Single unsigned byte at the given offset.
    Byte(usize),
    /// Unsigned 16-bit word, high byte at `offset`, low byte at `offset + 1`.
    WordHighFirst(usize),
    /// Signal is listed for the PGN but not decoded yet: the SPN number itself
    /// is returned as the value.
    Inert,
}

impl Extraction {
    /// Highest byte index touched by this extraction, if any.
    pub const fn last_byte(&self) -> Option<usize> {
        match self {
            Extraction::Byte(offset) => Some(*offset),
            Extraction::WordHighFirst(offset) => Some(*offset + 1),
            Extraction::Inert => None,
        }
    }
}

/// Descriptor for a single signal (SPN) inside a PGN.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalDescriptor {
    /// 1. Suspect Parameter Number.
    pub spn: u32,
    /// 2. Human-readable name.
    pub name: &'static str,
    /// 3. Location of the raw value.
    pub extraction: Extraction,
    /// 4. Resolution factor applied to the raw value.
    pub resolution: f64,
    /// 5. Offset added after scaling.
    pub offset: f64,
    /// 6. Engineering unit of the scaled value.
    pub unit: &'static str,
}

/// Descriptor for a PGN and the signals it transports.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PgnDescriptor {
    /// Parameter Group Number.
    pub pgn: u32,
    /// Human-readable name.
    pub name: &'static str,
    /// Signals carried by the PGN, in payload order.
    pub signals: &'static [SignalDescriptor],
}

impl PgnDescriptor {
    /// Look up the descriptor of `spn` inside this PGN.
    pub fn signal(&self, spn: u32) -> Option<&'static SignalDescriptor> {
        self.signals.iter().find(|signal| signal.spn == spn)
    }
}
