//! Engine signals supported by the decoder: well-known PGN/SPN numbers and
//! the static table describing where each signal lives and how it is scaled.
//!
//! | Signal                     | PGN    | SPN | Bytes      | Resolution | Offset |
//! |----------------------------|--------|-----|------------|------------|--------|
//! | Engine Fuel Rate           | 0xFEF2 | 183 | 0-1 (MSB)  | 0.05 L/h   | 0      |
//! | Engine Throttle Position   | 0xFEF2 | 51  | 6          | 0.4 %      | 0      |
//! | Engine Fuel Temperature 1  | 0xFEEE | 174 | 1          | 1 °C       | -40    |
//! | Engine Speed               | 0xF004 | 190 | 3-4 (MSB)  | 0.125 rpm  | 0      |
//! | Fuel Level 1               | 0xFEFC | 96  | 1          | 0.4 %      | 0      |
//!
//! Engine Coolant Temperature (110) and Engine Oil Temperature 1 (175) are
//! declared in PGN 0xFEEE but not decoded yet; they answer with their SPN.
use crate::core::{Extraction, PgnDescriptor, SignalDescriptor};

pub mod decoder;

pub use decoder::{decode, decode_all, decode_frame, SignalReading};

/// Parameter Group Numbers used by this crate.
pub mod pgn {
    /// Dash Display (DD).
    pub const DASH_DISPLAY: u32 = 0xFEFC;
    /// Electronic Engine Controller 1 (EEC1).
    pub const ELECTRONIC_ENGINE_CONTROLLER_1: u32 = 0xF004;
    /// Fuel Economy, liquid (LFE).
    pub const FUEL_ECONOMY: u32 = 0xFEF2;
    /// Engine Temperature 1 (ET1).
    pub const ENGINE_TEMPERATURE: u32 = 0xFEEE;
    /// Request PGN, carries the requested PGN in its first three bytes.
    pub const REQUEST: u32 = 0xEA00;
}

/// Suspect Parameter Numbers used by this crate.
pub mod spn {
    pub const ENGINE_THROTTLE_POSITION: u32 = 51;
    pub const FUEL_LEVEL_1: u32 = 96;
    pub const ENGINE_COOLANT_TEMPERATURE: u32 = 110;
    pub const ENGINE_FUEL_TEMPERATURE_1: u32 = 174;
    pub const ENGINE_OIL_TEMPERATURE_1: u32 = 175;
    pub const ENGINE_FUEL_RATE: u32 = 183;
    pub const ENGINE_SPEED: u32 = 190;
}

//==================================================================================SIGNAL_TABLE
const DASH_DISPLAY_SIGNALS: &[SignalDescriptor] = &[SignalDescriptor {
    spn: spn::FUEL_LEVEL_1,
    name: "Fuel Level 1",
    extraction: Extraction::Byte(1),
    resolution: 0.4,
    offset: 0.0,
    unit: "%",
}];

const EEC1_SIGNALS: &[SignalDescriptor] = &[SignalDescriptor {
    spn: spn::ENGINE_SPEED,
    name: "Engine Speed",
    extraction: Extraction::WordHighFirst(3),
    resolution: 0.125,
    offset: 0.0,
    unit: "rpm",
}];

const FUEL_ECONOMY_SIGNALS: &[SignalDescriptor] = &[
    SignalDescriptor {
        spn: spn::ENGINE_FUEL_RATE,
        name: "Engine Fuel Rate",
        extraction: Extraction::WordHighFirst(0),
        resolution: 0.05,
        offset: 0.0,
        unit: "L/h",
    },
    SignalDescriptor {
        spn: spn::ENGINE_THROTTLE_POSITION,
        name: "Engine Throttle Position",
        extraction: Extraction::Byte(6),
        resolution: 0.4,
        offset: 0.0,
        unit: "%",
    },
];

const ENGINE_TEMPERATURE_SIGNALS: &[SignalDescriptor] = &[
    SignalDescriptor {
        spn: spn::ENGINE_COOLANT_TEMPERATURE,
        name: "Engine Coolant Temperature",
        extraction: Extraction::Inert,
        resolution: 1.0,
        offset: 0.0,
        unit: "°C",
    },
    SignalDescriptor {
        spn: spn::ENGINE_FUEL_TEMPERATURE_1,
        name: "Engine Fuel Temperature 1",
        extraction: Extraction::Byte(1),
        resolution: 1.0,
        offset: -40.0,
        unit: "°C",
    },
    SignalDescriptor {
        spn: spn::ENGINE_OIL_TEMPERATURE_1,
        name: "Engine Oil Temperature 1",
        extraction: Extraction::Inert,
        resolution: 1.0,
        offset: 0.0,
        unit: "°C",
    },
];

/// Every PGN understood by the decoder, with its signals.
pub static SIGNAL_TABLE: &[PgnDescriptor] = &[
    PgnDescriptor {
        pgn: pgn::DASH_DISPLAY,
        name: "Dash Display",
        signals: DASH_DISPLAY_SIGNALS,
    },
    PgnDescriptor {
        pgn: pgn::ELECTRONIC_ENGINE_CONTROLLER_1,
        name: "Electronic Engine Controller 1",
        signals: EEC1_SIGNALS,
    },
    PgnDescriptor {
        pgn: pgn::FUEL_ECONOMY,
        name: "Fuel Economy",
        signals: FUEL_ECONOMY_SIGNALS,
    },
    PgnDescriptor {
        pgn: pgn::ENGINE_TEMPERATURE,
        name: "Engine Temperature 1",
        signals: ENGINE_TEMPERATURE_SIGNALS,
    },
];

/// Largest number of signals carried by a single PGN of [`SIGNAL_TABLE`].
pub const MAX_SIGNALS_PER_PGN: usize = 3;

/// Find the descriptor of a PGN.
pub fn find_pgn(pgn: u32) -> Option<&'static PgnDescriptor> {
    SIGNAL_TABLE.iter().find(|descriptor| descriptor.pgn == pgn)
}

/// Find the descriptor of `spn` as carried by `pgn`.
pub fn find_signal(pgn: u32, spn: u32) -> Option<&'static SignalDescriptor> {
    find_pgn(pgn).and_then(|descriptor| descriptor.signal(spn))
}

/// Human-readable name of an SPN, whichever PGN declares it.
pub fn spn_name(spn: u32) -> Option<&'static str> {
    SIGNAL_TABLE
        .iter()
        .find_map(|descriptor| descriptor.signal(spn))
        .map(|signal| signal.name)
}
