//! Static configuration of a polling dispatcher: who we are on the bus, how
//! requests are addressed, what gets polled and how fast.
use embassy_time::Duration;

use crate::error::ConfigError;
use crate::protocol::managment::iso_name::IsoName;
use crate::protocol::signals::{pgn, spn};
use crate::protocol::transport::{
    CONTROL_PRIORITY, GLOBAL_ADDRESS, NULL_ADDRESS, QUERY_DELAY_MS,
};

/// Default source address of the polling node.
pub const DEFAULT_SOURCE_ADDRESS: u8 = 128;

/// One (PGN, SPN) pair polled by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuerySpec {
    pub pgn: u32,
    pub spn: u32,
}

impl QuerySpec {
    pub const fn new(pgn: u32, spn: u32) -> Self {
        Self { pgn, spn }
    }
}

/// Number of queries in one polling cycle.
pub const ROTATION_LEN: usize = 4;

/// Fuel temperature, fuel level, throttle position, engine speed.
pub const DEFAULT_ROTATION: [QuerySpec; ROTATION_LEN] = [
    QuerySpec::new(pgn::ENGINE_TEMPERATURE, spn::ENGINE_FUEL_TEMPERATURE_1),
    QuerySpec::new(pgn::DASH_DISPLAY, spn::FUEL_LEVEL_1),
    QuerySpec::new(pgn::FUEL_ECONOMY, spn::ENGINE_THROTTLE_POSITION),
    QuerySpec::new(pgn::ELECTRONIC_ENGINE_CONTROLLER_1, spn::ENGINE_SPEED),
];

/// Dispatcher settings, passed in at construction.
///
/// # Example
///
/// ```
/// use embassy_time::Duration;
/// use korri_j1939::protocol::managment::iso_name::IsoName;
/// use korri_j1939::protocol::polling::config::DispatcherConfig;
///
/// let config = DispatcherConfig::new(0x81, IsoName::from_raw(1 << 63))
///     .with_query_delay(Duration::from_millis(20));
/// assert!(config.validate().is_ok());
/// assert_eq!(config.query_delay_ms(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Address used as source of every request.
    pub source_address: u8,
    /// NAME of this unit.
    pub name: IsoName,
    /// Priority of request frames.
    pub request_priority: u8,
    /// Destination of request frames (255 = every node).
    pub request_destination: u8,
    /// Pause after each query step.
    pub query_delay: Duration,
    /// Signals polled by one cycle, in order.
    pub rotation: [QuerySpec; ROTATION_LEN],
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_SOURCE_ADDRESS,
            IsoName::from_bytes([0, 0, 0, 0, 0, 0, 0, 128]),
        )
    }
}

impl DispatcherConfig {
    /// Configuration with the J1939 defaults: control priority, global
    /// destination, 50 ms delay and [`DEFAULT_ROTATION`].
    pub const fn new(source_address: u8, name: IsoName) -> Self {
        Self {
            source_address,
            name,
            request_priority: CONTROL_PRIORITY,
            request_destination: GLOBAL_ADDRESS,
            query_delay: Duration::from_millis(QUERY_DELAY_MS as u64),
            rotation: DEFAULT_ROTATION,
        }
    }

    pub fn with_query_delay(mut self, delay: Duration) -> Self {
        self.query_delay = delay;
        self
    }

    /// Priority is capped to 3 bits.
    pub fn with_request_priority(mut self, priority: u8) -> Self {
        self.request_priority = priority & 0x07;
        self
    }

    pub fn with_request_destination(mut self, destination: u8) -> Self {
        self.request_destination = destination;
        self
    }

    pub fn with_rotation(mut self, rotation: [QuerySpec; ROTATION_LEN]) -> Self {
        self.rotation = rotation;
        self
    }

    /// Query delay in whole milliseconds, saturated to `u32`.
    pub fn query_delay_ms(&self) -> u32 {
        u32::try_from(self.query_delay.as_millis()).unwrap_or(u32::MAX)
    }

    /// Reject addresses that cannot source a frame.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_address >= NULL_ADDRESS {
            return Err(ConfigError::InvalidSourceAddress {
                address: self.source_address,
            });
        }
        Ok(())
    }
}
