//! Abstraction traits used by the transport layer (J1939 driver, timer, and tick source).
pub mod j1939_transport;
pub mod korri_timer;
pub mod tick_source;
