//! High-level components of the J1939 engine application layer: signal
//! table and decoder, unit identity, CAN transport, polling and monitoring.
pub mod managment;
pub mod monitor;
pub mod polling;
pub mod signals;
pub mod transport;
