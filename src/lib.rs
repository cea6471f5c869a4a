//! `korri-j1939` library: decode SAE J1939 engine signals (fuel rate,
//! temperatures, engine speed, fuel level, throttle position) from raw CAN
//! payloads and drive a cooperative request/poll cycle in a `no_std`
//! environment. The CAN driver, timer and tick source are supplied by the
//! firmware through traits.
#![no_std]
//==================================================================================
/// Signal descriptor types shared by the signal table and the decoder.
pub mod core;
/// Domain errors (CAN identifier construction, decoding, polling).
pub mod error;
/// J1939 protocol implementation: signal table, transport abstractions,
/// polling dispatcher and passive bus monitor.
pub mod protocol;
//==================================================================================
